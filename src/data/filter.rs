use std::collections::BTreeSet;

use super::model::{Dataset, IncomeBracket, Record};

// ---------------------------------------------------------------------------
// Filter predicate: price range ∧ category membership ∧ income bracket
// ---------------------------------------------------------------------------

/// Lower edge of the price slider.
pub const PRICE_MIN: f64 = 0.0;

/// Upper edge of the price slider. One unit above the dataset's nominal
/// $500,000 ceiling so ceiling-valued rows survive the inclusive bound.
pub const PRICE_CEILING: f64 = 500_001.0;

/// The complete filter selection for one evaluation. Rebuilt from widget
/// state whenever any input changes; holds no state of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Inclusive lower price bound.
    pub price_min: f64,
    /// Inclusive upper price bound.
    pub price_max: f64,
    /// Selected `ocean_proximity` values. Empty means "nothing selected",
    /// not "everything".
    pub categories: BTreeSet<String>,
    /// The single active income band.
    pub bracket: IncomeBracket,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            price_min: PRICE_MIN,
            price_max: PRICE_CEILING,
            categories: BTreeSet::new(),
            bracket: IncomeBracket::Low,
        }
    }
}

impl FilterCriteria {
    /// The reference defaults: full price range, every category present in
    /// the dataset selected, Low bracket active.
    pub fn select_all(dataset: &Dataset) -> Self {
        FilterCriteria {
            categories: dataset.categories.clone(),
            ..FilterCriteria::default()
        }
    }

    /// Whether a single record passes all three clauses.
    pub fn matches(&self, record: &Record) -> bool {
        record.median_house_value >= self.price_min
            && record.median_house_value <= self.price_max
            && self.categories.contains(&record.ocean_proximity)
            && self.bracket.contains(record.median_income)
    }
}

/// Return indices of records passing the criteria, in dataset order.
///
/// Inverted price bounds and an empty category selection both yield an empty
/// result rather than an error. The dataset itself is never touched.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.categories.is_empty() {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn three_block_dataset() -> Dataset {
        Dataset::from_records(vec![
            record(100_000.0, 2.0, "INLAND"),
            record(300_000.0, 5.0, "NEAR OCEAN"),
            record(450_000.0, 3.0, "INLAND"),
        ])
    }

    fn criteria(categories: &[&str], bracket: IncomeBracket) -> FilterCriteria {
        FilterCriteria {
            categories: categories.iter().map(|s| s.to_string()).collect(),
            bracket,
            ..FilterCriteria::default()
        }
    }

    #[test]
    fn inland_low_keeps_only_the_first_block() {
        let ds = three_block_dataset();
        let idx = filtered_indices(&ds, &criteria(&["INLAND"], IncomeBracket::Low));
        // Block 2 has income 3.0 (Medium), so only block 0 survives.
        assert_eq!(idx, vec![0]);
    }

    #[test]
    fn medium_bracket_keeps_only_the_third_block() {
        let ds = three_block_dataset();
        let idx = filtered_indices(
            &ds,
            &criteria(&["INLAND", "NEAR OCEAN"], IncomeBracket::Medium),
        );
        // Block 1 has income 5.0 (High), block 0 is Low; only block 2 matches.
        assert_eq!(idx, vec![2]);
    }

    #[test]
    fn every_survivor_satisfies_all_clauses() {
        let ds = three_block_dataset();
        let c = FilterCriteria {
            price_min: 50_000.0,
            price_max: 460_000.0,
            ..criteria(&["INLAND", "NEAR OCEAN", "ISLAND"], IncomeBracket::Medium)
        };
        for &i in &filtered_indices(&ds, &c) {
            assert!(c.matches(&ds.records[i]));
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = three_block_dataset();
        let c = criteria(&["INLAND"], IncomeBracket::Medium);
        let once: Vec<Record> = filtered_indices(&ds, &c)
            .into_iter()
            .map(|i| ds.records[i].clone())
            .collect();
        let view = Dataset::from_records(once.clone());
        let twice: Vec<Record> = filtered_indices(&view, &c)
            .into_iter()
            .map(|i| view.records[i].clone())
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_category_selection_hides_everything() {
        let ds = three_block_dataset();
        assert!(filtered_indices(&ds, &criteria(&[], IncomeBracket::Low)).is_empty());
    }

    #[test]
    fn inverted_price_bounds_yield_empty_not_error() {
        let ds = three_block_dataset();
        let c = FilterCriteria {
            price_min: 100_000.0,
            price_max: 50_000.0,
            ..criteria(&["INLAND", "NEAR OCEAN"], IncomeBracket::Low)
        };
        assert!(filtered_indices(&ds, &c).is_empty());
    }

    #[test]
    fn price_bounds_are_inclusive_up_to_the_ceiling() {
        let ds = Dataset::from_records(vec![
            record(PRICE_MIN, 2.0, "INLAND"),
            record(500_000.0, 2.0, "INLAND"),
            record(PRICE_CEILING, 2.0, "INLAND"),
        ]);
        let idx = filtered_indices(&ds, &criteria(&["INLAND"], IncomeBracket::Low));
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn empty_dataset_yields_empty_view() {
        let ds = Dataset::from_records(Vec::new());
        let c = criteria(&["INLAND"], IncomeBracket::Low);
        assert!(filtered_indices(&ds, &c).is_empty());
    }

    #[test]
    fn filtering_leaves_the_dataset_untouched() {
        let ds = three_block_dataset();
        let before = ds.records.clone();
        let _ = filtered_indices(&ds, &criteria(&["INLAND"], IncomeBracket::Low));
        assert_eq!(ds.records, before);
    }
}
