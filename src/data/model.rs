use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Record – one housing block group (one CSV row)
// ---------------------------------------------------------------------------

/// A single block-group observation from the 1990 census dataset.
///
/// The five fields the filters and aggregates depend on are mandatory; the
/// remaining columns are carried through for the raw-data table.
/// `total_bedrooms` stays optional because the source file genuinely has
/// rows without it.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub longitude: f64,
    pub latitude: f64,
    pub median_house_value: f64,
    pub median_income: f64,
    pub ocean_proximity: String,
    pub housing_median_age: Option<f64>,
    pub total_rooms: Option<f64>,
    pub total_bedrooms: Option<f64>,
    pub population: Option<f64>,
    pub households: Option<f64>,
}

/// Deserialization target for one CSV row, before validation.
/// Every field is optional so a missing cell surfaces as `None` rather than
/// failing the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub housing_median_age: Option<f64>,
    pub total_rooms: Option<f64>,
    pub total_bedrooms: Option<f64>,
    pub population: Option<f64>,
    pub households: Option<f64>,
    pub median_income: Option<f64>,
    pub median_house_value: Option<f64>,
    pub ocean_proximity: Option<String>,
}

impl RawRecord {
    /// Promote to a [`Record`] if all required fields are present.
    /// Returns `None` for rows the loader should drop.
    pub fn validate(self) -> Option<Record> {
        let ocean_proximity = self.ocean_proximity.filter(|s| !s.trim().is_empty())?;
        Some(Record {
            longitude: self.longitude?,
            latitude: self.latitude?,
            median_house_value: self.median_house_value?,
            median_income: self.median_income?,
            ocean_proximity,
            housing_median_age: self.housing_median_age,
            total_rooms: self.total_rooms,
            total_bedrooms: self.total_bedrooms,
            population: self.population,
            households: self.households,
        })
    }
}

// ---------------------------------------------------------------------------
// IncomeBracket – single-select income band
// ---------------------------------------------------------------------------

/// The three income bands. They partition the income axis: every value
/// belongs to exactly one band (2.5 is Low, 4.5 is High, everything strictly
/// between is Medium).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeBracket {
    Low,
    Medium,
    High,
}

impl IncomeBracket {
    pub const ALL: [IncomeBracket; 3] =
        [IncomeBracket::Low, IncomeBracket::Medium, IncomeBracket::High];

    /// Whether `median_income` falls inside this band.
    pub fn contains(self, income: f64) -> bool {
        match self {
            IncomeBracket::Low => income <= 2.5,
            IncomeBracket::Medium => income > 2.5 && income < 4.5,
            IncomeBracket::High => income >= 4.5,
        }
    }

    /// Widget / sidebar label, inequality included as in the reference UI.
    pub fn label(self) -> &'static str {
        match self {
            IncomeBracket::Low => "Low (\u{2264} 2.5)",
            IncomeBracket::Medium => "Medium (> 2.5 & < 4.5)",
            IncomeBracket::High => "High (\u{2265} 4.5)",
        }
    }
}

impl fmt::Display for IncomeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full validated dataset with the pre-computed category index.
/// Built once per session and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All block groups, in file order.
    pub records: Vec<Record>,
    /// Sorted set of distinct `ocean_proximity` values.
    pub categories: BTreeSet<String>,
}

impl Dataset {
    /// Build the category index from validated records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let categories = records
            .iter()
            .map(|r| r.ocean_proximity.clone())
            .collect();
        Dataset { records, categories }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(value: f64, income: f64, proximity: &str) -> Record {
        Record {
            longitude: -122.0,
            latitude: 37.0,
            median_house_value: value,
            median_income: income,
            ocean_proximity: proximity.to_string(),
            housing_median_age: Some(30.0),
            total_rooms: Some(1500.0),
            total_bedrooms: Some(300.0),
            population: Some(900.0),
            households: Some(280.0),
        }
    }

    #[test]
    fn validate_accepts_complete_row() {
        let raw = RawRecord {
            longitude: Some(-122.23),
            latitude: Some(37.88),
            median_house_value: Some(452600.0),
            median_income: Some(8.3252),
            ocean_proximity: Some("NEAR BAY".to_string()),
            total_bedrooms: None,
            ..Default::default()
        };
        let rec = raw.validate().unwrap();
        assert_eq!(rec.ocean_proximity, "NEAR BAY");
        assert_eq!(rec.total_bedrooms, None);
    }

    #[test]
    fn validate_rejects_missing_required_field() {
        let raw = RawRecord {
            longitude: Some(-122.23),
            latitude: Some(37.88),
            median_house_value: None,
            median_income: Some(8.3252),
            ocean_proximity: Some("NEAR BAY".to_string()),
            ..Default::default()
        };
        assert!(raw.validate().is_none());

        let raw = RawRecord {
            longitude: Some(-122.23),
            latitude: Some(37.88),
            median_house_value: Some(452600.0),
            median_income: Some(8.3252),
            ocean_proximity: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(raw.validate().is_none());
    }

    #[test]
    fn dataset_indexes_categories() {
        let ds = Dataset::from_records(vec![
            record(100_000.0, 2.0, "INLAND"),
            record(300_000.0, 5.0, "NEAR OCEAN"),
            record(450_000.0, 3.0, "INLAND"),
        ]);
        assert_eq!(ds.len(), 3);
        assert!(!ds.is_empty());
        let cats: Vec<&str> = ds.categories.iter().map(String::as_str).collect();
        assert_eq!(cats, ["INLAND", "NEAR OCEAN"]);
    }

    #[test]
    fn brackets_partition_the_income_axis() {
        for income in [0.0, 2.5, 2.500001, 3.0, 4.499999, 4.5, 15.0] {
            let holding: Vec<IncomeBracket> = IncomeBracket::ALL
                .into_iter()
                .filter(|b| b.contains(income))
                .collect();
            assert_eq!(holding.len(), 1, "income {income} matched {holding:?}");
        }
        assert!(IncomeBracket::Low.contains(2.5));
        assert!(IncomeBracket::Medium.contains(2.500001));
        assert!(IncomeBracket::Medium.contains(4.499999));
        assert!(IncomeBracket::High.contains(4.5));
    }
}
