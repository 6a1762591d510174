use super::model::Dataset;

// ---------------------------------------------------------------------------
// Summary statistics over a filtered view
// ---------------------------------------------------------------------------

/// Default bin count for the house-value distribution.
pub const HISTOGRAM_BINS: usize = 30;

/// Aggregates over the records a filter passed. Only ever constructed for a
/// non-empty view; an empty view is represented by `None` upstream so no
/// surface has to deal with NaN means.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean_price: f64,
    pub mean_income: f64,
    pub mean_longitude: f64,
    pub mean_latitude: f64,
    pub median_price: f64,
}

/// Compute [`SummaryStats`] over the records selected by `indices`.
/// Returns `None` for an empty view (the explicit "no data" state).
pub fn summarize(dataset: &Dataset, indices: &[usize]) -> Option<SummaryStats> {
    if indices.is_empty() {
        return None;
    }

    let mut price_sum = 0.0;
    let mut income_sum = 0.0;
    let mut lon_sum = 0.0;
    let mut lat_sum = 0.0;
    let mut prices = Vec::with_capacity(indices.len());

    for &i in indices {
        let r = &dataset.records[i];
        price_sum += r.median_house_value;
        income_sum += r.median_income;
        lon_sum += r.longitude;
        lat_sum += r.latitude;
        prices.push(r.median_house_value);
    }

    let n = indices.len() as f64;
    Some(SummaryStats {
        count: indices.len(),
        mean_price: price_sum / n,
        mean_income: income_sum / n,
        mean_longitude: lon_sum / n,
        mean_latitude: lat_sum / n,
        median_price: median(&mut prices),
    })
}

/// Statistical median; mean of the two middle values for even counts.
/// Callers guarantee a non-empty slice.
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

// ---------------------------------------------------------------------------
// Fixed-width histogram of median house values
// ---------------------------------------------------------------------------

/// Fixed-width binning of `median_house_value` over a filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub counts: Vec<usize>,
    pub min: f64,
    pub bin_width: f64,
}

impl Histogram {
    /// Bin the house values of the selected records into `bins` equal-width
    /// buckets spanning the observed range. `None` for an empty view.
    pub fn over_prices(dataset: &Dataset, indices: &[usize], bins: usize) -> Option<Histogram> {
        if indices.is_empty() || bins == 0 {
            return None;
        }

        let values: Vec<f64> = indices
            .iter()
            .map(|&i| dataset.records[i].median_house_value)
            .collect();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        // All values equal: a single degenerate bucket keeps the chart sane.
        let range = max - min;
        let bin_width = if range.abs() < f64::EPSILON {
            1.0
        } else {
            range / bins as f64
        };

        let mut counts = vec![0usize; bins];
        for v in values {
            let bin = (((v - min) / bin_width) as usize).min(bins - 1);
            counts[bin] += 1;
        }

        Some(Histogram {
            counts,
            min,
            bin_width,
        })
    }

    /// Midpoint of the given bin, for bar placement.
    pub fn center(&self, bin: usize) -> f64 {
        self.min + (bin as f64 + 0.5) * self.bin_width
    }
}
