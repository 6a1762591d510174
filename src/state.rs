use crate::color::CategoryColors;
use crate::data::filter::{FilterCriteria, filtered_indices};
use crate::data::loader::LoadError;
use crate::data::model::{Dataset, IncomeBracket};
use crate::data::stats::{self, HISTOGRAM_BINS, Histogram, SummaryStats};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// One recomputation pass ([`AppState::refilter`]) runs per filter change and
/// refreshes the cached view, stats, and histogram together; the widgets only
/// ever read those caches.
pub struct AppState {
    /// The session's dataset, loaded once at startup (None after a failed load).
    pub dataset: Option<Dataset>,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Indices of records passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates over the visible records; `None` means "no data".
    pub stats: Option<SummaryStats>,

    /// House-value distribution of the visible records.
    pub histogram: Option<Histogram>,

    /// Stable colour per ocean-proximity category.
    pub colors: Option<CategoryColors>,

    /// Fatal load failure message shown instead of the dashboard.
    pub load_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::default(),
            visible_indices: Vec::new(),
            stats: None,
            histogram: None,
            colors: None,
            load_error: None,
        }
    }
}

impl AppState {
    /// Build the session state from the one startup load.
    pub fn from_load(result: Result<Dataset, LoadError>) -> Self {
        let mut state = AppState::default();
        match result {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => state.load_error = Some(e.to_string()),
        }
        state
    }

    /// Ingest the loaded dataset and initialise the default criteria:
    /// full price range, every category selected, Low bracket active.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.criteria = FilterCriteria::select_all(&dataset);
        self.colors = Some(CategoryColors::new(&dataset.categories));
        self.dataset = Some(dataset);
        self.load_error = None;
        self.refilter();
    }

    /// Recompute the visible indices, stats, and histogram after any
    /// criteria change. The sole trigger for recomputation.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.criteria);
            self.stats = stats::summarize(ds, &self.visible_indices);
            self.histogram = Histogram::over_prices(ds, &self.visible_indices, HISTOGRAM_BINS);
        }
    }

    /// Toggle one category in the selection.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.criteria.categories.remove(category) {
            self.criteria.categories.insert(category.to_string());
        }
        self.refilter();
    }

    /// Select every category present in the dataset.
    pub fn select_all_categories(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria.categories = ds.categories.clone();
            self.refilter();
        }
    }

    /// Clear the category selection (hides every record).
    pub fn select_no_categories(&mut self) {
        self.criteria.categories.clear();
        self.refilter();
    }

    /// Switch the active income bracket.
    pub fn set_bracket(&mut self, bracket: IncomeBracket) {
        if self.criteria.bracket != bracket {
            self.criteria.bracket = bracket;
            self.refilter();
        }
    }
}
