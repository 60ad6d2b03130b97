use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::data::dashboard::{Dashboard, DashboardCache};
use crate::data::loader::load_file;
use crate::data::model::{LineSelection, SalesTable};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<SalesTable>,

    /// File the dataset came from.
    pub dataset_path: Option<PathBuf>,

    /// Current product-line choice from the sidebar.
    pub selection: LineSelection,

    /// Month of year charted as daily quantity sold.
    pub month: u32,

    /// Figures for the current selection (cached).
    pub dashboard: Option<Arc<Dashboard>>,

    /// Accent colour per product line.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    cache: DashboardCache,
}

impl AppState {
    pub fn new(month: u32) -> Self {
        Self {
            dataset: None,
            dataset_path: None,
            selection: LineSelection::All,
            month,
            dashboard: None,
            color_map: None,
            status_message: None,
            cache: DashboardCache::default(),
        }
    }

    /// Ingest a newly loaded dataset: reset the selection and drop cached figures.
    pub fn set_dataset(&mut self, dataset: SalesTable, path: PathBuf) {
        self.cache.invalidate();
        self.color_map = Some(ColorMap::new(dataset.product_lines()));
        self.selection = LineSelection::All;
        self.dataset = Some(dataset);
        self.dataset_path = Some(path);
        self.status_message = None;
        self.refresh();
    }

    /// Load `path`, replacing the current dataset only on success.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let dataset =
            load_file(path).with_context(|| format!("loading {}", path.display()))?;
        log::info!(
            "Loaded {} invoices across {} product lines from {} (dataset version {})",
            dataset.len(),
            dataset.product_lines().len(),
            path.display(),
            self.cache.version() + 1
        );
        self.set_dataset(dataset, path.to_path_buf());
        Ok(())
    }

    /// Change the product-line selection and recompute if it differs.
    pub fn select(&mut self, selection: LineSelection) {
        if selection != self.selection {
            self.selection = selection;
            self.refresh();
        }
    }

    /// Recompute `dashboard` for the current selection.
    fn refresh(&mut self) {
        self.dashboard = self
            .dataset
            .as_ref()
            .map(|ds| self.cache.get_or_compute(ds, &self.selection, self.month));
    }

    pub fn computations(&self) -> usize {
        self.cache.computations()
    }
}
