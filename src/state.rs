use std::path::Path;

use crate::color::ColorMap;
use crate::data::aggregate::{AggregateResult, aggregate};
use crate::data::filter::FilterSelection;
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::geo::{CoordinateTable, Geocoder, NoGeocoder};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Dataset>,

    /// Current (state, industry) selection.
    pub selection: Option<FilterSelection>,

    /// Aggregates for `selection` (recomputed on every change).
    pub result: AggregateResult,

    /// Colour per district in `result`.
    pub district_colors: ColorMap,

    /// Coordinate lookup for the district map.
    pub geocoder: Box<dyn Geocoder>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: None,
            result: AggregateResult::default(),
            district_colors: ColorMap::default(),
            geocoder: Box::new(NoGeocoder),
            status_message: None,
        }
    }
}

impl AppState {
    /// Load a workforce table, replacing the current one on success.
    ///
    /// On failure the previous dataset is dropped too: nothing is shown for
    /// data that is not available.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.selection = None;
                self.result = AggregateResult::default();
                self.district_colors = ColorMap::default();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Load the district coordinate table used by the map.
    pub fn load_coordinates(&mut self, path: &Path) {
        match CoordinateTable::from_csv(path) {
            Ok(table) => {
                if table.is_empty() {
                    log::warn!("{} holds no usable coordinates", path.display());
                }
                self.geocoder = Box::new(table);
            }
            Err(e) => {
                log::warn!("District coordinates unavailable: {e:#}");
                self.status_message = Some(format!("Map coordinates: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and select its first state and industry.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.selection = FilterSelection::first_of(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Recompute the aggregates for the current selection.
    pub fn recompute(&mut self) {
        self.result = match (&self.dataset, &self.selection) {
            (Some(ds), Some(sel)) => aggregate(ds, &sel.region, &sel.category),
            _ => AggregateResult::default(),
        };
        self.district_colors =
            ColorMap::new(self.result.by_district.iter().map(|d| d.district.as_str()));
    }

    pub fn select_region(&mut self, region: &str) {
        let Some(sel) = self.selection.as_mut() else {
            return;
        };
        if sel.region != region {
            sel.region = region.to_string();
            self.recompute();
        }
    }

    pub fn select_category(&mut self, category: &str) {
        let Some(sel) = self.selection.as_mut() else {
            return;
        };
        if sel.category != category {
            sel.category = category.to_string();
            self.recompute();
        }
    }
}
