use crate::data::filter::{filtered_indices, visible_records, AgeYear, FilterCriteria};
use crate::data::model::{NurseryDataset, NurseryRecord};
use crate::favorites::FavoritesSet;
use crate::storage::KeyValueStore;

// ---------------------------------------------------------------------------
// ViewUpdate – what a mutation asks the rendering side to redraw
// ---------------------------------------------------------------------------

/// Views that must be recomputed after a mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    /// Map markers (visible set or favorite highlighting changed).
    pub markers: bool,
    /// The detail panel for the selected record.
    pub details: bool,
    /// The favorites list.
    pub favorites: bool,
}

impl ViewUpdate {
    pub const MARKERS: ViewUpdate = ViewUpdate {
        markers: true,
        details: false,
        favorites: false,
    };

    pub fn is_empty(&self) -> bool {
        !(self.markers || self.details || self.favorites)
    }
}

// ---------------------------------------------------------------------------
// Filter & favorites state
// ---------------------------------------------------------------------------

/// Owns the immutable dataset, the filter criteria and the favorites.
///
/// Every mutating method runs synchronously and returns a [`ViewUpdate`] so
/// the renderer decides when and how to redraw.
pub struct NurseryState {
    dataset: NurseryDataset,
    criteria: FilterCriteria,
    favorites: FavoritesSet,
    store: Box<dyn KeyValueStore>,

    /// Indices into the dataset of records passing the current filters (cached).
    visible_indices: Vec<usize>,

    /// Record shown in the detail panel.
    selected: Option<u32>,
}

impl NurseryState {
    /// Take ownership of the loaded dataset and load favorites from `store`.
    pub fn new(dataset: NurseryDataset, store: Box<dyn KeyValueStore>) -> Self {
        let favorites = FavoritesSet::load(store.as_ref());
        let visible_indices = (0..dataset.len()).collect();
        Self {
            dataset,
            criteria: FilterCriteria::default(),
            favorites,
            store,
            visible_indices,
            selected: None,
        }
    }

    pub fn dataset(&self) -> &NurseryDataset {
        &self.dataset
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    // -- Filters --

    pub fn set_age_filter(&mut self, age: Option<AgeYear>) -> ViewUpdate {
        self.criteria.age = age;
        self.refilter()
    }

    /// Exact-match type filter. An empty string means no filter.
    pub fn set_facility_type_filter(&mut self, facility_type: Option<String>) -> ViewUpdate {
        self.criteria.facility_type = facility_type.filter(|t| !t.is_empty());
        self.refilter()
    }

    pub fn set_availability_only(&mut self, flag: bool) -> ViewUpdate {
        self.criteria.availability_only = flag;
        self.refilter()
    }

    /// Reset every criterion in one replacement.
    pub fn clear_filters(&mut self) -> ViewUpdate {
        self.criteria = FilterCriteria::default();
        self.refilter()
    }

    fn refilter(&mut self) -> ViewUpdate {
        self.visible_indices = filtered_indices(&self.dataset, &self.criteria);
        ViewUpdate::MARKERS
    }

    /// Records passing the current filters, in dataset order.
    ///
    /// Recomputed from scratch; see [`Self::visible_indices`] for the cached view.
    pub fn compute_visible_records(&self) -> Vec<&NurseryRecord> {
        visible_records(&self.dataset, &self.criteria)
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible_indices
    }

    // -- Favorites --

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(id)
    }

    /// Add or remove `id` from the favorites and persist the new list.
    ///
    /// A failed write is logged; the in-memory change stands.
    pub fn toggle_favorite(&mut self, id: u32) -> ViewUpdate {
        let now_favorite = self.favorites.toggle(id);
        log::debug!(
            "Nursery {id} {} favorites",
            if now_favorite { "added to" } else { "removed from" }
        );
        self.save_favorites();

        ViewUpdate {
            markers: true,
            details: self.selected == Some(id),
            favorites: true,
        }
    }

    /// Favorite records in favorites order. Ids not in the dataset are skipped.
    pub fn favorite_records(&self) -> Vec<&NurseryRecord> {
        self.favorites
            .ids()
            .iter()
            .filter_map(|&id| self.dataset.get(id))
            .collect()
    }

    /// Re-read favorites from the store, replacing the in-memory list.
    pub fn load_favorites(&mut self) -> ViewUpdate {
        self.favorites = FavoritesSet::load(self.store.as_ref());
        ViewUpdate {
            markers: true,
            details: self.selected.is_some(),
            favorites: true,
        }
    }

    pub fn save_favorites(&mut self) {
        if let Err(e) = self.favorites.save(self.store.as_mut()) {
            log::warn!("Failed to save favorites: {e}");
        }
    }

    // -- Selection (detail panel) --

    /// Show `id` in the detail panel. Unknown ids are ignored.
    pub fn select_record(&mut self, id: u32) -> ViewUpdate {
        if self.dataset.get(id).is_none() {
            return ViewUpdate::default();
        }
        self.selected = Some(id);
        ViewUpdate {
            details: true,
            ..Default::default()
        }
    }

    pub fn clear_selection(&mut self) -> ViewUpdate {
        let had = self.selected.take().is_some();
        ViewUpdate {
            details: had,
            ..Default::default()
        }
    }

    pub fn selected_record(&self) -> Option<&NurseryRecord> {
        self.selected.and_then(|id| self.dataset.get(id))
    }
}
