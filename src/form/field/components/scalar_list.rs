use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::domain::{FieldValue, Scalar, ScalarKind};

use super::helpers::format_collection_value;
use super::{ComponentKind, FieldComponent, palette::ComponentPalette};

pub type ItemComparator = Arc<dyn Fn(&Scalar, &Scalar) -> Ordering + Send + Sync>;

/// Bookkeeping for a list-of-primitive control.
#[derive(Clone)]
pub struct ListState {
    item: ScalarKind,
    items: Vec<Scalar>,
    last_added: Option<Scalar>,
    item_extent: f32,
    comparator: Option<ItemComparator>,
}

impl ListState {
    fn new(item: ScalarKind, comparator: Option<ItemComparator>) -> Self {
        Self {
            item,
            items: Vec::new(),
            last_added: None,
            item_extent: 0.0,
            comparator,
        }
    }

    pub fn item_kind(&self) -> ScalarKind {
        self.item
    }

    /// Mirror of the bound collection as of the last write or seed.
    pub fn items(&self) -> &[Scalar] {
        &self.items
    }

    pub fn last_added(&self) -> Option<&Scalar> {
        self.last_added.as_ref()
    }

    /// Rendered height of one item, as last reported by the renderer.
    /// May be stale or zero.
    pub fn item_extent(&self) -> f32 {
        self.item_extent
    }

    pub fn set_item_extent(&mut self, extent: f32) {
        self.item_extent = extent;
    }

    pub fn has_comparator(&self) -> bool {
        self.comparator.is_some()
    }

    /// Render-time ordering of `items`; the stored order is left untouched.
    pub fn sorted(&self, items: &[Scalar]) -> Vec<Scalar> {
        let mut sorted = items.to_vec();
        if let Some(compare) = &self.comparator {
            sorted.sort_by(|a, b| compare(a, b));
        }
        sorted
    }

    pub(crate) fn record_added(&mut self, item: Scalar) {
        self.last_added = Some(item);
    }
}

impl fmt::Debug for ListState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListState")
            .field("item", &self.item)
            .field("items", &self.items)
            .field("last_added", &self.last_added)
            .field("item_extent", &self.item_extent)
            .field("comparator", &self.comparator.is_some())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ScalarListComponent {
    state: ListState,
    palette: Arc<ComponentPalette>,
}

impl ScalarListComponent {
    pub fn new(
        item: ScalarKind,
        comparator: Option<ItemComparator>,
        palette: Arc<ComponentPalette>,
    ) -> Self {
        Self {
            state: ListState::new(item, comparator),
            palette,
        }
    }
}

impl FieldComponent for ScalarListComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::List
    }

    fn display_value(&self) -> String {
        let hints = &self.palette.lists;
        format_collection_value(
            &hints.label,
            self.state.items.len(),
            self.state.items.last().map(Scalar::to_string),
            &hints.hint,
        )
    }

    fn seed_value(&mut self, value: &FieldValue) {
        if let Some(items) = value.as_items() {
            self.state.items = items.to_vec();
        }
    }

    fn accept(&mut self, value: FieldValue) -> FieldValue {
        self.seed_value(&value);
        value
    }

    fn list_state(&self) -> Option<&ListState> {
        Some(&self.state)
    }

    fn list_state_mut(&mut self) -> Option<&mut ListState> {
        Some(&mut self.state)
    }
}
