use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use crossterm::event::KeyEvent;

use crate::domain::{
    DurationUnit, FieldDescriptor, FieldRef, FieldValue, RecordArena, Scalar, ValueKind,
};

use super::catalog::Catalog;
use super::dirty::DirtyTracker;
use super::error::BindError;
use super::field::convert::parse_scalar;
use super::field::components::{
    ComponentKind, ComponentPalette, DurationStateRef, EnumStateRef, FieldComponent,
    IntegerBounds, ListState, Placeholder, RenderNode,
};

pub type ValueTransform = Arc<dyn Fn(FieldValue) -> FieldValue + Send + Sync>;

pub type Listener = Box<dyn FnMut(&mut Notification<'_>) + Send>;

/// Per-control presentation settings.
#[derive(Clone, Default)]
pub struct ControlConfig {
    pub to_display: Option<ValueTransform>,
    pub from_display: Option<ValueTransform>,
    pub read_only: bool,
    pub obscure: bool,
    pub completions: Option<Vec<String>>,
}

impl ControlConfig {
    pub fn to_display(&self, value: FieldValue) -> FieldValue {
        match &self.to_display {
            Some(transform) => transform(value),
            None => value,
        }
    }

    pub fn from_display(&self, value: FieldValue) -> FieldValue {
        match &self.from_display {
            Some(transform) => transform(value),
            None => value,
        }
    }
}

impl fmt::Debug for ControlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlConfig")
            .field("to_display", &self.to_display.is_some())
            .field("from_display", &self.from_display.is_some())
            .field("read_only", &self.read_only)
            .field("obscure", &self.obscure)
            .field("completions", &self.completions)
            .finish()
    }
}

/// Session state a control needs to apply an edit.
pub struct ControlContext<'a> {
    pub records: &'a mut RecordArena,
    pub dirty: &'a mut DirtyTracker,
}

impl<'a> ControlContext<'a> {
    pub fn new(records: &'a mut RecordArena, dirty: &'a mut DirtyTracker) -> Self {
        Self { records, dirty }
    }
}

/// What a listener sees when its control fans out.
pub struct Notification<'a> {
    field_ref: FieldRef,
    field: &'a FieldDescriptor,
    dirty: &'a mut DirtyTracker,
}

impl Notification<'_> {
    pub fn field_ref(&self) -> FieldRef {
        self.field_ref
    }

    pub fn field(&self) -> &FieldDescriptor {
        self.field
    }

    pub fn key(&self) -> &str {
        self.field.key()
    }

    pub fn value(&self) -> &FieldValue {
        self.field.value()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty.mark();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }
}

/// Binds one field of one record to edit events.
///
/// The control keeps a mirror of the field's display value, the listeners to
/// run after each write and the presentation settings. The bound field is
/// addressed by handle and index and never changes.
pub struct Control {
    field: FieldRef,
    key: String,
    config: ControlConfig,
    component: Box<dyn FieldComponent>,
    palette: Arc<ComponentPalette>,
    listeners: Vec<Listener>,
    error: Option<String>,
}

impl Control {
    pub(crate) fn new(
        field: FieldRef,
        key: impl Into<String>,
        config: ControlConfig,
        component: Box<dyn FieldComponent>,
        palette: Arc<ComponentPalette>,
    ) -> Self {
        Self {
            field,
            key: key.into(),
            config,
            component,
            palette,
            listeners: Vec::new(),
            error: None,
        }
    }

    pub fn field_ref(&self) -> FieldRef {
        self.field
    }

    pub fn index(&self) -> usize {
        self.field.index
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> ComponentKind {
        self.component.kind()
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn is_read_only(&self) -> bool {
        self.config.read_only
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn value<'r>(&self, records: &'r RecordArena) -> Result<&'r FieldValue, BindError> {
        records.field(self.field).map(FieldDescriptor::value)
    }

    /// Rendered form of the mirrored display state.
    pub fn display_value(&self) -> String {
        let raw = self.component.display_value();
        if self.config.obscure {
            std::iter::repeat_n(self.palette.text.obscure_char, raw.chars().count()).collect()
        } else {
            raw
        }
    }

    /// Completion vocabulary entries starting with `prefix` (case-insensitive).
    pub fn completions(&self, prefix: &str) -> Vec<&str> {
        let needle = prefix.to_lowercase();
        self.config
            .completions
            .iter()
            .flatten()
            .filter(|entry| entry.to_lowercase().starts_with(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&mut Notification<'_>) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Mirrors `to_display(value)` and writes it through [`Control::set_value`].
    pub fn set(&mut self, ctx: &mut ControlContext<'_>, value: FieldValue) -> Result<(), BindError> {
        let display = self.config.to_display(value);
        self.component.seed_value(&display);
        self.set_value(ctx, display)
    }

    /// Writes `from_display(display)` into the field, then runs every
    /// listener in registration order before returning.
    ///
    /// Only the value reaching the field must match its kind; the display
    /// value may be of another kind when the transforms convert between them.
    /// A refused write re-seeds the mirror from the field.
    pub fn set_value(
        &mut self,
        ctx: &mut ControlContext<'_>,
        display: FieldValue,
    ) -> Result<(), BindError> {
        let display = self.component.accept(display);
        let value = self.config.from_display(display);
        let written = ctx.records.field_mut(self.field)?.set_value(value);
        if let Err(err) = written {
            self.refresh(ctx.records)?;
            return Err(err);
        }
        self.error = None;
        self.fire(ctx.records, ctx.dirty)
    }

    /// Re-runs the listeners without writing; for edits made directly on the field.
    pub fn notify(&mut self, ctx: &mut ControlContext<'_>) -> Result<(), BindError> {
        self.fire(ctx.records, ctx.dirty)
    }

    /// Re-seeds the mirror from the field's current value.
    pub fn refresh(&mut self, records: &RecordArena) -> Result<(), BindError> {
        let value = records.field(self.field)?.value().clone();
        self.seed(value);
        Ok(())
    }

    pub(crate) fn seed(&mut self, value: FieldValue) {
        let display = self.config.to_display(value);
        self.component.seed_value(&display);
    }

    pub(crate) fn fire(
        &mut self,
        records: &RecordArena,
        dirty: &mut DirtyTracker,
    ) -> Result<(), BindError> {
        let field = records.field(self.field)?;
        for listener in &mut self.listeners {
            let mut notification = Notification {
                field_ref: self.field,
                field,
                dirty: &mut *dirty,
            };
            listener(&mut notification);
        }
        Ok(())
    }

    /// Routes a key event to the display state. Returns whether the field was written.
    pub fn handle_key(
        &mut self,
        ctx: &mut ControlContext<'_>,
        key: &KeyEvent,
    ) -> Result<bool, BindError> {
        if self.config.read_only {
            return Ok(false);
        }
        match self.component.handle_key(key) {
            Some(display) => self.set_value(ctx, display).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn toggle(&mut self, ctx: &mut ControlContext<'_>) -> Result<(), BindError> {
        self.require(ComponentKind::Toggle, "toggle")?;
        self.apply(ctx, |component| component.toggle()).map(|_| ())
    }

    pub fn enum_state(&self) -> Option<EnumStateRef<'_>> {
        self.component.enum_state()
    }

    pub fn select(&mut self, ctx: &mut ControlContext<'_>, index: usize) -> Result<(), BindError> {
        self.require(ComponentKind::Enum, "enum selection")?;
        self.apply(ctx, |component| component.select_enum(index))
            .map(|_| ())
    }

    pub fn integer_bounds(&self) -> Option<IntegerBounds> {
        self.component.integer_bounds()
    }

    pub fn duration_state(&self) -> Option<DurationStateRef<'_>> {
        self.component.duration_state()
    }

    /// Edits one unit of a duration control. Returns whether the total changed.
    pub fn set_duration_component(
        &mut self,
        ctx: &mut ControlContext<'_>,
        unit: DurationUnit,
        count: u64,
    ) -> Result<bool, BindError> {
        self.require(ComponentKind::Duration, "duration components")?;
        self.apply(ctx, |component| component.set_duration_component(unit, count))
    }

    pub fn set_date(&mut self, ctx: &mut ControlContext<'_>, date: NaiveDate) -> Result<(), BindError> {
        self.require(ComponentKind::DateTime, "date selection")?;
        self.apply(ctx, |component| component.set_date(date)).map(|_| ())
    }

    pub fn set_time(&mut self, ctx: &mut ControlContext<'_>, time: NaiveTime) -> Result<(), BindError> {
        self.require(ComponentKind::DateTime, "time selection")?;
        self.apply(ctx, |component| component.set_time(time)).map(|_| ())
    }

    pub fn list_state(&self) -> Option<&ListState> {
        self.component.list_state()
    }

    /// Lets the renderer report its per-item extent.
    pub fn list_state_mut(&mut self) -> Option<&mut ListState> {
        self.component.list_state_mut()
    }

    /// Appends `item` to the bound list, records it as last added and fans out.
    pub fn add(&mut self, ctx: &mut ControlContext<'_>, item: impl Into<Scalar>) -> Result<(), BindError> {
        self.require(ComponentKind::List, "list append")?;
        let item = item.into();
        let mut display = self.list_display(ctx.records)?;
        if let FieldValue::List { item: kind, items } = &mut display {
            if item.kind() != *kind {
                return Err(BindError::kind_mismatch(
                    &self.key,
                    ValueKind::List(*kind),
                    ValueKind::List(item.kind()),
                ));
            }
            items.push(item.clone());
        }
        self.set_value(ctx, display)?;
        if let Some(state) = self.component.list_state_mut() {
            state.record_added(item);
        }
        Ok(())
    }

    /// Parses `input` as the list's item kind and appends it. Returns `false`
    /// without writing when the input does not parse.
    pub fn add_parsed(&mut self, ctx: &mut ControlContext<'_>, input: &str) -> Result<bool, BindError> {
        let kind = self
            .component
            .list_state()
            .map(ListState::item_kind)
            .ok_or_else(|| BindError::unsupported(&self.key, "list append"))?;
        match parse_scalar(input, kind) {
            Some(item) => self.add(ctx, item).map(|_| true),
            None => Ok(false),
        }
    }

    /// Removes the item at `index` and fans out. Out-of-range indices are a no-op.
    pub fn remove(
        &mut self,
        ctx: &mut ControlContext<'_>,
        index: usize,
    ) -> Result<Option<Scalar>, BindError> {
        self.require(ComponentKind::List, "list removal")?;
        let mut display = self.list_display(ctx.records)?;
        let removed = match &mut display {
            FieldValue::List { items, .. } if index < items.len() => items.remove(index),
            _ => return Ok(None),
        };
        self.set_value(ctx, display)?;
        Ok(Some(removed))
    }

    /// Adds `item` from a catalog unless the catalog forbids duplicates and
    /// the list already holds an equal item. A refused item fires nothing.
    pub fn choose(
        &mut self,
        ctx: &mut ControlContext<'_>,
        catalog: &Catalog,
        item: &Scalar,
    ) -> Result<bool, BindError> {
        self.require(ComponentKind::List, "catalog selection")?;
        let current = self.list_display(ctx.records)?;
        let admitted = current
            .as_items()
            .is_some_and(|items| catalog.admits(items, item));
        if !admitted {
            return Ok(false);
        }
        self.add(ctx, item.clone())?;
        Ok(true)
    }

    pub fn choose_at(
        &mut self,
        ctx: &mut ControlContext<'_>,
        catalog: &Catalog,
        index: usize,
    ) -> Result<bool, BindError> {
        match catalog.items().get(index) {
            Some(item) => self.choose(ctx, catalog, item),
            None => Ok(false),
        }
    }

    /// The bound list in render order (comparator applied, storage untouched).
    pub fn sorted_items(&self, records: &RecordArena) -> Result<Vec<Scalar>, BindError> {
        let state = self
            .component
            .list_state()
            .ok_or_else(|| BindError::unsupported(&self.key, "list ordering"))?;
        let display = self.list_display(records)?;
        Ok(state.sorted(display.as_items().unwrap_or_default()))
    }

    /// Asks the custom render hook for a node, or returns a [`Placeholder`].
    pub fn render(&self, records: &RecordArena) -> Result<RenderNode, BindError> {
        self.require(ComponentKind::Custom, "custom rendering")?;
        let field = records.field(self.field)?;
        Ok(match self.component.render_hook() {
            Some(hook) => hook(self, field),
            None => Box::new(Placeholder),
        })
    }

    fn list_display(&self, records: &RecordArena) -> Result<FieldValue, BindError> {
        let value = records.field(self.field)?.value().clone();
        Ok(self.config.to_display(value))
    }

    fn apply<F>(&mut self, ctx: &mut ControlContext<'_>, edit: F) -> Result<bool, BindError>
    where
        F: FnOnce(&mut Box<dyn FieldComponent>) -> Option<FieldValue>,
    {
        match edit(&mut self.component) {
            Some(display) => self.set_value(ctx, display).map(|_| true),
            None => Ok(false),
        }
    }

    fn require(&self, kind: ComponentKind, operation: &'static str) -> Result<(), BindError> {
        if self.component.kind() == kind {
            Ok(())
        } else {
            Err(BindError::unsupported(&self.key, operation))
        }
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("field", &self.field)
            .field("key", &self.key)
            .field("component", &self.component)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .field("error", &self.error)
            .finish()
    }
}
