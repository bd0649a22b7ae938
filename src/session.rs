use chrono::{NaiveDate, NaiveTime};
use crossterm::event::KeyEvent;
use tracing::debug;

use crate::domain::{
    DurationUnit, EntityRecord, FieldValue, RecordArena, RecordHandle, Scalar,
};
use crate::form::{
    BindError, Catalog, Control, ControlContext, ControlRegistry, DirtyTracker, Notification,
};
use crate::form::field::components::RenderNode;
use crate::options::BinderOptions;
use crate::persist::{self, SaveOutcome, Storage, ValidationReport};

/// One editing session: the draft being edited, the snapshot it came from,
/// one control per draft field and the dirty flag.
///
/// Nothing here is shared between sessions. A multi-threaded host must guard
/// the whole session with one lock, since an edit and a save are not atomic
/// with respect to each other.
#[derive(Debug)]
pub struct EditSession {
    records: RecordArena,
    draft: RecordHandle,
    original: Option<EntityRecord>,
    registry: ControlRegistry,
    dirty: DirtyTracker,
}

impl EditSession {
    /// Starts editing a record that has never been saved.
    pub fn create(draft: EntityRecord, options: BinderOptions) -> Result<Self, BindError> {
        Self::open(None, draft, options)
    }

    /// Starts editing a copy of a stored record.
    pub fn edit(original: EntityRecord, options: BinderOptions) -> Result<Self, BindError> {
        let draft = original.clone();
        Self::open(Some(original), draft, options)
    }

    pub fn open(
        original: Option<EntityRecord>,
        draft: EntityRecord,
        options: BinderOptions,
    ) -> Result<Self, BindError> {
        let mut records = RecordArena::new();
        let draft = records.insert(draft);
        let mut session = Self {
            records,
            draft,
            original,
            registry: ControlRegistry::new(options),
            dirty: DirtyTracker::new(),
        };
        session.reload()?;
        Ok(session)
    }

    /// Swaps in another record. Controls built for the previous draft are
    /// dropped and their record handle is retired.
    pub fn load(
        &mut self,
        original: Option<EntityRecord>,
        draft: EntityRecord,
    ) -> Result<(), BindError> {
        let previous = self.draft;
        self.draft = self.records.insert(draft);
        self.original = original;
        if let Err(err) = self.reload() {
            self.records.remove(self.draft);
            self.draft = previous;
            return Err(err);
        }
        self.records.remove(previous);
        Ok(())
    }

    /// Rebuilds every control from the draft's current values.
    pub fn reload(&mut self) -> Result<(), BindError> {
        self.registry
            .create_controls(&self.records, self.draft, &mut self.dirty)?;
        Ok(())
    }

    pub fn draft(&self) -> &EntityRecord {
        &self.records[self.draft]
    }

    /// Direct access to the draft. Edits made here reach listeners only
    /// through [`EditSession::notify`].
    pub fn draft_mut(&mut self) -> Result<&mut EntityRecord, BindError> {
        self.records.get_mut(self.draft)
    }

    pub fn original(&self) -> Option<&EntityRecord> {
        self.original.as_ref()
    }

    pub fn snapshot(&self) -> EntityRecord {
        self.draft().clone()
    }

    pub fn records(&self) -> &RecordArena {
        &self.records
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    pub fn options(&self) -> &BinderOptions {
        self.registry.options()
    }

    pub fn controls(&self) -> &[Control] {
        self.registry.controls()
    }

    pub fn control(&self, index: usize) -> Result<&Control, BindError> {
        let len = self.registry.len();
        self.registry
            .control(index)
            .ok_or(BindError::FieldIndexOutOfRange { index, len })
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.registry.position(key)
    }

    pub fn value(&self, index: usize) -> Result<&FieldValue, BindError> {
        self.control(index)?.value(&self.records)
    }

    pub fn add_listener<F>(&mut self, index: usize, listener: F) -> Result<(), BindError>
    where
        F: FnMut(&mut Notification<'_>) + Send + 'static,
    {
        self.with_control(index, |control, _| {
            control.add_listener(listener);
            Ok(())
        })
    }

    pub fn set(&mut self, index: usize, value: impl Into<FieldValue>) -> Result<(), BindError> {
        let value = value.into();
        self.with_control(index, |control, ctx| control.set(ctx, value))
    }

    pub fn set_value(
        &mut self,
        index: usize,
        display: impl Into<FieldValue>,
    ) -> Result<(), BindError> {
        let display = display.into();
        self.with_control(index, |control, ctx| control.set_value(ctx, display))
    }

    pub fn handle_key(&mut self, index: usize, key: &KeyEvent) -> Result<bool, BindError> {
        self.with_control(index, |control, ctx| control.handle_key(ctx, key))
    }

    pub fn toggle(&mut self, index: usize) -> Result<(), BindError> {
        self.with_control(index, |control, ctx| control.toggle(ctx))
    }

    pub fn select(&mut self, index: usize, option: usize) -> Result<(), BindError> {
        self.with_control(index, |control, ctx| control.select(ctx, option))
    }

    pub fn set_duration_component(
        &mut self,
        index: usize,
        unit: DurationUnit,
        count: u64,
    ) -> Result<bool, BindError> {
        self.with_control(index, |control, ctx| {
            control.set_duration_component(ctx, unit, count)
        })
    }

    pub fn set_date(&mut self, index: usize, date: NaiveDate) -> Result<(), BindError> {
        self.with_control(index, |control, ctx| control.set_date(ctx, date))
    }

    pub fn set_time(&mut self, index: usize, time: NaiveTime) -> Result<(), BindError> {
        self.with_control(index, |control, ctx| control.set_time(ctx, time))
    }

    pub fn add(&mut self, index: usize, item: impl Into<Scalar>) -> Result<(), BindError> {
        let item = item.into();
        self.with_control(index, |control, ctx| control.add(ctx, item))
    }

    pub fn add_parsed(&mut self, index: usize, input: &str) -> Result<bool, BindError> {
        self.with_control(index, |control, ctx| control.add_parsed(ctx, input))
    }

    pub fn remove(&mut self, index: usize, position: usize) -> Result<Option<Scalar>, BindError> {
        self.with_control(index, |control, ctx| control.remove(ctx, position))
    }

    pub fn choose(
        &mut self,
        index: usize,
        catalog: &Catalog,
        item: &Scalar,
    ) -> Result<bool, BindError> {
        self.with_control(index, |control, ctx| control.choose(ctx, catalog, item))
    }

    pub fn sorted_items(&self, index: usize) -> Result<Vec<Scalar>, BindError> {
        self.control(index)?.sorted_items(&self.records)
    }

    pub fn render(&self, index: usize) -> Result<RenderNode, BindError> {
        self.control(index)?.render(&self.records)
    }

    /// Re-syncs the control's mirror with the field and re-runs its listeners.
    pub fn notify(&mut self, index: usize) -> Result<(), BindError> {
        self.with_control(index, |control, ctx| {
            control.refresh(ctx.records)?;
            control.notify(ctx)
        })
    }

    pub fn validate(&self) -> ValidationReport {
        persist::validate(self.draft())
    }

    /// Saves the draft through `storage`.
    ///
    /// `Invalid` attaches an error to each offending control. A successful
    /// save clears the dirty flag and makes the draft the new original. A
    /// storage error leaves the draft, the original and the dirty flag as
    /// they were.
    pub async fn save<S>(&mut self, storage: &S) -> Result<SaveOutcome, S::Error>
    where
        S: Storage + ?Sized,
    {
        let outcome = persist::save(self.original.as_ref(), &self.records[self.draft], storage)
            .await?;
        self.registry.clear_errors();
        match outcome {
            SaveOutcome::Invalid => {
                let report = persist::validate(&self.records[self.draft]);
                for issue in report.issues() {
                    if let Some(control) = self.registry.control_mut(issue.index) {
                        control.set_error(issue.message.clone());
                    }
                }
            }
            SaveOutcome::Created | SaveOutcome::Updated => {
                self.original = Some(self.snapshot());
                self.dirty.reset();
                debug!(record = self.draft().name(), ?outcome, "draft saved");
            }
        }
        Ok(outcome)
    }

    fn with_control<T, F>(&mut self, index: usize, edit: F) -> Result<T, BindError>
    where
        F: FnOnce(&mut Control, &mut ControlContext<'_>) -> Result<T, BindError>,
    {
        let len = self.registry.len();
        let control = self
            .registry
            .control_mut(index)
            .ok_or(BindError::FieldIndexOutOfRange { index, len })?;
        let mut ctx = ControlContext::new(&mut self.records, &mut self.dirty);
        edit(control, &mut ctx)
    }
}
