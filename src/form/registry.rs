use std::sync::Arc;

use tracing::debug;

use crate::domain::{FieldRef, RecordArena, RecordHandle, ValueKind};
use crate::options::{BinderOptions, FieldOptions};

use super::control::{Control, Notification};
use super::dirty::DirtyTracker;
use super::error::BindError;
use super::field::components::{
    BoolComponent, BoundedIntegerComponent, CustomComponent, DateTimeComponent,
    DurationComponent, EnumComponent, FieldComponent, ScalarListComponent, TextComponent,
};

/// Builds and owns one control per field of the record being edited.
#[derive(Debug, Default)]
pub struct ControlRegistry {
    options: BinderOptions,
    controls: Vec<Control>,
}

impl ControlRegistry {
    pub fn new(options: BinderOptions) -> Self {
        Self {
            options,
            controls: Vec::new(),
        }
    }

    pub fn options(&self) -> &BinderOptions {
        &self.options
    }

    /// Replaces the control list with one control per field of `record`, in
    /// field order.
    ///
    /// Each control gets the dirty-marking listener and fans out once so the
    /// mirrors agree with the record; the dirty flag is then reset because
    /// the record has not been edited yet. On error the previous list is kept.
    pub fn create_controls(
        &mut self,
        records: &RecordArena,
        record: RecordHandle,
        dirty: &mut DirtyTracker,
    ) -> Result<&mut [Control], BindError> {
        let entity = records.get(record)?;
        let mut controls = Vec::with_capacity(entity.len());
        for index in 0..entity.len() {
            let mut control = self.build_control(records, FieldRef::new(record, index))?;
            control.add_listener(|notification: &mut Notification<'_>| {
                notification.mark_dirty()
            });
            control.fire(records, dirty)?;
            controls.push(control);
        }
        dirty.reset();
        debug!(
            record = entity.name(),
            controls = controls.len(),
            "created controls"
        );
        self.controls = controls;
        Ok(&mut self.controls)
    }

    /// Picks the control variant for one field and seeds its mirror.
    pub fn build_control(
        &self,
        records: &RecordArena,
        field: FieldRef,
    ) -> Result<Control, BindError> {
        let descriptor = records.field(field)?;
        let key = descriptor.key();
        let defaults = FieldOptions::default();
        let field_options = self.options.field(key).unwrap_or(&defaults);
        let palette = Arc::clone(self.options.palette());

        let component: Box<dyn FieldComponent> = match descriptor.kind() {
            ValueKind::Enum => Box::new(EnumComponent::new(palette.clone())),
            ValueKind::Bool => Box::new(BoolComponent::new(palette.clone())),
            ValueKind::List(item) => Box::new(ScalarListComponent::new(
                item,
                field_options.comparator.clone(),
                palette.clone(),
            )),
            ValueKind::Blob | ValueKind::Object => {
                Box::new(CustomComponent::new(field_options.render_hook.clone()))
            }
            ValueKind::DateTime => Box::new(DateTimeComponent::new(palette.clone())),
            ValueKind::Duration => {
                let units = field_options
                    .settings
                    .duration_units
                    .unwrap_or(self.options.default_duration_units);
                if units.finest().is_none() {
                    return Err(BindError::EmptyDurationMask {
                        key: key.to_string(),
                    });
                }
                Box::new(DurationComponent::new(units, palette.clone()))
            }
            ValueKind::Integer => match field_options.settings.bounds {
                Some(bounds) => Box::new(BoundedIntegerComponent::new(bounds, palette.clone())),
                None => Box::new(TextComponent::new(ValueKind::Integer, palette.clone())),
            },
            kind @ (ValueKind::Text | ValueKind::Float) => {
                Box::new(TextComponent::new(kind, palette.clone()))
            }
        };

        let mut control = Control::new(
            field,
            key,
            field_options.control_config(),
            component,
            palette,
        );
        control.seed(descriptor.value().clone());
        Ok(control)
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut [Control] {
        &mut self.controls
    }

    pub fn control(&self, index: usize) -> Option<&Control> {
        self.controls.get(index)
    }

    pub fn control_mut(&mut self, index: usize) -> Option<&mut Control> {
        self.controls.get_mut(index)
    }

    pub fn control_by_key(&self, key: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.key() == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.controls.iter().position(|control| control.key() == key)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub(crate) fn clear_errors(&mut self) {
        for control in &mut self.controls {
            control.clear_error();
        }
    }
}
