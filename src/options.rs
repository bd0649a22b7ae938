use std::{collections::HashMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::domain::{DurationUnits, FieldDescriptor, FieldValue, Scalar};
use crate::form::field::components::{
    ComponentPalette, IntegerBounds, ItemComparator, RenderHook, RenderNode,
};
use crate::form::{Control, ControlConfig, ValueTransform};

/// Plain-data part of a field's configuration; loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    pub read_only: bool,
    pub obscure: bool,
    pub completions: Option<Vec<String>>,
    pub bounds: Option<IntegerBounds>,
    pub duration_units: Option<DurationUnits>,
}

/// Everything the registry may customize for one field, keyed by field key.
#[derive(Clone, Default)]
pub struct FieldOptions {
    pub settings: FieldSettings,
    pub to_display: Option<ValueTransform>,
    pub from_display: Option<ValueTransform>,
    pub comparator: Option<ItemComparator>,
    pub render_hook: Option<RenderHook>,
}

impl FieldOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: FieldSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.settings.read_only = read_only;
        self
    }

    pub fn with_obscure(mut self, obscure: bool) -> Self {
        self.settings.obscure = obscure;
        self
    }

    pub fn with_completions<I, S>(mut self, vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.completions = Some(vocabulary.into_iter().map(Into::into).collect());
        self
    }

    /// Integer fields with bounds get a bounded-integer control.
    pub fn with_bounds(mut self, min: i64, max: i64) -> Self {
        self.settings.bounds = Some(IntegerBounds::new(min, max));
        self
    }

    pub fn with_duration_units(mut self, units: DurationUnits) -> Self {
        self.settings.duration_units = Some(units);
        self
    }

    /// `to_display` maps a field value to what the control shows; `from_display`
    /// maps it back. The shown value may be of another kind, but whatever
    /// `from_display` returns must match the field's kind or the write is refused.
    pub fn with_transforms<T, F>(mut self, to_display: T, from_display: F) -> Self
    where
        T: Fn(FieldValue) -> FieldValue + Send + Sync + 'static,
        F: Fn(FieldValue) -> FieldValue + Send + Sync + 'static,
    {
        self.to_display = Some(Arc::new(to_display));
        self.from_display = Some(Arc::new(from_display));
        self
    }

    pub fn with_comparator<C>(mut self, compare: C) -> Self
    where
        C: Fn(&Scalar, &Scalar) -> std::cmp::Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(compare));
        self
    }

    pub fn with_render_hook<H>(mut self, hook: H) -> Self
    where
        H: Fn(&Control, &FieldDescriptor) -> RenderNode + Send + Sync + 'static,
    {
        self.render_hook = Some(Arc::new(hook));
        self
    }

    pub(crate) fn control_config(&self) -> ControlConfig {
        ControlConfig {
            to_display: self.to_display.clone(),
            from_display: self.from_display.clone(),
            read_only: self.settings.read_only,
            obscure: self.settings.obscure,
            completions: self.settings.completions.clone(),
        }
    }
}

impl fmt::Debug for FieldOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldOptions")
            .field("settings", &self.settings)
            .field("transforms", &self.to_display.is_some())
            .field("comparator", &self.comparator.is_some())
            .field("render_hook", &self.render_hook.is_some())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct BinderOptions {
    pub default_duration_units: DurationUnits,
    pub(crate) component_palette: Arc<ComponentPalette>,
    pub(crate) fields: HashMap<String, FieldOptions>,
}

impl Default for BinderOptions {
    fn default() -> Self {
        Self {
            default_duration_units: DurationUnits::default(),
            component_palette: Arc::new(ComponentPalette::default()),
            fields: HashMap::new(),
        }
    }
}

impl BinderOptions {
    pub fn with_component_palette(mut self, palette: ComponentPalette) -> Self {
        self.component_palette = Arc::new(palette);
        self
    }

    pub fn with_default_duration_units(mut self, units: DurationUnits) -> Self {
        self.default_duration_units = units;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, options: FieldOptions) -> Self {
        self.fields.insert(key.into(), options);
        self
    }

    /// Loads per-field settings from a JSON object of `key -> FieldSettings`.
    ///
    /// Each listed key gets its whole [`FieldSettings`] replaced, so settings
    /// made earlier through the `FieldOptions::with_*` builders for that key
    /// are lost; omitted settings take their defaults. Closures configured
    /// earlier for the same key are kept.
    pub fn with_settings_json(mut self, json: &str) -> serde_json::Result<Self> {
        let settings: HashMap<String, FieldSettings> = serde_json::from_str(json)?;
        for (key, settings) in settings {
            let entry = self.fields.entry(key).or_default();
            entry.settings = settings;
        }
        Ok(self)
    }

    pub fn palette(&self) -> &Arc<ComponentPalette> {
        &self.component_palette
    }

    pub fn field(&self, key: &str) -> Option<&FieldOptions> {
        self.fields.get(key)
    }

    fn map_palette<F>(mut self, update: F) -> Self
    where
        F: FnOnce(ComponentPalette) -> ComponentPalette,
    {
        let palette = (*self.component_palette).clone();
        self.component_palette = Arc::new(update(palette));
        self
    }

    pub fn with_integer_step(self, step: i64) -> Self {
        self.map_palette(|mut palette| {
            palette.numeric = palette.numeric.with_integer_step(step);
            palette
        })
    }

    pub fn with_bool_labels(self, true_label: &'static str, false_label: &'static str) -> Self {
        self.map_palette(|mut palette| {
            palette.bools = palette.bools.with_labels(true_label, false_label);
            palette
        })
    }

    pub fn with_date_time_pattern(self, pattern: &'static str) -> Self {
        self.map_palette(|mut palette| {
            palette.date_time = palette.date_time.with_pattern(pattern);
            palette
        })
    }
}
