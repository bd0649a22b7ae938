use std::borrow::Cow;

use crate::domain::DurationUnit;

/// Numeric stepping behaviour shared by text/numeric components.
#[derive(Debug, Clone)]
pub struct NumericTuning {
    pub integer_step: i64,
    pub integer_fast_step: Option<i64>,
    pub float_step: f64,
    pub float_fast_step: Option<f64>,
}

impl NumericTuning {
    #[inline]
    pub fn step_i64(&self, fast: bool) -> i64 {
        if fast {
            self.integer_fast_step.unwrap_or(self.integer_step)
        } else {
            self.integer_step
        }
    }

    #[inline]
    pub fn step_f64(&self, fast: bool) -> f64 {
        if fast {
            self.float_fast_step.unwrap_or(self.float_step)
        } else {
            self.float_step
        }
    }

    pub fn with_integer_step(mut self, step: i64) -> Self {
        self.integer_step = step.max(1);
        self
    }

    pub fn with_integer_fast_step(mut self, step: i64) -> Self {
        self.integer_fast_step = Some(step.max(1));
        self
    }

    pub fn with_float_step(mut self, step: f64) -> Self {
        self.float_step = step.max(f64::EPSILON);
        self
    }

    pub fn with_float_fast_step(mut self, step: f64) -> Self {
        self.float_fast_step = Some(step.max(f64::EPSILON));
        self
    }
}

impl Default for NumericTuning {
    fn default() -> Self {
        Self {
            integer_step: 1,
            integer_fast_step: Some(10),
            float_step: 1.0,
            float_fast_step: Some(10.0),
        }
    }
}

/// Presentation & toggling configuration for boolean components.
#[derive(Debug, Clone)]
pub struct BoolTogglePresentation {
    pub true_label: Cow<'static, str>,
    pub false_label: Cow<'static, str>,
    pub toggle_with_space: bool,
    pub toggle_with_arrows: bool,
}

impl BoolTogglePresentation {
    pub fn with_labels(
        mut self,
        true_label: impl Into<Cow<'static, str>>,
        false_label: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.true_label = true_label.into();
        self.false_label = false_label.into();
        self
    }

    pub fn with_toggle_with_space(mut self, enabled: bool) -> Self {
        self.toggle_with_space = enabled;
        self
    }

    pub fn with_toggle_with_arrows(mut self, enabled: bool) -> Self {
        self.toggle_with_arrows = enabled;
        self
    }
}

impl Default for BoolTogglePresentation {
    fn default() -> Self {
        Self {
            true_label: Cow::Borrowed("true"),
            false_label: Cow::Borrowed("false"),
            toggle_with_space: true,
            toggle_with_arrows: true,
        }
    }
}

/// Behaviour toggles for enum-like components.
#[derive(Debug, Clone)]
pub struct EnumBehaviour {
    pub wrap_around: bool,
}

impl EnumBehaviour {
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap_around = wrap;
        self
    }
}

impl Default for EnumBehaviour {
    fn default() -> Self {
        Self { wrap_around: true }
    }
}

/// Masking for obscured text controls.
#[derive(Debug, Clone)]
pub struct TextPresentation {
    pub obscure_char: char,
}

impl TextPresentation {
    pub fn with_obscure_char(mut self, mask: char) -> Self {
        self.obscure_char = mask;
        self
    }
}

impl Default for TextPresentation {
    fn default() -> Self {
        Self { obscure_char: '•' }
    }
}

/// Unit suffixes for duration summaries.
#[derive(Debug, Clone)]
pub struct DurationPresentation {
    pub hours: Cow<'static, str>,
    pub minutes: Cow<'static, str>,
    pub seconds: Cow<'static, str>,
    pub milliseconds: Cow<'static, str>,
    pub microseconds: Cow<'static, str>,
}

impl DurationPresentation {
    pub fn suffix(&self, unit: DurationUnit) -> &str {
        match unit {
            DurationUnit::Hours => &self.hours,
            DurationUnit::Minutes => &self.minutes,
            DurationUnit::Seconds => &self.seconds,
            DurationUnit::Milliseconds => &self.milliseconds,
            DurationUnit::Microseconds => &self.microseconds,
        }
    }

    pub fn with_suffix(mut self, unit: DurationUnit, suffix: impl Into<Cow<'static, str>>) -> Self {
        let suffix = suffix.into();
        match unit {
            DurationUnit::Hours => self.hours = suffix,
            DurationUnit::Minutes => self.minutes = suffix,
            DurationUnit::Seconds => self.seconds = suffix,
            DurationUnit::Milliseconds => self.milliseconds = suffix,
            DurationUnit::Microseconds => self.microseconds = suffix,
        }
        self
    }
}

impl Default for DurationPresentation {
    fn default() -> Self {
        Self {
            hours: Cow::Borrowed("h"),
            minutes: Cow::Borrowed("m"),
            seconds: Cow::Borrowed("s"),
            milliseconds: Cow::Borrowed("ms"),
            microseconds: Cow::Borrowed("µs"),
        }
    }
}

/// `chrono` format string used to render and parse date/time buffers.
#[derive(Debug, Clone)]
pub struct DateTimeFormat {
    pub pattern: Cow<'static, str>,
}

impl DateTimeFormat {
    pub fn with_pattern(mut self, pattern: impl Into<Cow<'static, str>>) -> Self {
        self.pattern = pattern.into();
        self
    }
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        Self {
            pattern: Cow::Borrowed("%Y-%m-%d %H:%M"),
        }
    }
}

/// User-facing string hints for list summaries.
#[derive(Debug, Clone)]
pub struct ListHints {
    pub label: Cow<'static, str>,
    pub hint: Cow<'static, str>,
}

impl ListHints {
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_hint(mut self, hint: impl Into<Cow<'static, str>>) -> Self {
        self.hint = hint.into();
        self
    }
}

impl Default for ListHints {
    fn default() -> Self {
        Self {
            label: Cow::Borrowed("List"),
            hint: Cow::Borrowed("(Ctrl+N add, Ctrl+D remove)"),
        }
    }
}

/// Aggregated component palette shared by every control of a registry.
#[derive(Debug, Clone, Default)]
pub struct ComponentPalette {
    pub numeric: NumericTuning,
    pub bools: BoolTogglePresentation,
    pub enums: EnumBehaviour,
    pub text: TextPresentation,
    pub durations: DurationPresentation,
    pub date_time: DateTimeFormat,
    pub lists: ListHints,
}

impl ComponentPalette {
    pub fn with_numeric(mut self, tuning: NumericTuning) -> Self {
        self.numeric = tuning;
        self
    }

    pub fn with_bool_presentation(mut self, presentation: BoolTogglePresentation) -> Self {
        self.bools = presentation;
        self
    }

    pub fn with_enum_behaviour(mut self, behaviour: EnumBehaviour) -> Self {
        self.enums = behaviour;
        self
    }

    pub fn with_text_presentation(mut self, presentation: TextPresentation) -> Self {
        self.text = presentation;
        self
    }

    pub fn with_duration_presentation(mut self, presentation: DurationPresentation) -> Self {
        self.durations = presentation;
        self
    }

    pub fn with_date_time_format(mut self, format: DateTimeFormat) -> Self {
        self.date_time = format;
        self
    }

    pub fn with_list_hints(mut self, hints: ListHints) -> Self {
        self.lists = hints;
        self
    }
}
