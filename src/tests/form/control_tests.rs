use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::{
    DurationUnit, DurationUnits, EntityRecord, EnumValue, FieldDescriptor, FieldValue,
    RecordArena, ValueKind,
};
use crate::form::{BindError, ControlContext, ControlRegistry, DirtyTracker};
use crate::options::{BinderOptions, FieldOptions};

struct Harness {
    records: RecordArena,
    registry: ControlRegistry,
    dirty: DirtyTracker,
}

impl Harness {
    fn new(fields: Vec<FieldDescriptor>, options: BinderOptions) -> Self {
        let mut records = RecordArena::new();
        let handle = records.insert(EntityRecord::new("hangar", fields).expect("record"));
        let mut registry = ControlRegistry::new(options);
        let mut dirty = DirtyTracker::new();
        registry
            .create_controls(&records, handle, &mut dirty)
            .expect("controls");
        Self {
            records,
            registry,
            dirty,
        }
    }

    fn edit<T>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut crate::form::Control, &mut ControlContext<'_>) -> T,
    ) -> T {
        let control = self.registry.control_mut(index).expect("control");
        let mut ctx = ControlContext::new(&mut self.records, &mut self.dirty);
        edit(control, &mut ctx)
    }

    fn value(&self, index: usize) -> FieldValue {
        self.registry
            .control(index)
            .expect("control")
            .value(&self.records)
            .expect("value")
            .clone()
    }

    fn display(&self, index: usize) -> String {
        self.registry.control(index).expect("control").display_value()
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn set_with_identity_transforms_writes_value() {
    let mut harness = Harness::new(
        vec![FieldDescriptor::new("type", "Main")],
        BinderOptions::default(),
    );

    harness
        .edit(0, |control, ctx| control.set(ctx, FieldValue::text("Secondary")))
        .expect("set");

    assert_eq!(harness.value(0), FieldValue::text("Secondary"));
    assert_eq!(harness.display(0), "Secondary");
    assert!(harness.dirty.is_dirty());
}

#[test]
fn set_applies_both_transforms() {
    let options = BinderOptions::default().with_field(
        "type",
        FieldOptions::new().with_transforms(
            |value| match value {
                FieldValue::Text(text) => FieldValue::Text(text.to_uppercase()),
                other => other,
            },
            |value| match value {
                FieldValue::Text(text) => FieldValue::Text(format!("{}!", text.to_lowercase())),
                other => other,
            },
        ),
    );
    let mut harness = Harness::new(vec![FieldDescriptor::new("type", "main")], options);
    assert_eq!(harness.display(0), "MAIN");

    harness
        .edit(0, |control, ctx| control.set(ctx, FieldValue::text("Depot")))
        .expect("set");

    assert_eq!(harness.display(0), "DEPOT");
    assert_eq!(harness.value(0), FieldValue::text("depot!"));
}

#[test]
fn transforms_may_show_a_field_as_another_kind() {
    let options = BinderOptions::default().with_field(
        "bays",
        FieldOptions::new().with_transforms(
            |value| match value {
                FieldValue::Integer(count) => FieldValue::Text(count.to_string()),
                other => other,
            },
            |value| match value {
                FieldValue::Text(text) => text
                    .trim()
                    .parse()
                    .map(FieldValue::Integer)
                    .unwrap_or(FieldValue::Text(text)),
                other => other,
            },
        ),
    );
    let mut harness = Harness::new(vec![FieldDescriptor::new("bays", 3_i64)], options);
    assert_eq!(harness.display(0), "3");

    harness
        .edit(0, |control, ctx| control.set(ctx, FieldValue::Integer(7)))
        .expect("set");
    assert_eq!(harness.value(0), FieldValue::Integer(7));
    assert_eq!(harness.display(0), "7");

    harness
        .edit(0, |control, ctx| control.set_value(ctx, FieldValue::text(" 12 ")))
        .expect("set_value");
    assert_eq!(harness.value(0), FieldValue::Integer(12));

    let err = harness
        .edit(0, |control, ctx| control.set_value(ctx, FieldValue::text("twelve")))
        .expect_err("not a number");
    assert_eq!(
        err,
        BindError::kind_mismatch("bays", ValueKind::Integer, ValueKind::Text)
    );
    assert_eq!(harness.value(0), FieldValue::Integer(12));
    assert_eq!(harness.display(0), "12");
}

#[test]
fn listeners_run_in_registration_order_before_return() {
    let mut harness = Harness::new(
        vec![FieldDescriptor::new("bays", 1_i64)],
        BinderOptions::default(),
    );
    let seen = Arc::new(Mutex::new(Vec::new()));
    for tag in ["first", "second"] {
        let seen = Arc::clone(&seen);
        harness.edit(0, |control, _| {
            control.add_listener(move |notification| {
                let value = notification.value().as_integer();
                seen.lock().expect("lock").push((tag, value));
            })
        });
    }

    harness
        .edit(0, |control, ctx| control.set_value(ctx, FieldValue::Integer(5)))
        .expect("write");
    harness
        .edit(0, |control, ctx| control.set_value(ctx, FieldValue::Integer(5)))
        .expect("write");

    let seen = seen.lock().expect("lock").clone();
    assert_eq!(
        seen,
        vec![
            ("first", Some(5)),
            ("second", Some(5)),
            ("first", Some(5)),
            ("second", Some(5)),
        ]
    );
}

#[test]
fn kind_mismatch_leaves_field_untouched() {
    let mut harness = Harness::new(
        vec![FieldDescriptor::new("bays", 3_i64)],
        BinderOptions::default(),
    );

    let err = harness
        .edit(0, |control, ctx| control.set(ctx, FieldValue::text("three")))
        .expect_err("mismatch");

    assert_eq!(
        err,
        BindError::kind_mismatch("bays", ValueKind::Integer, ValueKind::Text)
    );
    assert_eq!(harness.value(0), FieldValue::Integer(3));
    assert!(!harness.dirty.is_dirty());
}

#[test]
fn text_keys_write_parsed_values() {
    let mut harness = Harness::new(
        vec![
            FieldDescriptor::new("type", "Mai"),
            FieldDescriptor::new("bays", 9_i64),
        ],
        BinderOptions::default(),
    );

    let wrote = harness
        .edit(0, |control, ctx| control.handle_key(ctx, &key(KeyCode::Char('n'))))
        .expect("key");
    assert!(wrote);
    assert_eq!(harness.value(0), FieldValue::text("Main"));

    harness
        .edit(1, |control, ctx| control.handle_key(ctx, &key(KeyCode::Right)))
        .expect("key");
    assert_eq!(harness.value(1), FieldValue::Integer(10));
}

#[test]
fn read_only_controls_ignore_keys() {
    let options =
        BinderOptions::default().with_field("type", FieldOptions::new().with_read_only(true));
    let mut harness = Harness::new(vec![FieldDescriptor::new("type", "Main")], options);

    let wrote = harness
        .edit(0, |control, ctx| control.handle_key(ctx, &key(KeyCode::Char('x'))))
        .expect("key");

    assert!(!wrote);
    assert_eq!(harness.value(0), FieldValue::text("Main"));
    assert!(!harness.dirty.is_dirty());
}

#[test]
fn obscured_display_masks_every_character() {
    let options = BinderOptions::default()
        .with_field("code", FieldOptions::new().with_obscure(true));
    let harness = Harness::new(vec![FieldDescriptor::new("code", "hunter2")], options);
    assert_eq!(harness.display(0), "•••••••");
}

#[test]
fn completions_filter_by_prefix() {
    let options = BinderOptions::default().with_field(
        "type",
        FieldOptions::new().with_completions(["Main", "Maintenance", "Secondary"]),
    );
    let harness = Harness::new(vec![FieldDescriptor::new("type", "")], options);
    let control = harness.registry.control(0).expect("control");
    assert_eq!(control.completions("ma"), vec!["Main", "Maintenance"]);
    assert!(control.completions("z").is_empty());
}

#[test]
fn toggle_and_enum_selection() {
    let mut harness = Harness::new(
        vec![
            FieldDescriptor::new("active", false),
            FieldDescriptor::new("class", EnumValue::new(["A", "B", "C"], "A")),
            FieldDescriptor::new("type", "Main"),
        ],
        BinderOptions::default(),
    );

    harness
        .edit(0, |control, ctx| control.toggle(ctx))
        .expect("toggle");
    assert_eq!(harness.value(0), FieldValue::Bool(true));

    harness
        .edit(1, |control, ctx| control.select(ctx, 7))
        .expect("select");
    assert_eq!(
        harness.value(1).as_enum().and_then(EnumValue::selected_label),
        Some("C")
    );

    let err = harness
        .edit(2, |control, ctx| control.toggle(ctx))
        .expect_err("text controls do not toggle");
    assert_eq!(err, BindError::unsupported("type", "toggle"));
}

#[test]
fn bounded_integers_clamp_writes() {
    let options =
        BinderOptions::default().with_field("bays", FieldOptions::new().with_bounds(0, 12));
    let mut harness = Harness::new(vec![FieldDescriptor::new("bays", 4_i64)], options);

    harness
        .edit(0, |control, ctx| control.set(ctx, FieldValue::Integer(40)))
        .expect("set");
    assert_eq!(harness.value(0), FieldValue::Integer(12));

    harness
        .edit(0, |control, ctx| control.handle_key(ctx, &key(KeyCode::Home)))
        .expect("home");
    assert_eq!(harness.value(0), FieldValue::Integer(0));
}

#[test]
fn duration_writes_truncate_to_finest_unit() {
    let mut harness = Harness::new(
        vec![FieldDescriptor::new("window", Duration::ZERO)],
        BinderOptions::default(),
    );

    harness
        .edit(0, |control, ctx| {
            control.set(ctx, FieldValue::Duration(Duration::from_millis(3_723_456)))
        })
        .expect("set");

    assert_eq!(
        harness.value(0),
        FieldValue::Duration(Duration::from_secs(3_723))
    );
    let control = harness.registry.control(0).expect("control");
    let state = control.duration_state().expect("duration");
    assert_eq!(state.component(DurationUnit::Hours), Some(1));
    assert_eq!(state.component(DurationUnit::Minutes), Some(2));
    assert_eq!(state.component(DurationUnit::Seconds), Some(3));
    assert_eq!(state.component(DurationUnit::Milliseconds), None);
    assert_eq!(control.display_value(), "1h 2m 3s");
}

#[test]
fn duration_component_edits_respect_bounds() {
    let options = BinderOptions::default().with_field(
        "window",
        FieldOptions::new().with_duration_units(DurationUnits::MINUTES | DurationUnits::SECONDS),
    );
    let mut harness = Harness::new(
        vec![FieldDescriptor::new("window", Duration::from_secs(125))],
        options,
    );

    let changed = harness
        .edit(0, |control, ctx| {
            control.set_duration_component(ctx, DurationUnit::Seconds, 500)
        })
        .expect("seconds");
    assert!(changed);
    assert_eq!(
        harness.value(0),
        FieldValue::Duration(Duration::from_secs(2 * 60 + 59))
    );

    let changed = harness
        .edit(0, |control, ctx| {
            control.set_duration_component(ctx, DurationUnit::Minutes, 600)
        })
        .expect("minutes");
    assert!(changed);
    assert_eq!(
        harness.value(0),
        FieldValue::Duration(Duration::from_secs(600 * 60 + 59))
    );

    let changed = harness
        .edit(0, |control, ctx| {
            control.set_duration_component(ctx, DurationUnit::Hours, 1)
        })
        .expect("unselected unit");
    assert!(!changed);
}

#[test]
fn duration_slots_resum_to_the_truncated_value_for_every_mask() {
    let samples = [
        Duration::ZERO,
        Duration::from_micros(1),
        Duration::from_micros(999_999),
        Duration::from_micros(1_001_001),
        Duration::from_micros(3_723_456_789),
        Duration::from_micros(90_061_001_001),
        Duration::from_secs(7 * 86_400) + Duration::from_micros(59_999_999),
    ];

    for bits in 1..=DurationUnits::ALL.bits() {
        let units = DurationUnits::from_bits(bits);
        let finest = units.finest().expect("non-empty mask").micros();
        let options = BinderOptions::default()
            .with_field("window", FieldOptions::new().with_duration_units(units));
        let mut harness = Harness::new(
            vec![FieldDescriptor::new("window", Duration::ZERO)],
            options,
        );

        for sample in samples {
            harness
                .edit(0, |control, ctx| control.set(ctx, FieldValue::Duration(sample)))
                .expect("set");

            let micros = u64::try_from(sample.as_micros()).expect("sample fits");
            let expected = Duration::from_micros(micros / finest * finest);
            let state = harness
                .registry
                .control(0)
                .and_then(|control| control.duration_state())
                .expect("duration");
            let resummed: u64 = units
                .ascending()
                .map(|unit| state.component(unit).expect("selected") * unit.micros())
                .sum();

            assert_eq!(
                Duration::from_micros(resummed),
                expected,
                "mask {units:?}, {sample:?}"
            );
            assert_eq!(harness.value(0), FieldValue::Duration(expected));
        }
    }
}

#[test]
fn date_and_time_edit_independently() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(8, 0, 0))
        .expect("timestamp");
    let mut harness = Harness::new(
        vec![FieldDescriptor::new("inspected", start)],
        BinderOptions::default(),
    );

    let date = NaiveDate::from_ymd_opt(2024, 6, 30).expect("date");
    harness
        .edit(0, |control, ctx| control.set_date(ctx, date))
        .expect("date");
    let time = NaiveTime::from_hms_opt(17, 45, 0).expect("time");
    harness
        .edit(0, |control, ctx| control.set_time(ctx, time))
        .expect("time");

    assert_eq!(
        harness.value(0),
        FieldValue::DateTime(date.and_time(time))
    );
    assert_eq!(harness.display(0), "2024-06-30 17:45");
}

#[test]
fn notify_fires_without_writing() {
    let mut harness = Harness::new(
        vec![FieldDescriptor::new("type", "Main")],
        BinderOptions::default(),
    );
    assert!(!harness.dirty.is_dirty());

    harness
        .edit(0, |control, ctx| control.notify(ctx))
        .expect("notify");

    assert!(harness.dirty.is_dirty());
    assert_eq!(harness.value(0), FieldValue::text("Main"));
}
