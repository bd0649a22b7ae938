use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{
    DurationUnits, EntityRecord, EnumValue, FieldDescriptor, FieldValue, RecordArena,
    ScalarKind,
};
use crate::form::field::components::{ComponentKind, Placeholder, RenderNode};
use crate::form::{BindError, ControlRegistry, DirtyTracker};
use crate::options::{BinderOptions, FieldOptions};

fn hangar() -> EntityRecord {
    let inspected = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .expect("timestamp");
    EntityRecord::new(
        "hangar",
        vec![
            FieldDescriptor::new("type", "Main"),
            FieldDescriptor::new("bays", 2_i64),
            FieldDescriptor::new("active", true),
            FieldDescriptor::new("class", EnumValue::new(["A", "B", "C"], "B")),
            FieldDescriptor::new("parts", FieldValue::list(ScalarKind::Text, ["A", "B"])),
            FieldDescriptor::new("window", Duration::from_secs(90)),
            FieldDescriptor::new("inspected", inspected),
            FieldDescriptor::new("manifest", FieldValue::Blob(vec![1, 2, 3])),
            FieldDescriptor::new("meta", FieldValue::Object(json!({"crew": 4}))),
            FieldDescriptor::new("load", 0.5_f64),
        ],
    )
    .expect("record")
}

#[test]
fn one_control_per_field_in_field_order() {
    let mut records = RecordArena::new();
    let handle = records.insert(hangar());
    let mut registry = ControlRegistry::new(BinderOptions::default());
    let mut dirty = DirtyTracker::new();

    let controls = registry
        .create_controls(&records, handle, &mut dirty)
        .expect("controls");

    assert_eq!(controls.len(), records[handle].len());
    for (index, control) in controls.iter().enumerate() {
        assert_eq!(control.index(), index);
        assert_eq!(control.key(), records[handle].fields()[index].key());
        assert_eq!(control.listener_count(), 1);
    }
}

#[test]
fn dispatch_follows_value_kind() {
    let mut records = RecordArena::new();
    let handle = records.insert(hangar());
    let mut registry = ControlRegistry::new(BinderOptions::default());
    registry
        .create_controls(&records, handle, &mut DirtyTracker::new())
        .expect("controls");

    let kinds: Vec<_> = registry.controls().iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ComponentKind::Text,
            ComponentKind::Text,
            ComponentKind::Toggle,
            ComponentKind::Enum,
            ComponentKind::List,
            ComponentKind::Duration,
            ComponentKind::DateTime,
            ComponentKind::Custom,
            ComponentKind::Custom,
            ComponentKind::Text,
        ]
    );
}

#[test]
fn mirrors_start_from_current_values() {
    let mut records = RecordArena::new();
    let handle = records.insert(hangar());
    let mut registry = ControlRegistry::new(BinderOptions::default());
    registry
        .create_controls(&records, handle, &mut DirtyTracker::new())
        .expect("controls");

    let display = |index: usize| {
        registry
            .control(index)
            .map(|control| control.display_value())
            .unwrap_or_default()
    };
    assert_eq!(display(0), "Main");
    assert_eq!(display(1), "2");
    assert_eq!(display(2), "true");
    assert_eq!(display(3), "B");
    assert_eq!(display(5), "0h 1m 30s");
    assert_eq!(display(6), "2024-03-01 09:30");
}

#[test]
fn repeated_creation_replaces_the_list() {
    let mut records = RecordArena::new();
    let handle = records.insert(hangar());
    let mut registry = ControlRegistry::new(BinderOptions::default());
    let mut dirty = DirtyTracker::new();

    registry
        .create_controls(&records, handle, &mut dirty)
        .expect("first pass");
    registry
        .create_controls(&records, handle, &mut dirty)
        .expect("second pass");

    assert_eq!(registry.len(), 10);
    assert!(registry.controls().iter().all(|c| c.listener_count() == 1));
    assert!(!dirty.is_dirty());
}

#[test]
fn construction_leaves_session_clean() {
    let mut records = RecordArena::new();
    let handle = records.insert(hangar());
    let mut registry = ControlRegistry::new(BinderOptions::default());
    let mut dirty = DirtyTracker::new();
    dirty.mark();

    registry
        .create_controls(&records, handle, &mut dirty)
        .expect("controls");

    assert!(!dirty.is_dirty());
}

#[test]
fn bounds_select_bounded_integer() {
    let mut records = RecordArena::new();
    let handle = records.insert(hangar());
    let options = BinderOptions::default().with_field("bays", FieldOptions::new().with_bounds(0, 12));
    let mut registry = ControlRegistry::new(options);
    registry
        .create_controls(&records, handle, &mut DirtyTracker::new())
        .expect("controls");

    let bays = registry.control(1).expect("bays");
    assert_eq!(bays.kind(), ComponentKind::BoundedInteger);
    assert_eq!(bays.integer_bounds().map(|b| (b.min, b.max)), Some((0, 12)));
}

#[test]
fn empty_duration_mask_is_rejected() {
    let mut records = RecordArena::new();
    let handle = records.insert(hangar());
    let options = BinderOptions::default()
        .with_field("window", FieldOptions::new().with_duration_units(DurationUnits::NONE));
    let mut registry = ControlRegistry::new(options);

    let err = registry
        .create_controls(&records, handle, &mut DirtyTracker::new())
        .expect_err("empty mask");

    assert_eq!(
        err,
        BindError::EmptyDurationMask {
            key: "window".to_string()
        }
    );
    assert!(registry.is_empty());
}

#[test]
fn json_mask_without_known_units_is_rejected() {
    let mut records = RecordArena::new();
    let handle = records.insert(hangar());
    let options = BinderOptions::default()
        .with_settings_json(r#"{"window": {"duration_units": 32}}"#)
        .expect("valid json");
    let mut registry = ControlRegistry::new(options);

    let err = registry
        .create_controls(&records, handle, &mut DirtyTracker::new())
        .expect_err("no known unit");

    assert_eq!(
        err,
        BindError::EmptyDurationMask {
            key: "window".to_string()
        }
    );
    assert_eq!(
        records[handle].fields()[5].value(),
        &FieldValue::Duration(Duration::from_secs(90))
    );
}

#[test]
fn retired_record_cannot_be_bound() {
    let mut records = RecordArena::new();
    let handle = records.insert(hangar());
    records.remove(handle);
    let mut registry = ControlRegistry::new(BinderOptions::default());

    let err = registry
        .create_controls(&records, handle, &mut DirtyTracker::new())
        .expect_err("gone");

    assert_eq!(err, BindError::RecordGone(handle));
}

#[test]
fn custom_controls_use_hook_or_placeholder() {
    let mut records = RecordArena::new();
    let handle = records.insert(hangar());
    let options = BinderOptions::default().with_field(
        "meta",
        FieldOptions::new().with_render_hook(|control, field| {
            Box::new(format!("{}:{}", control.key(), field.kind())) as RenderNode
        }),
    );
    let mut registry = ControlRegistry::new(options);
    registry
        .create_controls(&records, handle, &mut DirtyTracker::new())
        .expect("controls");

    let manifest = registry
        .control(7)
        .expect("manifest")
        .render(&records)
        .expect("render");
    assert!(manifest.downcast_ref::<Placeholder>().is_some());

    let meta = registry
        .control(8)
        .expect("meta")
        .render(&records)
        .expect("render");
    assert_eq!(
        meta.downcast_ref::<String>().map(String::as_str),
        Some("meta:object")
    );
}
