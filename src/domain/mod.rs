mod arena;
mod duration;
mod entity;
mod value;

pub use arena::{FieldRef, RecordArena, RecordHandle};
pub use duration::{DurationUnit, DurationUnits};
pub use entity::{EntityRecord, FieldDescriptor};
pub use value::{EnumValue, FieldValue, Scalar, ScalarKind, ValueKind};
