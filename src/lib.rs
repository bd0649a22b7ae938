#![deny(rust_2018_idioms)]

pub mod domain;
pub mod form;
pub mod options;
pub mod persist;
mod session;


pub use domain::{
    DurationUnit, DurationUnits, EntityRecord, EnumValue, FieldDescriptor, FieldRef,
    FieldValue, RecordArena, RecordHandle, Scalar, ScalarKind, ValueKind,
};
pub use form::{
    BindError, Catalog, CatalogEntry, Control, ControlContext, ControlRegistry, DirtyTracker,
    Notification,
};
pub use options::{BinderOptions, FieldOptions, FieldSettings};
pub use persist::{MemoryStorage, MemoryStorageError, SaveOutcome, Storage};
pub use session::EditSession;

pub mod prelude {
    pub use super::{
        BinderOptions, Catalog, EditSession, EntityRecord, FieldDescriptor, FieldOptions,
        FieldValue, SaveOutcome, Scalar, Storage,
    };
}
