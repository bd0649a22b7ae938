mod catalog;
mod control;
mod dirty;
mod error;
pub mod field;
mod registry;

pub use catalog::{Catalog, CatalogEntry, ItemFormatter};
pub use control::{
    Control, ControlConfig, ControlContext, Listener, Notification, ValueTransform,
};
pub use dirty::DirtyTracker;
pub use error::BindError;
pub use registry::ControlRegistry;
