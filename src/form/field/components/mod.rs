mod base;
mod bool;
mod bounded;
mod custom;
mod date_time;
mod duration;
mod enum_select;
pub(crate) mod helpers;
mod palette;
mod scalar_list;
mod text;

pub(crate) use base::FieldComponent;
pub use base::{ComponentKind, DurationStateRef, EnumStateRef};
pub use bool::BoolComponent;
pub use bounded::{BoundedIntegerComponent, IntegerBounds};
pub use custom::{CustomComponent, Placeholder, RenderHook, RenderNode};
pub use date_time::DateTimeComponent;
pub use duration::DurationComponent;
pub use enum_select::EnumComponent;
pub use palette::{
    BoolTogglePresentation, ComponentPalette, DateTimeFormat, DurationPresentation,
    EnumBehaviour, ListHints, NumericTuning, TextPresentation,
};
pub use scalar_list::{ItemComparator, ListState, ScalarListComponent};
pub use text::TextComponent;
