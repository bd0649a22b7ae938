pub mod components;
pub(crate) mod convert;
