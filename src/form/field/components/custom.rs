use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::domain::{FieldDescriptor, FieldValue};
use crate::form::control::Control;
use crate::form::field::convert::value_to_string;

use super::{ComponentKind, FieldComponent};

/// Whatever the renderer produces for a custom control. Never inspected here.
pub type RenderNode = Box<dyn Any + Send>;

pub type RenderHook = Arc<dyn Fn(&Control, &FieldDescriptor) -> RenderNode + Send + Sync>;

/// Node returned for custom controls that were given no render hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placeholder;

/// Opaque values (blobs, nested objects) that only a caller-supplied hook
/// knows how to present.
#[derive(Clone)]
pub struct CustomComponent {
    value: Option<FieldValue>,
    hook: Option<RenderHook>,
}

impl CustomComponent {
    pub fn new(hook: Option<RenderHook>) -> Self {
        Self { value: None, hook }
    }
}

impl fmt::Debug for CustomComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomComponent")
            .field("value", &self.value)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl FieldComponent for CustomComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Custom
    }

    fn display_value(&self) -> String {
        self.value
            .as_ref()
            .map(value_to_string)
            .unwrap_or_default()
    }

    fn seed_value(&mut self, value: &FieldValue) {
        self.value = Some(value.clone());
    }

    fn accept(&mut self, value: FieldValue) -> FieldValue {
        self.value = Some(value.clone());
        value
    }

    fn render_hook(&self) -> Option<&RenderHook> {
        self.hook.as_ref()
    }
}
