use std::borrow::Cow;

/// Configuration errors raised by the [`Container`](crate::Container).
///
/// An unregistered or mistyped capability is a wiring bug, not a runtime condition;
/// callers at start-up usually treat every variant as fatal.
#[thw_derive::thw_error]
pub enum ContainerError {
    #[error("Capability not registered{}: {message}", format_context(.context))]
    Unregistered { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Capability type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Capability construction failed{}: {message}", format_context(.context))]
    Construction { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ContainerError {
    pub(crate) fn unregistered(type_name: &'static str) -> Self {
        Self::Unregistered { message: type_name.into(), context: None }
    }

    pub(crate) fn type_mismatch(type_name: &'static str) -> Self {
        Self::TypeMismatch {
            message: type_name.into(),
            context: Some("Factory produced a different type".into()),
        }
    }

    /// Reports a factory that could not build its capability.
    pub fn construction(type_name: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Construction { message: type_name.into(), context: Some(reason.into()) }
    }
}
