use std::borrow::Cow;

/// Errors raised while building a runtime.
#[thw_derive::thw_error]
pub enum RuntimeError {
    #[error("Runtime build failure{}: {source}", format_context(.context))]
    Build { source: std::io::Error, context: Option<Cow<'static, str>> },
}
