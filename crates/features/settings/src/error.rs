use std::borrow::Cow;
use thw_kernel::StorageFailure;

#[thw_derive::thw_error]
pub enum SettingsError {
    #[error("Settings storage failure{}: {source}", format_context(.context))]
    Storage { source: StorageFailure, context: Option<Cow<'static, str>> },

    #[error("Internal settings error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
