use std::borrow::Cow;
use thw_kernel::ContainerError;
use thw_storage::StorageError;

#[thw_derive::thw_error]
pub enum BootstrapError {
    #[error("Storage backend unavailable{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Container wiring failed{}: {source}", format_context(.context))]
    Container { source: ContainerError, context: Option<Cow<'static, str>> },
}
