use std::borrow::Cow;

/// A specialized [`StorageError`] enum of this crate.
#[thw_derive::thw_error]
pub enum StorageError {
    #[error("Storage root not found{}: {message}", format_context(.context))]
    RootNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The key has never been written (or was deleted). Callers usually treat this as a miss.
    #[error("Key not found{}: {message}", format_context(.context))]
    KeyNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid key{}: {message}", format_context(.context))]
    InvalidKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Storage I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Decompression failure{}: {source}", format_context(.context))]
    Decompress { source: lz4_flex::block::DecompressError, context: Option<Cow<'static, str>> },
}
