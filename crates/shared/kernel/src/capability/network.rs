use async_trait::async_trait;
use std::borrow::Cow;

#[thw_derive::thw_error]
pub enum NetworkError {
    /// No connectivity, or the backend is not configured.
    #[error("Network unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Request failed{}: {message}", format_context(.context))]
    Request { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal network error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Access to a remote service backend.
#[async_trait]
pub trait NetworkCapability: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;

    /// Fetches the raw body of `endpoint`.
    ///
    /// # Errors
    /// [`NetworkError::Unavailable`] when offline, [`NetworkError::Request`] when the
    /// backend rejects the call.
    async fn get(&self, endpoint: &str) -> Result<Vec<u8>, NetworkError>;
}
