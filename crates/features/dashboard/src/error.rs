use std::borrow::Cow;
use thw_kernel::NetworkError;

#[thw_derive::thw_error]
pub enum DashboardError {
    #[error("Dashboard network failure{}: {source}", format_context(.context))]
    Network { source: NetworkError, context: Option<Cow<'static, str>> },

    #[error("Internal dashboard error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
