#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every Thriftwood crate.
//!
//! * [`macro@thw_error`] turns a plain enum into a workspace error type.
//! * [`macro@main`] boots an `async fn main` on one of the `thw-runtime` profiles.
//!
//! The doc examples are `ignore`d because a proc-macro crate cannot use its own
//! macros; the `tests/` directory exercises them through `trybuild`.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, parse_macro_input};

/// Attribute macro that bootstraps a `thw-runtime` profile around `async fn main`.
///
/// # Profiles
///
/// * `interactive` - current-thread runtime; the UI-confined execution context.
/// * `background` - multi-threaded runtime for headless work.
/// * `default` (or no argument) - `RuntimeConfig::default()`.
///
/// # Examples
///
/// ```rust,ignore
/// #[thw_runtime::main(interactive)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Defines a workspace error enum.
///
/// # What it generates
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * A `<Name>Ext` trait adding `.context(...)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant carrying a source.
/// * `From<Source>` for every variant carrying a source.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///   variant exists.
/// * A private `format_context` helper for the `#[error(...)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. A variant with a `source` field (or a field
/// marked `#[source]` / `#[from]`) must also declare
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[thw_derive::thw_error]
/// pub enum SettingsError {
///     #[error("Storage failure{}: {source}", format_context(.context))]
///     Storage { source: StorageFailure, context: Option<Cow<'static, str>> },
///
///     #[error("Internal settings error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn thw_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
