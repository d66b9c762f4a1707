use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, Ident, ItemFn, ReturnType, Type};

/// Expands `#[thw_runtime::main(profile)]`.
#[must_use]
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    if input.sig.asyncness.is_none() {
        return Error::new_spanned(
            input.sig.fn_token,
            "#[thw_runtime::main] can only be applied to an `async fn`",
        )
        .to_compile_error();
    }

    if !returns_result(&input.sig.output) {
        return Error::new_spanned(
            &input.sig.ident,
            "#[thw_runtime::main] requires the function to return a `Result`",
        )
        .to_compile_error();
    }

    let config = match profile_config(args) {
        Ok(tokens) => tokens,
        Err(err) => return err.to_compile_error(),
    };

    let ItemFn { attrs, vis, sig, block } = input;
    let name = &sig.ident;
    let output = &sig.output;

    // The body runs inside `block_on`, so it stays on the calling thread for
    // the interactive profile and does not need to be `Send`.
    quote! {
        #(#attrs)*
        #vis fn #name() #output {
            let config = #config;
            let runtime = ::thw_runtime::build_runtime(&config)?;
            runtime.block_on(async move #block)
        }
    }
}

fn profile_config(args: TokenStream) -> Result<TokenStream, Error> {
    if args.is_empty() {
        return Ok(quote! { ::thw_runtime::RuntimeConfig::default() });
    }

    let profile: Ident = syn::parse2(args)?;
    match profile.to_string().as_str() {
        "interactive" => Ok(quote! { ::thw_runtime::RuntimeConfig::interactive() }),
        "background" => Ok(quote! { ::thw_runtime::RuntimeConfig::background() }),
        "default" => Ok(quote! { ::thw_runtime::RuntimeConfig::default() }),
        _ => Err(Error::new_spanned(
            profile,
            "unknown runtime profile, expected one of: interactive, background, default",
        )),
    }
}

fn returns_result(output: &ReturnType) -> bool {
    match output {
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Path(path) => path.path.segments.last().is_some_and(|s| s.ident == "Result"),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_fn(args: TokenStream, src: &str) -> String {
        let item: ItemFn = syn::parse_str(src).expect("valid fn");
        expand_main(args, item).to_string()
    }

    #[test]
    fn interactive_profile_is_selected() {
        let out = expand_fn(quote!(interactive), "async fn main() -> Result<(), ()> { Ok(()) }");
        assert!(out.contains("interactive"));
        assert!(out.contains("block_on"));
    }

    #[test]
    fn missing_profile_uses_default() {
        let out = expand_fn(TokenStream::new(), "async fn main() -> Result<(), ()> { Ok(()) }");
        assert!(out.contains("RuntimeConfig"));
        assert!(out.contains("default"));
    }

    #[test]
    fn sync_functions_are_rejected() {
        let out = expand_fn(TokenStream::new(), "fn main() -> Result<(), ()> { Ok(()) }");
        assert!(out.contains("async fn"));
        assert!(out.contains("compile_error"));
    }

    #[test]
    fn unit_return_is_rejected() {
        let out = expand_fn(TokenStream::new(), "async fn main() {}");
        assert!(out.contains("return a `Result`"));
    }

    #[test]
    fn unknown_profile_is_rejected() {
        let out = expand_fn(quote!(turbo), "async fn main() -> Result<(), ()> { Ok(()) }");
        assert!(out.contains("unknown runtime profile"));
    }
}
