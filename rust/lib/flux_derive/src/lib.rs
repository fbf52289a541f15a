//! Flux proc macros.
//!
//! - `#[state("path")]`: mark a struct or enum as a Flux state type
//! - `#[request("path")]`: mark a struct as a Flux request type
//!
//! Both generate a `PATH` const and the matching `safespot_flux` trait
//! impl, and add `#[derive(Debug, Clone)]` when missing. `#[state]` also
//! adds `PartialEq` so states can be compared in tests and by the UI.

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod expand;

use expand::Kind;

/// Define a Flux state type.
///
/// ```ignore
/// #[state("auth/validation")]
/// pub struct ValidationState {
///     pub identifier_invalid: bool,
///     pub secret_invalid: bool,
/// }
/// ```
#[proc_macro_attribute]
pub fn state(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as syn::Item);
    expand::expand(Kind::State, attr.into(), item)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Define a Flux request type.
///
/// ```ignore
/// #[request("auth/login")]
/// pub struct LoginReq {
///     pub identifier: String,
///     pub secret: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn request(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as syn::Item);
    expand::expand(Kind::Request, attr.into(), item)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
