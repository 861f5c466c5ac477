use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error};

/// Convenience attribute macro that adds all necessary derives for an entity
///
/// Usage:
/// ```ignore
/// use entityhaus::prelude::*;
///
/// #[model]
/// #[entity(table = "users")]
/// pub struct User {
///     #[field(primary_key)]
///     pub id: Option<String>,
///     #[field(default = "")]
///     pub name: Option<String>,
/// }
/// ```
pub fn model_attribute(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    if !matches!(input.data, Data::Struct(_)) {
        return Error::new_spanned(&input.ident, "model can only be used on structs")
            .to_compile_error()
            .into();
    }

    // Add all the necessary derives to the struct
    let expanded = quote! {
        #[derive(Debug, Clone, Default, Entity)]
        #input
    };

    TokenStream::from(expanded)
}
