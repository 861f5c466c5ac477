//! Procedural macros for mapping structs onto tables
//!
//! This crate provides the `#[model]` macro and the `Entity` derive, which
//! implement `entity_object::Entity` for a struct with named fields.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod codegen;
mod model_macro;
mod parsing;

use codegen::generate_entity_impl;
use model_macro::model_attribute;
use parsing::{parse_entity_attributes, parse_field_attributes};

/// Derive macro for the Entity trait
///
/// Note: It's recommended to use the `#[model]` attribute macro instead,
/// which also derives `Debug`, `Clone` and `Default`.
///
/// Struct attribute: `#[entity(table = "...")]`; without it the table is
/// named after the struct.
///
/// Field attributes, all optional, inside `#[field(...)]`:
/// - `primary_key`: exactly one field per entity
/// - `name = "col"`: column name when it differs from the field
/// - `ddl = "varchar(50)"`: column type; required for types with no built-in mapping
/// - `text`: map a `String` onto a `text` column
/// - `default = <literal | fn path | closure | expression>`: used by `save` when unset;
///   anything but a literal is evaluated on every use. Only allowed on `Option` fields
/// - `no_default`: drop the default the column kind would provide
/// - `skip`: not mapped at all
///
/// ```ignore
/// #[derive(Debug, Clone, Default, Entity)]
/// #[entity(table = "users")]
/// pub struct User {
///     #[field(primary_key, ddl = "varchar(50)")]
///     pub id: Option<String>,
///
///     #[field(default = "")]
///     pub name: Option<String>,
///
///     #[field(default = now)]
///     pub created_at: Option<f64>,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(entity, field))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    // Parse entity attributes - handle errors properly
    let entity_info = match parse_entity_attributes(&input.attrs) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    // Parse field attributes - handle errors properly
    let fields = match parse_field_attributes(&input.data) {
        Ok(fields) => fields,
        Err(e) => return e.to_compile_error().into(),
    };

    TokenStream::from(generate_entity_impl(
        name,
        &input.generics,
        &entity_info,
        &fields,
    ))
}

/// Convenience attribute macro that adds all necessary derives for an entity
#[proc_macro_attribute]
pub fn model(_attr: TokenStream, item: TokenStream) -> TokenStream {
    model_attribute(_attr, item)
}
