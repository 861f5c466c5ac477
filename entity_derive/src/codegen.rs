//! Code generation for the Entity trait
//!
//! This module turns parsed entity and field metadata into an
//! `entity_object::Entity` implementation. No SQL is produced here: the
//! schema builder derives every statement from `declared_fields()` at
//! registration time.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Expr, Generics, Ident};
use type_mapping::SqlKind;

use crate::parsing::{DefaultSpec, EntityInfo, FieldInfo};

fn descriptor_constructor(kind: Option<SqlKind>, ddl: &str) -> TokenStream {
    let constructor = match kind {
        Some(SqlKind::String) => quote!(entity_object::FieldDescriptor::string()),
        Some(SqlKind::Boolean) => quote!(entity_object::FieldDescriptor::boolean()),
        Some(SqlKind::Integer) => quote!(entity_object::FieldDescriptor::integer()),
        Some(SqlKind::Float) => quote!(entity_object::FieldDescriptor::float()),
        Some(SqlKind::Text) => quote!(entity_object::FieldDescriptor::text()),
        Some(SqlKind::Bytes) => quote!(entity_object::FieldDescriptor::bytes()),
        None => return quote!(entity_object::FieldDescriptor::new(#ddl)),
    };

    match kind {
        Some(kind) if kind.default_ddl() != ddl => quote!(#constructor.ddl(#ddl)),
        _ => constructor,
    }
}

fn descriptor_expr(field: &FieldInfo) -> TokenStream {
    let mut descriptor = descriptor_constructor(field.kind, &field.ddl);

    if let Some(column) = &field.column {
        descriptor = quote!(#descriptor.named(#column));
    }
    if field.primary_key {
        descriptor = quote!(#descriptor.primary_key());
    }

    match &field.default {
        DefaultSpec::Kind => {}
        DefaultSpec::Cleared => descriptor = quote!(#descriptor.without_default()),
        DefaultSpec::Literal(lit) => descriptor = quote!(#descriptor.with_default(#lit)),
        DefaultSpec::Computed(expr @ (Expr::Path(_) | Expr::Closure(_))) => {
            descriptor = quote!(#descriptor.with_default_fn(#expr))
        }
        DefaultSpec::Computed(expr) => {
            descriptor = quote!(#descriptor.with_default_fn(|| #expr))
        }
    }

    descriptor
}

pub fn generate_entity_impl(
    name: &Ident,
    generics: &Generics,
    entity_info: &EntityInfo,
    fields: &[FieldInfo],
) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let entity_name = name.to_string();

    let table_name = match &entity_info.table {
        Some(table) => quote!(Some(#table)),
        None => quote!(None),
    };

    let declared: Vec<TokenStream> = fields
        .iter()
        .map(|field| {
            let attribute = &field.attribute;
            let descriptor = descriptor_expr(field);
            quote!((#attribute, #descriptor))
        })
        .collect();

    let getters: Vec<TokenStream> = fields
        .iter()
        .map(|field| {
            let attribute = &field.attribute;
            let ident = &field.ident;
            if field.optional {
                quote!(#attribute => self.#ident.clone().map(entity_object::SqlValue::from))
            } else {
                quote!(#attribute => Some(entity_object::SqlValue::from(self.#ident.clone())))
            }
        })
        .collect();

    let setters: Vec<TokenStream> = fields
        .iter()
        .map(|field| {
            let attribute = &field.attribute;
            let ident = &field.ident;
            let ty = &field.ty;
            quote! {
                #attribute => {
                    self.#ident = <#ty as entity_object::FromSqlValue>::from_sql_value(value)
                        .map_err(|source| entity_object::EntityError::TypeMismatch {
                            field: attribute.to_string(),
                            source,
                        })?;
                }
            }
        })
        .collect();

    quote! {
        impl #impl_generics entity_object::Entity for #name #ty_generics #where_clause {
            fn entity_name() -> &'static str {
                #entity_name
            }

            fn table_name() -> Option<&'static str> {
                #table_name
            }

            fn declared_fields() -> Vec<(&'static str, entity_object::FieldDescriptor)> {
                vec![#(#declared),*]
            }

            fn get_field(&self, attribute: &str) -> Option<entity_object::SqlValue> {
                match attribute {
                    #(#getters,)*
                    _ => None,
                }
            }

            fn set_field(
                &mut self,
                attribute: &str,
                value: entity_object::SqlValue,
            ) -> Result<(), entity_object::EntityError> {
                match attribute {
                    #(#setters)*
                    _ => {
                        return Err(entity_object::EntityError::UnknownField {
                            entity: #entity_name.to_string(),
                            field: attribute.to_string(),
                        })
                    }
                }
                Ok(())
            }
        }
    }
}
