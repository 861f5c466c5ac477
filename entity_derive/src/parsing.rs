//! Parsing utilities for entity and field attributes
//!
//! This module handles the parsing of `#[entity]` and `#[field]` attributes
//! and the compile-time checks on table and column names.

use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Attribute, Data, Error, Expr, Fields, Ident, Lit, LitStr, Result, Type};
use type_mapping::{is_optional_type, rust_type_to_sql_type, sql_kind_of, SqlKind};

/// Identifier limit shared by the supported servers
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Validate table name and return syn::Error for better proc macro error handling
pub fn validate_table_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid table name '{}': {}", name, e)))
}

/// Validate column name and return syn::Error for better proc macro error handling
pub fn validate_column_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid column name '{}': {}", name, e)))
}

/// Same rules the schema builder applies at registration
fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(format!(
            "too long: {} bytes (max {})",
            name.len(),
            MAX_IDENTIFIER_LENGTH
        ));
    }
    if name.chars().any(char::is_control) {
        return Err("contains control characters".to_string());
    }
    Ok(())
}

/// Struct-level settings from `#[entity(...)]`
pub struct EntityInfo {
    pub table: Option<String>,
}

/// How a field's default is declared
pub enum DefaultSpec {
    /// Whatever the column kind provides
    Kind,
    /// `no_default`
    Cleared,
    /// `default = "literal"`
    Literal(Lit),
    /// `default = path_to_fn`, `default = || expr` or any other expression
    Computed(Expr),
}

pub struct FieldInfo {
    pub ident: Ident,
    pub ty: Type,
    pub attribute: String,
    pub optional: bool,
    pub column: Option<String>,
    pub kind: Option<SqlKind>,
    pub ddl: String,
    pub primary_key: bool,
    pub default: DefaultSpec,
}

pub fn parse_entity_attributes(attrs: &[Attribute]) -> Result<EntityInfo> {
    let mut table = None;

    for attr in attrs {
        if !attr.path().is_ident("entity") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let lit: LitStr = meta.value()?.parse()?;
                validate_table_name_syn(&lit.value(), lit.span())?;
                table = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unsupported entity attribute, expected `table = \"...\"`"))
            }
        })?;
    }

    Ok(EntityInfo { table })
}

pub fn parse_field_attributes(data: &Data) -> Result<Vec<FieldInfo>> {
    let Data::Struct(data_struct) = data else {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "Entity can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(fields_named) = &data_struct.fields else {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "Entity can only be derived for structs with named fields",
        ));
    };

    let mut fields = Vec::new();
    for field in &fields_named.named {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new_spanned(field, "Field must have a name"))?;
        if let Some(info) = parse_field(ident, &field.ty, &field.attrs)? {
            fields.push(info);
        }
    }
    Ok(fields)
}

/// `None` for fields marked `skip`
fn parse_field(ident: Ident, ty: &Type, attrs: &[Attribute]) -> Result<Option<FieldInfo>> {
    let attribute = ident.unraw().to_string();
    let mut column = None;
    let mut ddl = None;
    let mut text = false;
    let mut primary_key = false;
    let mut skip = false;
    let mut default = DefaultSpec::Kind;
    let mut default_span = None;

    for attr in attrs {
        if !attr.path().is_ident("field") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("primary_key") {
                primary_key = true;
            } else if meta.path.is_ident("text") {
                text = true;
            } else if meta.path.is_ident("skip") {
                skip = true;
            } else if meta.path.is_ident("no_default") {
                default = DefaultSpec::Cleared;
            } else if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                validate_column_name_syn(&lit.value(), lit.span())?;
                column = Some(lit.value());
            } else if meta.path.is_ident("ddl") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().trim().is_empty() {
                    return Err(Error::new(lit.span(), "ddl cannot be empty"));
                }
                ddl = Some(lit.value());
            } else if meta.path.is_ident("default") {
                let expr: Expr = meta.value()?.parse()?;
                default_span = Some(expr.span());
                default = match expr {
                    Expr::Lit(expr_lit) => DefaultSpec::Literal(expr_lit.lit),
                    other => DefaultSpec::Computed(other),
                };
            } else {
                return Err(meta.error(
                    "unsupported field attribute, expected one of: primary_key, name, ddl, text, default, no_default, skip",
                ));
            }
            Ok(())
        })?;
    }

    if skip {
        return Ok(None);
    }

    if column.is_none() {
        validate_column_name_syn(&attribute, ident.span())?;
    }

    let type_string = quote!(#ty).to_string();
    let optional = is_optional_type(&type_string);
    if let (false, Some(span)) = (optional, default_span) {
        // Plain fields always have a value
        return Err(Error::new(
            span,
            format!(
                "default on `{}` is never applied; declare the field as `Option<{}>`",
                attribute,
                type_string.replace(' ', "")
            ),
        ));
    }

    let kind = if text {
        Some(SqlKind::Text)
    } else {
        sql_kind_of(&type_string)
    };

    let ddl = match (ddl, kind) {
        (Some(ddl), _) => ddl,
        (None, Some(SqlKind::Text)) => SqlKind::Text.default_ddl().to_string(),
        (None, Some(_)) => rust_type_to_sql_type(&type_string)
            .unwrap_or_default()
            .to_string(),
        (None, None) => {
            return Err(Error::new_spanned(
                ty,
                format!(
                    "cannot map type `{}` to a column; declare one with #[field(ddl = \"...\")]",
                    type_string.replace(' ', "")
                ),
            ))
        }
    };

    Ok(Some(FieldInfo {
        ident,
        ty: ty.clone(),
        attribute,
        optional,
        column,
        kind,
        ddl,
        primary_key,
        default,
    }))
}
