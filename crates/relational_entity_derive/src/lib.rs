use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Ident, Lit, LitStr, Meta, Path, Token,
    ext::IdentExt, parse_macro_input, parse_str, punctuated::Punctuated,
};

struct EntityConfig {
    crate_path: Path,
    table: Option<LitStr>,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            crate_path: parse_str("::relational_mapping")
                .expect("default crate path should parse"),
            table: None,
        }
    }
}

#[derive(Default)]
struct ColumnArgs {
    value: Option<LitStr>,
    key_column: Option<LitStr>,
}

struct FieldConfig {
    ident: Ident,
    is_id: bool,
    transient: bool,
    column: Option<ColumnArgs>,
    embedded: Option<LitStr>,
}

/// Derives `RelationalEntity` and `ValueShape` for a struct with named fields.
///
/// Field attributes: `#[id]`, `#[transient]`, `#[column("name")]`,
/// `#[column(value = "name", key_column = "key")]`, `#[embedded]`,
/// `#[embedded("prefix")]` and `#[embedded(prefix = "prefix")]`.
/// Struct attribute: `#[relational(table = "name", crate = "path")]`.
#[proc_macro_derive(
    RelationalEntity,
    attributes(relational, id, column, embedded, transient)
)]
pub fn derive_relational_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_entity(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Derives `ValueShape` for a fieldless enum, which is stored as text.
#[proc_macro_derive(RelationalEnum, attributes(relational))]
pub fn derive_relational_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_enum(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand_entity(input: DeriveInput) -> Result<TokenStream2, syn::Error> {
    reject_generics(&input)?;
    let config = entity_config(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "RelationalEntity requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "RelationalEntity can only be derived for structs",
            ));
        }
    };

    let crate_path = &config.crate_path;
    let mut has_id = false;
    let mut properties = Vec::new();

    for field in &fields.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let field_config = field_config(ident, &field.attrs)?;
        if field_config.transient {
            continue;
        }
        if field_config.is_id && has_id {
            return Err(syn::Error::new_spanned(
                &field_config.ident,
                "only one field may be marked #[id]",
            ));
        }
        has_id |= field_config.is_id;

        let name = field_config.ident.unraw().to_string();
        let ty = &field.ty;
        let mut property = quote! {
            #crate_path::PropertyModel::new(
                #name,
                <#ty as #crate_path::ValueShape>::shape(),
            )
        };
        if field_config.is_id {
            property = quote! { #property.id() };
        }
        if let Some(column) = &field_config.column {
            let value = optional_str(&column.value);
            let key_column = optional_str(&column.key_column);
            property = quote! { #property.with_column(#value, #key_column) };
        }
        if let Some(prefix) = &field_config.embedded {
            property = quote! { #property.with_embedded(#prefix) };
        }
        properties.push(property);
    }

    let ident = &input.ident;
    let entity_name = ident.to_string();
    let table = config
        .table
        .as_ref()
        .map(|table| quote! { .with_table_name(#table) });

    Ok(quote! {
        impl #crate_path::RelationalEntity for #ident {
            fn entity_model() -> #crate_path::EntityModel {
                #crate_path::EntityModel::new(#entity_name)
                    #table
                    #(.with_property(#properties))*
            }
        }

        impl #crate_path::ValueShape for #ident {
            fn shape() -> #crate_path::TypeShape {
                #crate_path::TypeShape::Entity(#crate_path::EntityType::of::<Self>())
            }
        }
    })
}

fn expand_enum(input: DeriveInput) -> Result<TokenStream2, syn::Error> {
    reject_generics(&input)?;
    let config = entity_config(&input.attrs)?;

    if !matches!(input.data, Data::Enum(_)) {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "RelationalEnum can only be derived for enums",
        ));
    }

    let crate_path = &config.crate_path;
    let ident = &input.ident;
    let name = ident.to_string();

    Ok(quote! {
        impl #crate_path::ValueShape for #ident {
            fn shape() -> #crate_path::TypeShape {
                #crate_path::TypeShape::Simple(#crate_path::SimpleType::Enum(#name))
            }
        }
    })
}

fn reject_generics(input: &DeriveInput) -> Result<(), syn::Error> {
    if input.generics.params.is_empty() {
        return Ok(());
    }
    Err(syn::Error::new_spanned(
        &input.generics,
        "generic types cannot be mapped; map a concrete type instead",
    ))
}

fn optional_str(value: &Option<LitStr>) -> TokenStream2 {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None },
    }
}

fn entity_config(attrs: &[Attribute]) -> Result<EntityConfig, syn::Error> {
    let mut config = EntityConfig::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("relational")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                config.table = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("crate") {
                let value: LitStr = meta.value()?.parse()?;
                config.crate_path = value.parse::<Path>().map_err(|err| {
                    syn::Error::new(value.span(), format!("invalid crate path: {err}"))
                })?;
                Ok(())
            } else {
                Err(meta.error("unknown relational attribute key"))
            }
        })?;
    }
    Ok(config)
}

fn field_config(ident: Ident, attrs: &[Attribute]) -> Result<FieldConfig, syn::Error> {
    let mut config = FieldConfig {
        ident,
        is_id: false,
        transient: false,
        column: None,
        embedded: None,
    };

    for attr in attrs {
        let path = attr.path();
        if path.is_ident("id") {
            attr.meta.require_path_only()?;
            config.is_id = true;
        } else if path.is_ident("transient") {
            attr.meta.require_path_only()?;
            config.transient = true;
        } else if path.is_ident("column") {
            config.column = Some(column_args(attr)?);
        } else if path.is_ident("embedded") {
            config.embedded = Some(embedded_prefix(attr)?);
        }
    }

    if config.transient && (config.is_id || config.column.is_some() || config.embedded.is_some())
    {
        return Err(syn::Error::new_spanned(
            &config.ident,
            "#[transient] fields cannot carry other mapping attributes",
        ));
    }

    Ok(config)
}

fn column_args(attr: &Attribute) -> Result<ColumnArgs, syn::Error> {
    if let Ok(value) = attr.parse_args::<LitStr>() {
        return Ok(ColumnArgs {
            value: Some(value),
            key_column: None,
        });
    }

    let args = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
    let mut column = ColumnArgs::default();
    apply_args(args, |key, value| match key.to_string().as_str() {
        "value" | "name" => {
            column.value = Some(value);
            Ok(())
        }
        "key_column" => {
            column.key_column = Some(value);
            Ok(())
        }
        _ => Err(syn::Error::new_spanned(key, "unknown column attribute key")),
    })?;
    Ok(column)
}

fn embedded_prefix(attr: &Attribute) -> Result<LitStr, syn::Error> {
    if let Meta::Path(_) = &attr.meta {
        return Ok(LitStr::new("", Span::call_site()));
    }
    if let Ok(prefix) = attr.parse_args::<LitStr>() {
        return Ok(prefix);
    }

    let args = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
    let mut prefix = None;
    apply_args(args, |key, value| {
        if key == "prefix" {
            prefix = Some(value);
            Ok(())
        } else {
            Err(syn::Error::new_spanned(key, "unknown embedded attribute key"))
        }
    })?;
    Ok(prefix.unwrap_or_else(|| LitStr::new("", Span::call_site())))
}

fn apply_args(
    args: Punctuated<Meta, Token![,]>,
    mut apply: impl FnMut(&Ident, LitStr) -> Result<(), syn::Error>,
) -> Result<(), syn::Error> {
    for meta in args {
        let Meta::NameValue(name_value) = meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "expected name-value pair, e.g. key_column = \"list_key\"",
            ));
        };

        let Some(ident) = name_value.path.get_ident() else {
            return Err(syn::Error::new_spanned(
                name_value.path,
                "expected simple identifier for attribute key",
            ));
        };

        let value = match name_value.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) => lit_str,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected string literal for attribute value",
                ));
            }
        };

        apply(ident, value)?;
    }

    Ok(())
}
