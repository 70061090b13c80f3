use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, spanned::Spanned};

use crate::attribute_parser::{FieldMeta, RangeSpec, parse_field_meta, parse_resource_meta};
use crate::field_analyzer::{default_label, field_key, is_date_type};

/// One readable field with its list configuration.
struct ListField<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    key: String,
    meta: FieldMeta,
}

impl ListField<'_> {
    fn label(&self) -> String {
        self.meta.label.clone().unwrap_or_else(|| default_label(&self.key))
    }

    fn range_kind(&self) -> Option<TokenStream> {
        let date = match self.meta.range? {
            RangeSpec::Number => false,
            RangeSpec::Date => true,
            RangeSpec::Inferred => is_date_type(self.ty),
        };
        Some(if date {
            quote! { ::recordview::RangeKind::Date }
        } else {
            quote! { ::recordview::RangeKind::Number }
        })
    }
}

fn named_fields(input: &DeriveInput) -> syn::Result<&syn::FieldsNamed> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => Ok(named),
            other => Err(syn::Error::new(
                other.span(),
                "ListRecord can only be derived for structs with named fields",
            )),
        },
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            "ListRecord can only be derived for structs",
        )),
    }
}

fn collect_fields(input: &DeriveInput) -> syn::Result<Vec<ListField<'_>>> {
    let mut fields = Vec::new();
    let mut status_seen: Option<&syn::Ident> = None;
    for field in &named_fields(input)?.named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let meta = parse_field_meta(field)?;
        if meta.skip {
            continue;
        }
        if meta.status {
            if let Some(previous) = status_seen {
                return Err(syn::Error::new_spanned(
                    ident,
                    format!("only one status field is allowed; `{previous}` is already the status field"),
                ));
            }
            status_seen = Some(ident);
        }
        let key = meta.rename.clone().unwrap_or_else(|| field_key(ident));
        fields.push(ListField {
            ident,
            ty: &field.ty,
            key,
            meta,
        });
    }
    Ok(fields)
}

/// Generates `ListRecord` and `ListResource` implementations.
pub(crate) fn expand_list_record(input: &DeriveInput) -> syn::Result<TokenStream> {
    let resource = parse_resource_meta(&input.attrs)?;
    let fields = collect_fields(input)?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let singular = resource
        .name_singular
        .unwrap_or_else(|| name.to_string().to_snake_case());
    let plural = resource
        .name_plural
        .unwrap_or_else(|| format!("{singular}s"));

    let accessor_arms = fields.iter().map(|field| {
        let key = &field.key;
        let ident = field.ident;
        quote! {
            #key => ::recordview::ToFieldValue::to_field_value(&self.#ident),
        }
    });

    let columns = fields.iter().filter(|f| !f.meta.hidden).map(|field| {
        let label = field.label();
        let key = &field.key;
        let sortable = field.meta.sortable.then(|| quote! { .sortable() });
        let navigate = field
            .meta
            .navigate
            .as_ref()
            .map(|template| quote! { .navigate_to(#template) });
        quote! {
            .column(::recordview::ColumnSpec::new(#label, #key) #sortable #navigate)
        }
    });

    // Hidden fields keep their sort vocabulary entry even without a column
    let hidden_sorts = fields
        .iter()
        .filter(|f| f.meta.hidden && f.meta.sortable)
        .map(|field| {
            let label = field.label();
            let key = &field.key;
            quote! { .sort_option(#label, #key) }
        });

    let filter_options = fields.iter().filter(|f| f.meta.filterable).map(|field| {
        let label = field.label();
        let key = &field.key;
        quote! { .filter_option(#label, #key) }
    });

    let status = fields.iter().find(|f| f.meta.status).map(|field| {
        let key = &field.key;
        quote! { .status_field(#key) }
    });

    let search_fields = fields.iter().filter(|f| f.meta.searchable).map(|field| {
        let key = &field.key;
        quote! { .search_field(#key) }
    });

    let range_fields = fields.iter().filter_map(|field| {
        let kind = field.range_kind()?;
        let key = &field.key;
        Some(quote! { .range_field(#key, #kind) })
    });

    Ok(quote! {
        impl #impl_generics ::recordview::ListRecord for #name #ty_generics #where_clause {
            fn field(&self, key: &str) -> ::core::option::Option<::recordview::FieldValue<'_>> {
                match key {
                    #(#accessor_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::recordview::ListResource for #name #ty_generics #where_clause {
            const RESOURCE_NAME_SINGULAR: &'static str = #singular;
            const RESOURCE_NAME_PLURAL: &'static str = #plural;

            fn list_schema() -> ::recordview::ListSchema {
                ::recordview::ListSchema::new(#plural)
                    #(#columns)*
                    #(#hidden_sorts)*
                    #(#filter_options)*
                    #status
                    #(#search_fields)*
                    #(#range_fields)*
            }
        }
    })
}
