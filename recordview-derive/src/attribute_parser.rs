use syn::parse::Parser;
use syn::{Lit, Meta, punctuated::Punctuated, token::Comma};

const ATTRIBUTE: &str = "listview";

/// Struct-level `#[listview(...)]` configuration.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResourceMeta {
    pub name_singular: Option<String>,
    pub name_plural: Option<String>,
}

/// Range kind requested on a field; `Inferred` defers to the field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeSpec {
    Inferred,
    Number,
    Date,
}

/// Field-level `#[listview(...)]` configuration.
#[derive(Debug, Clone, Default)]
pub(crate) struct FieldMeta {
    pub sortable: bool,
    pub filterable: bool,
    pub searchable: bool,
    pub status: bool,
    pub range: Option<RangeSpec>,
    pub label: Option<String>,
    pub navigate: Option<String>,
    pub rename: Option<String>,
    pub hidden: bool,
    pub skip: bool,
}

impl FieldMeta {
    /// Whether any list behaviour was requested besides `skip`.
    fn has_list_flags(&self) -> bool {
        self.sortable
            || self.filterable
            || self.searchable
            || self.status
            || self.range.is_some()
            || self.label.is_some()
            || self.navigate.is_some()
            || self.rename.is_some()
            || self.hidden
    }
}

/// Collect the items of every `#[listview(...)]` attribute.
fn listview_items(attrs: &[syn::Attribute]) -> syn::Result<Vec<Meta>> {
    let mut items = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident(ATTRIBUTE) {
            continue;
        }
        let list = attr.meta.require_list()?;
        let metas = Punctuated::<Meta, Comma>::parse_terminated.parse2(list.tokens.clone())?;
        items.extend(metas);
    }
    Ok(items)
}

fn string_value(nv: &syn::MetaNameValue) -> syn::Result<String> {
    if let syn::Expr::Lit(expr_lit) = &nv.value
        && let Lit::Str(s) = &expr_lit.lit
    {
        return Ok(s.value());
    }
    Err(syn::Error::new_spanned(&nv.value, "expected a string literal"))
}

fn unknown_key(path: &syn::Path) -> syn::Error {
    let name = path
        .get_ident()
        .map_or_else(|| "?".to_string(), ToString::to_string);
    syn::Error::new_spanned(path, format!("unknown listview attribute `{name}`"))
}

/// Parses resource metadata from struct-level attributes.
pub(crate) fn parse_resource_meta(attrs: &[syn::Attribute]) -> syn::Result<ResourceMeta> {
    let mut meta = ResourceMeta::default();
    for item in listview_items(attrs)? {
        match item {
            Meta::NameValue(nv) if nv.path.is_ident("name_singular") => {
                meta.name_singular = Some(string_value(&nv)?);
            }
            Meta::NameValue(nv) if nv.path.is_ident("name_plural") => {
                meta.name_plural = Some(string_value(&nv)?);
            }
            other => return Err(unknown_key(other.path())),
        }
    }
    Ok(meta)
}

/// Parses list configuration from one field's attributes.
///
/// Supports flags (`sortable`) and explicit booleans (`sortable = true`).
pub(crate) fn parse_field_meta(field: &syn::Field) -> syn::Result<FieldMeta> {
    let mut meta = FieldMeta::default();
    for item in listview_items(&field.attrs)? {
        match &item {
            Meta::Path(path) if path.is_ident("range") => meta.range = Some(RangeSpec::Inferred),
            Meta::Path(path) => {
                let flag = flag_slot(&mut meta, path).ok_or_else(|| unknown_key(path))?;
                *flag = true;
            }
            Meta::NameValue(nv) if nv.path.is_ident("range") => {
                meta.range = Some(match string_value(nv)?.as_str() {
                    "number" => RangeSpec::Number,
                    "date" => RangeSpec::Date,
                    _ => {
                        return Err(syn::Error::new_spanned(
                            &nv.value,
                            "range must be \"number\" or \"date\"",
                        ));
                    }
                });
            }
            Meta::NameValue(nv) if nv.path.is_ident("label") => meta.label = Some(string_value(nv)?),
            Meta::NameValue(nv) if nv.path.is_ident("navigate") => {
                meta.navigate = Some(string_value(nv)?);
            }
            Meta::NameValue(nv) if nv.path.is_ident("rename") => meta.rename = Some(string_value(nv)?),
            Meta::NameValue(nv) => {
                let value = bool_value(nv)?;
                let flag = flag_slot(&mut meta, &nv.path).ok_or_else(|| unknown_key(&nv.path))?;
                *flag = value;
            }
            Meta::List(list) => return Err(unknown_key(&list.path)),
        }
    }

    if meta.skip && meta.has_list_flags() {
        return Err(syn::Error::new_spanned(
            field,
            "`skip` cannot be combined with other listview attributes",
        ));
    }
    Ok(meta)
}

fn bool_value(nv: &syn::MetaNameValue) -> syn::Result<bool> {
    if let syn::Expr::Lit(expr_lit) = &nv.value
        && let Lit::Bool(b) = &expr_lit.lit
    {
        return Ok(b.value());
    }
    Err(syn::Error::new_spanned(&nv.value, "expected `true` or `false`"))
}

/// The boolean a flag name sets.
fn flag_slot<'m>(meta: &'m mut FieldMeta, path: &syn::Path) -> Option<&'m mut bool> {
    let ident = path.get_ident()?.to_string();
    match ident.as_str() {
        "sortable" => Some(&mut meta.sortable),
        "filterable" => Some(&mut meta.filterable),
        "searchable" => Some(&mut meta.searchable),
        "status" => Some(&mut meta.status),
        "hidden" => Some(&mut meta.hidden),
        "skip" => Some(&mut meta.skip),
        _ => None,
    }
}
