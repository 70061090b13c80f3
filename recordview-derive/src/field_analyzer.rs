use heck::ToTitleCase;
use syn::ext::IdentExt;

/// Returns true if the field's type is `Option<…>` (including `std::option::Option<…>`).
pub(crate) fn field_is_optional(ty: &syn::Type) -> bool {
    last_segment(ty).is_some_and(|seg| seg.ident == "Option")
}

/// For `Option<T>` return `T`, otherwise the type itself.
pub(crate) fn strip_option(ty: &syn::Type) -> &syn::Type {
    if field_is_optional(ty)
        && let Some(seg) = last_segment(ty)
        && let syn::PathArguments::AngleBracketed(args) = &seg.arguments
        && let Some(syn::GenericArgument::Type(inner)) = args.args.first()
    {
        return inner;
    }
    ty
}

fn last_segment(ty: &syn::Type) -> Option<&syn::PathSegment> {
    match ty {
        syn::Type::Path(type_path) => type_path.path.segments.last(),
        syn::Type::Reference(reference) => last_segment(&reference.elem),
        _ => None,
    }
}

/// Calendar types read as dates in range filters; everything else as numbers.
pub(crate) fn is_date_type(ty: &syn::Type) -> bool {
    last_segment(strip_option(ty)).is_some_and(|seg| {
        seg.ident == "NaiveDate" || seg.ident == "NaiveDateTime" || seg.ident == "DateTime"
    })
}

/// The record key of a field: its identifier without any `r#` prefix.
pub(crate) fn field_key(ident: &syn::Ident) -> String {
    ident.unraw().to_string()
}

/// Default column label: `created_at` becomes `Created At`.
pub(crate) fn default_label(key: &str) -> String {
    key.to_title_case()
}
