//! Derive macro for `recordview`.
//!
//! `#[derive(ListRecord)]` implements `recordview::ListRecord` (read a field by
//! key) and `recordview::ListResource` (the list schema) for a struct with
//! named fields.
//!
//! ```rust,ignore
//! #[derive(ListRecord)]
//! #[listview(name_singular = "invoice", name_plural = "invoices")]
//! pub struct Invoice {
//!     #[listview(hidden)]
//!     pub id: Uuid,
//!     #[listview(sortable, searchable, label = "Invoice #", navigate = "/invoices/:id")]
//!     pub number: String,
//!     #[listview(status, filterable)]
//!     pub status: InvoiceStatus,
//!     #[listview(sortable, range)]
//!     pub issued_on: NaiveDate,
//! }
//! ```
//!
//! Struct attributes: `name_singular`, `name_plural` (default: the snake_case
//! struct name, plus `s`).
//!
//! Field attributes:
//! - `sortable`, `filterable`, `searchable`: add the field to that vocabulary
//! - `status`: the field matched by the `status` URL parameter (at most one)
//! - `range`, `range = "number"`, `range = "date"`: accept `<key>_gte` and
//!   `<key>_lte` bounds; plain `range` infers dates from chrono types
//! - `label = "..."`: column label (default: title-cased key)
//! - `navigate = "/path/:id"`: column links to a detail page
//! - `rename = "..."`: record key (default: the field name)
//! - `hidden`: readable, filterable and searchable, but no column
//! - `skip`: not readable at all

mod attribute_parser;
mod codegen;
mod field_analyzer;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

#[proc_macro_derive(ListRecord, attributes(listview))]
pub fn list_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    codegen::expand_list_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
