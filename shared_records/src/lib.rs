//! Record types and fixture data shared by the test suite and benchmarks.
//!
//! Each entity derives `ListRecord`, so its list schema comes straight from
//! the `#[listview(...)]` attributes on its fields.

pub mod customer;
pub mod fixtures;
pub mod invoice;
pub mod quote;

pub use customer::{Customer, CustomerStatus};
pub use invoice::{Invoice, InvoiceStatus};
pub use quote::{Quote, QuoteStatus};
