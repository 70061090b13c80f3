//! Deterministic sample data.
//!
//! Ids are `Uuid::from_u128(n)` so navigation paths are predictable in tests.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::customer::{Customer, CustomerStatus};
use crate::invoice::{Invoice, InvoiceStatus};
use crate::quote::{Quote, QuoteStatus};

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid fixture date"),
    }
}

const INVOICE_EPOCH: NaiveDate = date(2024, 1, 1);

/// `(name, company, status, balance in cents, created_at)`
const CUSTOMERS: [(&str, Option<&str>, CustomerStatus, i64, NaiveDate); 12] = [
    ("Globex Corporation", Some("Globex"), CustomerStatus::Active, 420_000, date(2023, 2, 14)),
    ("Acme Corp", Some("Acme"), CustomerStatus::Active, 125_050, date(2023, 1, 9)),
    ("Initech", None, CustomerStatus::Inactive, 0, date(2023, 3, 30)),
    ("Umbrella Holdings", Some("Umbrella"), CustomerStatus::Active, 980_000, date(2023, 5, 2)),
    ("Hooli", Some("Hooli"), CustomerStatus::Active, 15_500, date(2023, 6, 18)),
    ("Stark Industries", Some("Stark"), CustomerStatus::Inactive, 2_300_000, date(2023, 7, 1)),
    ("Wayne Enterprises", Some("Wayne"), CustomerStatus::Active, 1_750_000, date(2023, 8, 22)),
    ("Cyberdyne Systems", None, CustomerStatus::Active, 64_000, date(2023, 9, 5)),
    ("Soylent Foods", Some("Soylent"), CustomerStatus::Inactive, 8_900, date(2023, 10, 11)),
    ("Wonka Industries", Some("Wonka"), CustomerStatus::Active, 330_000, date(2023, 11, 27)),
    ("Tyrell Corporation", Some("Tyrell"), CustomerStatus::Active, 510_000, date(2024, 1, 15)),
    ("Massive Dynamic", None, CustomerStatus::Inactive, 72_500, date(2024, 2, 3)),
];

/// Twelve customers: eight `Active`, four `Inactive`, in non-alphabetical order.
#[must_use]
pub fn customers() -> Vec<Customer> {
    CUSTOMERS
        .iter()
        .zip(1u128..)
        .map(|(&(name, company, status, cents, created_at), id)| Customer {
            id: Uuid::from_u128(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            company: company.map(str::to_string),
            status,
            balance: Decimal::new(cents, 2),
            created_at,
        })
        .collect()
}

const INVOICE_STATUSES: [InvoiceStatus; 4] = [
    InvoiceStatus::Paid,
    InvoiceStatus::Unpaid,
    InvoiceStatus::Overdue,
    InvoiceStatus::Draft,
];

/// Twenty-three invoices issued a week apart, cycling through the statuses.
///
/// Every fourth invoice is a `Draft` and has no due date.
#[must_use]
pub fn invoices() -> Vec<Invoice> {
    (1u32..=23)
        .zip(0usize..)
        .map(|(n, index)| {
            let status = INVOICE_STATUSES[index % INVOICE_STATUSES.len()];
            let issued_on = INVOICE_EPOCH
                .checked_add_days(Days::new(u64::from(n - 1) * 7))
                .unwrap_or(INVOICE_EPOCH);
            let due_on = match status {
                InvoiceStatus::Draft => None,
                _ => issued_on.checked_add_days(Days::new(30)),
            };
            Invoice {
                id: Uuid::from_u128(1_000 + u128::from(n)),
                number: format!("INV-{n:04}"),
                customer: CUSTOMERS[index % CUSTOMERS.len()].0.to_string(),
                status,
                amount: Decimal::new(i64::from(n) * 12_500, 2),
                issued_on,
                due_on,
            }
        })
        .collect()
}

/// `(customer, status, total, expires_on)`
const QUOTES: [(&str, QuoteStatus, f64, NaiveDate); 7] = [
    ("Acme Corp", QuoteStatus::Sent, 4_800.0, date(2024, 3, 31)),
    ("Hooli", QuoteStatus::Accepted, 12_250.0, date(2024, 2, 29)),
    ("Wayne Enterprises", QuoteStatus::Draft, 99_000.0, date(2024, 6, 30)),
    ("Globex Corporation", QuoteStatus::Declined, 3_150.5, date(2024, 1, 31)),
    ("Tyrell Corporation", QuoteStatus::Sent, 27_400.0, date(2024, 4, 15)),
    ("Initech", QuoteStatus::Expired, 640.0, date(2023, 12, 31)),
    ("Wonka Industries", QuoteStatus::Accepted, 18_900.0, date(2024, 5, 1)),
];

#[must_use]
pub fn quotes() -> Vec<Quote> {
    QUOTES
        .iter()
        .zip(1u32..)
        .map(|(&(customer, status, total, expires_on), n)| Quote {
            id: Uuid::from_u128(2_000 + u128::from(n)),
            number: format!("Q-{n:03}"),
            customer: customer.to_string(),
            status,
            total,
            expires_on,
        })
        .collect()
}
