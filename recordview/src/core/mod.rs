// Record model and per-entity list vocabulary

pub mod schema;
pub mod traits;
pub mod value;

// Re-export commonly used items
pub use schema::{ColumnSpec, FilterOption, ID_PLACEHOLDER, ListSchema, RangeField, RangeKind, SortOption};
pub use traits::{ListRecord, ListResource};
pub use value::{FieldValue, ToFieldValue, parse_calendar_date};
