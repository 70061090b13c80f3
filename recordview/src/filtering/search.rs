use crate::core::ListRecord;

// Basic safety limits
const MAX_SEARCH_QUERY_LENGTH: usize = 10_000;

/// Cut a search term to the length limit without splitting a character.
fn truncate_query(query: &str) -> &str {
    if query.len() <= MAX_SEARCH_QUERY_LENGTH {
        return query;
    }
    let mut end = MAX_SEARCH_QUERY_LENGTH;
    while !query.is_char_boundary(end) {
        end -= 1;
    }
    &query[..end]
}

/// Prepared free-text search: one lowercased needle matched against a set of fields.
#[derive(Debug, Clone)]
pub struct SearchMatcher<'s> {
    needle: String,
    fields: &'s [String],
}

impl<'s> SearchMatcher<'s> {
    /// Returns `None` when there is nothing to search for or nowhere to search.
    #[must_use]
    pub fn new(query: &str, fields: &'s [String]) -> Option<Self> {
        let needle = truncate_query(query.trim()).to_lowercase();
        if needle.is_empty() {
            return None;
        }
        if fields.is_empty() {
            tracing::debug!(query, "Search ignored: schema declares no search fields");
            return None;
        }
        Some(Self { needle, fields })
    }

    /// Case-insensitive substring match, OR'd across the search fields.
    pub fn matches<R: ListRecord + ?Sized>(&self, record: &R) -> bool {
        self.fields.iter().any(|field| {
            record
                .field(field)
                .is_some_and(|value| value.to_text().to_lowercase().contains(&self.needle))
        })
    }
}
