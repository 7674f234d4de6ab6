use std::collections::HashMap;

use crate::database::models::EntryId;
use crate::error::ApiError;

/// Path ids that do not parse as an entry id cannot name an entry
pub fn parse_entry_id(raw: &str) -> Result<EntryId, ApiError> {
    raw.parse::<EntryId>()
        .map_err(|_| ApiError::not_found("Not found."))
}

/// Title and content for a full write. Both must be present.
pub fn require_title_and_content(
    title: Option<String>,
    content: Option<String>,
) -> Result<(String, String), ApiError> {
    match (title, content) {
        (Some(title), Some(content)) => Ok((title, content)),
        (title, content) => {
            let mut field_errors = HashMap::new();
            if title.is_none() {
                field_errors.insert("title".to_string(), "This field is required.".to_string());
            }
            if content.is_none() {
                field_errors.insert("content".to_string(), "This field is required.".to_string());
            }
            Err(ApiError::validation_error(
                "Title and content are required.",
                Some(field_errors),
            ))
        }
    }
}
