use std::collections::HashMap;

use crate::error::ApiError;

/// Unwrap the fields a request marked as required, reporting every missing one at once.
/// An empty string counts as missing.
pub fn require_fields<const N: usize>(
    fields: [(&'static str, Option<String>); N],
    message: &str,
) -> Result<[String; N], ApiError> {
    let mut missing = HashMap::new();
    for (name, value) in &fields {
        if value.as_deref().map_or(true, str::is_empty) {
            missing.insert(name.to_string(), "This field is required.".to_string());
        }
    }
    if !missing.is_empty() {
        return Err(ApiError::validation_error(message, Some(missing)));
    }

    Ok(fields.map(|(_, value)| value.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_values_in_order() {
        let [a, b] = require_fields(
            [("email", Some("e@x.io".to_string())), ("password", Some("pw".to_string()))],
            "missing",
        )
        .unwrap();
        assert_eq!(a, "e@x.io");
        assert_eq!(b, "pw");
    }

    #[test]
    fn lists_every_missing_field() {
        let err = require_fields([("email", None), ("password", Some(String::new()))], "missing")
            .unwrap_err();
        let body = err.to_json();
        assert_eq!(body["message"], "missing");
        assert!(body["field_errors"].get("email").is_some());
        assert!(body["field_errors"].get("password").is_some());
    }
}
