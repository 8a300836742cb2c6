use validator::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {}", invalid_fields(.0).join(", "))]
    Validation(ValidationErrors),

    #[error("Duplicate {entity}: {key}")]
    Duplicate { entity: &'static str, key: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Names of the fields carried by a [`ValidationErrors`], sorted so that
/// messages are stable across runs.
pub fn invalid_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    fields
}

/// Field name to human-readable messages, one entry per violated field.
///
/// Falls back to the validator code (e.g. `range`) when a rule carries no
/// explicit message.
pub fn field_messages(errors: &ValidationErrors) -> serde_json::Map<String, serde_json::Value> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|err| {
                    let text = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    serde_json::Value::String(text)
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(messages))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    fn errors_for(fields: &[&'static str]) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for &field in fields {
            errors.add(field, ValidationError::new("required"));
        }
        errors
    }

    #[test]
    fn validation_message_lists_fields_sorted() {
        let err = CoreError::Validation(errors_for(&["title", "rating", "director"]));
        assert_eq!(
            err.to_string(),
            "Validation failed: director, rating, title"
        );
    }

    #[test]
    fn field_messages_fall_back_to_code() {
        let errors = errors_for(&["stars"]);
        let messages = field_messages(&errors);
        assert_eq!(messages["stars"], serde_json::json!(["required"]));
    }

    #[test]
    fn field_messages_prefer_explicit_message() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "rating",
            ValidationError::new("type").with_message("rating must be a number".into()),
        );
        let messages = field_messages(&errors);
        assert_eq!(messages["rating"], serde_json::json!(["rating must be a number"]));
    }

    #[test]
    fn not_found_display() {
        let err = CoreError::NotFound {
            entity: "Movie",
            id: "abc".into(),
        };
        assert_eq!(err.to_string(), "Entity not found: Movie with id abc");
    }
}
