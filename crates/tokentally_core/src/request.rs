//! Inbound usage request.

use serde::{Deserialize, Serialize};
use tokentally_error::{UsageError, UsageErrorKind, UsageResult};

/// One unit of work: the texts to count and the model to count them for.
///
/// `prompt` and `completion` may be empty; `model` may not. `user` and
/// `created` are carried through for logging and never affect the result.
///
/// # Examples
///
/// ```
/// use tokentally_core::UsageRequest;
///
/// let request = UsageRequest::from_json(
///     r#"{"prompt": "Hello", "completion": "Hi there", "model": "gpt-4"}"#,
/// ).unwrap();
/// assert_eq!(request.model(), "gpt-4");
/// assert!(request.user().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct UsageRequest {
    /// Prompt text sent to the model.
    #[serde(default)]
    #[builder(default)]
    prompt: String,
    /// Completion text returned by the model.
    #[serde(default)]
    #[builder(default)]
    completion: String,
    /// Model identifier used to select the tokenizer and price.
    model: String,
    /// Caller identity, passthrough only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    user: Option<String>,
    /// Caller-supplied creation timestamp, passthrough only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    created: Option<String>,
}

impl UsageRequest {
    /// Create a request without passthrough metadata.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if `model` is empty.
    #[track_caller]
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        completion: impl Into<String>,
    ) -> UsageResult<Self> {
        Self {
            prompt: prompt.into(),
            completion: completion.into(),
            model: model.into(),
            user: None,
            created: None,
        }
        .validated()
    }

    /// Creates a new request builder.
    pub fn builder() -> UsageRequestBuilder {
        UsageRequestBuilder::default()
    }

    /// Decode a request from a JSON record.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if the record is not valid JSON of the
    /// expected shape or has an empty `model`.
    #[track_caller]
    pub fn from_json(body: &str) -> UsageResult<Self> {
        serde_json::from_str::<Self>(body)
            .map_err(|e| {
                UsageError::new(UsageErrorKind::MalformedInput(format!(
                    "Error unmarshaling record: {}",
                    e
                )))
            })?
            .validated()
    }

    /// Split the request into its owned texts, consuming it.
    pub fn into_texts(self) -> (String, String) {
        (self.prompt, self.completion)
    }

    /// Check the request can be processed.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if `model` is empty.
    #[track_caller]
    pub fn validate(&self) -> UsageResult<()> {
        if self.model.trim().is_empty() {
            return Err(UsageError::new(UsageErrorKind::MalformedInput(
                "model must be non-empty".to_string(),
            )));
        }
        Ok(())
    }

    #[track_caller]
    fn validated(self) -> UsageResult<Self> {
        self.validate()?;
        Ok(self)
    }
}

impl UsageRequestBuilder {
    /// Build the request.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if `model` is missing or empty.
    #[track_caller]
    pub fn build(&self) -> UsageResult<UsageRequest> {
        self.build_internal()
            .map_err(|e| UsageError::new(UsageErrorKind::MalformedInput(e.to_string())))?
            .validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_texts_default_to_empty() {
        let request = UsageRequest::from_json(r#"{"model": "gpt-4"}"#).unwrap();
        assert_eq!(request.prompt(), "");
        assert_eq!(request.completion(), "");
    }

    #[test]
    fn test_passthrough_fields() {
        let request = UsageRequest::from_json(
            r#"{"prompt":"a","completion":"b","model":"gpt-4","user":"u-1","created":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(request.user().as_deref(), Some("u-1"));
        assert_eq!(request.created().as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_rejects_empty_model() {
        let err = UsageRequest::from_json(r#"{"prompt":"a","model":""}"#).unwrap_err();
        assert!(matches!(err.kind, UsageErrorKind::MalformedInput(_)));

        let err = UsageRequest::new("  ", "a", "b").unwrap_err();
        assert!(matches!(err.kind, UsageErrorKind::MalformedInput(_)));
    }

    #[test]
    fn test_validate_catches_plain_serde_decode() {
        let request: UsageRequest = serde_json::from_str(r#"{"prompt":"a b","model":""}"#).unwrap();
        let err = request.validate().unwrap_err();
        assert!(matches!(err.kind, UsageErrorKind::MalformedInput(_)));
    }

    #[test]
    fn test_rejects_bad_json() {
        for body in ["", "not json", r#"{"prompt": 3, "model": "gpt-4"}"#, r#"{"prompt":"a"}"#] {
            let err = UsageRequest::from_json(body).unwrap_err();
            assert!(matches!(err.kind, UsageErrorKind::MalformedInput(_)), "{body}");
        }
    }

    #[test]
    fn test_builder() {
        let request = UsageRequest::builder()
            .model("gpt-3.5-turbo")
            .prompt("hello")
            .user("alice")
            .build()
            .unwrap();
        assert_eq!(request.completion(), "");
        assert_eq!(request.user().as_deref(), Some("alice"));

        assert!(UsageRequest::builder().prompt("hello").build().is_err());
    }

    #[test]
    fn test_into_texts() {
        let request = UsageRequest::new("gpt-4", "p", "c").unwrap();
        assert_eq!(request.into_texts(), ("p".to_string(), "c".to_string()));
    }
}
