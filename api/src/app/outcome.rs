//! Operation outcomes
//!
//! Every manager operation ends in one of these. They are built once through
//! `success`/`failure` and never changed afterwards.

use serde::Serialize;

/// Outcome of an operation without a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    is_success: bool,
    message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.is_success
    }

    #[allow(dead_code)]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of an operation that yields data.
///
/// A successful outcome always carries its payload; a failed one never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataOutcome<T> {
    is_success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> DataOutcome<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.is_success
    }

    #[allow(dead_code)]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[allow(dead_code)]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[allow(dead_code)]
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_carries_payload() {
        let outcome = DataOutcome::success(vec![1, 2, 3], "Listed");
        assert!(outcome.is_success());
        assert_eq!(outcome.data(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn success_may_carry_empty_collection() {
        let outcome = DataOutcome::success(Vec::<u8>::new(), "Listed");
        assert!(outcome.is_success());
        assert_eq!(outcome.into_data(), Some(vec![]));
    }

    #[test]
    fn failure_has_no_payload() {
        let outcome = DataOutcome::<u8>::failure("Nope");
        assert!(!outcome.is_success());
        assert_eq!(outcome.message(), "Nope");
        assert!(outcome.data().is_none());
    }

    #[test]
    fn serializes_without_absent_data() {
        let value = serde_json::to_value(DataOutcome::<u8>::failure("Nope")).unwrap();
        assert_eq!(value, json!({"is_success": false, "message": "Nope"}));

        let value = serde_json::to_value(Outcome::success("Done")).unwrap();
        assert_eq!(value, json!({"is_success": true, "message": "Done"}));
    }
}
