//! Shared error taxonomy for the storywalk player.
//!
//! This crate provides the one error type used across all other storywalk
//! crates, split into three classes:
//! - load failures — the document could not be read or parsed at all
//! - validation — an aggregate raised by strict checking
//! - navigation errors — per-call failures that leave session state untouched

/// Unified error type for all storywalk subsystems.
#[derive(Debug, thiserror::Error)]
pub enum StorywalkError {
    // === Load failures ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid document: {message}")]
    Document { message: String },

    // === Validation ===
    #[error("Document validation failed: {0}")]
    Validation(String),

    // === Navigation errors ===
    #[error("Navigator has not been started")]
    NotStarted,

    #[error("Start page {} does not resolve", start.as_deref().unwrap_or("(none)"))]
    UnresolvableStart { start: Option<String> },

    #[error("Page '{id}' does not exist")]
    UnknownPage { id: String },

    #[error("Page '{id}' has no choices to advance through")]
    NoChoicesAvailable { id: String },

    #[error("Choice index {index} is out of range on page '{id}' ({available} available)")]
    InvalidSelection {
        id: String,
        index: usize,
        available: usize,
    },

    #[error("Choice #{choice} on page '{id}' has no target")]
    MissingNext { id: String, choice: usize },
}

impl StorywalkError {
    /// Returns `true` for per-call navigation errors that leave session
    /// state exactly as it was; a presenter reports these inline and
    /// continues.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            StorywalkError::NotStarted
                | StorywalkError::UnresolvableStart { .. }
                | StorywalkError::UnknownPage { .. }
                | StorywalkError::NoChoicesAvailable { .. }
                | StorywalkError::InvalidSelection { .. }
                | StorywalkError::MissingNext { .. }
        )
    }

    /// Returns `true` when no graph could be built at all; the caller must
    /// halt and present a single terminal message.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            StorywalkError::Io(_) | StorywalkError::Json(_) | StorywalkError::Document { .. }
        )
    }
}

/// A convenience alias for `Result<T, StorywalkError>`.
pub type Result<T> = std::result::Result<T, StorywalkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_document() {
        let err = StorywalkError::Document {
            message: "top level is not an object".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid document: top level is not an object"
        );
    }

    #[test]
    fn error_display_validation() {
        let err = StorywalkError::Validation("duplicate page id: dup".into());
        assert_eq!(
            err.to_string(),
            "Document validation failed: duplicate page id: dup"
        );
    }

    #[test]
    fn error_display_not_started() {
        assert_eq!(
            StorywalkError::NotStarted.to_string(),
            "Navigator has not been started"
        );
    }

    #[test]
    fn error_display_unresolvable_start() {
        let err = StorywalkError::UnresolvableStart {
            start: Some("intro".into()),
        };
        assert_eq!(err.to_string(), "Start page intro does not resolve");
    }

    #[test]
    fn error_display_unresolvable_start_absent() {
        let err = StorywalkError::UnresolvableStart { start: None };
        assert_eq!(err.to_string(), "Start page (none) does not resolve");
    }

    #[test]
    fn error_display_unknown_page() {
        let err = StorywalkError::UnknownPage { id: "ghost".into() };
        assert_eq!(err.to_string(), "Page 'ghost' does not exist");
    }

    #[test]
    fn error_display_no_choices() {
        let err = StorywalkError::NoChoicesAvailable { id: "stub".into() };
        assert_eq!(
            err.to_string(),
            "Page 'stub' has no choices to advance through"
        );
    }

    #[test]
    fn error_display_invalid_selection() {
        let err = StorywalkError::InvalidSelection {
            id: "fork".into(),
            index: 5,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "Choice index 5 is out of range on page 'fork' (2 available)"
        );
    }

    #[test]
    fn error_display_missing_next() {
        let err = StorywalkError::MissingNext {
            id: "fork".into(),
            choice: 2,
        };
        assert_eq!(err.to_string(), "Choice #2 on page 'fork' has no target");
    }

    // --- is_navigation ---

    #[test]
    fn navigation_errors_are_classified() {
        assert!(StorywalkError::NotStarted.is_navigation());
        assert!(StorywalkError::UnresolvableStart { start: None }.is_navigation());
        assert!(StorywalkError::UnknownPage { id: "x".into() }.is_navigation());
        assert!(StorywalkError::NoChoicesAvailable { id: "x".into() }.is_navigation());
        assert!(StorywalkError::InvalidSelection {
            id: "x".into(),
            index: 0,
            available: 0
        }
        .is_navigation());
        assert!(StorywalkError::MissingNext {
            id: "x".into(),
            choice: 1
        }
        .is_navigation());
    }

    #[test]
    fn load_failures_are_not_navigation() {
        let err = StorywalkError::Document {
            message: "bad".into(),
        };
        assert!(!err.is_navigation());
        assert!(err.is_load_failure());
    }

    #[test]
    fn navigation_errors_are_not_load_failures() {
        assert!(!StorywalkError::NotStarted.is_load_failure());
        assert!(!StorywalkError::Validation("x".into()).is_load_failure());
    }

    // --- From impls ---

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: StorywalkError = io_err.into();
        assert!(matches!(err, StorywalkError::Io(_)));
        assert!(err.is_load_failure());
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: StorywalkError = json_err.into();
        assert!(matches!(err, StorywalkError::Json(_)));
        assert!(err.is_load_failure());
    }

    // --- Result alias ---

    #[test]
    fn result_alias_works() {
        fn example() -> Result<u32> {
            Ok(42)
        }
        assert_eq!(example().unwrap(), 42);
    }
}
