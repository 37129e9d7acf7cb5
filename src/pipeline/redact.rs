//! Redaction filter applied to every read path.
//!
//! Anything marked secret leaves the service with its value replaced by the
//! [`REDACTED`] sentinel. Redaction happens at the API boundary on response
//! shapes, never on stored rows, so the filter is idempotent by construction:
//! redacting a redacted view yields the same view.

use crate::domain::REDACTED;

/// A read-path view whose value can be blanked when the record is secret.
pub trait Redactable {
    fn is_secret(&self) -> bool;
    fn redact_value(&mut self);
}

/// Redact every secret view in place, leaving plain views untouched.
pub fn redact<T: Redactable>(mut views: Vec<T>) -> Vec<T> {
    for view in &mut views {
        if view.is_secret() {
            view.redact_value();
        }
    }
    views
}

/// The sentinel written by [`Redactable::redact_value`] implementations.
pub fn sentinel() -> String {
    REDACTED.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct View {
        value: String,
        secret: bool,
    }

    impl Redactable for View {
        fn is_secret(&self) -> bool {
            self.secret
        }

        fn redact_value(&mut self) {
            self.value = sentinel();
        }
    }

    #[test]
    fn test_redact_blanks_only_secret_views() {
        let views = vec![
            View { value: "plain".into(), secret: false },
            View { value: "hunter2".into(), secret: true },
        ];

        let redacted = redact(views);
        assert_eq!(redacted[0].value, "plain");
        assert_eq!(redacted[1].value, REDACTED);
    }

    #[test]
    fn test_redact_is_idempotent() {
        let views = vec![View { value: "hunter2".into(), secret: true }];
        let once = redact(views);
        let twice = redact(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_redact_empty_batch() {
        let views: Vec<View> = Vec::new();
        assert!(redact(views).is_empty());
    }
}
