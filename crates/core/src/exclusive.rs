//! Exclusive-reference validation for polymorphic associations.
//!
//! Some entities reference exactly one of several possible parents: a coupon
//! targets a book xor a subscription, a slide targets an author xor a
//! publisher xor a book. The validator counts which candidate fields are
//! present and rejects anything other than exactly one.

use crate::error::CoreError;

/// Require exactly one of the named candidate fields to be set.
///
/// Returns the name of the single provided field on success. The error
/// message lists the full candidate set so the caller knows what was
/// expected.
pub fn validate_exactly_one(candidates: &[(&'static str, bool)]) -> Result<&'static str, CoreError> {
    let provided: Vec<&'static str> = candidates
        .iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| *name)
        .collect();

    let all: Vec<&str> = candidates.iter().map(|(name, _)| *name).collect();

    match provided.as_slice() {
        [single] => Ok(single),
        [] => Err(CoreError::Validation(format!(
            "Exactly one of {{{}}} must be provided",
            all.join(", ")
        ))),
        many => Err(CoreError::Validation(format!(
            "Exactly one of {{{}}} must be provided, got {{{}}}",
            all.join(", "),
            many.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn exactly_one_passes() {
        let result = validate_exactly_one(&[("book", true), ("subscription", false)]);
        assert_eq!(result.unwrap(), "book");
    }

    #[test]
    fn none_provided_fails() {
        let result = validate_exactly_one(&[("book", false), ("subscription", false)]);
        assert_matches!(result, Err(CoreError::Validation(msg)) => {
            assert!(msg.contains("book, subscription"));
        });
    }

    #[test]
    fn multiple_provided_fails() {
        let result = validate_exactly_one(&[
            ("author", true),
            ("publisher", true),
            ("book", false),
        ]);
        assert_matches!(result, Err(CoreError::Validation(msg)) => {
            assert!(msg.contains("author, publisher"));
        });
    }
}
