// SPDX-License-Identifier: AGPL-3.0-or-later

//! Password policy engine.
//!
//! Rules are evaluated as a whole: a candidate that breaks several rules
//! gets one violation message per broken rule, so a caller sees the full
//! list in a single round trip. The only short circuit is the empty or
//! whitespace-only password, which reports a single violation.

/// Violation message for an empty or whitespace-only password.
pub const EMPTY_PASSWORD: &str = "password cannot be empty.";

const MIN_LENGTH: usize = 6;

/// Validate a candidate password against the account password policy.
///
/// Returns the list of violation messages, in rule order. An empty list
/// means the password is acceptable.
pub fn validate_password(candidate: &str) -> Vec<String> {
    if candidate.trim().is_empty() {
        return vec![EMPTY_PASSWORD.to_string()];
    }

    let mut violations = Vec::new();

    if candidate.chars().count() < MIN_LENGTH {
        violations.push(format!(
            "password must contain at least {MIN_LENGTH} characters."
        ));
    }
    if !candidate.chars().any(|c| c.is_ascii_digit()) {
        violations.push("password must contain at least one digit.".to_string());
    }
    if !candidate.chars().any(|c| c.is_lowercase()) {
        violations.push("password must contain at least one lowercase letter.".to_string());
    }
    if !candidate.chars().any(|c| c.is_uppercase()) {
        violations.push("password must contain at least one uppercase letter.".to_string());
    }
    if !candidate.chars().any(|c| !c.is_alphanumeric()) {
        violations.push("password must contain at least one special character.".to_string());
    }

    violations
}
