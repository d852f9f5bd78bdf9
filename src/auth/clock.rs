// SPDX-License-Identifier: AGPL-3.0-or-later

//! Injectable time source.
//!
//! Token expiry is always checked against a [`Clock`] rather than the
//! system time directly, so tests can pin time and exercise expiry
//! windows deterministically.

use chrono::{DateTime, Utc};

/// Time source for token issuance and verification.
#[derive(Debug, Clone, Default)]
pub enum Clock {
    /// Real wall-clock time.
    #[default]
    System,
    /// A frozen instant, for tests.
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Create a clock frozen at the given instant.
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Clock::Fixed(at)
    }

    /// Current time according to this clock.
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}
