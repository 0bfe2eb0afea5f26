//! Error types for state access.

use thiserror::Error;

/// Error type for state access operations.
#[derive(Debug, Error)]
pub enum StateError {
    /// Lock was poisoned.
    #[error("lock poisoned")]
    LockPoisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_poisoned_display() {
        assert_eq!(StateError::LockPoisoned.to_string(), "lock poisoned");
    }
}
