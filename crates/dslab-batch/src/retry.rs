//! Bounded retry of placement attempts.

/// Number of placement attempts per job per round used by default.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Retries an attempt until it succeeds or the attempt limit is reached.
///
/// The built-in fit algorithms are deterministic and do not change the pool on failure, so for them every
/// attempt after the first one has the same outcome. The bound matters for algorithms whose outcome may differ
/// between calls on the same pool state. Use [`RetryPolicy::single`] to make exactly one attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// Creates policy with the specified number of attempts (at least one attempt is always made).
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn single() -> Self {
        Self::new(1)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Calls `attempt` with attempt numbers starting from 1 until it returns `Some`.
    pub fn run<T, F>(&self, mut attempt: F) -> Option<T>
    where
        F: FnMut(u32) -> Option<T>,
    {
        (1..=self.max_attempts).find_map(|n| attempt(n))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}
