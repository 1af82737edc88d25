//! Monotonic operation tokens.
//!
//! A response carries the token that was current when its request was
//! issued. If the machine has moved on, the token no longer matches and the
//! response is dropped on arrival.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationToken(u64);

impl OperationToken {
    /// Advance to a fresh token and return it.
    pub const fn advance(&mut self) -> Self {
        self.0 += 1;
        *self
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::OperationToken;

    #[test]
    fn advance_is_monotonic() {
        let mut token = OperationToken::default();
        let first = token.advance();
        let second = token.advance();
        assert!(second > first);
        assert_eq!(token, second);
        assert_eq!(second.to_string(), "op#2");
    }
}
