//! Loader configuration

/// How the loader treats a JSON key that differs from its record's `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCheck {
    /// Keep the entry under its JSON key and log a warning
    #[default]
    Trust,

    /// Fail the whole load on the first mismatch
    Verify,
}

/// Options controlling how a registry is decoded.
///
/// Passed by reference to every loader entry point.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Key/id consistency policy
    pub key_check: KeyCheck,
}

impl LoadOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options that reject key/id mismatches.
    pub fn verified() -> Self {
        Self {
            key_check: KeyCheck::Verify,
        }
    }

    /// Set the key/id consistency policy (builder pattern).
    pub fn with_key_check(mut self, key_check: KeyCheck) -> Self {
        self.key_check = key_check;
        self
    }

    /// Whether mismatches fail the load.
    pub fn verifies_keys(&self) -> bool {
        self.key_check == KeyCheck::Verify
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_trusts_keys() {
        assert_eq!(LoadOptions::new().key_check, KeyCheck::Trust);
        assert!(!LoadOptions::default().verifies_keys());
    }

    #[test]
    fn test_verified() {
        assert!(LoadOptions::verified().verifies_keys());
        assert!(LoadOptions::new()
            .with_key_check(KeyCheck::Verify)
            .verifies_keys());
    }
}
