use crate::errors::StrengthError;

/// Compares the caller's `auth_key` against the configured shared secret.
#[derive(Clone)]
pub struct AuthGate {
    secret: Option<String>,
}

impl AuthGate {
    /// A blank secret counts as unconfigured.
    pub fn new(secret: Option<String>) -> Self {
        Self { secret: secret.filter(|s| !s.trim().is_empty()) }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Allow the write only when a secret is configured and `supplied` equals it.
    /// A missing key is treated exactly like a wrong one.
    pub fn check(&self, supplied: Option<&str>) -> Result<(), StrengthError> {
        let secret = self.secret.as_deref().ok_or(StrengthError::Configuration)?;
        // absent key falls through to the same 403 as a mismatch
        match supplied {
            Some(key) if constant_time_eq(key.as_bytes(), secret.as_bytes()) => Ok(()),
            _ => Err(StrengthError::Authorization),
        }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").field("configured", &self.is_configured()).finish()
    }
}

// Length still leaks; content does not.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (&x, &y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
