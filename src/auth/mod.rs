//! Administrator access gate.
//!
//! The gate persists a single `"true"` flag through the same storage backend
//! as the registrations. Credentials are checked by a [`CredentialVerifier`];
//! [`StaticCredentials`] compares against one configured pair and is only a
//! stand-in for a real identity check.

pub mod verifier;

pub use verifier::{CredentialVerifier, StaticCredentials};

use crate::storage::StorageBackend;
use crate::{FunRunError, Result};
use tracing::{debug, info, warn};

/// Default slot holding the authenticated flag
pub const AUTH_SLOT: &str = "adminAuthenticated";

const AUTHENTICATED: &str = "true";

pub struct AccessGate<B: StorageBackend, V: CredentialVerifier> {
    backend: B,
    verifier: V,
    slot: String,
}

impl<B: StorageBackend, V: CredentialVerifier> AccessGate<B, V> {
    pub fn new(backend: B, verifier: V) -> Self {
        Self::with_slot(backend, verifier, AUTH_SLOT)
    }

    pub fn with_slot(backend: B, verifier: V, slot: impl Into<String>) -> Self {
        Self {
            backend,
            verifier,
            slot: slot.into(),
        }
    }

    /// Check credentials and persist the authenticated flag on success
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if !self.verifier.verify(username, password) {
            warn!(username, "Rejected administrator login");
            return Err(FunRunError::InvalidCredentials);
        }

        self.backend.set(&self.slot, AUTHENTICATED)?;
        info!(username, "Administrator logged in");
        Ok(())
    }

    /// Drop the authenticated flag, returning whether one was set
    pub fn logout(&mut self) -> Result<bool> {
        let removed = self.backend.remove(&self.slot)?;
        info!(was_authenticated = removed, "Administrator logged out");
        Ok(removed)
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        let flag = self.backend.get(&self.slot)?;
        debug!(slot = %self.slot, present = flag.is_some(), "Checked authenticated flag");
        Ok(flag.as_deref().map(str::trim) == Some(AUTHENTICATED))
    }

    /// Guard for administrator-only operations
    pub fn require_authenticated(&self) -> Result<()> {
        if self.is_authenticated()? {
            Ok(())
        } else {
            Err(FunRunError::NotAuthenticated)
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use pretty_assertions::assert_eq;

    fn create_test_gate() -> AccessGate<MemoryBackend, StaticCredentials> {
        AccessGate::new(MemoryBackend::new(), StaticCredentials::default())
    }

    #[test]
    fn test_fresh_gate_is_locked() {
        let gate = create_test_gate();

        assert!(!gate.is_authenticated().unwrap());
        assert!(matches!(
            gate.require_authenticated(),
            Err(FunRunError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_login_persists_flag() {
        let mut gate = create_test_gate();

        gate.login("admin", "@sman1Turen").unwrap();

        assert!(gate.is_authenticated().unwrap());
        assert!(gate.require_authenticated().is_ok());
        assert_eq!(
            gate.backend().get(AUTH_SLOT).unwrap(),
            Some("true".to_string())
        );
    }

    #[test]
    fn test_wrong_credentials_are_rejected() {
        let mut gate = create_test_gate();

        assert!(matches!(
            gate.login("admin", "wrong"),
            Err(FunRunError::InvalidCredentials)
        ));
        assert!(matches!(
            gate.login("Admin", "@sman1Turen"),
            Err(FunRunError::InvalidCredentials)
        ));
        assert!(!gate.is_authenticated().unwrap());

        // No lockout after failures
        gate.login("admin", "@sman1Turen").unwrap();
        assert!(gate.is_authenticated().unwrap());
    }

    #[test]
    fn test_logout_clears_flag() {
        let mut gate = create_test_gate();
        gate.login("admin", "@sman1Turen").unwrap();

        assert!(gate.logout().unwrap());
        assert!(!gate.is_authenticated().unwrap());
        assert!(!gate.logout().unwrap());
    }

    #[test]
    fn test_only_true_flag_counts() {
        let mut backend = MemoryBackend::new();
        backend.set(AUTH_SLOT, "false").unwrap();
        let gate = AccessGate::new(backend, StaticCredentials::default());

        assert!(!gate.is_authenticated().unwrap());
    }

    #[test]
    fn test_custom_verifier() {
        struct Nobody;
        impl CredentialVerifier for Nobody {
            fn verify(&self, _username: &str, _password: &str) -> bool {
                false
            }
        }

        let mut gate = AccessGate::new(MemoryBackend::new(), Nobody);
        assert!(gate.login("admin", "@sman1Turen").is_err());
    }
}
