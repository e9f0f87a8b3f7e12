use serde::{Deserialize, Serialize};

/// Decides whether a username/password pair grants administrator access
pub trait CredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool;
}

impl<V: CredentialVerifier + ?Sized> CredentialVerifier for Box<V> {
    fn verify(&self, username: &str, password: &str) -> bool {
        (**self).verify(username, password)
    }
}

/// One literal credential pair. Plain comparison, no hashing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticCredentials {
    pub username: String,
    pub password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new("admin", "@sman1Turen")
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}
