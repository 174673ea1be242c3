//! Session context
//!
//! Holds the bearer credential for the running client. The credential is
//! read by the API service on every request and cleared through
//! [`SessionContext::invalidate`] when the server rejects it.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use secrecy::SecretString;

use crate::Result;

/// Persistence for the bearer credential
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<SecretString>>;
    fn save(&self, token: &SecretString) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Shared handle to the current credential and its store
///
/// Cloning is cheap and every clone observes the same credential.
#[derive(Clone)]
pub struct SessionContext {
    credential: Arc<RwLock<Option<SecretString>>>,
    store: Arc<dyn CredentialStore>,
}

impl SessionContext {
    /// Build a session from the stored credential, falling back to `fallback`
    /// (usually the token from the config file) when nothing is stored.
    pub fn new(store: Arc<dyn CredentialStore>, fallback: Option<SecretString>) -> Result<Self> {
        let credential = store.load()?.or(fallback);
        Ok(Self {
            credential: Arc::new(RwLock::new(credential)),
            store,
        })
    }

    pub fn credential(&self) -> Option<SecretString> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Forget the credential in memory and in the store
    pub fn invalidate(&self) -> Result<()> {
        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        self.store.clear()
    }

    /// Persist `token` and use it for subsequent requests
    pub fn replace(&self, token: SecretString) -> Result<()> {
        self.store.save(&token)?;
        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok(())
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
