use crate::auth::{AccessGate, CredentialVerifier};
use crate::config::{BackendKind, FunRunConfig};
use crate::registry::RegistrationStore;
use crate::storage::{FileBackend, MemoryBackend, StorageBackend};
use crate::Result;
use tracing::debug;

pub type DynBackend = Box<dyn StorageBackend>;
pub type DynVerifier = Box<dyn CredentialVerifier>;

/// Everything a command handler works against
pub struct AppContext {
    pub config: FunRunConfig,
    pub store: RegistrationStore<DynBackend>,
    pub gate: AccessGate<DynBackend, DynVerifier>,
}

impl AppContext {
    /// Build the store and gate on the backend selected by `config`
    pub fn from_config(config: FunRunConfig) -> Result<Self> {
        let (store_backend, gate_backend): (DynBackend, DynBackend) = match config.storage.backend
        {
            BackendKind::File => {
                let data_dir = config.resolved_data_dir();
                debug!(data_dir = %data_dir.display(), "Using file backend");
                let backend = FileBackend::new(&data_dir)?;
                (Box::new(backend.clone()), Box::new(backend))
            }
            BackendKind::Memory => {
                debug!("Using memory backend");
                (Box::new(MemoryBackend::new()), Box::new(MemoryBackend::new()))
            }
        };

        Ok(Self::new(config, store_backend, gate_backend))
    }

    /// Build on explicit backends, with the configured admin credentials
    pub fn new(config: FunRunConfig, store_backend: DynBackend, gate_backend: DynBackend) -> Self {
        let store =
            RegistrationStore::with_slot(store_backend, config.storage.registrations_slot.clone());
        let verifier: DynVerifier = Box::new(config.admin.clone());
        let gate = AccessGate::with_slot(gate_backend, verifier, config.storage.auth_slot.clone());

        Self {
            config,
            store,
            gate,
        }
    }

    /// Context on fresh memory backends, used by tests
    pub fn in_memory(config: FunRunConfig) -> Self {
        Self::new(
            config,
            Box::new(MemoryBackend::new()),
            Box::new(MemoryBackend::new()),
        )
    }
}
