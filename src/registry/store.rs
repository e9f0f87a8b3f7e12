use super::allocator::allocate_in;
use super::types::{Category, NewRegistration, Registration};
use crate::storage::StorageBackend;
use crate::{FunRunError, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Default slot holding the registration collection
pub const REGISTRATIONS_SLOT: &str = "funRunRegistrations";

/// The registration collection, kept as one JSON array in a storage slot.
///
/// Every operation reads the whole collection and, when it changes anything,
/// writes the whole collection back.
pub struct RegistrationStore<B: StorageBackend> {
    backend: B,
    slot: String,
}

impl<B: StorageBackend> RegistrationStore<B> {
    /// Create store using the default slot name
    pub fn new(backend: B) -> Self {
        Self::with_slot(backend, REGISTRATIONS_SLOT)
    }

    /// Create store on a custom slot
    pub fn with_slot(backend: B, slot: impl Into<String>) -> Self {
        Self {
            backend,
            slot: slot.into(),
        }
    }

    /// Next free bib number for `category`, without reserving it
    pub fn allocate(&self, category: Category) -> Result<String> {
        let existing = self.list()?;
        allocate_in(&existing, category)
    }

    /// Add a fully formed registration at the end of the collection
    pub fn append(&mut self, registration: Registration) -> Result<()> {
        let mut registrations = self.load_for_update()?;
        debug!(
            bib_number = %registration.bib_number,
            total = registrations.len() + 1,
            "Appending registration"
        );
        registrations.push(registration);
        self.write(&registrations)
    }

    /// Allocate a bib number and commit the registration in one step.
    ///
    /// Nothing is written when the category band is exhausted.
    pub fn register(&mut self, new: NewRegistration) -> Result<Registration> {
        let mut registrations = self.load_for_update()?;
        let bib_number = allocate_in(&registrations, new.category)?;
        let registration = new.into_registration(bib_number);

        registrations.push(registration.clone());
        self.write(&registrations)?;

        info!(
            bib_number = %registration.bib_number,
            category = %registration.category,
            "Registered participant"
        );
        Ok(registration)
    }

    /// All registrations in insertion order
    pub fn list(&self) -> Result<Vec<Registration>> {
        Ok(self.read()?.unwrap_or_default())
    }

    /// Parsed slot contents; `None` when the slot is missing or malformed
    fn read(&self) -> Result<Option<Vec<Registration>>> {
        let Some(content) = self.backend.get(&self.slot)? else {
            return Ok(None);
        };

        match serde_json::from_str(&content) {
            Ok(registrations) => Ok(Some(registrations)),
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "Stored registrations are malformed, treating as empty");
                Ok(None)
            }
        }
    }

    /// Collection about to be rewritten. Malformed contents are copied to
    /// the backup slot first so the overwrite does not lose them.
    fn load_for_update(&mut self) -> Result<Vec<Registration>> {
        if let Some(registrations) = self.read()? {
            return Ok(registrations);
        }

        if let Some(content) = self.backend.get(&self.slot)? {
            let backup = self.backup_slot();
            self.backend.set(&backup, &content)?;
            warn!(
                slot = %self.slot,
                backup = %backup,
                "Overwriting malformed registrations, previous contents saved to backup slot"
            );
        }
        Ok(Vec::new())
    }

    /// Slot receiving unreadable contents before they are overwritten
    pub fn backup_slot(&self) -> String {
        format!("{}.corrupt", self.slot)
    }

    /// Replace the collection with an empty one
    pub fn clear(&mut self) -> Result<()> {
        self.write(&[])?;
        info!(slot = %self.slot, "Cleared all registrations");
        Ok(())
    }

    /// Number of registrations per category, every category present
    pub fn count_by_category(&self) -> Result<BTreeMap<Category, usize>> {
        Ok(count_by_category(&self.list()?))
    }

    /// Name of the slot backing this store
    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn write(&mut self, registrations: &[Registration]) -> Result<()> {
        let content = serde_json::to_string(registrations)?;
        self.backend.set(&self.slot, &content)
    }
}

/// Number of registrations per category, every category present
pub fn count_by_category(registrations: &[Registration]) -> BTreeMap<Category, usize> {
    let mut counts: BTreeMap<Category, usize> = Category::ALL.iter().map(|c| (*c, 0)).collect();
    for registration in registrations {
        *counts.entry(registration.category).or_insert(0) += 1;
    }
    counts
}

/// Thread-safe handle whose `register` holds the lock across allocate and append
pub struct SharedRegistrationStore<B: StorageBackend> {
    inner: Arc<Mutex<RegistrationStore<B>>>,
}

impl<B: StorageBackend> Clone for SharedRegistrationStore<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: StorageBackend> SharedRegistrationStore<B> {
    pub fn new(store: RegistrationStore<B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn register(&self, new: NewRegistration) -> Result<Registration> {
        self.lock()?.register(new)
    }

    pub fn list(&self) -> Result<Vec<Registration>> {
        self.lock()?.list()
    }

    pub fn clear(&self) -> Result<()> {
        self.lock()?.clear()
    }

    fn lock(&self) -> Result<MutexGuard<'_, RegistrationStore<B>>> {
        self.inner
            .lock()
            .map_err(|_| FunRunError::Storage("Registration store lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::types::format_bib;
    use crate::storage::MemoryBackend;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::thread;

    fn create_test_store() -> RegistrationStore<MemoryBackend> {
        RegistrationStore::new(MemoryBackend::new())
    }

    fn new_registration(name: &str, category: Category) -> NewRegistration {
        NewRegistration::new(name, "3507010101010001", category).unwrap()
    }

    fn budi() -> Registration {
        Registration {
            name: "Budi Santoso".to_string(),
            nik: "1234".to_string(),
            category: Category::Pelajar,
            bib_number: "0007".to_string(),
        }
    }

    #[test]
    fn test_list_on_fresh_store_is_empty() {
        let store = create_test_store();
        assert_eq!(store.list().unwrap(), Vec::new());
        assert_eq!(store.backend().slot_count(), 0);
    }

    #[test]
    fn test_append_then_list_keeps_insertion_order() {
        let mut store = create_test_store();
        let first = new_registration("ani", Category::Umum).into_registration("5001".into());

        store.append(first.clone()).unwrap();
        store.append(budi()).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed, vec![first, budi()]);
        assert_eq!(listed.last(), Some(&budi()));
    }

    #[test]
    fn test_allocate_does_not_write() {
        let store = create_test_store();
        assert_eq!(store.allocate(Category::Pelajar).unwrap(), "0001");
        assert_eq!(store.allocate(Category::Pelajar).unwrap(), "0001");
        assert_eq!(store.backend().slot_count(), 0);
    }

    #[test]
    fn test_register_sequence_across_categories() {
        let mut store = create_test_store();

        let a = store.register(new_registration("a", Category::Pelajar)).unwrap();
        let b = store.register(new_registration("b", Category::Pelajar)).unwrap();
        let c = store.register(new_registration("c", Category::Umum)).unwrap();

        assert_eq!(a.bib_number, "0001");
        assert_eq!(b.bib_number, "0002");
        assert_eq!(c.bib_number, "5001");
        assert_eq!(store.list().unwrap().len(), 3);
    }

    #[test]
    fn test_register_numbers_unique_and_in_band() {
        let mut store = create_test_store();
        let mut seen = HashSet::new();

        for i in 0..50 {
            let category = if i % 3 == 0 { Category::Umum } else { Category::Pelajar };
            let registration = store
                .register(new_registration(&format!("runner {}", i), category))
                .unwrap();
            let value = registration.bib_value().unwrap();

            assert!(category.band().contains(value));
            assert!(seen.insert(registration.bib_number));
        }
    }

    #[test]
    fn test_exhausted_band_does_not_append() {
        let mut store = create_test_store();
        let full: Vec<Registration> = (1..=5000)
            .map(|n| Registration {
                name: "Runner".to_string(),
                nik: "1".to_string(),
                category: Category::Pelajar,
                bib_number: format_bib(n),
            })
            .collect();
        store
            .backend_mut()
            .set(REGISTRATIONS_SLOT, &serde_json::to_string(&full).unwrap())
            .unwrap();

        let err = store
            .register(new_registration("late", Category::Pelajar))
            .unwrap_err();

        assert!(matches!(err, FunRunError::CapacityExhausted { .. }));
        assert_eq!(store.list().unwrap().len(), 5000);
    }

    #[test]
    fn test_clear_empties_collection() {
        let mut store = create_test_store();
        store.append(budi()).unwrap();

        store.clear().unwrap();

        assert_eq!(store.list().unwrap(), Vec::new());
        assert_eq!(
            store.backend().get(REGISTRATIONS_SLOT).unwrap(),
            Some("[]".to_string())
        );
        // Numbering restarts after a clear
        assert_eq!(store.allocate(Category::Pelajar).unwrap(), "0001");
    }

    #[test]
    fn test_malformed_slot_is_treated_as_empty() {
        let mut store = create_test_store();
        store
            .backend_mut()
            .set(REGISTRATIONS_SLOT, "{not json")
            .unwrap();

        assert_eq!(store.list().unwrap(), Vec::new());

        let registration = store.register(new_registration("a", Category::Pelajar)).unwrap();
        assert_eq!(registration.bib_number, "0001");
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_slot_is_backed_up_before_overwrite() {
        let mut store = create_test_store();
        store
            .backend_mut()
            .set(REGISTRATIONS_SLOT, "{not json")
            .unwrap();

        store.register(new_registration("a", Category::Pelajar)).unwrap();

        assert_eq!(store.backup_slot(), "funRunRegistrations.corrupt");
        assert_eq!(
            store.backend().get("funRunRegistrations.corrupt").unwrap(),
            Some("{not json".to_string())
        );
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_well_formed_slot_is_not_backed_up() {
        let mut store = create_test_store();
        store.register(new_registration("a", Category::Pelajar)).unwrap();
        store.append(budi()).unwrap();

        assert_eq!(store.backend().get("funRunRegistrations.corrupt").unwrap(), None);
        assert_eq!(store.backend().slot_count(), 1);
    }

    #[test]
    fn test_count_slice_without_store() {
        let counts = count_by_category(&[budi(), budi()]);
        assert_eq!(counts.get(&Category::Pelajar), Some(&2));
        assert_eq!(counts.get(&Category::Umum), Some(&0));
        assert_eq!(count_by_category(&[]).values().sum::<usize>(), 0);
    }

    #[test]
    fn test_reads_source_layout() {
        let mut store = create_test_store();
        store
            .backend_mut()
            .set(
                REGISTRATIONS_SLOT,
                r#"[{"name":"Budi Santoso","nik":"1234","category":"pelajar","bibNumber":"0007"}]"#,
            )
            .unwrap();

        assert_eq!(store.list().unwrap(), vec![budi()]);
    }

    #[test]
    fn test_custom_slot() {
        let mut store = RegistrationStore::with_slot(MemoryBackend::new(), "event2026");
        store.append(budi()).unwrap();

        assert_eq!(store.slot(), "event2026");
        assert!(store.backend().get("event2026").unwrap().is_some());
        assert_eq!(store.backend().get(REGISTRATIONS_SLOT).unwrap(), None);
    }

    #[test]
    fn test_count_by_category() {
        let mut store = create_test_store();
        store.register(new_registration("a", Category::Pelajar)).unwrap();
        store.register(new_registration("b", Category::Pelajar)).unwrap();

        let counts = store.count_by_category().unwrap();
        assert_eq!(counts.get(&Category::Pelajar), Some(&2));
        assert_eq!(counts.get(&Category::Umum), Some(&0));
    }

    #[test]
    fn test_concurrent_registration_is_unique() {
        let shared = SharedRegistrationStore::new(create_test_store());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    (0..25)
                        .map(|i| {
                            let category = if t % 2 == 0 { Category::Pelajar } else { Category::Umum };
                            shared
                                .register(new_registration(&format!("t{} r{}", t, i), category))
                                .unwrap()
                                .bib_number
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for bib in handle.join().unwrap() {
                assert!(all.insert(bib), "duplicate bib number issued");
            }
        }

        assert_eq!(all.len(), 200);
        assert_eq!(shared.list().unwrap().len(), 200);
        assert!(all.contains("0100"));
        assert!(all.contains("5100"));
    }
}
