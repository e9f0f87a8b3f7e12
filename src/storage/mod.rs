pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::Result;

/// Named string slots, read and written whole.
///
/// Every operation on the registration store re-reads its slot through this
/// trait, so a backend only has to provide get/set/remove semantics.
pub trait StorageBackend {
    /// Read a slot, `None` if it has never been written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the slot contents
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot, returning whether it existed
    fn remove(&mut self, key: &str) -> Result<bool>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }
}
