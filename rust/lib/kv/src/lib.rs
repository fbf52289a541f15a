//! Local key-value persistence.
//!
//! [`KVStore`] is the storage contract; [`RedbStore`] persists to an
//! embedded redb file, [`MemoryStore`] keeps everything in process.

pub mod error;
pub mod memory;
pub mod redb;
pub mod traits;

pub use error::KVError;
pub use memory::MemoryStore;
pub use redb::RedbStore;
pub use traits::KVStore;
