use crate::error::KVError;

/// Byte-oriented key-value storage.
///
/// Keys are namespaced with `:` (`profile:name`, `profile:phone`).
/// Operations are synchronous and individually durable; there are no
/// multi-key transactions beyond `batch_set`.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. `None` if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), KVError>;

    /// All keys starting with `prefix`, sorted by key.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;

    /// Write several entries. Backends that can do it atomically should.
    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Convenience: read a UTF-8 string value.
    fn get_string(&self, key: &str) -> Result<Option<String>, KVError> {
        self.get(key)?
            .map(|bytes| {
                String::from_utf8(bytes)
                    .map_err(|e| KVError::Serialization(format!("{key}: {e}")))
            })
            .transpose()
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), KVError> {
        self.set(key, value.as_bytes())
    }
}
