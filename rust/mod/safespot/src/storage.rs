//! Profile persistence on top of the local KV store.

use std::sync::Arc;

use safespot_kv::KVStore;

use crate::error::ProfileError;
use crate::state::{Profile, ProfileField};

const KEY_PREFIX: &str = "profile:";

fn key(field: ProfileField) -> String {
    format!("{KEY_PREFIX}{}", field.as_str())
}

/// Reads and writes the three profile fields. Missing keys load as empty.
#[derive(Clone)]
pub struct ProfileStore {
    kv: Arc<dyn KVStore>,
}

impl ProfileStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    pub fn load(&self) -> Result<Profile, ProfileError> {
        let mut profile = Profile::default();
        for field in ProfileField::ALL {
            let value = self.kv.get_string(&key(field))?.unwrap_or_default();
            profile.set_field(field, value);
        }
        Ok(profile)
    }

    pub fn save(&self, profile: &Profile) -> Result<(), ProfileError> {
        let keys: Vec<(String, &str)> = ProfileField::ALL
            .into_iter()
            .map(|f| (key(f), profile.field(f)))
            .collect();
        let entries: Vec<(&str, &[u8])> = keys
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_bytes()))
            .collect();
        self.kv.batch_set(&entries)?;
        Ok(())
    }
}
