use safespot_kv::KVError;
use thiserror::Error;

/// Local shape-check failure. Never reaches the provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("not a valid email address: {0:?}")]
    Email(String),
}

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error(transparent)]
    Storage(#[from] KVError),
}
