//! Serialization of fitted preprocessing state.
//!
//! Fitted transformers hold only plain data (`Vec<f64>`, strings, scalars), so
//! any of them can be encoded to bytes without coupling to a storage backend.
//! Storing the bytes is left to the caller.

use crate::preprocessing::error::PreprocessingError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;

/// A trait for parameter representations that can be serialized to and from bytes.
///
/// Implemented for every `Serialize + DeserializeOwned` type through bincode.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

impl<T> SerializableParams for T
where
    T: Serialize + DeserializeOwned,
{
    type Error = PreprocessingError;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(bincode::serialize(self)?)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(bincode::deserialize(bytes)?)
    }
}
