//! Turning one line of bytes into a typed record.

use serde::de::DeserializeOwned;

use crate::error::DecodeError;

/// Decodes one line of a database file into a typed value.
pub trait Decoder {
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodeError>;
}

/// Decodes JSON text with `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl<D: Decoder> Decoder for &D {
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodeError> {
        (**self).decode(bytes)
    }
}
