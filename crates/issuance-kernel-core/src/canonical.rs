//! Canonical CBOR encoding for stored records.
//!
//! Records are serialized with ciborium from derived `Serialize` impls.
//! Struct fields encode in declaration order and sequences keep their
//! order, so equal records always produce identical bytes.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CoreError, Result};

/// Encode a record to canonical CBOR bytes.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).map_err(|e| CoreError::EncodingError(e.to_string()))?;
    Ok(buf)
}

/// Decode a record from CBOR bytes.
pub fn from_canonical_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::UintRange;

    #[test]
    fn test_encoding_is_deterministic() {
        let ranges = vec![UintRange::of(1, 5), UintRange::full()];
        let a = to_canonical_bytes(&ranges).unwrap();
        let b = to_canonical_bytes(&ranges.clone()).unwrap();
        assert_eq!(a, b);

        let decoded: Vec<UintRange> = from_canonical_bytes(&a).unwrap();
        assert_eq!(decoded, ranges);
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        let result: Result<Vec<UintRange>> = from_canonical_bytes(&[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(CoreError::DecodingError(_))));
    }
}
