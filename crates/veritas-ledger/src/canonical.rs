//! Canonical encoding and digests
//!
//! A payload is converted to a JSON value, every object's keys are sorted
//! recursively, and the result is written without whitespace. The digest is
//! SHA-256 rendered as lowercase hex.

use crate::error::{LedgerError, Result};
use serde::ser::{self, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt::Display;

/// `previous_hash` of the first block in every chain
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Deterministic byte encoding of a serializable payload
///
/// Fails with [`LedgerError::UnserializablePayload`] when the value has no
/// JSON form, for example a map keyed by tuples or a NaN anywhere inside.
///
/// # Examples
///
/// ```
/// use veritas_ledger::canonical_bytes;
/// use std::collections::HashMap;
///
/// let mut a = HashMap::new();
/// a.insert("zeta", 1);
/// a.insert("alpha", 2);
/// let bytes = canonical_bytes(&a).unwrap();
/// assert_eq!(bytes, br#"{"alpha":2,"zeta":1}"#);
/// ```
pub fn canonical_bytes<T: Serialize + ?Sized>(payload: &T) -> Result<Vec<u8>> {
    // serde_json writes non-finite floats as null, which would record a
    // different payload than the one applied.
    if let Some(number) = first_non_finite(payload) {
        return Err(LedgerError::UnserializablePayload(format!(
            "non-finite number {} has no JSON form",
            number
        )));
    }
    let value = serde_json::to_value(payload)
        .map_err(|e| LedgerError::UnserializablePayload(e.to_string()))?;
    serde_json::to_vec(&sort_keys(value))
        .map_err(|e| LedgerError::UnserializablePayload(e.to_string()))
}

// serde_json keeps insertion order when its preserve_order feature is on
// anywhere in the dependency graph, so ordering is enforced here.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (key, inner) in entries {
                sorted.insert(key, sort_keys(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// First NaN or infinity reachable from `payload`, in serialization order
fn first_non_finite<T: Serialize + ?Sized>(payload: &T) -> Option<f64> {
    match payload.serialize(FloatScan) {
        Err(ScanStop::NonFinite(number)) => Some(number),
        // Payloads that fail for other reasons are left to serde_json.
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
enum ScanStop {
    #[error("non-finite number {0}")]
    NonFinite(f64),
    #[error("{0}")]
    Custom(String),
}

impl ser::Error for ScanStop {
    fn custom<M: Display>(msg: M) -> Self {
        ScanStop::Custom(msg.to_string())
    }
}

/// Serializer that visits every value and stops at the first non-finite float
#[derive(Clone, Copy)]
struct FloatScan;

macro_rules! ignore_scalars {
    ($($method:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method(self, _: $ty) -> std::result::Result<(), ScanStop> {
                Ok(())
            }
        )*
    };
}

impl FloatScan {
    fn check(number: f64) -> std::result::Result<(), ScanStop> {
        if number.is_finite() {
            Ok(())
        } else {
            Err(ScanStop::NonFinite(number))
        }
    }
}

impl ser::Serializer for FloatScan {
    type Ok = ();
    type Error = ScanStop;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    ignore_scalars! {
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_i128: i128,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_u128: u128,
        serialize_char: char,
        serialize_str: &str,
        serialize_bytes: &[u8],
        serialize_unit_struct: &'static str,
    }

    fn serialize_f32(self, v: f32) -> std::result::Result<(), ScanStop> {
        Self::check(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> std::result::Result<(), ScanStop> {
        Self::check(v)
    }

    fn serialize_none(self) -> std::result::Result<(), ScanStop> {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> std::result::Result<(), ScanStop> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> std::result::Result<(), ScanStop> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> std::result::Result<(), ScanStop> {
        Ok(())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> std::result::Result<(), ScanStop> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        value: &T,
    ) -> std::result::Result<(), ScanStop> {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> std::result::Result<Self, ScanStop> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> std::result::Result<Self, ScanStop> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, ScanStop> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, ScanStop> {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> std::result::Result<Self, ScanStop> {
        Ok(self)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, ScanStop> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, ScanStop> {
        Ok(self)
    }
}

macro_rules! scan_elements {
    ($($trait:ident :: $method:ident),* $(,)?) => {
        $(
            impl ser::$trait for FloatScan {
                type Ok = ();
                type Error = ScanStop;

                fn $method<T: Serialize + ?Sized>(
                    &mut self,
                    value: &T,
                ) -> std::result::Result<(), ScanStop> {
                    value.serialize(*self)
                }

                fn end(self) -> std::result::Result<(), ScanStop> {
                    Ok(())
                }
            }
        )*
    };
}

scan_elements! {
    SerializeSeq::serialize_element,
    SerializeTuple::serialize_element,
    SerializeTupleStruct::serialize_field,
    SerializeTupleVariant::serialize_field,
}

macro_rules! scan_fields {
    ($($trait:ident),* $(,)?) => {
        $(
            impl ser::$trait for FloatScan {
                type Ok = ();
                type Error = ScanStop;

                fn serialize_field<T: Serialize + ?Sized>(
                    &mut self,
                    _key: &'static str,
                    value: &T,
                ) -> std::result::Result<(), ScanStop> {
                    value.serialize(*self)
                }

                fn end(self) -> std::result::Result<(), ScanStop> {
                    Ok(())
                }
            }
        )*
    };
}

scan_fields! { SerializeStruct, SerializeStructVariant }

impl ser::SerializeMap for FloatScan {
    type Ok = ();
    type Error = ScanStop;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> std::result::Result<(), ScanStop> {
        key.serialize(*self)
    }

    fn serialize_value<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> std::result::Result<(), ScanStop> {
        value.serialize(*self)
    }

    fn end(self) -> std::result::Result<(), ScanStop> {
        Ok(())
    }
}

/// SHA-256 of `bytes`, lowercase hex
pub fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Hash of a block: digest over `previous_hash || content_root || timestamp`
pub fn compute_block_hash(previous_hash: &str, content_root: &str, timestamp: &str) -> String {
    digest(format!("{}{}{}", previous_hash, content_root, timestamp).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_nested_keys_sorted() {
        let bytes = canonical_bytes(&json!({"b": {"y": 1, "x": 2}, "a": [{"d": 0, "c": 0}]})).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"a":[{"c":0,"d":0}],"b":{"x":2,"y":1}}"#
        );
    }

    #[test]
    fn test_tuple_keys_are_unserializable() {
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), "pair");
        let err = canonical_bytes(&map).unwrap_err();
        assert!(matches!(err, LedgerError::UnserializablePayload(_)));
    }

    #[test]
    fn test_non_finite_numbers_are_unserializable() {
        for number in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = canonical_bytes(&("measurement", number)).unwrap_err();
            assert!(matches!(err, LedgerError::UnserializablePayload(_)));
        }

        let mut nested = BTreeMap::new();
        nested.insert("runs", vec![Some(1.5f32), None, Some(f32::NAN)]);
        assert!(canonical_bytes(&nested).is_err());
    }

    #[test]
    fn test_null_and_finite_floats_still_encode() {
        let bytes = canonical_bytes(&("measurement", Option::<f64>::None, 0.25)).unwrap();
        assert_eq!(bytes, br#"["measurement",null,0.25]"#);
    }

    #[test]
    fn test_digest_is_sha256_hex() {
        assert_eq!(
            digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(GENESIS_HASH.len(), 64);
    }

    #[test]
    fn test_block_hash_depends_on_timestamp() {
        let root = digest(b"{}");
        let a = compute_block_hash(GENESIS_HASH, &root, "2024-01-01T00:00:00.000000001Z");
        let b = compute_block_hash(GENESIS_HASH, &root, "2024-01-01T00:00:00.000000002Z");
        assert_ne!(a, b);
    }
}
