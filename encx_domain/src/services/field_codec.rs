// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Field Codec
//!
//! Deterministic, bidirectional mapping between field values and compact
//! bytes. The encrypted projection of a record stores AEAD ciphertext
//! over these bytes, and searchable hashes are computed from them, so the
//! layout is normative and bit-exact:
//!
//! - Scalars: little-endian fixed width (`i8`–`i64`, `u8`–`u64`, `f32`,
//!   `f64`; `bool` as one byte `0`/`1`).
//! - Strings and byte sequences: 4-byte `u32` little-endian length prefix
//!   followed by the raw bytes.
//! - Timestamps: `i64` little-endian nanoseconds since the Unix epoch.
//! - UUIDs: the raw 16 bytes, no prefix.
//! - `Option<T>`: one presence byte (`0x00` = absent, `0x01` = present)
//!   followed by the encoding of the inner value when present.
//!
//! Equal logical values always produce identical bytes across runs and
//! hosts; nothing in the encoding depends on iteration order, wall-clock
//! time, or addresses. Decoding consumes the entire input: trailing bytes
//! after a complete value are malformed input, and short input is
//! truncated input.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::EncxError;

/// Bidirectional, deterministic value ↔ bytes mapping for the supported
/// field type set.
///
/// `encode` is total on the supported types; `decode` fails on truncation,
/// trailing bytes, and type mismatches.
pub trait FieldCodec: Sized {
    /// Serializes the value into its canonical byte form.
    fn encode(&self) -> Result<Vec<u8>, EncxError>;

    /// Reconstructs a value from its canonical byte form, consuming the
    /// whole input.
    fn decode(bytes: &[u8]) -> Result<Self, EncxError>;
}

fn length_error(type_name: &str, expected: usize, got: usize) -> EncxError {
    if got < expected {
        EncxError::serialization(format!(
            "truncated input for {}: expected {} bytes, got {}",
            type_name, expected, got
        ))
    } else {
        EncxError::serialization(format!(
            "malformed input for {}: expected {} bytes, got {}",
            type_name, expected, got
        ))
    }
}

macro_rules! fixed_width_codec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldCodec for $ty {
                fn encode(&self) -> Result<Vec<u8>, EncxError> {
                    Ok(self.to_le_bytes().to_vec())
                }

                fn decode(bytes: &[u8]) -> Result<Self, EncxError> {
                    const WIDTH: usize = std::mem::size_of::<$ty>();
                    let array: [u8; WIDTH] = bytes
                        .try_into()
                        .map_err(|_| length_error(stringify!($ty), WIDTH, bytes.len()))?;
                    Ok(<$ty>::from_le_bytes(array))
                }
            }
        )*
    };
}

fixed_width_codec!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl FieldCodec for bool {
    fn encode(&self) -> Result<Vec<u8>, EncxError> {
        Ok(vec![u8::from(*self)])
    }

    fn decode(bytes: &[u8]) -> Result<Self, EncxError> {
        match bytes {
            [0] => Ok(false),
            [1] => Ok(true),
            [b] => Err(EncxError::serialization(format!(
                "malformed input for bool: unexpected byte {:#04x}",
                b
            ))),
            _ => Err(length_error("bool", 1, bytes.len())),
        }
    }
}

fn encode_length_prefixed(payload: &[u8], type_name: &str) -> Result<Vec<u8>, EncxError> {
    let len = u32::try_from(payload.len()).map_err(|_| {
        EncxError::serialization(format!(
            "{} of {} bytes exceeds the 4 GiB length-prefix limit",
            type_name,
            payload.len()
        ))
    })?;
    let mut out = Vec::with_capacity(4 + payload.len());
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

fn decode_length_prefixed<'a>(bytes: &'a [u8], type_name: &str) -> Result<&'a [u8], EncxError> {
    if bytes.len() < 4 {
        return Err(EncxError::serialization(format!(
            "truncated input for {}: missing length prefix",
            type_name
        )));
    }
    let (prefix, payload) = bytes.split_at(4);
    let declared = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
    if payload.len() < declared {
        return Err(EncxError::serialization(format!(
            "truncated input for {}: expected {} payload bytes, got {}",
            type_name,
            declared,
            payload.len()
        )));
    }
    if payload.len() > declared {
        return Err(EncxError::serialization(format!(
            "malformed input for {}: {} trailing bytes after payload",
            type_name,
            payload.len() - declared
        )));
    }
    Ok(payload)
}

impl FieldCodec for String {
    fn encode(&self) -> Result<Vec<u8>, EncxError> {
        encode_length_prefixed(self.as_bytes(), "string")
    }

    fn decode(bytes: &[u8]) -> Result<Self, EncxError> {
        let payload = decode_length_prefixed(bytes, "string")?;
        String::from_utf8(payload.to_vec())
            .map_err(|e| EncxError::serialization(format!("malformed input for string: {}", e)))
    }
}

impl FieldCodec for Vec<u8> {
    fn encode(&self) -> Result<Vec<u8>, EncxError> {
        encode_length_prefixed(self, "byte sequence")
    }

    fn decode(bytes: &[u8]) -> Result<Self, EncxError> {
        Ok(decode_length_prefixed(bytes, "byte sequence")?.to_vec())
    }
}

impl FieldCodec for DateTime<Utc> {
    fn encode(&self) -> Result<Vec<u8>, EncxError> {
        let nanos = self.timestamp_nanos_opt().ok_or_else(|| {
            EncxError::serialization("timestamp out of range for nanosecond encoding")
        })?;
        nanos.encode()
    }

    fn decode(bytes: &[u8]) -> Result<Self, EncxError> {
        let nanos = i64::decode(bytes).map_err(|_| length_error("timestamp", 8, bytes.len()))?;
        Ok(DateTime::from_timestamp_nanos(nanos))
    }
}

impl FieldCodec for Uuid {
    fn encode(&self) -> Result<Vec<u8>, EncxError> {
        Ok(self.as_bytes().to_vec())
    }

    fn decode(bytes: &[u8]) -> Result<Self, EncxError> {
        if bytes.len() != 16 {
            return Err(length_error("uuid", 16, bytes.len()));
        }
        Uuid::from_slice(bytes).map_err(|e| EncxError::serialization(format!("malformed input for uuid: {}", e)))
    }
}

impl<T: FieldCodec> FieldCodec for Option<T> {
    fn encode(&self) -> Result<Vec<u8>, EncxError> {
        match self {
            None => Ok(vec![0x00]),
            Some(value) => {
                let mut out = vec![0x01];
                out.extend_from_slice(&value.encode()?);
                Ok(out)
            }
        }
    }

    fn decode(bytes: &[u8]) -> Result<Self, EncxError> {
        let (tag, rest) = bytes
            .split_first()
            .ok_or_else(|| EncxError::serialization("truncated input for option: missing presence tag"))?;
        match *tag {
            0x00 if rest.is_empty() => Ok(None),
            0x00 => Err(EncxError::serialization(format!(
                "malformed input for option: {} bytes after absent tag",
                rest.len()
            ))),
            0x01 => Ok(Some(T::decode(rest)?)),
            other => Err(EncxError::serialization(format!(
                "malformed input for option: unexpected presence tag {:#04x}",
                other
            ))),
        }
    }
}
