// Code generated by encx-gen. DO NOT EDIT.
//
// Encrypted projections and process/decrypt functions for the
// annotated record types in this package.

#![allow(clippy::all)]
#![allow(dead_code)]
#![allow(unused_imports)]

use encx::{Crypto, EncxError, FieldCodec, KeyVersion};

use super::*;

/// Encrypted projection of [`User`].
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UserEncx {
    pub id: i64,
    pub name_encrypted: Vec<u8>,
    pub email_encrypted: Vec<u8>,
    pub email_hash: String,
    pub password_hash_secure: String,
    pub phone_encrypted: Vec<u8>,
    pub active: bool,
    pub dek_encrypted: Vec<u8>,
    pub key_version: i64,
    pub metadata: Vec<u8>,
}

/// Produces the encrypted projection of a [`User`] under a fresh
/// record DEK, envelope-encrypted at the current key version.
pub async fn process_user(crypto: &Crypto, source: &User) -> Result<UserEncx, EncxError> {
    let dek = crypto.generate_dek()?;
    let mut projection = UserEncx::default();
    let mut field_errors: Vec<String> = Vec::new();

    projection.id = source.id.clone();
    projection.active = source.active.clone();

    match source.name.encode() {
        Ok(bytes) => {
            match crypto.encrypt_data(&bytes, &dek) {
                Ok(ciphertext) => projection.name_encrypted = ciphertext,
                Err(e) => field_errors.push(format!("field `name`: encrypt: {}", e)),
            }
        }
        Err(e) => field_errors.push(format!("field `name`: serialize: {}", e)),
    }

    match source.email.encode() {
        Ok(bytes) => {
            match crypto.encrypt_data(&bytes, &dek) {
                Ok(ciphertext) => projection.email_encrypted = ciphertext,
                Err(e) => field_errors.push(format!("field `email`: encrypt: {}", e)),
            }
            projection.email_hash = crypto.hash_basic(&bytes);
        }
        Err(e) => field_errors.push(format!("field `email`: serialize: {}", e)),
    }

    match source.password.encode() {
        Ok(bytes) => {
            match crypto.hash_secure(&bytes) {
                Ok(hash) => projection.password_hash_secure = hash,
                Err(e) => field_errors.push(format!("field `password`: hash_secure: {}", e)),
            }
        }
        Err(e) => field_errors.push(format!("field `password`: serialize: {}", e)),
    }

    if let Some(value) = &source.phone {
        match value.encode() {
            Ok(bytes) => {
                match crypto.encrypt_data(&bytes, &dek) {
                    Ok(ciphertext) => projection.phone_encrypted = ciphertext,
                    Err(e) => field_errors.push(format!("field `phone`: encrypt: {}", e)),
                }
            }
            Err(e) => field_errors.push(format!("field `phone`: serialize: {}", e)),
        }
    }

    if !field_errors.is_empty() {
        return Err(EncxError::processing_failed(format!(
            "record `User`: {}",
            field_errors.join("; ")
        )));
    }

    let wrapped = crypto.encrypt_dek(&dek).await?;
    projection.dek_encrypted = wrapped.ciphertext;
    projection.key_version = wrapped.key_version.get();

    Ok(projection)
}

/// Reconstructs a [`User`] from its encrypted projection using the
/// stamped key version. Hash-only fields stay at their default value.
pub async fn decrypt_user(crypto: &Crypto, source: &UserEncx) -> Result<User, EncxError> {
    let key_version = KeyVersion::new(source.key_version)?;
    let dek = crypto
        .decrypt_dek_with_version(&source.dek_encrypted, key_version)
        .await?;
    let mut record = User::default();
    let mut field_errors: Vec<String> = Vec::new();

    record.id = source.id.clone();
    record.active = source.active.clone();

    if !source.name_encrypted.is_empty() {
        match crypto.decrypt_data(&source.name_encrypted, &dek) {
            Ok(bytes) => match <String as FieldCodec>::decode(&bytes) {
                Ok(value) => record.name = value,
                Err(e) => field_errors.push(format!("field `name`: deserialize: {}", e)),
            },
            Err(e) => field_errors.push(format!("field `name`: decrypt: {}", e)),
        }
    }

    if !source.email_encrypted.is_empty() {
        match crypto.decrypt_data(&source.email_encrypted, &dek) {
            Ok(bytes) => match <String as FieldCodec>::decode(&bytes) {
                Ok(value) => record.email = value,
                Err(e) => field_errors.push(format!("field `email`: deserialize: {}", e)),
            },
            Err(e) => field_errors.push(format!("field `email`: decrypt: {}", e)),
        }
    }

    if !source.phone_encrypted.is_empty() {
        match crypto.decrypt_data(&source.phone_encrypted, &dek) {
            Ok(bytes) => match <String as FieldCodec>::decode(&bytes) {
                Ok(value) => record.phone = Some(value),
                Err(e) => field_errors.push(format!("field `phone`: deserialize: {}", e)),
            },
            Err(e) => field_errors.push(format!("field `phone`: decrypt: {}", e)),
        }
    }

    if !field_errors.is_empty() {
        return Err(EncxError::processing_failed(format!(
            "record `User`: {}",
            field_errors.join("; ")
        )));
    }

    Ok(record)
}
