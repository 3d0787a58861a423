// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Framed Streaming Encryption
//!
//! Chunked AEAD for payloads too large to buffer: files, blob-storage
//! pipelines, backups. The stream is cut into fixed-size frames and every
//! frame is its own AES-256-GCM seal, so memory stays O(frame) on both
//! sides.
//!
//! ## Frame format
//!
//! ```text
//! [u32 LE ciphertext length][u8 flags][12-byte nonce][ciphertext + tag]
//! ```
//!
//! The frame index (u64 LE) and the flags byte are bound as associated
//! data, not carried on the wire: a reordered, dropped, or duplicated
//! frame changes the expected index and fails authentication. Flag bit
//! `0x01` marks the final frame — always emitted, possibly with an empty
//! payload — so truncation behind the last full frame is detected too.
//!
//! Every frame boundary is an `.await`; dropping the future cancels the
//! operation between frames without ever reporting success for a
//! half-written stream.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use encx_domain::{Dek, EncxError};

use super::aead::{AeadEngine, NONCE_LEN, TAG_LEN};

/// Plaintext bytes per frame.
pub const FRAME_SIZE: usize = 64 * 1024;

const FLAG_FINAL: u8 = 0x01;

/// Largest ciphertext length a well-formed frame can declare.
const MAX_FRAME_CIPHERTEXT: usize = FRAME_SIZE + TAG_LEN;

fn frame_aad(index: u64, flags: u8) -> [u8; 9] {
    let mut aad = [0u8; 9];
    aad[..8].copy_from_slice(&index.to_le_bytes());
    aad[8] = flags;
    aad
}

async fn fill_frame<R>(reader: &mut R, buf: &mut [u8]) -> Result<usize, EncxError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader
            .read(&mut buf[filled..])
            .await
            .map_err(|e| EncxError::IoError(format!("stream read failed: {}", e)))?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Encrypts `reader` into `writer` frame by frame. Returns the number of
/// plaintext bytes consumed.
///
/// The output decrypts identically regardless of how the reader chunks
/// its data: frames are cut by plaintext offset, not by read boundaries.
pub async fn encrypt_stream<R, W>(
    engine: &AeadEngine,
    reader: &mut R,
    writer: &mut W,
    dek: &Dek,
) -> Result<u64, EncxError>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buf = vec![0u8; FRAME_SIZE];
    let mut index: u64 = 0;
    let mut total: u64 = 0;

    loop {
        let filled = fill_frame(reader, &mut buf).await?;
        let is_final = filled < FRAME_SIZE;
        let flags = if is_final { FLAG_FINAL } else { 0 };

        let sealed = engine.encrypt_with_aad(&buf[..filled], dek, &frame_aad(index, flags))?;
        let ciphertext_len = (sealed.len() - NONCE_LEN) as u32;

        writer
            .write_all(&ciphertext_len.to_le_bytes())
            .await
            .map_err(|e| EncxError::IoError(format!("stream write failed: {}", e)))?;
        writer
            .write_all(&[flags])
            .await
            .map_err(|e| EncxError::IoError(format!("stream write failed: {}", e)))?;
        writer
            .write_all(&sealed)
            .await
            .map_err(|e| EncxError::IoError(format!("stream write failed: {}", e)))?;

        total += filled as u64;
        index += 1;
        if is_final {
            break;
        }
    }

    writer
        .flush()
        .await
        .map_err(|e| EncxError::IoError(format!("stream flush failed: {}", e)))?;
    Ok(total)
}

async fn read_frame_bytes<R>(reader: &mut R, buf: &mut [u8]) -> Result<(), EncxError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    reader.read_exact(buf).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            EncxError::decryption("truncated stream: ended before the final frame")
        } else {
            EncxError::IoError(format!("stream read failed: {}", e))
        }
    })?;
    Ok(())
}

/// Decrypts a stream produced by [`encrypt_stream`]. Returns the number
/// of plaintext bytes written.
pub async fn decrypt_stream<R, W>(
    engine: &AeadEngine,
    reader: &mut R,
    writer: &mut W,
    dek: &Dek,
) -> Result<u64, EncxError>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut index: u64 = 0;
    let mut total: u64 = 0;

    loop {
        let mut len_bytes = [0u8; 4];
        read_frame_bytes(reader, &mut len_bytes).await?;
        let ciphertext_len = u32::from_le_bytes(len_bytes) as usize;
        if ciphertext_len < TAG_LEN || ciphertext_len > MAX_FRAME_CIPHERTEXT {
            return Err(EncxError::decryption(format!(
                "malformed frame: declared ciphertext length {}",
                ciphertext_len
            )));
        }

        let mut flags = [0u8; 1];
        read_frame_bytes(reader, &mut flags).await?;
        let flags = flags[0];
        if flags & !FLAG_FINAL != 0 {
            return Err(EncxError::decryption(format!(
                "malformed frame: unknown flags {:#04x}",
                flags
            )));
        }

        let mut sealed = vec![0u8; NONCE_LEN + ciphertext_len];
        read_frame_bytes(reader, &mut sealed).await?;

        let plaintext = engine.decrypt_with_aad(&sealed, dek, &frame_aad(index, flags))?;
        writer
            .write_all(&plaintext)
            .await
            .map_err(|e| EncxError::IoError(format!("stream write failed: {}", e)))?;

        total += plaintext.len() as u64;
        index += 1;

        if flags & FLAG_FINAL != 0 {
            let mut probe = [0u8; 1];
            let n = reader
                .read(&mut probe)
                .await
                .map_err(|e| EncxError::IoError(format!("stream read failed: {}", e)))?;
            if n != 0 {
                return Err(EncxError::decryption("trailing data after the final frame"));
            }
            break;
        }
    }

    writer
        .flush()
        .await
        .map_err(|e| EncxError::IoError(format!("stream flush failed: {}", e)))?;
    Ok(total)
}
