//! Encrypted framing
//!
//! Devices speaking protocol major 2 or later only accept encrypted
//! payloads. The frame header stays in the clear; the payload is replaced by
//! a fresh sender IV followed by the AES-128-CBC ciphertext of the payload
//! and its SHA1 digest.
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬────────────┬───────────────┬──────────────────────────────┐
//! │ 0x17 (1) │ Major(1) │ Minor(1) │ Len (2 LE) │ Sender IV(16) │ AES-CBC(payload ‖ SHA1) PKCS7│
//! └──────────┴──────────┴──────────┴────────────┴───────────────┴──────────────────────────────┘
//! ```
//!
//! The session key is the first 16 bytes of `SHA1(device_key ‖ greeting_iv)`,
//! so it changes with every connection.

use aes::Aes128;
use bytes::{BufMut, Bytes, BytesMut};
use cbc::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use sha1::{Digest, Sha1};

use crate::error::{NetlightError, Result};
use super::codec::{encode_frame, HEADER_SIZE};
use super::handshake::IV_LENGTH;
use super::{AesKey, ProtocolVersion, KEY_LENGTH};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;

/// Length of the random IV the client prepends to the ciphertext
pub const SENDER_IV_LENGTH: usize = 16;

/// Length of the SHA1 digest appended to the plaintext
pub const DIGEST_LENGTH: usize = 20;

/// First protocol major that requires encrypted payloads
pub const ENCRYPTED_SINCE_MAJOR: u8 = 2;

/// Whether frames for this protocol version must be encrypted
pub fn requires_encryption(version: ProtocolVersion) -> bool {
    version.major >= ENCRYPTED_SINCE_MAJOR
}

/// Encrypts frames for one session
pub struct FrameCipher {
    session_key: [u8; KEY_LENGTH],
}

impl FrameCipher {
    /// Derive the session key from the device key and the greeting IV
    pub fn new(device_key: &AesKey, greeting_iv: &[u8; IV_LENGTH]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(device_key.as_bytes());
        hasher.update(greeting_iv);
        let digest = hasher.finalize();

        let mut session_key = [0u8; KEY_LENGTH];
        session_key.copy_from_slice(&digest[..KEY_LENGTH]);
        Self { session_key }
    }

    /// Encrypt the payload of an encoded frame under a random sender IV
    pub fn seal(&self, frame: &[u8]) -> Result<Bytes> {
        let mut sender_iv = [0u8; SENDER_IV_LENGTH];
        rand::thread_rng().fill_bytes(&mut sender_iv);
        self.seal_with_iv(frame, &sender_iv)
    }

    /// Encrypt the payload of an encoded frame under the given sender IV
    ///
    /// The returned frame keeps the input frame's version bytes; its length field
    /// covers the sender IV and the ciphertext.
    pub fn seal_with_iv(&self, frame: &[u8], sender_iv: &[u8; SENDER_IV_LENGTH]) -> Result<Bytes> {
        if frame.len() < HEADER_SIZE {
            return Err(NetlightError::ProtocolEncoding(format!(
                "Frame is {} bytes, shorter than its {} byte header",
                frame.len(),
                HEADER_SIZE
            )));
        }
        let version = ProtocolVersion::new(frame[1], frame[2]);
        let payload = &frame[HEADER_SIZE..];

        let mut plaintext = BytesMut::with_capacity(payload.len() + DIGEST_LENGTH);
        plaintext.put_slice(payload);
        plaintext.put_slice(Sha1::digest(payload).as_slice());

        let ciphertext = Aes128CbcEnc::new_from_slices(&self.session_key, sender_iv)
            .map_err(|e| NetlightError::Encryption(e.to_string()))?
            .encrypt_padded_vec_mut::<Pkcs7>(&plaintext);

        let mut sealed = BytesMut::with_capacity(SENDER_IV_LENGTH + ciphertext.len());
        sealed.put_slice(sender_iv);
        sealed.put_slice(&ciphertext);

        encode_frame(version, &sealed)
    }
}

// Keep key material out of logs.
impl std::fmt::Debug for FrameCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FrameCipher(..)")
    }
}
