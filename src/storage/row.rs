//! The fixed-size row and its on-disk codec.
//!
//! A row is always 293 bytes on disk: a little-endian `u32` id followed
//! by two null-padded text fields. The codec copies the text buffers
//! verbatim, embedded nulls included; truncation happens at parse time,
//! never here.

use crate::err;
use crate::errors::Error;
use bincode::config::Configuration;
use bincode::{config, Decode, Encode};
use std::fmt;
use std::mem;

/// Longest username accepted by the statement layer, in bytes.
pub const USERNAME_MAX: usize = 32;

/// Longest email accepted by the statement layer, in bytes.
pub const EMAIL_MAX: usize = 255;

pub const ID_SIZE: usize = mem::size_of::<u32>();

/// Stored username field, one byte wider than the maximum to keep a
/// null terminator even for a full-length value.
pub const USERNAME_SIZE: usize = USERNAME_MAX + 1;

/// Stored email field, sized like the username field.
pub const EMAIL_SIZE: usize = EMAIL_MAX + 1;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Serialized size of one row.
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,                      // integer primary key
    pub username: [u8; USERNAME_SIZE], // varchar(32)
    pub email: [u8; EMAIL_SIZE],       // varchar(255)
}

impl Row {
    /// Builds a row from text fields, null-padding each into its fixed
    /// buffer. Input longer than the buffer is cut off.
    pub fn new(id: u32, username: &str, email: &str) -> Self {
        Row {
            id,
            username: str_to_fixed_bytes(username),
            email: str_to_fixed_bytes(email),
        }
    }

    pub fn username(&self) -> String {
        field_to_string(&self.username)
    }

    pub fn email(&self) -> String {
        field_to_string(&self.email)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ID: {}, Username: {}, Email: {}",
            self.id,
            self.username(),
            self.email()
        )
    }
}

pub fn str_to_fixed_bytes<const N: usize>(input: &str) -> [u8; N] {
    let mut buf = [0u8; N];
    let bytes = input.as_bytes();
    let len = bytes.len().min(N);
    buf[..len].copy_from_slice(&bytes[..len]);
    buf
}

fn field_to_string(field: &[u8]) -> String {
    let trimmed = field.split(|&b| b == 0).next().unwrap_or(&[]);
    String::from_utf8_lossy(trimmed).to_string()
}

/// Fixed-int encoding keeps the integer little-endian and four bytes
/// wide, and writes the two arrays as raw bytes, which is exactly the
/// on-disk layout.
fn codec_config() -> Configuration<config::LittleEndian, config::Fixint> {
    config::standard().with_fixed_int_encoding()
}

/// Writes `row` into `dst`, which must be at least [`ROW_SIZE`] bytes.
pub fn serialize_row(row: &Row, dst: &mut [u8]) -> Result<(), Error> {
    bincode::encode_into_slice(row, dst, codec_config())
        .map_err(|e| err!(Encoding, "Failed to encode row. {}", e))?;
    Ok(())
}

/// Reads a row back from `src`, which must hold at least [`ROW_SIZE`]
/// bytes of a previously serialized row.
pub fn deserialize_row(src: &[u8]) -> Result<Row, Error> {
    let (row, _) = bincode::decode_from_slice(src, codec_config())
        .map_err(|e| err!(Encoding, "Failed to decode row. {}", e))?;
    Ok(row)
}
