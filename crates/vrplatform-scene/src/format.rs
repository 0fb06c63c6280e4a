// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The `.vrgame` container format.
//!
//! A file is a fixed-size [`SceneHeader`] followed by a variable-length
//! payload. The header names the serialization strategy that encoded the
//! payload, so the loader can dispatch it to the matching decoder.

use crate::persistence::SceneIoError;

/// Identifies `.vrgame` files ("VRGAMESC").
pub const HEADER_MAGIC_BYTES: [u8; 8] = *b"VRGAMESC";
/// Version of the header layout written by this crate.
pub const FORMAT_VERSION: u8 = 1;
const STRATEGY_ID_LEN: usize = 32;

/// The fixed-size header at the beginning of every `.vrgame` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneHeader {
    /// Must be [`HEADER_MAGIC_BYTES`].
    pub magic_bytes: [u8; 8],
    /// The version of the header layout.
    pub format_version: u8,
    /// A null-padded UTF-8 string identifying the serialization strategy used.
    pub strategy_id: [u8; STRATEGY_ID_LEN],
    /// The length of the payload that follows this header, in bytes.
    pub payload_length: u64,
}

/// A full `.vrgame` file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneFile {
    /// The parsed header.
    pub header: SceneHeader,
    /// The raw payload.
    pub payload: Vec<u8>,
}

// The header is a fixed byte layout and is read and written by hand, not through serde.
impl SceneHeader {
    /// The total size of the header in bytes.
    pub const SIZE: usize = 8 + 1 + STRATEGY_ID_LEN + 8;

    /// Builds a header for a payload encoded by `strategy_id`.
    ///
    /// Ids longer than 32 bytes are rejected.
    pub fn new(strategy_id: &str, payload_length: u64) -> Result<Self, SceneIoError> {
        let bytes = strategy_id.as_bytes();
        if bytes.len() > STRATEGY_ID_LEN {
            return Err(SceneIoError::UnknownStrategy(strategy_id.to_string()));
        }
        let mut padded = [0u8; STRATEGY_ID_LEN];
        padded[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            magic_bytes: HEADER_MAGIC_BYTES,
            format_version: FORMAT_VERSION,
            strategy_id: padded,
            payload_length,
        })
    }

    /// The strategy id with its null padding removed.
    pub fn strategy_name(&self) -> Result<&str, SceneIoError> {
        std::str::from_utf8(&self.strategy_id)
            .map(|s| s.trim_end_matches('\0'))
            .map_err(|_| SceneIoError::Malformed("strategy id is not valid UTF-8".to_string()))
    }

    /// Parses a header from the beginning of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SceneIoError> {
        if bytes.len() < Self::SIZE {
            return Err(SceneIoError::Truncated {
                expected: Self::SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        let mut magic_bytes = [0u8; 8];
        magic_bytes.copy_from_slice(&bytes[0..8]);
        if magic_bytes != HEADER_MAGIC_BYTES {
            return Err(SceneIoError::BadMagic);
        }

        let format_version = bytes[8];
        if format_version != FORMAT_VERSION {
            return Err(SceneIoError::UnsupportedVersion(format_version));
        }

        let mut strategy_id = [0u8; STRATEGY_ID_LEN];
        strategy_id.copy_from_slice(&bytes[9..9 + STRATEGY_ID_LEN]);

        let mut length_bytes = [0u8; 8];
        length_bytes.copy_from_slice(&bytes[9 + STRATEGY_ID_LEN..Self::SIZE]);
        let payload_length = u64::from_le_bytes(length_bytes);

        Ok(Self {
            magic_bytes,
            format_version,
            strategy_id,
            payload_length,
        })
    }

    /// Writes the header in its on-disk layout.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..8].copy_from_slice(&self.magic_bytes);
        out[8] = self.format_version;
        out[9..9 + STRATEGY_ID_LEN].copy_from_slice(&self.strategy_id);
        out[9 + STRATEGY_ID_LEN..].copy_from_slice(&self.payload_length.to_le_bytes());
        out
    }
}

impl SceneFile {
    /// Wraps an encoded payload with a header for `strategy_id`.
    pub fn new(strategy_id: &str, payload: Vec<u8>) -> Result<Self, SceneIoError> {
        let header = SceneHeader::new(strategy_id, payload.len() as u64)?;
        Ok(Self { header, payload })
    }

    /// Parses a complete file. Bytes past the declared payload length are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SceneIoError> {
        let header = SceneHeader::from_bytes(bytes)?;
        let available = (bytes.len() - SceneHeader::SIZE) as u64;
        if available < header.payload_length {
            return Err(SceneIoError::Truncated {
                expected: header.payload_length,
                actual: available,
            });
        }
        // `payload_length <= available`, which fits in usize.
        let end = SceneHeader::SIZE + header.payload_length as usize;
        let payload = bytes[SceneHeader::SIZE..end].to_vec();
        Ok(Self { header, payload })
    }

    /// Serializes header and payload into one buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SceneHeader::SIZE + self.payload.len());
        out.extend_from_slice(&self.header.to_bytes());
        out.extend_from_slice(&self.payload);
        out
    }
}
