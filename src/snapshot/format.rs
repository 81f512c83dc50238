//! Snapshot encoding
//!
//! Header framing and payload (de)serialization.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

/// File magic
pub const MAGIC: &[u8; 4] = b"SNAP";

/// Current format version
pub const VERSION: u16 = 1;

/// Header size: magic (4) + version (2) + record count (8) + payload len (8) + crc (4)
pub const HEADER_SIZE: usize = 4 + 2 + 8 + 8 + 4;

/// Parsed snapshot header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub version: u16,
    pub record_count: u64,
    pub payload_len: u64,
    pub checksum: u32,
}

impl SnapshotHeader {
    /// Parse and validate the fixed-size header at the start of `bytes`
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(StoreError::Corrupt(format!(
                "snapshot too short: {} bytes, header needs {}",
                bytes.len(),
                HEADER_SIZE
            )));
        }

        let mut header = &bytes[..HEADER_SIZE];
        if &header[..MAGIC.len()] != MAGIC {
            return Err(StoreError::Corrupt("bad magic".to_string()));
        }
        header.advance(MAGIC.len());

        let version = header.get_u16_le();
        if version != VERSION {
            return Err(StoreError::Corrupt(format!(
                "unsupported snapshot version {}",
                version
            )));
        }

        Ok(Self {
            version,
            record_count: header.get_u64_le(),
            payload_len: header.get_u64_le(),
            checksum: header.get_u32_le(),
        })
    }

    fn write_to(&self, buf: &mut BytesMut) {
        buf.put_slice(MAGIC);
        buf.put_u16_le(self.version);
        buf.put_u64_le(self.record_count);
        buf.put_u64_le(self.payload_len);
        buf.put_u32_le(self.checksum);
    }
}

/// Encode a full record sequence as a snapshot
pub fn encode<R: Serialize>(records: &[R]) -> Result<Bytes> {
    let payload =
        bincode::serialize(records).map_err(|e| StoreError::Serialization(e.to_string()))?;

    let header = SnapshotHeader {
        version: VERSION,
        record_count: records.len() as u64,
        payload_len: payload.len() as u64,
        checksum: crc32fast::hash(&payload),
    };

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    header.write_to(&mut buf);
    buf.put_slice(&payload);

    Ok(buf.freeze())
}

/// Decode a snapshot produced by [`encode`]
///
/// Fails with `StoreError::Corrupt` on any framing, checksum or payload error.
pub fn decode<R: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<R>> {
    let header = SnapshotHeader::parse(bytes)?;
    let payload = &bytes[HEADER_SIZE..];

    if payload.len() as u64 != header.payload_len {
        return Err(StoreError::Corrupt(format!(
            "payload length mismatch: header says {}, found {}",
            header.payload_len,
            payload.len()
        )));
    }

    let actual_crc = crc32fast::hash(payload);
    if actual_crc != header.checksum {
        return Err(StoreError::Corrupt(format!(
            "checksum mismatch: expected {:#010x}, got {:#010x}",
            header.checksum, actual_crc
        )));
    }

    let records: Vec<R> = bincode::deserialize(payload)
        .map_err(|e| StoreError::Corrupt(format!("payload decode failed: {}", e)))?;

    if records.len() as u64 != header.record_count {
        return Err(StoreError::Corrupt(format!(
            "record count mismatch: header says {}, decoded {}",
            header.record_count,
            records.len()
        )));
    }

    Ok(records)
}
