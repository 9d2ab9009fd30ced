//! Serde adapter for opaque content payloads.
//!
//! Snapshots are JSON documents; raw bytes go through base64 so a
//! payload is a single string field instead of an integer array.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize [`Bytes`] as a base64 string.
pub fn serialize<S: Serializer>(content: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(content))
}

/// Deserialize [`Bytes`] from a base64 string.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(encoded.as_bytes())
        .map(Bytes::from)
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Payload {
        #[serde(with = "crate::content")]
        content: Bytes,
    }

    #[test]
    fn test_roundtrip() {
        let payload = Payload {
            content: Bytes::from_static(b"hello drive"),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("aGVsbG8gZHJpdmU="));
        let back: Payload = serde_json::from_str(&json).unwrap();
        assert_eq!(back.content, payload.content);
    }
}
