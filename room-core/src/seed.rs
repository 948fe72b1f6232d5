use std::io::{Read, Write};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use crate::catalog::furniture_by_kind;
use crate::error::EditorError;
use crate::model::RoomState;
use crate::placement::clamp_item;

/// Ceiling on the inflated JSON size so a hostile token cannot balloon
/// memory. Real layouts are a few hundred bytes.
const MAX_SEED_JSON_BYTES: u64 = 64 * 1024;

/// Encodes the room into a shareable seed token: canonical JSON (fixed field
/// order, item order preserved) → raw deflate → URL-safe base64 without
/// padding. The transform is lossless; `decode` reverses it exactly.
pub fn encode(state: &RoomState) -> String {
    let json = serde_json::to_string(state).expect("room serialization is infallible");
    let mut deflater = DeflateEncoder::new(Vec::new(), Compression::best());
    deflater
        .write_all(json.as_bytes())
        .expect("writing to a Vec cannot fail");
    let compressed = deflater.finish().expect("writing to a Vec cannot fail");
    URL_SAFE_NO_PAD.encode(compressed)
}

/// Decodes a seed token back into a room. Strict and all-or-nothing: any
/// alphabet, decompression, schema, unknown-kind, or rotation failure yields
/// `InvalidSeed` and no state is produced. Out-of-grid coordinates are not an
/// error; they are clamped, so every decoded item satisfies the bounds
/// invariant. Callers swap the returned room in wholesale, so live state is
/// never half-updated by a malformed token.
pub fn decode(token: &str) -> Result<RoomState, EditorError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(EditorError::InvalidSeed);
    }
    let compressed = URL_SAFE_NO_PAD
        .decode(trimmed.as_bytes())
        .map_err(|_| EditorError::InvalidSeed)?;
    let mut json = String::new();
    DeflateDecoder::new(compressed.as_slice())
        .take(MAX_SEED_JSON_BYTES)
        .read_to_string(&mut json)
        .map_err(|_| EditorError::InvalidSeed)?;
    let mut state: RoomState = serde_json::from_str(&json).map_err(|_| EditorError::InvalidSeed)?;
    for item in &mut state.items {
        let def = furniture_by_kind(&item.kind).map_err(|_| EditorError::InvalidSeed)?;
        // a hostile token may carry coordinates outside the grid; pull them
        // back in like any other placement. Encoded in-bounds layouts pass
        // through unchanged, so the round trip stays exact.
        clamp_item(item, def);
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_uses_a_url_safe_alphabet() {
        let mut room = RoomState::default();
        room.add_item("bed").unwrap();
        room.add_item("table").unwrap();
        let token = encode(&room);
        assert!(!token.is_empty());
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "unexpected character in token {token:?}"
        );
    }

    #[test]
    fn decode_trims_surrounding_whitespace() {
        let room = RoomState::default();
        let token = format!("  {}\n", encode(&room));
        assert_eq!(decode(&token).unwrap(), room);
    }

    #[test]
    fn empty_token_is_invalid() {
        assert_eq!(decode(""), Err(EditorError::InvalidSeed));
        assert_eq!(decode("   "), Err(EditorError::InvalidSeed));
    }
}
