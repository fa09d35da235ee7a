//! Body resolver — flattens a nested MIME part tree into one text blob.
//!
//! Bank notifications arrive as anything from a bare text/plain part to a
//! multipart/mixed tree with alternative branches several levels deep.
//! Every qualifying text fragment contributes, in document order, joined
//! with newlines; a node that fails to decode contributes nothing rather
//! than failing the message.

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use tracing::debug;

use crate::message::MessagePart;

/// Part trees deeper than this contribute nothing further. Real messages
/// nest three or four levels; anything past the guard is malformed.
const MAX_PART_DEPTH: usize = 32;

/// Resolve the longest available text representation of a payload tree.
///
/// Returns "" when no text is recoverable — the terminal failure signal
/// for the whole pipeline.
pub fn resolve_body(payload: &MessagePart) -> String {
    if let Some(data) = inline_data(payload) {
        return decode_body_data(data);
    }
    collect_parts(&payload.parts, 0)
}

/// Decode URL-safe base64 body data.
///
/// Gmail substitutes `-`/`_` for `+`/`/`; undo that, drop any padding,
/// and decode with the standard alphabet. A malformed blob decodes to ""
/// so that sibling parts can still contribute.
pub fn decode_body_data(data: &str) -> String {
    let normalized = data.replace('-', "+").replace('_', "/");
    match STANDARD_NO_PAD.decode(normalized.trim_end_matches('=')) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => {
            debug!(%err, "undecodable body data, treating as empty");
            String::new()
        }
    }
}

fn inline_data(part: &MessagePart) -> Option<&str> {
    part.body.as_ref().and_then(|b| b.data.as_deref())
}

/// MIME types other than text/plain and text/html that still carry text.
fn is_textual(mime: &str) -> bool {
    mime.contains("text") || mime.contains("html") || mime.contains("plain")
}

fn collect_parts(parts: &[MessagePart], depth: usize) -> String {
    if depth >= MAX_PART_DEPTH {
        debug!(depth, "part tree exceeds depth guard, stopping traversal");
        return String::new();
    }

    let mut body = String::new();
    for part in parts {
        let mime = part.mime_type.as_deref().unwrap_or("");

        if let Some(data) = inline_data(part).filter(|_| mime == "text/plain" || mime == "text/html")
        {
            append_fragment(&mut body, &decode_body_data(data));
        } else if !part.parts.is_empty() {
            append_fragment(&mut body, &collect_parts(&part.parts, depth + 1));
        } else if let Some(data) = inline_data(part).filter(|_| is_textual(mime)) {
            append_fragment(&mut body, &decode_body_data(data));
        }
    }
    body
}

fn append_fragment(body: &mut String, fragment: &str) {
    if !fragment.trim().is_empty() {
        body.push_str(fragment);
        body.push('\n');
    }
}
