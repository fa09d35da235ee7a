//! Raw message input model — the Gmail-API message tree shape.
//!
//! Mirrors the JSON returned by `users.messages.get` with `format=full`:
//! a header list, an epoch-millis `internalDate`, and a payload tree of
//! MIME parts carrying URL-safe-base64 body data. The engine treats the
//! whole structure as untrusted: every field that can be absent is
//! optional, and unknown MIME types or missing children degrade
//! gracefully instead of failing.

use chrono::{DateTime, Local, NaiveDate};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A raw notification message as delivered by the mailbox collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    /// Mailbox-native message id.
    pub id: String,
    /// Conversation thread id.
    #[serde(default)]
    pub thread_id: String,
    /// Receive time as epoch milliseconds. Gmail serializes this as a
    /// JSON string; some fixtures use a bare number. Both are accepted.
    #[serde(
        deserialize_with = "de_epoch_millis",
        serialize_with = "ser_epoch_millis"
    )]
    pub internal_date: i64,
    /// Root of the MIME part tree.
    #[serde(default)]
    pub payload: Option<MessagePart>,
}

/// One node of the MIME part tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    /// MIME type, e.g. "text/plain", "multipart/alternative".
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Message headers. Populated on the root part.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Header>,
    /// Inline body for this part.
    #[serde(default)]
    pub body: Option<PartBody>,
    /// Child parts for multipart nodes, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<MessagePart>,
}

/// Inline body of a part — opaque URL-safe-base64 text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartBody {
    #[serde(default)]
    pub data: Option<String>,
}

/// A single name/value message header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl RawMessage {
    /// Look up a header on the root payload, case-insensitive by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.payload.as_ref().and_then(|p| {
            p.headers
                .iter()
                .find(|h| h.name.eq_ignore_ascii_case(name))
                .map(|h| h.value.as_str())
        })
    }

    /// Subject line, or "" when absent.
    pub fn subject(&self) -> &str {
        self.header("Subject").unwrap_or("")
    }

    /// Sender address ("From" header), or "" when absent.
    pub fn from(&self) -> &str {
        self.header("From").unwrap_or("")
    }

    /// Receive time normalized to the local calendar day.
    ///
    /// Returns `None` when the timestamp is outside the representable
    /// range.
    pub fn local_date(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp_millis(self.internal_date)
            .map(|t| t.with_timezone(&Local).date_naive())
    }
}

fn de_epoch_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct MillisVisitor;

    impl Visitor<'_> for MillisVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("epoch milliseconds as a number or string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::custom("timestamp out of range"))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            v.parse()
                .map_err(|_| E::custom(format!("invalid epoch millis: {v:?}")))
        }
    }

    deserializer.deserialize_any(MillisVisitor)
}

fn ser_epoch_millis<S: Serializer>(millis: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    // Gmail's wire format carries internalDate as a string.
    serializer.serialize_str(&millis.to_string())
}
