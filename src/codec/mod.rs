//! The message envelope carried on the broker, and its byte-level codec.
//!
//! The codec contract is symmetric: `decode(encode(m)) == m` for every valid
//! message. Codecs are configured from a key/value property set, mirroring
//! how the other broker-client components are configured, and expose a
//! `close` releasing any held resources.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The unit of data carried on the broker: a resource identifier plus the
/// serialized dataset payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The IRI of the resource the change applies to.
    pub identifier: String,
    /// The canonically serialized dataset.
    pub body: String,
}

impl Message {
    pub fn new(identifier: impl Into<String>, body: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), body: body.into() }
    }
}

/// Errors raised by a message codec.
#[derive(Debug)]
pub enum CodecError {
    Encode(String),
    Decode(String),
    TooLarge { size: usize, limit: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Encode(msg) => write!(f, "Encode error: {}", msg),
            CodecError::Decode(msg) => write!(f, "Decode error: {}", msg),
            CodecError::TooLarge { size, limit } => {
                write!(f, "Encoded message of {} bytes exceeds limit of {} bytes", size, limit)
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// A symmetric byte-level codec for [`Message`] values.
pub trait MessageCodec: Send + Sync {
    /// Apply a key/value property set. Unrecognized keys are ignored.
    fn configure(&mut self, props: &HashMap<String, String>);

    fn encode(&self, message: &Message) -> Result<Vec<u8>, CodecError>;

    fn decode(&self, bytes: &[u8]) -> Result<Message, CodecError>;

    /// Release any held resources. The codec must not be used afterwards.
    fn close(&mut self);
}

/// The default codec, encoding messages with bincode.
///
/// Recognizes one property: `message.max.bytes`, an upper bound on the
/// encoded size. Unset means unbounded.
#[derive(Debug, Default)]
pub struct BincodeMessageCodec {
    max_message_bytes: Option<usize>,
}

impl BincodeMessageCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageCodec for BincodeMessageCodec {
    fn configure(&mut self, props: &HashMap<String, String>) {
        self.max_message_bytes =
            props.get("message.max.bytes").and_then(|value| value.parse().ok());
    }

    fn encode(&self, message: &Message) -> Result<Vec<u8>, CodecError> {
        let bytes =
            bincode::serialize(message).map_err(|err| CodecError::Encode(err.to_string()))?;
        if let Some(limit) = self.max_message_bytes {
            if bytes.len() > limit {
                return Err(CodecError::TooLarge { size: bytes.len(), limit });
            }
        }
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Message, CodecError> {
        bincode::deserialize(bytes).map_err(|err| CodecError::Decode(err.to_string()))
    }

    fn close(&mut self) {
        // Nothing held beyond configuration.
        self.max_message_bytes = None;
    }
}
