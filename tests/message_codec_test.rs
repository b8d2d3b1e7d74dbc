//! Envelope codec tests: symmetry, property configuration, and close.

use portunus::codec::{BincodeMessageCodec, CodecError, Message, MessageCodec};
use std::collections::HashMap;

fn message() -> Message {
    Message::new(
        "trellis:data/container/resource",
        "<trellis:data/container/resource> <http://purl.org/dc/terms/modified> \"2024-01-01T00:00:00Z\" .",
    )
}

#[test]
fn test_decode_inverts_encode() {
    let codec = BincodeMessageCodec::new();
    let original = message();
    let decoded = codec.decode(&codec.encode(&original).unwrap()).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_decode_rejects_garbage() {
    let codec = BincodeMessageCodec::new();
    assert!(matches!(codec.decode(&[0xff; 3]), Err(CodecError::Decode(_))));
}

#[test]
fn test_configured_size_limit_is_enforced() {
    let mut codec = BincodeMessageCodec::new();
    let mut props = HashMap::new();
    props.insert("message.max.bytes".to_string(), "8".to_string());
    props.insert("some.other.option".to_string(), "ignored".to_string());
    codec.configure(&props);

    match codec.encode(&message()) {
        Err(CodecError::TooLarge { size, limit }) => {
            assert_eq!(limit, 8);
            assert!(size > 8);
        }
        other => panic!("expected TooLarge, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn test_unparsable_limit_is_ignored() {
    let mut codec = BincodeMessageCodec::new();
    let mut props = HashMap::new();
    props.insert("message.max.bytes".to_string(), "plenty".to_string());
    codec.configure(&props);
    assert!(codec.encode(&message()).is_ok());
}

#[test]
fn test_close_releases_configuration() {
    let mut codec = BincodeMessageCodec::new();
    let mut props = HashMap::new();
    props.insert("message.max.bytes".to_string(), "8".to_string());
    codec.configure(&props);
    assert!(codec.encode(&message()).is_err());

    codec.close();
    assert!(codec.encode(&message()).is_ok());
}
