//! MessagePack envelope encoding.
//!
//! The collector agent consumes fluentd-style forward messages: a three
//! element array of `[tag, time, record]`. The client always sends `0` as the
//! time so the agent stamps the batch with its own ingestion clock, and the
//! record holds the user identifier alongside the batch of messages.

use rmp_serde::Serializer;
use serde::Serialize;

use crate::{error::SerializationError, record::ExportRecord};

/// Time value instructing the agent to use its own clock.
pub const AGENT_CLOCK: u8 = 0;

#[derive(Serialize)]
struct Body<'a, M> {
    #[serde(rename = "userId")]
    user_id: Option<&'a str>,
    messages: &'a [ExportRecord<M>],
}

#[derive(Serialize)]
struct Envelope<'a, M>(&'a str, u8, Body<'a, M>);

/// Encode a batch into the wire envelope.
///
/// Either the full buffer is returned or the batch is rejected; nothing is
/// written anywhere on failure.
pub fn encode<M: Serialize>(
    tag: &str,
    user_id: Option<&str>,
    messages: &[ExportRecord<M>],
) -> Result<Vec<u8>, SerializationError> {
    let envelope = Envelope(tag, AGENT_CLOCK, Body { user_id, messages });
    let mut buf = Vec::with_capacity(128);
    envelope.serialize(&mut Serializer::new(&mut buf).with_struct_map())?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::BTreeMap, sync::Mutex};

    use rstest::{fixture, rstest};
    use serde::{Deserialize, de::IgnoredAny};
    use serde_json::{Value, json};

    use super::*;
    use crate::record::Payload;

    #[derive(Debug, Deserialize, PartialEq)]
    struct DecodedRecord {
        #[serde(rename = "contextId")]
        context_id: String,
        message: BTreeMap<String, Value>,
        #[serde(rename = "arcClass")]
        arc_class: String,
        #[serde(rename = "exportTimestamp")]
        export_timestamp: i64,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct DecodedBody {
        #[serde(rename = "userId")]
        user_id: Option<String>,
        messages: Vec<DecodedRecord>,
    }

    type DecodedEnvelope = (String, u64, DecodedBody);

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[fixture]
    fn batch() -> Vec<ExportRecord> {
        vec![
            ExportRecord::new("c1", payload(json!({"x": 1, "nested": {"ok": true}})), "T", 1000),
            ExportRecord::new("c2", payload(json!({"list": [1.5, "two", null]})), "T", 1001),
        ]
    }

    #[rstest]
    fn round_trips_to_forward_message(batch: Vec<ExportRecord>) {
        let bytes = encode("mona.client", Some("user"), &batch).expect("encode batch");
        let (tag, time, body): DecodedEnvelope =
            rmp_serde::from_slice(&bytes).expect("decode envelope");

        assert_eq!(tag, "mona.client");
        assert_eq!(time, 0);
        assert_eq!(body.user_id.as_deref(), Some("user"));
        assert_eq!(body.messages.len(), 2);
        assert_eq!(body.messages[0].context_id, "c1");
        assert_eq!(body.messages[0].message["x"], json!(1));
        assert_eq!(body.messages[0].message["nested"], json!({"ok": true}));
        assert_eq!(body.messages[1].context_id, "c2");
        assert_eq!(body.messages[1].arc_class, "T");
        assert_eq!(body.messages[1].export_timestamp, 1001);
    }

    #[rstest]
    fn encoding_is_deterministic(batch: Vec<ExportRecord>) {
        let first = encode("tag", Some("user"), &batch).expect("encode batch");
        let second = encode("tag", Some("user"), &batch.clone()).expect("encode batch");
        assert_eq!(first, second);
    }

    #[rstest]
    fn body_is_a_string_keyed_map(batch: Vec<ExportRecord>) {
        let bytes = encode("tag", Some("user"), &batch).expect("encode batch");
        let (_, _, body): (String, u8, BTreeMap<String, IgnoredAny>) =
            rmp_serde::from_slice(&bytes).expect("decode envelope");
        assert_eq!(body.keys().collect::<Vec<_>>(), vec!["messages", "userId"]);
    }

    #[rstest]
    fn unset_user_id_is_nil() {
        let bytes = encode::<Payload>("tag", None, &[]).expect("encode empty batch");
        let (_, _, body): DecodedEnvelope = rmp_serde::from_slice(&bytes).expect("decode");
        assert_eq!(body.user_id, None);
        assert!(body.messages.is_empty());
    }

    struct Unserialisable;

    impl Serialize for Unserialisable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("resource handles cannot be encoded"))
        }
    }

    #[rstest]
    fn rejects_values_that_refuse_to_serialise() {
        let records = vec![ExportRecord::new("c1", Unserialisable, "T", 0)];
        let err = encode("tag", None, &records).expect_err("must fail");
        assert!(err.to_string().contains("resource handles cannot be encoded"));
    }

    #[rstest]
    fn rejects_mutably_borrowed_cells() {
        let cell = RefCell::new(json!({"x": 1}));
        let _guard = cell.borrow_mut();
        let records = vec![ExportRecord::new("c1", &cell, "T", 0)];
        assert!(encode("tag", None, &records).is_err());
    }

    #[rstest]
    fn rejects_poisoned_mutexes() {
        let shared = std::sync::Arc::new(Mutex::new(json!({"x": 1})));
        let poisoner = std::sync::Arc::clone(&shared);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().expect("lock");
            panic!("poison the payload");
        })
        .join();
        let records = vec![ExportRecord::new("c1", &*shared, "T", 0)];
        assert!(encode("tag", None, &records).is_err());
    }
}
