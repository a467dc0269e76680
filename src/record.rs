//! Records exported to the collector agent.

use serde::Serialize;

/// Default payload type: a JSON-like object with string keys.
///
/// `serde_json::Map` is ordered by key, so encoding the same payload twice
/// yields identical bytes.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// A single exported item.
///
/// Field names on the wire are fixed by the agent: `contextId`, `message`,
/// `arcClass` and `exportTimestamp`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportRecord<M = Payload> {
    /// Identifier grouping related records. Never generated by the client.
    #[serde(rename = "contextId")]
    pub context_id: String,
    /// Arbitrary payload describing the context.
    pub message: M,
    /// Schema class the record belongs to.
    #[serde(rename = "arcClass")]
    pub arc_class: String,
    /// Seconds since the Unix epoch.
    #[serde(rename = "exportTimestamp")]
    pub export_timestamp: i64,
}

impl<M> ExportRecord<M> {
    pub fn new(
        context_id: impl Into<String>,
        message: M,
        arc_class: impl Into<String>,
        export_timestamp: i64,
    ) -> Self {
        Self {
            context_id: context_id.into(),
            message,
            arc_class: arc_class.into(),
            export_timestamp,
        }
    }

    /// Build a record stamped with the current wall-clock second.
    pub fn stamped_now(
        context_id: impl Into<String>,
        message: M,
        arc_class: impl Into<String>,
    ) -> Self {
        Self::new(
            context_id,
            message,
            arc_class,
            chrono::Utc::now().timestamp(),
        )
    }
}
