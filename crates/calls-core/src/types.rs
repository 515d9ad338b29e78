//! Core data types for the calls history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque call identifier as handed out by the API
pub type CallId = String;

/// Which side placed the call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Someone called us
    Inbound,
    /// We called someone
    Outbound,
}

/// Call category
///
/// Unrecognised wire values decode to [`CallType::Unknown`] instead of
/// failing the whole page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    /// Nobody picked up
    Missed,
    /// The call was answered
    Answered,
    /// The caller left a voicemail
    Voicemail,
    /// Category not known to this client
    #[serde(other)]
    Unknown,
}

impl CallType {
    /// Categories offered by the filter control, in display order
    pub const FILTERABLE: [Self; 3] = [Self::Missed, Self::Answered, Self::Voicemail];

    /// Wire name of the category
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missed => "missed",
            Self::Answered => "answered",
            Self::Voicemail => "voicemail",
            Self::Unknown => "unknown",
        }
    }

    /// Label shown in the filter control
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Missed => "Missed",
            Self::Answered => "Answered",
            Self::Voicemail => "Voicemail",
            Self::Unknown => "Other",
        }
    }

    /// Parse a filter selection
    ///
    /// An empty selection, or anything that is not a filterable category,
    /// means "no filter".
    #[must_use]
    pub fn from_selection(value: &str) -> Option<Self> {
        Self::FILTERABLE
            .into_iter()
            .find(|category| category.as_str() == value.trim())
    }
}

impl std::fmt::Display for CallType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A note attached to a call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    /// Note identifier
    pub id: String,
    /// Free text
    pub content: String,
}

/// A single phone call as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallRecord {
    /// Unique identifier
    pub id: CallId,

    /// Inbound or outbound
    pub direction: Direction,

    /// Category of the call
    pub call_type: CallType,

    /// Calling endpoint
    pub from: String,

    /// Called endpoint
    pub to: String,

    /// Duration in milliseconds
    pub duration: u64,

    /// When the call was created
    pub created_at: DateTime<Utc>,

    /// Notes attached to the call
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: Vec<Note>,

    /// Whether the call has been archived
    #[serde(default)]
    pub is_archived: bool,

    /// Line the call went through
    #[serde(default)]
    pub via: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Note>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Note>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One fetched page of calls
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// Number of records available across all pages
    pub total_count: u64,

    /// Records of this page, in source order
    pub nodes: Vec<CallRecord>,

    /// Whether the source has records past this page
    #[serde(default)]
    pub has_next_page: bool,
}

impl PageResult {
    /// Whether the page carries no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_call_record_from_api_json() {
        let json = r#"{
            "id": "c-1",
            "direction": "inbound",
            "call_type": "missed",
            "from": "+33 6 11 22 33 44",
            "to": "+33 1 00 00 00 00",
            "duration": 65000,
            "created_at": "2024-03-15T14:25:30.000Z",
            "is_archived": false,
            "via": "+33 1 00 00 00 00",
            "notes": [{"id": "n-1", "content": "Call back"}]
        }"#;

        let call: CallRecord = serde_json::from_str(json).unwrap();

        assert_eq!(call.direction, Direction::Inbound);
        assert_eq!(call.call_type, CallType::Missed);
        assert_eq!(call.duration, 65_000);
        assert_eq!(call.notes.len(), 1);
        assert_eq!(call.created_at.to_rfc3339(), "2024-03-15T14:25:30+00:00");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{
            "id": "c-2",
            "direction": "outbound",
            "call_type": "answered",
            "from": "a",
            "to": "b",
            "duration": 0,
            "created_at": "2024-03-15T14:25:30Z",
            "notes": null
        }"#;

        let call: CallRecord = serde_json::from_str(json).unwrap();

        assert!(call.notes.is_empty());
        assert!(!call.is_archived);
        assert_eq!(call.via, "");
    }

    #[test]
    fn test_unknown_call_type_fails_closed() {
        let call_type: CallType = serde_json::from_str(r#""transferred""#).unwrap();
        assert_eq!(call_type, CallType::Unknown);
    }

    #[rstest]
    #[case("missed", Some(CallType::Missed))]
    #[case("answered", Some(CallType::Answered))]
    #[case(" voicemail ", Some(CallType::Voicemail))]
    #[case("", None)]
    #[case("unknown", None)]
    #[case("Missed", None)]
    fn test_from_selection(#[case] input: &str, #[case] expected: Option<CallType>) {
        assert_eq!(CallType::from_selection(input), expected);
    }

    #[test]
    fn test_page_result_camel_case() {
        let page: PageResult =
            serde_json::from_str(r#"{"totalCount": 12, "nodes": [], "hasNextPage": true}"#)
                .unwrap();

        assert_eq!(page.total_count, 12);
        assert!(page.has_next_page);
        assert!(page.is_empty());
    }
}
