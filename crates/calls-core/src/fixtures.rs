//! Sample calls for tests

use crate::types::{CallRecord, CallType, Direction, PageResult};
use chrono::{DateTime, Utc};

/// Builders for sample call data
#[derive(Debug)]
pub struct CallFixtures;

impl CallFixtures {
    /// An inbound call of the given category created at an RFC 3339 instant
    ///
    /// # Panics
    ///
    /// Panics if `created_at` is not valid RFC 3339.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn call(id: &str, call_type: CallType, created_at: &str) -> CallRecord {
        let created_at = DateTime::parse_from_rfc3339(created_at)
            .expect("fixture timestamps are RFC 3339")
            .with_timezone(&Utc);

        CallRecord {
            id: id.to_string(),
            direction: Direction::Inbound,
            call_type,
            from: "+33 6 00 00 00 01".to_string(),
            to: "+33 1 00 00 00 02".to_string(),
            duration: 42_000,
            created_at,
            notes: Vec::new(),
            is_archived: false,
            via: "+33 1 00 00 00 02".to_string(),
        }
    }

    /// Five calls over two days: 2 missed, 2 answered, 1 voicemail, newest first
    #[must_use]
    pub fn mixed_page() -> PageResult {
        PageResult {
            total_count: 23,
            nodes: vec![
                Self::call("c-1", CallType::Missed, "2024-03-16T18:00:00Z"),
                Self::call("c-2", CallType::Answered, "2024-03-16T09:30:00Z"),
                Self::call("c-3", CallType::Voicemail, "2024-03-15T17:45:00Z"),
                Self::call("c-4", CallType::Missed, "2024-03-15T11:10:00Z"),
                Self::call("c-5", CallType::Answered, "2024-03-15T08:05:00Z"),
            ],
            has_next_page: true,
        }
    }

    /// A page whose records are tagged with `label` in their ids
    #[must_use]
    pub fn page_tagged(label: &str, count: usize, total_count: u64) -> PageResult {
        PageResult {
            total_count,
            nodes: (0..count)
                .map(|i| {
                    Self::call(
                        &format!("{label}-{i}"),
                        CallType::Answered,
                        "2024-03-15T12:00:00Z",
                    )
                })
                .collect(),
            has_next_page: false,
        }
    }
}
