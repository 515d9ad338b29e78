//! Display model of a single call row

use crate::{
    types::{CallRecord, CallType, Direction},
    utils::{format_date, format_duration, millis_to_seconds},
};
use chrono::{FixedOffset, Offset, Utc};
use serde::Serialize;

/// Glyph drawn next to a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallIcon {
    /// Arrow pointing in, for inbound calls
    Incoming,
    /// Arrow pointing out, for outbound calls
    Outgoing,
}

impl CallIcon {
    /// Text glyph for the icon
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Incoming => "\u{2199}",
            Self::Outgoing => "\u{2197}",
        }
    }

    /// Accessible name for the icon
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
        }
    }
}

/// Everything a call row renders, derived from a [`CallRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRow {
    /// Call identifier
    pub id: String,
    /// Direction glyph
    pub icon: CallIcon,
    /// Headline, e.g. "Missed call"
    pub title: &'static str,
    /// Counterpart, e.g. "from +33 6 ..."
    pub subtitle: String,
    /// Human readable duration
    pub duration: String,
    /// Absolute date and time
    pub date: String,
    /// Notes annotation, absent when the call has no notes
    pub notes: Option<String>,
    /// Route of the call's detail page
    pub href: String,
}

/// Headline for a call category
#[must_use]
pub const fn call_title(call_type: CallType) -> &'static str {
    match call_type {
        CallType::Missed => "Missed call",
        CallType::Answered => "Call answered",
        CallType::Voicemail => "Voicemail",
        CallType::Unknown => "Call",
    }
}

impl CallRow {
    /// Row for `call` with its date shown at `utc_offset`
    #[must_use]
    pub fn at_offset(call: &CallRecord, utc_offset: FixedOffset) -> Self {
        let (icon, subtitle) = match call.direction {
            Direction::Inbound => (CallIcon::Incoming, format!("from {}", call.from)),
            Direction::Outbound => (CallIcon::Outgoing, format!("to {}", call.to)),
        };

        Self {
            id: call.id.clone(),
            icon,
            title: call_title(call.call_type),
            subtitle,
            duration: format_duration(millis_to_seconds(call.duration)),
            date: format_date(&call.created_at.with_timezone(&utc_offset)),
            notes: (!call.notes.is_empty())
                .then(|| format!("Call has {} notes", call.notes.len())),
            href: crate::routes::call_detail(&call.id),
        }
    }
}

impl From<&CallRecord> for CallRow {
    fn from(call: &CallRecord) -> Self {
        Self::at_offset(call, Utc.fix())
    }
}
