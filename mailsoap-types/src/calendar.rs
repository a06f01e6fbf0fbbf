// mailsoap-types/src/calendar.rs
use crate::record::{display_via_render, FieldSpec, FieldValue, Record};
use crate::token::deserialize_quiet;
use crate::vocab::{AlarmAction, ParticipationStatus};
use serde::{Deserialize, Serialize};

/// One attendee reply recorded on an appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarReply {
    #[serde(rename = "at", default, skip_serializing_if = "Option::is_none")]
    pub attendee: Option<String>,
    /// Replies from newer clients may carry statuses we do not know; those
    /// are dropped rather than rejecting the whole reply list.
    #[serde(
        rename = "ptst",
        default,
        deserialize_with = "deserialize_quiet",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<ParticipationStatus>,
    #[serde(rename = "seq", default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i32>,
    /// Reply time in milliseconds since the epoch.
    #[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
}

impl CalendarReply {
    pub fn new(attendee: impl Into<String>, status: ParticipationStatus) -> Self {
        Self {
            attendee: Some(attendee.into()),
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Record for CalendarReply {
    const RECORD_NAME: &'static str = "CalendarReply";
    const ELEMENT: &'static str = "reply";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("attendee", "at"),
        FieldSpec::optional("status", "ptst"),
        FieldSpec::optional("sequence", "seq"),
        FieldSpec::optional("date", "d"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::text(&self.attendee),
            FieldValue::token(self.status),
            FieldValue::int(self.sequence),
            FieldValue::int(self.date),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<AlarmAction>,
    #[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AlarmInfo {
    pub fn new(action: AlarmAction) -> Self {
        Self {
            action: Some(action),
            ..Self::default()
        }
    }
}

impl Record for AlarmInfo {
    const RECORD_NAME: &'static str = "AlarmInfo";
    const ELEMENT: &'static str = "alarm";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("action", "action"),
        FieldSpec::optional("description", "desc"),
        FieldSpec::optional("summary", "summary"),
    ];

    fn values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::token(self.action),
            FieldValue::text(&self.description),
            FieldValue::text(&self.summary),
        ]
    }
}

display_via_render!(CalendarReply, AlarmInfo);
