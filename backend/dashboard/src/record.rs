use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

pub const NOT_AVAILABLE: &str = "N/A";
pub const DEFAULT_TAG: &str = "other";

/// A row as the gateway relays it, column names matching Supabase exactly.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub video_link: Option<Value>,
    #[serde(default)]
    pub image_link: Option<Value>,
    #[serde(rename = "URL", default)]
    pub url: Option<Value>,
    #[serde(rename = "CTA", default)]
    pub cta: Option<Value>,
    #[serde(rename = "Start_Date", default)]
    pub start_date: Option<Value>,
    #[serde(default)]
    pub tag: Option<Value>,
    #[serde(default)]
    pub created_at: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub description: String,
    pub video_link: String,
    pub image_link: String,
    pub url: String,
    pub cta: String,
    pub start_date: String,
    pub tag: String,
    pub created_at: String,
}

impl Record {
    pub fn created_at_time(&self) -> Option<DateTime<Utc>> {
        parse_created_at(&self.created_at)
    }
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Self {
            id: raw.id.map(into_text).unwrap_or_default(),
            description: truthy_text(raw.description).unwrap_or_default(),
            video_link: or_not_available(raw.video_link),
            image_link: or_not_available(raw.image_link),
            url: or_not_available(raw.url),
            cta: or_not_available(raw.cta),
            start_date: or_not_available(raw.start_date),
            tag: truthy_text(raw.tag).unwrap_or_else(|| DEFAULT_TAG.to_string()),
            created_at: or_not_available(raw.created_at),
        }
    }
}

/// Normalizes every row, then orders newest first.
pub fn normalize(rows: Vec<RawRecord>) -> Vec<Record> {
    let mut records: Vec<Record> = rows.into_iter().map(Record::from).collect();
    sort_newest_first(&mut records);

    records
}

// Stable: rows sharing a timestamp, or lacking one, keep their gateway order.
// Unparseable timestamps go last.
pub fn sort_newest_first(records: &mut [Record]) {
    records.sort_by_key(|record| Reverse(record.created_at_time()));
}

pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(time) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(time.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|time| time.and_utc())
}

fn or_not_available(value: Option<Value>) -> String {
    truthy_text(value).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

// null, false, 0 and "" all count as missing.
fn truthy_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(into_text(other)),
    }
}

fn into_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
