//! DNS-JSON answer shape returned by DoH upstreams.
//!
//! ```text
//! {"Status":0,"TC":false,"RD":true,"RA":true,"AD":false,"CD":false,
//!  "Question":[{"name":"example.com","type":1}],
//!  "Answer":[{"name":"example.com","type":1,"TTL":60,"data":"93.184.216.34"}],
//!  "Comment":"served by ..."}
//! ```
//!
//! Every field is optional on the wire. `Comment` may be a string, an array of
//! strings or missing; it is normalized into a list here so nothing past the
//! deserializer has to care.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpstreamAnswer {
    #[serde(rename = "Status", default)]
    pub status: u16,

    #[serde(rename = "TC", default)]
    pub truncated: bool,

    #[serde(rename = "RD", default)]
    pub recursion_desired: bool,

    #[serde(rename = "RA", default)]
    pub recursion_available: bool,

    #[serde(rename = "AD", default)]
    pub authentic_data: bool,

    #[serde(rename = "CD", default)]
    pub checking_disabled: bool,

    #[serde(rename = "Question", default)]
    pub question: Vec<QuestionEntry>,

    #[serde(rename = "Answer", default)]
    pub answer: Vec<AnswerEntry>,

    #[serde(rename = "Authority", default)]
    pub authority: Vec<AnswerEntry>,

    #[serde(
        rename = "Comment",
        default,
        deserialize_with = "deserialize_comment",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub comment: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionEntry {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub record_type: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerEntry {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub record_type: u16,

    #[serde(rename = "TTL", default)]
    pub ttl: u32,

    #[serde(default)]
    pub data: String,
}

impl AnswerEntry {
    pub fn new(name: impl Into<String>, record_type: u16, ttl: u32, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl,
            data: data.into(),
        }
    }
}

impl UpstreamAnswer {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// An answer is usable only if it carries answer or authority data.
    pub fn has_records(&self) -> bool {
        !self.answer.is_empty() || !self.authority.is_empty()
    }

    /// TTL used for caching: first Answer entry, else first Authority entry, else 0.
    pub fn effective_ttl(&self) -> u32 {
        self.answer
            .first()
            .or_else(|| self.authority.first())
            .map(|entry| entry.ttl)
            .unwrap_or(0)
    }
}

fn deserialize_comment<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => vec![s],
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
