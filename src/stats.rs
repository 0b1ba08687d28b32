//! Decoding of the `list-tubes` and `stats-tube` payloads.
//!
//! beanstalkd answers both commands with a small YAML document.

use serde::{Deserialize, Deserializer};

use crate::error::ProtocolError;

/// Entries shorter than this are leftovers of the list encoding (`---`, empty lines).
const MIN_TUBE_NAME_LEN: usize = 4;

/// Statistics of a single tube as reported by `stats-tube`.
///
/// Only `name` and `current_jobs_ready` decide the state of a tube. Unknown keys are
/// ignored and missing ones stay zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct QueueStats {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
    pub current_jobs_urgent: u64,
    pub current_jobs_ready: u64,
    pub current_jobs_reserved: u64,
    pub current_jobs_delayed: u64,
    pub current_jobs_buried: u64,
    pub total_jobs: u64,
    pub current_using: u64,
    pub current_waiting: u64,
    pub current_watching: u64,
    pub pause: u64,
    pub cmd_delete: u64,
    pub cmd_pause_tube: u64,
    pub pause_time_left: u64,
}

/// A tube named `1234` is a number to YAML, it's still a tube name to us.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Str(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Uint(u) => u.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

/// Decodes a `stats-tube` payload.
pub fn decode_stats(payload: &[u8]) -> Result<QueueStats, ProtocolError> {
    serde_yaml::from_slice(payload)
        .map_err(|e| ProtocolError::decode("tube stats", e.to_string(), payload))
}

/// Splits a `list-tubes` payload into tube names, in server order.
pub fn parse_tube_list(payload: &[u8]) -> Result<Vec<String>, ProtocolError> {
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    // a bare `---` document decodes to null rather than an empty sequence
    let tubes: Option<Vec<Scalar>> = serde_yaml::from_slice(payload)
        .map_err(|e| ProtocolError::decode("tube list", e.to_string(), payload))?;

    Ok(tubes
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .map(|name| match name.strip_prefix("- ") {
            Some(stripped) => stripped.to_owned(),
            None => name,
        })
        .filter(|name| name.len() >= MIN_TUBE_NAME_LEN)
        .collect())
}
