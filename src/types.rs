use std::fmt;

use serde::{Deserialize, Deserializer};

/// One snapshot of the remote service's view of a host assessment.
///
/// Every field tolerates being absent or `null`; such fields decode to their
/// zero value. Unknown fields are ignored.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: AssessmentStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub status_message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub endpoints: Vec<EndpointResult>,
}

/// One resolved IP address of the assessed host.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct EndpointResult {
    #[serde(deserialize_with = "null_as_default")]
    pub ip_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status_message: String,
    /// Empty until the remote service has computed a grade.
    #[serde(deserialize_with = "null_as_default")]
    pub grade: String,
    /// Percentage reported by the service; `-1` means not started.
    #[serde(deserialize_with = "null_as_default")]
    pub progress: i32,
}

/// Assessment status as reported by the remote service.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String")]
pub enum AssessmentStatus {
    Dns,
    InProgress,
    Ready,
    Error,
    /// Any value this client does not recognise, kept verbatim.
    Other(String),
}

impl AssessmentStatus {
    /// `READY` and `ERROR` end polling; everything else means still running.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Error)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Dns => "DNS",
            Self::InProgress => "IN_PROGRESS",
            Self::Ready => "READY",
            Self::Error => "ERROR",
            Self::Other(s) => s,
        }
    }
}

impl Default for AssessmentStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for AssessmentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "DNS" => Self::Dns,
            "IN_PROGRESS" => Self::InProgress,
            "READY" => Self::Ready,
            "ERROR" => Self::Error,
            _ => Self::Other(s),
        }
    }
}

impl fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
