use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// 모니터링 시스템이 보내는 알림 웹훅 본문.
/// 누락된 필드와 `null` 값은 모두 기본값으로 읽는다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct IncomingNotification {
    #[serde(deserialize_with = "null_as_default")]
    pub incident: Incident,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Incident {
    #[serde(deserialize_with = "null_as_default")]
    pub incident_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_name: String,
    #[serde(deserialize_with = "null_as_default")]
    #[schema(value_type = String, example = "open")]
    pub state: IncidentState,
    #[serde(deserialize_with = "null_as_default")]
    pub started_at: i64, // epoch seconds
    pub ended_at: Option<i64>, // 진행 중인 인시던트는 없음
    #[serde(deserialize_with = "null_as_default")]
    pub policy_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl IncomingNotification {
    /// 본문 전체가 `null`이어도 빈 알림으로 해석한다.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice::<Option<Self>>(body).map(Option::unwrap_or_default)
    }
}

impl Incident {
    pub fn started_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.started_at, 0)
    }
}

/// `"open"`만 진행 중으로 보고, 그 외 값은 모두 해결된 것으로 취급한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IncidentState {
    Open,
    Closed,
    Other(String),
}

impl IncidentState {
    pub fn is_open(&self) -> bool {
        matches!(self, IncidentState::Open)
    }

    pub fn as_str(&self) -> &str {
        match self {
            IncidentState::Open => "open",
            IncidentState::Closed => "closed",
            IncidentState::Other(raw) => raw,
        }
    }
}

impl Default for IncidentState {
    fn default() -> Self {
        IncidentState::Other(String::new())
    }
}

impl From<String> for IncidentState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "open" => IncidentState::Open,
            "closed" => IncidentState::Closed,
            _ => IncidentState::Other(raw),
        }
    }
}

impl From<IncidentState> for String {
    fn from(state: IncidentState) -> Self {
        match state {
            IncidentState::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl From<&str> for IncidentState {
    fn from(raw: &str) -> Self {
        IncidentState::from(raw.to_string())
    }
}
