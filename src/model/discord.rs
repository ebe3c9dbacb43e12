use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::model::incident::{Incident, IncomingNotification};

pub const ALERT_COLOR: u32 = 16065069;
pub const RESOLVED_COLOR: u32 = 1609983;

const ALERT_EMOJI: &str = "😱";
const RESOLVED_EMOJI: &str = "👍";
const EMPTY_POLICY_NAME: &str = "-";

/// Discord 웹훅 메시지. `content`는 비워두고 embed 하나만 보낸다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiscordMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Embed {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub color: u32, // 0xRRGGBB
}

impl DiscordMessage {
    pub fn from_incident(incident: &Incident) -> Self {
        let policy_name = if incident.policy_name.is_empty() {
            EMPTY_POLICY_NAME
        } else {
            incident.policy_name.as_str()
        };

        let (emoji, color) = if incident.state.is_open() {
            (ALERT_EMOJI, ALERT_COLOR)
        } else {
            (RESOLVED_EMOJI, RESOLVED_COLOR)
        };

        Self {
            content: None,
            embeds: vec![Embed {
                title: format!("{} {}", emoji, policy_name),
                url: incident.url.clone(),
                description: String::new(),
                color,
            }],
        }
    }
}

impl From<&IncomingNotification> for DiscordMessage {
    fn from(notification: &IncomingNotification) -> Self {
        DiscordMessage::from_incident(&notification.incident)
    }
}
