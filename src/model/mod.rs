pub mod discord;
pub mod global_error;
pub mod incident;

pub use discord::{DiscordMessage, Embed};
pub use incident::{Incident, IncidentState, IncomingNotification};
