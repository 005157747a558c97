use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::Error;

/// A user referenced by an exported message
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogUser {
    pub username: String,
    pub discriminator: String,
    pub avatar_url: String,
    pub bot: bool,
    pub display_name: String,
    pub color: u32,
}

/// A single exported message
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogMessage {
    pub id: u64,
    pub content: String,
    pub author_id: u64,
    pub timestamp: i64,
    pub attachments: Vec<String>,
    pub embeds: Vec<serde_json::Value>,
}

/// Payload sent to the chat log rendering service
#[derive(Clone, Debug, Serialize)]
pub struct ChatLog {
    pub channel_name: String,
    pub category_name: Option<String>,
    pub guild_name: String,
    pub guild_icon_url: Option<String>,
    pub users: BTreeMap<u64, LogUser>,
    pub messages: Vec<LogMessage>,
}

impl ChatLog {
    pub fn new(
        channel_name: String,
        category_name: Option<String>,
        guild_name: String,
        guild_icon_url: Option<String>,
    ) -> Self {
        Self {
            channel_name,
            category_name,
            guild_name,
            guild_icon_url,
            users: BTreeMap::new(),
            messages: Vec::new(),
        }
    }

    /// Record a user, replacing any earlier entry for the same ID
    pub fn add_user(&mut self, id: u64, user: LogUser) {
        self.users.insert(id, user);
    }

    /// Set the messages from a newest-first history listing; the log is stored oldest first
    pub fn set_messages_newest_first(&mut self, mut messages: Vec<LogMessage>) {
        messages.reverse();
        self.messages = messages;
    }
}

/// Replace an embed's serialized timestamp with unix seconds
pub fn with_unix_timestamp(mut embed: serde_json::Value, timestamp: Option<i64>) -> serde_json::Value {
    if let (Some(timestamp), Some(fields)) = (timestamp, embed.as_object_mut()) {
        fields.insert("timestamp".to_string(), timestamp.into());
    }
    embed
}

/// Format a discriminator the way Discord shows it, `0` for migrated usernames
pub fn format_discriminator(discriminator: Option<u16>) -> String {
    match discriminator {
        Some(d) => format!("{:04}", d),
        None => "0".to_string(),
    }
}

/// Pick the colour of the highest positioned coloured role, given `(position, colour)` pairs
pub fn top_role_colour(roles: &[(u16, u32)]) -> u32 {
    roles
        .iter()
        .filter(|(_, colour)| *colour != 0)
        .max_by_key(|(position, _)| *position)
        .map_or(0, |(_, colour)| *colour)
}

/// Split a message count into history request sizes of at most `per_page`
pub fn page_sizes(amount: u16, per_page: u8) -> Vec<u8> {
    let per_page = u16::from(per_page.max(1));
    let mut remaining = amount;
    let mut pages = Vec::new();
    while remaining > 0 {
        let size = remaining.min(per_page);
        pages.push(size as u8);
        remaining -= size;
    }
    pages
}

/// Send the log to the rendering service and return the HTML it produces
pub async fn render_chat_log(
    client: &reqwest::Client,
    url: &str,
    log: &ChatLog,
) -> Result<String, Error> {
    let html = client
        .post(url)
        .json(log)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(html)
}
