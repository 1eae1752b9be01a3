//! Message list rendering
//!
//! Turns a `MessageList` into view rows. Rows follow list order; nothing is
//! re-sorted by date. Own messages sit on the right without a sender name,
//! everyone else's on the left with one.

use crate::client::store::MessageList;
use chrono::{Local, TimeZone};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// One rendered message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub id: String,
    pub alignment: Alignment,
    /// Sender name, only for other users' messages
    pub sender: Option<String>,
    pub content: String,
    /// `HH:MM` in the viewer's time zone
    pub time: String,
    pub failed: bool,
}

impl RenderedMessage {
    /// Format as one terminal line of `width` columns
    pub fn to_line(&self, width: usize) -> String {
        let mut text = match &self.sender {
            Some(sender) => format!("[{}] {}: {}", self.time, sender, self.content),
            None => format!("{} [{}]", self.content, self.time),
        };
        if self.failed {
            text.push_str(" (failed, /resend to retry)");
        }

        match self.alignment {
            Alignment::Left => text,
            Alignment::Right => {
                let padding = width.saturating_sub(text.chars().count());
                format!("{}{}", " ".repeat(padding), text)
            }
        }
    }
}

/// Render `list` for the user `local_user_id` in local time
pub fn render(list: &MessageList, local_user_id: &str) -> Vec<RenderedMessage> {
    render_in(list, local_user_id, &Local)
}

/// Render `list` with times shown in `tz`
pub fn render_in<Tz>(list: &MessageList, local_user_id: &str, tz: &Tz) -> Vec<RenderedMessage>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    list.iter()
        .map(|entry| {
            let message = &entry.message;
            let own = message.user_id == local_user_id;
            RenderedMessage {
                id: message.id.clone(),
                alignment: if own { Alignment::Right } else { Alignment::Left },
                sender: (!own).then(|| message.username.clone()),
                content: message.content.clone(),
                time: message.date.with_timezone(tz).format("%H:%M").to_string(),
                failed: entry.is_failed(),
            }
        })
        .collect()
}
