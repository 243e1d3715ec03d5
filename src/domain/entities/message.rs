//! Incoming chat message model (Telegram Bot API shape).

use serde::Deserialize;

/// Kind of a message entity span.
///
/// Only the kinds the bot acts upon are named; everything else
/// (`bold`, `mention`, `hashtag`, ...) deserializes to [`EntityKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Url,
    TextLink,
    BotCommand,
    #[serde(other)]
    Other,
}

/// A span of interest inside message text.
///
/// `offset` and `length` are measured in UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub offset: usize,
    pub length: usize,
    /// Explicit target of a `text_link` entity.
    #[serde(default)]
    pub url: Option<String>,
}

impl MessageEntity {
    pub fn new(kind: EntityKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
            url: None,
        }
    }

    pub fn text_link(offset: usize, length: usize, url: &str) -> Self {
        Self {
            kind: EntityKind::TextLink,
            offset,
            length,
            url: Some(url.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// A message delivered to the bot.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<Sender>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(default)]
    pub caption_entities: Option<Vec<MessageEntity>>,
}

/// A parsed `/command@bot arguments` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub arguments: String,
}

impl IncomingMessage {
    /// Message text, falling back to the media caption.
    pub fn content_text(&self) -> &str {
        match (&self.text, &self.caption) {
            (Some(text), _) if !text.is_empty() => text,
            (_, Some(caption)) if !caption.is_empty() => caption,
            _ => "",
        }
    }

    /// Message entities, falling back to the caption entities.
    pub fn content_entities(&self) -> &[MessageEntity] {
        self.entities
            .as_deref()
            .or(self.caption_entities.as_deref())
            .unwrap_or(&[])
    }

    /// Returns the command if the message starts with a `bot_command` entity.
    pub fn command(&self) -> Option<Command> {
        let text = self.text.as_deref()?;
        let first = self.entities.as_deref()?.first()?;
        if first.kind != EntityKind::BotCommand || first.offset != 0 {
            return None;
        }

        let units: Vec<u16> = text.encode_utf16().collect();
        let end = first.length.min(units.len());
        let token = String::from_utf16_lossy(&units[..end]);
        let arguments = String::from_utf16_lossy(&units[end..]).trim().to_string();

        let name = token.trim_start_matches('/');
        let name = name.split('@').next().unwrap_or(name).to_string();

        Some(Command { name, arguments })
    }

    pub fn sender_id(&self) -> Option<i64> {
        self.from.as_ref().map(|s| s.id)
    }
}
