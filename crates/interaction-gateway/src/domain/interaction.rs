//! Interaction payloads and responses.
//!
//! Only the fields this endpoint acts on are modeled. Discord sends far more
//! (`id`, `token`, `member`, ...) and all of it is ignored.

use crate::domain::error::{status, InteractionError};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Discord rejects channel messages longer than this many characters.
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Interaction response type codes
pub mod callback {
    /// ACK a Ping
    pub const PONG: u8 = 1;
    /// Respond with a message, showing the user's input
    pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;
}

/// Inbound interaction type.
///
/// Anything other than 1 or 2, including a missing or null `type`, lands in
/// `Unknown` so the match in the dispatcher stays exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<i64>")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    Unknown(i64),
}

impl Default for InteractionType {
    fn default() -> Self {
        Self::Unknown(0)
    }
}

impl From<i64> for InteractionType {
    fn from(code: i64) -> Self {
        match code {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            other => Self::Unknown(other),
        }
    }
}

impl From<Option<i64>> for InteractionType {
    fn from(code: Option<i64>) -> Self {
        code.map(Self::from).unwrap_or_default()
    }
}

/// Verified interaction envelope.
///
/// `data` is kept raw: only an ApplicationCommand looks inside it, so a Ping
/// carrying odd `data` still gets its Pong.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type", default)]
    pub kind: InteractionType,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Interaction {
    /// Parse a verified body. Anything but a JSON object is rejected.
    pub fn from_slice(body: &[u8]) -> Result<Self, InteractionError> {
        match serde_json::from_slice::<Value>(body)? {
            value @ Value::Object(_) => Ok(Self::deserialize(value)?),
            _ => Err(InteractionError::unparsable("expected a JSON object")),
        }
    }

    /// Interpret `data` as application command data. Absent or null `data`
    /// is an empty command.
    pub fn command_data(&self) -> Result<CommandData, InteractionError> {
        match &self.data {
            None | Some(Value::Null) => Ok(CommandData::default()),
            Some(value @ Value::Object(_)) => Ok(CommandData::deserialize(value)?),
            Some(_) => Err(InteractionError::unparsable("data is not an object")),
        }
    }
}

/// `data` of an ApplicationCommand interaction
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandData {
    #[serde(default)]
    options: Option<Vec<CommandOption>>,
}

impl CommandData {
    /// Options in the order Discord sent them
    pub fn options(&self) -> &[CommandOption] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Text of the first option called `name`.
    ///
    /// Fails with [`InteractionError::MissingOption`] when no option has that
    /// name or its value is not a scalar.
    pub fn option_text(&self, name: &str) -> Result<String, InteractionError> {
        self.options()
            .iter()
            .find(|option| option.name == name)
            .and_then(CommandOption::text)
            .ok_or_else(|| InteractionError::MissingOption(name.to_string()))
    }
}

/// One `{name, value}` pair from `data.options`
#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

impl CommandOption {
    /// Strings verbatim, numbers and booleans by their JSON text.
    pub fn text(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Outcome of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionResponse {
    /// `{type: 1}`
    Pong,
    /// `{type: 4, data: {content}}`
    ChannelMessage { content: String },
    /// `{error: message}` with a non-200 status
    Error { status: u16, message: String },
}

impl InteractionResponse {
    /// Channel message with `content` cut to [`MAX_CONTENT_CHARS`].
    pub fn channel_message(content: impl Into<String>) -> Self {
        let mut content = content.into();
        if let Some((cut, _)) = content.char_indices().nth(MAX_CONTENT_CHARS) {
            content.truncate(cut);
        }
        Self::ChannelMessage { content }
    }

    /// HTTP status for this response
    pub fn status(&self) -> u16 {
        match self {
            Self::Pong | Self::ChannelMessage { .. } => status::OK,
            Self::Error { status, .. } => *status,
        }
    }
}

impl From<InteractionError> for InteractionResponse {
    fn from(e: InteractionError) -> Self {
        Self::Error {
            status: e.status(),
            message: e.message(),
        }
    }
}

impl Serialize for InteractionResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Pong => {
                let mut state = serializer.serialize_struct("InteractionResponse", 1)?;
                state.serialize_field("type", &callback::PONG)?;
                state.end()
            }
            Self::ChannelMessage { content } => {
                #[derive(Serialize)]
                struct MessageData<'a> {
                    content: &'a str,
                }

                let mut state = serializer.serialize_struct("InteractionResponse", 2)?;
                state.serialize_field("type", &callback::CHANNEL_MESSAGE_WITH_SOURCE)?;
                state.serialize_field("data", &MessageData { content })?;
                state.end()
            }
            Self::Error { message, .. } => {
                let mut state = serializer.serialize_struct("ErrorResponse", 1)?;
                state.serialize_field("error", message)?;
                state.end()
            }
        }
    }
}
