use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::constants::{ASSISTANT_LABEL, USER_LABEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }

    /// Display label used in the transcript and in exported files.
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => USER_LABEL,
            Sender::Assistant => ASSISTANT_LABEL,
        }
    }

    pub fn is_user(self) -> bool {
        self == Sender::User
    }
}

impl AsRef<str> for Sender {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for Sender {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Sender::User),
            "assistant" => Ok(Sender::Assistant),
            _ => Err(format!("invalid sender: {value}")),
        }
    }
}

impl TryFrom<String> for Sender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Sender> for String {
    fn from(value: Sender) -> Self {
        value.as_str().to_string()
    }
}

/// One transcript entry. The serialized field names match the history
/// format the original web client wrote, so old history files load as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            content: content.into(),
            sender: Sender::Assistant,
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    pub fn assistant_error(content: impl Into<String>) -> Self {
        Message {
            content: content.into(),
            sender: Sender::Assistant,
            timestamp: Utc::now(),
            is_error: true,
        }
    }
}
