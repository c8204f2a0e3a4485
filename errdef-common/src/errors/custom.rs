//! Caller-supplied message overrides.

use serde::{Deserialize, Serialize};

/// Override candidate for one or both message slots.
///
/// A slot that is `None` or holds an empty string counts as empty: it never
/// replaces registry text, and it never satisfies the "localized message
/// required" rule for unregistered codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomMessage {
    #[serde(rename = "err_msg", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "err_msg_en", default, skip_serializing_if = "Option::is_none")]
    pub message_en: Option<String>,
}

impl CustomMessage {
    /// Overrides both slots.
    #[must_use]
    pub fn new(message: impl Into<String>, message_en: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            message_en: Some(message_en.into()),
        }
    }

    /// Overrides only the localized slot.
    #[must_use]
    pub fn localized(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            message_en: None,
        }
    }

    /// Overrides only the English slot.
    #[must_use]
    pub fn english(message_en: impl Into<String>) -> Self {
        Self {
            message: None,
            message_en: Some(message_en.into()),
        }
    }

    /// The localized text, if non-empty.
    #[must_use]
    pub fn localized_text(&self) -> Option<&str> {
        non_empty(self.message.as_deref())
    }

    /// The English text, if non-empty.
    #[must_use]
    pub fn english_text(&self) -> Option<&str> {
        non_empty(self.message_en.as_deref())
    }
}

fn non_empty(slot: Option<&str>) -> Option<&str> {
    slot.filter(|text| !text.is_empty())
}
