//! Constructed error values and their wire forms.

use super::catalog::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// Localized text carried by placeholder values.
pub const UNKNOWN_ERROR_MSG: &str = "未知错误";

/// English text carried by placeholder values.
pub const UNKNOWN_ERROR_MSG_EN: &str = "unknown error";

/// An immutable, fully resolved error.
///
/// Values are snapshots: they hold copies of the registry text, so nothing
/// that happens to a registry later can change an already built value.
///
/// The JSON shape is a compatibility contract for API consumers:
/// `{"err_code":<int>,"err_msg":<string>,"err_msg_en":<string>}`, in that
/// key order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ErrorValue {
    /// The requested error code.
    #[serde(rename = "err_code")]
    code: ErrorCode,
    /// Localized message.
    #[serde(rename = "err_msg")]
    message: String,
    /// English message.
    #[serde(rename = "err_msg_en")]
    message_en: String,
}

impl ErrorValue {
    /// Builds a value from already resolved parts.
    #[must_use]
    pub fn new(
        code: impl Into<ErrorCode>,
        message: impl Into<String>,
        message_en: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            message_en: message_en.into(),
        }
    }

    /// The "unknown error" value, keeping the requested code.
    #[must_use]
    pub fn placeholder(code: impl Into<ErrorCode>) -> Self {
        Self::new(code, UNKNOWN_ERROR_MSG, UNKNOWN_ERROR_MSG_EN)
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn message_en(&self) -> &str {
        &self.message_en
    }

    /// Returns true if this value carries the placeholder pair.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.message == UNKNOWN_ERROR_MSG && self.message_en == UNKNOWN_ERROR_MSG_EN
    }

    /// Serializes to the JSON wire shape.
    ///
    /// Strings are escaped the way Go's `encoding/json` does it: `<`, `>`,
    /// `&`, U+2028 and U+2029 become `\u` escapes, so the bytes match what
    /// existing API consumers receive. Serialization failure yields empty
    /// output rather than a panic.
    #[must_use]
    pub fn to_json_bytes(&self) -> Vec<u8> {
        let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), HtmlSafeFormatter);
        match self.serialize(&mut serializer) {
            Ok(()) => serializer.into_inner(),
            Err(_) => Vec::new(),
        }
    }

    /// Same as [`ErrorValue::to_json_bytes`], as a `String`.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        String::from_utf8(self.to_json_bytes()).unwrap_or_default()
    }

    /// Parses the JSON wire shape.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if `json` is not a valid
    /// error object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ErrCode [{}]\nErrMsg: {}\nErrMsgEn: {}",
            self.code, self.message, self.message_en
        )
    }
}

impl std::error::Error for ErrorValue {}

/// Compact JSON formatter that additionally escapes HTML-significant
/// characters and the JavaScript line separators.
struct HtmlSafeFormatter;

impl serde_json::ser::Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, c) in fragment.char_indices() {
            let escaped = match c {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..index].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = index + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
