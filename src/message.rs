//! Optional user message attached to an assertion.
//!
//! A message carries the free text shown in the `Message:` row and the
//! [`Format`] flag that controls how compared values are printed. The flag
//! never shows up in the text.

use crate::format::Format;
use std::fmt;

/// User message and formatting flag of an assertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    text: Option<String>,
    format: Format,
}

impl Message {
    /// A message with the given text and the default format.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            format: Format::default(),
        }
    }

    /// No text, default format.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// The message text, if it is non-empty.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

impl From<()> for Message {
    fn from(_: ()) -> Self {
        Self::none()
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&String> for Message {
    fn from(text: &String) -> Self {
        Self::new(text.as_str())
    }
}

impl From<fmt::Arguments<'_>> for Message {
    fn from(args: fmt::Arguments<'_>) -> Self {
        Self::new(args.to_string())
    }
}

impl From<Format> for Message {
    fn from(format: Format) -> Self {
        Self::none().with_format(format)
    }
}

/// Builds a [`Message`] from an optional format flag and either `format!`
/// arguments or a single value convertible into a [`Message`].
///
/// ```
/// use tabassert::{message, Format};
///
/// assert_eq!(message!().text(), None);
/// assert_eq!(message!("id {}", 7).text(), Some("id 7"));
/// assert_eq!(message!(format = Pretty).format(), Format::Pretty);
/// let msg = message!(format = Diff, "rows of {}", "users");
/// assert_eq!((msg.text(), msg.format()), (Some("rows of users"), Format::Diff));
///
/// let context = String::from("while loading");
/// assert_eq!(message!(context).text(), Some("while loading"));
/// ```
#[macro_export]
macro_rules! message {
    () => {
        $crate::Message::none()
    };
    (format = $format:ident $(,)?) => {
        $crate::Message::from($crate::Format::$format)
    };
    (format = $format:ident, $fmt:literal $(,)?) => {
        $crate::Message::new(format!($fmt)).with_format($crate::Format::$format)
    };
    (format = $format:ident, $msg:expr $(,)?) => {
        $crate::Message::from($msg).with_format($crate::Format::$format)
    };
    (format = $format:ident, $($arg:tt)+) => {
        $crate::Message::new(format!($($arg)+)).with_format($crate::Format::$format)
    };
    ($fmt:literal $(,)?) => {
        $crate::Message::new(format!($fmt))
    };
    ($msg:expr $(,)?) => {
        $crate::Message::from($msg)
    };
    ($($arg:tt)+) => {
        $crate::Message::new(format!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_no_text() {
        assert_eq!(Message::new("").text(), None);
        assert_eq!(Message::from(()).text(), None);
    }

    #[test]
    fn format_flag_is_not_text() {
        let msg = Message::from(Format::Debug);
        assert_eq!(msg.text(), None);
        assert_eq!(msg.format(), Format::Debug);
    }

    #[test]
    fn single_values_are_messages() {
        let owned = String::from("owned text");
        assert_eq!(message!(&owned).text(), Some("owned text"));
        assert_eq!(message!(owned.clone()).text(), Some("owned text"));

        let msg = message!(format = Pretty, owned);
        assert_eq!((msg.text(), msg.format()), (Some("owned text"), Format::Pretty));
    }

    #[test]
    fn literals_still_capture_arguments() {
        let id = 7;
        assert_eq!(message!("id {id}").text(), Some("id 7"));
        assert_eq!(message!(format = Debug, "id {id}").format(), Format::Debug);
    }

    #[test]
    fn from_arguments() {
        let msg = Message::from(format_args!("{}-{}", 1, 2));
        assert_eq!(msg.text(), Some("1-2"));
        assert_eq!(msg.format(), Format::Typed);
    }
}
