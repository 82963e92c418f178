//! Styled log messages.
//!
//! A [`Message`] is a sequence of segments, each optionally tagged with a
//! [`Category`]. The console renderer turns categories into ANSI colors; the
//! file renderer drops them, so styling never reaches a log file.

use nu_ansi_term::{Color, Style};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Info,
    Debug,
    Success,
    Error,
}

impl Category {
    pub fn style(self) -> Style {
        match self {
            Category::Info => Style::new().fg(Color::Cyan),
            Category::Debug => Style::new().fg(Color::DarkGray),
            Category::Success => Style::new().fg(Color::LightGreen).bold(),
            Category::Error => Style::new().fg(Color::LightRed).bold(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Info => "INFO",
            Category::Debug => "DEBUG",
            Category::Success => "SUCCESS",
            Category::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    text: String,
    category: Option<Category>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    segments: Vec<Segment>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: impl fmt::Display) -> Self {
        Self::new().text(text)
    }

    pub fn styled(category: Category, text: impl fmt::Display) -> Self {
        Self::new().push(Some(category), text)
    }

    pub fn text(self, text: impl fmt::Display) -> Self {
        self.push(None, text)
    }

    pub fn info(self, text: impl fmt::Display) -> Self {
        self.push(Some(Category::Info), text)
    }

    pub fn debug(self, text: impl fmt::Display) -> Self {
        self.push(Some(Category::Debug), text)
    }

    pub fn success(self, text: impl fmt::Display) -> Self {
        self.push(Some(Category::Success), text)
    }

    pub fn error(self, text: impl fmt::Display) -> Self {
        self.push(Some(Category::Error), text)
    }

    fn push(mut self, category: Option<Category>, text: impl fmt::Display) -> Self {
        self.segments.push(Segment {
            text: text.to_string(),
            category,
        });
        self
    }

    /// Render with ANSI escapes for styled segments.
    pub fn render_ansi(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment.category {
                Some(category) => category.style().paint(segment.text.as_str()).to_string(),
                None => segment.text.clone(),
            })
            .collect()
    }

    /// Render as plain text, no escapes.
    pub fn render_plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn render(&self, ansi: bool) -> String {
        if ansi {
            self.render_ansi()
        } else {
            self.render_plain()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.text.is_empty())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_plain())
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::plain(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::plain(text)
    }
}

// Free-standing helpers for one-segment messages.

pub fn info(text: impl fmt::Display) -> Message {
    Message::styled(Category::Info, text)
}

pub fn debug(text: impl fmt::Display) -> Message {
    Message::styled(Category::Debug, text)
}

pub fn success(text: impl fmt::Display) -> Message {
    Message::styled(Category::Success, text)
}

pub fn error(text: impl fmt::Display) -> Message {
    Message::styled(Category::Error, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_render_strips_styles() {
        let msg = Message::plain("Expected: ")
            .info(4)
            .error(", but got: ")
            .info(5);

        assert_eq!(msg.render_plain(), "Expected: 4, but got: 5");
        assert_eq!(msg.to_string(), "Expected: 4, but got: 5");
    }

    #[test]
    fn test_ansi_render_wraps_styled_segments() {
        let msg = Message::plain("  ").info(0).debug(" : ").info("x");
        let rendered = msg.render_ansi();

        assert!(rendered.starts_with("  "));
        assert!(rendered.contains(&Category::Info.style().paint("0").to_string()));
        assert!(rendered.contains(&Category::Debug.style().paint(" : ").to_string()));
        assert!(rendered.contains('\u{1b}'));
    }

    #[test]
    fn test_unstyled_message_has_no_escapes() {
        let msg: Message = "Test Cases:".into();

        assert_eq!(msg.render(true), "Test Cases:");
        assert_eq!(msg.render(false), "Test Cases:");
    }

    #[test]
    fn test_helpers_tag_category() {
        assert_eq!(success("ok"), Message::styled(Category::Success, "ok"));
        assert_eq!(error("bad").render_plain(), "bad");
        assert!(Message::new().is_empty());
        assert!(!info("x").is_empty());
    }
}
