//! Semantic style roles and their resolution to terminal styles.
//!
//! The renderer attaches a [`Role`] to each output segment and treats
//! styling as opaque; the [`Theme`] resolves roles to `owo_colors` styles
//! at the printing edge, from the spec strings in the settings file.

use std::collections::BTreeMap;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use crate::settings::StyleConfig;

/// Semantic role of a rendered segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    List,
    Index,
    Priority(u8),
    Completed,
    Notes,
    Tags,
    Due,
}

/// A run of text with an optional style role.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub role: Option<Role>,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: None,
        }
    }

    pub fn styled(text: impl Into<String>, role: Role) -> Self {
        Self {
            text: text.into(),
            role: Some(role),
        }
    }
}

/// One output line: a sequence of segments. An empty line is the blank
/// separator between list sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line(pub Vec<Segment>);

impl Line {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// The line's text with all styling dropped. Used by tests and
    /// anywhere the output is not a terminal.
    pub fn plain(&self) -> String {
        self.0.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Errors from parsing style spec strings.
#[derive(Debug, Error, PartialEq)]
pub enum ThemeError {
    #[error("unknown style word '{word}' in spec '{spec}'")]
    UnknownWord { word: String, spec: String },

    #[error("dangling 'bright' in spec '{spec}' (expected a color after it)")]
    DanglingBright { spec: String },
}

/// Resolved terminal styles per role.
#[derive(Debug, Clone)]
pub struct Theme {
    list: Style,
    index: Style,
    completed: Style,
    notes: Style,
    tags: Style,
    due: Style,
    priority: BTreeMap<u8, Style>,
}

impl Theme {
    /// Build a theme by parsing every spec string in the config.
    pub fn from_config(config: &StyleConfig) -> Result<Self, ThemeError> {
        let mut priority = BTreeMap::new();
        for (level, spec) in &config.priority {
            priority.insert(*level, parse_style(spec)?);
        }

        Ok(Self {
            list: parse_style(&config.list)?,
            index: parse_style(&config.index)?,
            completed: parse_style(&config.completed)?,
            notes: parse_style(&config.notes)?,
            tags: parse_style(&config.tags)?,
            due: parse_style(&config.due)?,
            priority,
        })
    }

    fn resolve(&self, role: Role) -> Style {
        match role {
            Role::List => self.list,
            Role::Index => self.index,
            Role::Completed => self.completed,
            Role::Notes => self.notes,
            Role::Tags => self.tags,
            Role::Due => self.due,
            // Unmapped priority levels (0 in the default config) render
            // unstyled.
            Role::Priority(level) => self.priority.get(&level).copied().unwrap_or_default(),
        }
    }

    /// Render a line to a string with ANSI styling applied.
    pub fn paint(&self, line: &Line) -> String {
        line.0
            .iter()
            .map(|seg| match seg.role {
                Some(role) => seg.text.style(self.resolve(role)).to_string(),
                None => seg.text.clone(),
            })
            .collect()
    }
}

/// Parse a spec string like `"bright cyan bold"` into a terminal style.
///
/// Words are colors (optionally prefixed by `bright`) or the attributes
/// `bold`, `underline`, `dimmed`, `italic`, `strikethrough`. An empty
/// spec is the unstyled style.
pub fn parse_style(spec: &str) -> Result<Style, ThemeError> {
    let mut style = Style::new();
    let mut bright = false;

    for word in spec.split_whitespace() {
        let lower = word.to_lowercase();

        if lower == "bright" {
            bright = true;
            continue;
        }

        style = match lower.as_str() {
            "black" if bright => style.bright_black(),
            "black" => style.black(),
            "red" if bright => style.bright_red(),
            "red" => style.red(),
            "green" if bright => style.bright_green(),
            "green" => style.green(),
            "yellow" if bright => style.bright_yellow(),
            "yellow" => style.yellow(),
            "blue" if bright => style.bright_blue(),
            "blue" => style.blue(),
            "magenta" | "purple" if bright => style.bright_magenta(),
            "magenta" | "purple" => style.magenta(),
            "cyan" if bright => style.bright_cyan(),
            "cyan" => style.cyan(),
            "white" if bright => style.bright_white(),
            "white" => style.white(),
            "bold" => style.bold(),
            "underline" => style.underline(),
            "dimmed" | "dim" => style.dimmed(),
            "italic" => style.italic(),
            "strikethrough" => style.strikethrough(),
            _ => {
                return Err(ThemeError::UnknownWord {
                    word: word.to_string(),
                    spec: spec.to_string(),
                })
            }
        };

        if bright && !matches!(lower.as_str(), "bold" | "underline" | "dimmed" | "dim" | "italic" | "strikethrough") {
            bright = false;
        }
    }

    if bright {
        return Err(ThemeError::DanglingBright {
            spec: spec.to_string(),
        });
    }

    Ok(style)
}
