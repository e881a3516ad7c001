//! .geo interpreter
//!
//! Every well-formed line becomes one shape appended to the ground, in file
//! order. Bad lines are reported and skipped.
//!
//! ```text
//! c  id x y r border fill
//! r  id x y w h border fill
//! l  id x1 y1 x2 y2 color
//! t  id x y border fill anchor text...
//! ts family weight size
//! ```

use std::str::FromStr;

use glam::DVec2;

use crate::error::CommandError;
use crate::shape::{Circle, FontWeight, Line, Rectangle, Shape, Text, TextAnchor, TextStyle};
use crate::sim::{Diagnostic, Ground};

/// Build the initial ground from .geo lines
pub fn populate<'a, I>(lines: I) -> (Ground, Vec<Diagnostic>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ground = Ground::new();
    let mut diagnostics = Vec::new();

    for (idx, line) in lines.into_iter().enumerate() {
        match parse_shape(line) {
            Ok(Some(shape)) => ground.push_back(shape),
            Ok(None) => {}
            Err(error) => {
                log::warn!("geo line {}: {} (skipped)", idx + 1, error);
                diagnostics.push(Diagnostic {
                    line: idx + 1,
                    error,
                });
            }
        }
    }

    log::info!("geo: {} shapes on the ground, {} lines skipped", ground.len(), diagnostics.len());
    (ground, diagnostics)
}

/// Parse one .geo line. Blank lines yield `Ok(None)`.
pub fn parse_shape(line: &str) -> Result<Option<Shape>, CommandError> {
    let mut cursor = Cursor::new(line);
    let Some(name) = cursor.token() else {
        return Ok(None);
    };

    let shape = match name {
        "c" => {
            cursor.command = "c";
            Shape::Circle(Circle {
                id: cursor.number("id")?,
                center: cursor.point("x", "y")?,
                radius: cursor.finite("r")?,
                border_color: cursor.word("border")?.to_string(),
                fill_color: cursor.word("fill")?.to_string(),
            })
        }
        "r" => {
            cursor.command = "r";
            Shape::Rectangle(Rectangle {
                id: cursor.number("id")?,
                origin: cursor.point("x", "y")?,
                width: cursor.finite("w")?,
                height: cursor.finite("h")?,
                border_color: cursor.word("border")?.to_string(),
                fill_color: cursor.word("fill")?.to_string(),
            })
        }
        "l" => {
            cursor.command = "l";
            Shape::Line(Line {
                id: cursor.number("id")?,
                start: cursor.point("x1", "y1")?,
                end: cursor.point("x2", "y2")?,
                color: cursor.word("color")?.to_string(),
            })
        }
        "t" => {
            cursor.command = "t";
            Shape::Text(Text {
                id: cursor.number("id")?,
                pos: cursor.point("x", "y")?,
                border_color: cursor.word("border")?.to_string(),
                fill_color: cursor.word("fill")?.to_string(),
                anchor: TextAnchor::from_token(cursor.word("anchor")?),
                content: cursor.rest().to_string(),
            })
        }
        "ts" => {
            cursor.command = "ts";
            Shape::TextStyle(TextStyle {
                family: cursor.word("family")?.to_string(),
                weight: FontWeight::from_token(cursor.word("weight")?),
                size: cursor.finite("size")?,
            })
        }
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(Some(shape))
}

/// Whitespace tokenizer that can hand back the untouched remainder of the line
struct Cursor<'a> {
    command: &'static str,
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            command: "?",
            rest: line,
        }
    }

    fn token(&mut self) -> Option<&'a str> {
        let trimmed = self.rest.trim_start();
        if trimmed.is_empty() {
            self.rest = trimmed;
            return None;
        }
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let (token, rest) = trimmed.split_at(end);
        self.rest = rest;
        Some(token)
    }

    fn word(&mut self, name: &'static str) -> Result<&'a str, CommandError> {
        self.token().ok_or(CommandError::MissingArgument {
            command: self.command,
            name,
        })
    }

    fn number<T: FromStr>(&mut self, name: &'static str) -> Result<T, CommandError> {
        let raw = self.word(name)?;
        raw.parse().map_err(|_| CommandError::InvalidNumber {
            command: self.command,
            name,
            value: raw.to_string(),
        })
    }

    /// Like `number`, but NaN and infinities are rejected
    fn finite(&mut self, name: &'static str) -> Result<f64, CommandError> {
        let value: f64 = self.number(name)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CommandError::InvalidNumber {
                command: self.command,
                name,
                value: value.to_string(),
            })
        }
    }

    fn point(&mut self, x: &'static str, y: &'static str) -> Result<DVec2, CommandError> {
        Ok(DVec2::new(self.finite(x)?, self.finite(y)?))
    }

    /// Everything after the last token, minus surrounding whitespace
    fn rest(&self) -> &'a str {
        self.rest.trim()
    }
}
