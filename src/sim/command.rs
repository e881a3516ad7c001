//! .qry command parsing
//!
//! One line in, one typed command out. Tokens are whitespace separated and
//! extra trailing tokens are ignored.

use std::str::{FromStr, SplitWhitespace};

use glam::DVec2;

use super::state::{LoaderId, ShooterId, Side};
use crate::error::CommandError;

/// A parsed .qry command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `pd id x y`: place a shooter
    Place { shooter: ShooterId, pos: DVec2 },
    /// `lc id n`: load up to `n` ground shapes into a loader
    Load { loader: LoaderId, count: usize },
    /// `atch shooter left right`: attach loaders to a shooter
    Attach {
        shooter: ShooterId,
        left: LoaderId,
        right: LoaderId,
    },
    /// `shft shooter side n`: press a side button `n` times
    Shift {
        shooter: ShooterId,
        side: Side,
        times: usize,
    },
    /// `dsp shooter dx dy v|i`: fire the chambered shape
    Fire {
        shooter: ShooterId,
        offset: DVec2,
        annotated: bool,
    },
    /// `rjd shooter side dx dy ix iy`: fire a whole loader in a burst
    Burst {
        shooter: ShooterId,
        side: Side,
        offset: DVec2,
        step: DVec2,
    },
    /// `calc`: resolve the arena
    Calc,
}

impl Command {
    /// Parse one line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let mut args = Args {
            command: command_name(name),
            tokens,
        };

        let command = match name {
            "pd" => Command::Place {
                shooter: args.number("id")?,
                pos: args.point("x", "y")?,
            },
            "lc" => Command::Load {
                loader: args.number("id")?,
                count: args.number("n")?,
            },
            "atch" => Command::Attach {
                shooter: args.number("shooter")?,
                left: args.number("left")?,
                right: args.number("right")?,
            },
            "shft" => Command::Shift {
                shooter: args.number("shooter")?,
                side: args.side()?,
                times: args.number("n")?,
            },
            "dsp" => Command::Fire {
                shooter: args.number("shooter")?,
                offset: args.point("dx", "dy")?,
                annotated: args.annotation()?,
            },
            "rjd" => Command::Burst {
                shooter: args.number("shooter")?,
                side: args.side()?,
                offset: args.point("dx", "dy")?,
                step: args.point("ix", "iy")?,
            },
            "calc" => Command::Calc,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn command_name(token: &str) -> &'static str {
    match token {
        "pd" => "pd",
        "lc" => "lc",
        "atch" => "atch",
        "shft" => "shft",
        "dsp" => "dsp",
        "rjd" => "rjd",
        "calc" => "calc",
        _ => "?",
    }
}

/// Argument cursor that names what it is reading in its errors
struct Args<'a> {
    command: &'static str,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn next(&mut self, name: &'static str) -> Result<&'a str, CommandError> {
        self.tokens.next().ok_or(CommandError::MissingArgument {
            command: self.command,
            name,
        })
    }

    fn number<T: FromStr>(&mut self, name: &'static str) -> Result<T, CommandError> {
        let raw = self.next(name)?;
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

    fn side(&mut self) -> Result<Side, CommandError> {
        let raw = self.next("side")?;
        Side::from_token(raw).ok_or_else(|| CommandError::InvalidSide(raw.to_string()))
    }

    fn annotation(&mut self) -> Result<bool, CommandError> {
        match self.next("annotate")? {
            "v" => Ok(true),
            "i" => Ok(false),
            other => Err(CommandError::InvalidAnnotation(other.to_string())),
        }
    }
}
