//! Board command parser.
//!
//! Parses incoming text commands into structured `Command` variants that the
//! session loop can dispatch on.

use std::num::NonZeroU32;
use std::str::FromStr;

use crate::board::{DistrictId, ParseUnitTypeError, UnitId, UnitType};

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command: '{0}'")]
    UnknownCommand(String),

    #[error("malformed {command}: expected '{usage}'")]
    Malformed {
        command: &'static str,
        usage: &'static str,
    },

    #[error("invalid number: '{0}'")]
    InvalidNumber(String),

    #[error(transparent)]
    UnitType(#[from] ParseUnitTypeError),
}

/// A parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Synchronization ping; the session replies `readyok`.
    IsReady,

    /// Reset to the stock board.
    NewGame,

    /// Set a session option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Print round, phase and selection.
    Status,

    /// List districts with their unit totals.
    Districts,

    /// List gangs with their unit totals.
    Gangs,

    /// Select by point: `select <x> <y> [<width> <height>]`.
    Select {
        x: f64,
        y: f64,
        surface: Option<(f64, f64)>,
    },

    /// Clear the selection.
    Deselect,

    /// Describe a district, or the selected one.
    Info { district: Option<DistrictId> },

    /// Describe a gang's holdings.
    Gang { id: String },

    /// Set the round counter.
    Round { round: NonZeroU32 },

    /// Set the phase label (the rest of the line, verbatim).
    Phase { label: String },

    /// Create a unit: `spawn <district> <gang> <type>`.
    Spawn {
        district: DistrictId,
        gang: String,
        unit_type: UnitType,
    },

    /// Take a unit off the board.
    Remove { unit: UnitId },

    /// Dump the board as one JSON line.
    Snapshot,

    /// Terminate the session.
    Quit,
}

/// Parses a single line of input.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return Ok(None);
    };

    let cmd = match head {
        "isready" => Command::IsReady,
        "newgame" => Command::NewGame,
        "status" => Command::Status,
        "districts" => Command::Districts,
        "gangs" => Command::Gangs,
        "deselect" => Command::Deselect,
        "snapshot" => Command::Snapshot,
        "quit" => Command::Quit,

        "setoption" => parse_setoption(&tokens)?,
        "select" => parse_select(&tokens)?,
        "info" => parse_info(&tokens)?,
        "gang" => parse_gang(&tokens)?,
        "round" => parse_round(&tokens)?,
        "phase" => parse_phase(trimmed)?,
        "spawn" => parse_spawn(&tokens)?,
        "remove" => parse_remove(&tokens)?,

        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(cmd))
}

fn number<T: FromStr>(token: &str) -> Result<T, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::InvalidNumber(token.to_string()))
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Result<Command, ParseError> {
    const MALFORMED: ParseError = ParseError::Malformed {
        command: "setoption",
        usage: "setoption name <id> [value <x>]",
    };
    if tokens.len() < 3 || tokens[1] != "name" {
        return Err(MALFORMED);
    }

    let (name_parts, value_parts) = match tokens.iter().position(|&t| t == "value") {
        Some(vi) => (&tokens[2..vi], &tokens[vi + 1..]),
        None => (&tokens[2..], &[][..]),
    };
    if name_parts.is_empty() {
        return Err(MALFORMED);
    }

    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };
    Ok(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `select <x> <y> [<width> <height>]`.
fn parse_select(tokens: &[&str]) -> Result<Command, ParseError> {
    let surface = match tokens.len() {
        3 => None,
        5 => Some((number(tokens[3])?, number(tokens[4])?)),
        _ => {
            return Err(ParseError::Malformed {
                command: "select",
                usage: "select <x> <y> [<width> <height>]",
            })
        }
    };
    Ok(Command::Select {
        x: number(tokens[1])?,
        y: number(tokens[2])?,
        surface,
    })
}

/// Parses `info [<district>]`.
fn parse_info(tokens: &[&str]) -> Result<Command, ParseError> {
    let district = match tokens {
        [_] => None,
        [_, id] => Some(DistrictId(number(id)?)),
        _ => {
            return Err(ParseError::Malformed {
                command: "info",
                usage: "info [<district>]",
            })
        }
    };
    Ok(Command::Info { district })
}

/// Parses `gang <id>`.
fn parse_gang(tokens: &[&str]) -> Result<Command, ParseError> {
    match tokens {
        [_, id] => Ok(Command::Gang { id: id.to_string() }),
        _ => Err(ParseError::Malformed {
            command: "gang",
            usage: "gang <id>",
        }),
    }
}

/// Parses `round <n>` with n >= 1.
fn parse_round(tokens: &[&str]) -> Result<Command, ParseError> {
    match tokens {
        [_, n] => Ok(Command::Round { round: number(n)? }),
        _ => Err(ParseError::Malformed {
            command: "round",
            usage: "round <n>",
        }),
    }
}

/// Parses `phase <label...>`, keeping inner whitespace of the label.
fn parse_phase(line: &str) -> Result<Command, ParseError> {
    let label = line.strip_prefix("phase").unwrap_or("").trim();
    if label.is_empty() {
        return Err(ParseError::Malformed {
            command: "phase",
            usage: "phase <label>",
        });
    }
    Ok(Command::Phase {
        label: label.to_string(),
    })
}

/// Parses `spawn <district> <gang> <type>`.
fn parse_spawn(tokens: &[&str]) -> Result<Command, ParseError> {
    match tokens {
        [_, district, gang, unit_type] => Ok(Command::Spawn {
            district: DistrictId(number(district)?),
            gang: gang.to_string(),
            unit_type: unit_type.parse()?,
        }),
        _ => Err(ParseError::Malformed {
            command: "spawn",
            usage: "spawn <district> <gang> <type>",
        }),
    }
}

/// Parses `remove <unit>`.
fn parse_remove(tokens: &[&str]) -> Result<Command, ParseError> {
    match tokens {
        [_, unit] => Ok(Command::Remove {
            unit: UnitId(number(unit)?),
        }),
        _ => Err(ParseError::Malformed {
            command: "remove",
            usage: "remove <unit>",
        }),
    }
}
