//! Session state management.
//!
//! Holds the current board and the session options, and turns parsed
//! commands into response lines. This is the only layer that logs; the board
//! itself reports failures through `BoardError` and leaves presentation to
//! callers.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::board::{Board, BoardError, District, DistrictId, ALL_UNIT_TYPES};
use crate::geometry::{Point, Size};
use crate::protocol::{parse_command, Command, ParseError};
use crate::setup::night_city;

/// Option naming the default capture-surface width for `select`.
pub const OPT_SURFACE_WIDTH: &str = "SurfaceWidth";

/// Option naming the default capture-surface height for `select`.
pub const OPT_SURFACE_HEIGHT: &str = "SurfaceHeight";

/// Errors surfaced to the client as `error <message>` lines.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("no district selected")]
    NoSelection,

    #[error("invalid value for option {name}: '{value}'")]
    InvalidOption { name: String, value: String },

    #[error("snapshot failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// What the input loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Holds the mutable state of a session between commands.
#[derive(Debug)]
pub struct Session {
    pub board: Board,
    pub options: HashMap<String, String>,
}

impl Session {
    /// Creates a session on the stock Night City board.
    pub fn new() -> Result<Self, BoardError> {
        Ok(Session::with_board(night_city()?))
    }

    pub fn with_board(board: Board) -> Self {
        Session {
            board,
            options: HashMap::new(),
        }
    }

    /// Replaces the board with a fresh stock board. Options are kept.
    pub fn new_game(&mut self) -> Result<(), BoardError> {
        self.board = night_city()?;
        log::info!("new game: {} districts", self.board.districts().len());
        Ok(())
    }

    /// Sets a session option. Surface options must be positive numbers.
    pub fn set_option(&mut self, name: String, value: Option<String>) -> Result<(), SessionError> {
        let value = value.unwrap_or_default();
        if name == OPT_SURFACE_WIDTH || name == OPT_SURFACE_HEIGHT {
            let ok = value.parse::<f64>().map_or(false, |v| v.is_finite() && v > 0.0);
            if !ok {
                return Err(SessionError::InvalidOption { name, value });
            }
        }
        self.options.insert(name, value);
        Ok(())
    }

    fn option_f64(&self, name: &str, default: f64) -> f64 {
        self.options
            .get(name)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(default)
    }

    /// The capture surface assumed when `select` gives no size. Defaults to
    /// the board's canonical space, so bare coordinates are canonical.
    pub fn default_surface(&self) -> Size {
        let canonical = self.board.config().canonical_size;
        Size::new(
            self.option_f64(OPT_SURFACE_WIDTH, canonical.width),
            self.option_f64(OPT_SURFACE_HEIGHT, canonical.height),
        )
    }

    /// Parses and runs one input line, writing its response to `out`.
    ///
    /// Command failures are reported as an `error` line and leave the
    /// session unchanged; only output failures are returned.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Control> {
        let result = parse_command(line)
            .map_err(SessionError::from)
            .and_then(|cmd| match cmd {
                Some(cmd) => {
                    log::debug!("command: {:?}", cmd);
                    self.execute(cmd, out)
                }
                None => Ok(Control::Continue),
            });

        let control = match result {
            Ok(control) => control,
            Err(SessionError::Io(e)) => return Err(e),
            Err(e) => {
                log::warn!("{}: {}", line.trim(), e);
                writeln!(out, "error {}", e)?;
                Control::Continue
            }
        };
        out.flush()?;
        Ok(control)
    }

    /// Runs a parsed command.
    pub fn execute<W: Write>(&mut self, cmd: Command, out: &mut W) -> Result<Control, SessionError> {
        match cmd {
            Command::IsReady => writeln!(out, "readyok")?,
            Command::NewGame => self.new_game()?,
            Command::SetOption { name, value } => self.set_option(name, value)?,
            Command::Status => self.handle_status(out)?,
            Command::Districts => self.handle_districts(out)?,
            Command::Gangs => self.handle_gangs(out)?,
            Command::Select { x, y, surface } => {
                let surface = surface
                    .map(|(w, h)| Size::new(w, h))
                    .unwrap_or_else(|| self.default_surface());
                let hit = self.board.select_at(Point::new(x, y), surface)?;
                write_selection(out, hit)?;
            }
            Command::Deselect => {
                self.board.clear_selection();
                write_selection(out, None)?;
            }
            Command::Info { district } => {
                let id = match district {
                    Some(id) => id,
                    None => self.board.selected().ok_or(SessionError::NoSelection)?.id(),
                };
                self.handle_info(id, out)?;
            }
            Command::Gang { id } => self.handle_gang(&id, out)?,
            Command::Round { round } => {
                self.board.set_round(round);
                writeln!(out, "round {}", round)?;
            }
            Command::Phase { label } => {
                self.board.set_phase(label);
                writeln!(out, "phase {}", self.board.phase())?;
            }
            Command::Spawn {
                district,
                gang,
                unit_type,
            } => {
                let id = self.board.spawn_unit(district, &gang, unit_type)?;
                writeln!(out, "unit {}", id)?;
            }
            Command::Remove { unit } => {
                let unit = self.board.remove_unit(unit)?;
                writeln!(out, "removed {} {} {}", unit.id, unit.gang, unit.unit_type.key())?;
            }
            Command::Snapshot => {
                let json = serde_json::to_string(&self.board)?;
                writeln!(out, "{}", json)?;
            }
            Command::Quit => return Ok(Control::Quit),
        }
        Ok(Control::Continue)
    }

    fn handle_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "round {}", self.board.round())?;
        writeln!(out, "phase {}", self.board.phase())?;
        write_selection(out, self.board.selected())
    }

    fn handle_districts<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for d in self.board.districts() {
            writeln!(out, "district {} {} units {}", d.id(), d.name(), d.total_units())?;
        }
        Ok(())
    }

    fn handle_gangs<W: Write>(&self, out: &mut W) -> Result<(), SessionError> {
        for g in self.board.gangs() {
            writeln!(
                out,
                "gang {} {} {} units {} territories {}",
                g.id,
                g.name,
                g.color,
                self.board.total_units_of(&g.id)?,
                self.board.territories_of(&g.id)?.len()
            )?;
        }
        Ok(())
    }

    /// Writes the district panel: identity, centroid, totals, dominance, and
    /// one `presence` line per gang with its per-type counts.
    fn handle_info<W: Write>(&self, id: DistrictId, out: &mut W) -> Result<(), SessionError> {
        let district = self.board.district(id).ok_or(BoardError::UnknownDistrict(id))?;
        let total = self.board.total_units(id)?;
        let c = district.centroid();

        writeln!(out, "district {} {}", district.id(), district.name())?;
        writeln!(out, "centroid {:.1} {:.1}", c.x, c.y)?;
        writeln!(out, "units {}", total)?;
        match self.board.dominant_gang(id)? {
            Some((gang, count)) => writeln!(out, "dominant {} {}/{}", gang.id, count, total)?,
            None => writeln!(out, "dominant none")?,
        }

        for (gang, count) in self.board.gang_breakdown(id)? {
            let counts = self.board.unit_counts(id, &gang.id)?;
            let mut line = format!("presence {} {}", gang.id, count);
            for unit_type in ALL_UNIT_TYPES {
                if let Some(n) = counts.get(&unit_type) {
                    line.push_str(&format!(" {} {}", unit_type.key(), n));
                }
            }
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn handle_gang<W: Write>(&self, id: &str, out: &mut W) -> Result<(), SessionError> {
        let territories = self.board.territories_of(id)?;
        let total = self.board.total_units_of(id)?;
        let name = self.board.gang(id).map_or(id, |g| g.name.as_str());

        writeln!(out, "gang {} {} units {}", id, name, total)?;
        for d in territories {
            writeln!(out, "territory {} {} {}", d.id(), d.name(), d.units_of(id).len())?;
        }
        Ok(())
    }
}

fn write_selection<W: Write>(out: &mut W, district: Option<&District>) -> io::Result<()> {
    match district {
        Some(d) => writeln!(out, "selected {} {}", d.id(), d.name()),
        None => writeln!(out, "selected none"),
    }
}
