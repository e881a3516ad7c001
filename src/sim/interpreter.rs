//! .qry interpreter
//!
//! A `Session` owns everything a run mutates except the ground, which is
//! borrowed per call. Lines are handled one at a time; a line that fails is
//! logged, recorded as a diagnostic and skipped.

use glam::DVec2;

use super::command::Command;
use super::resolve::{Resolution, resolve};
use super::state::{Arena, ArenaEntry, Ground, LoaderId, Shooter, ShooterId, Side, Tables, Trajectory};
use crate::error::CommandError;

/// A reported, skipped line
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 1-based line number in the .qry source
    pub line: usize,
    pub error: CommandError,
}

/// State of one .qry run
#[derive(Debug, Default)]
pub struct Session {
    pub tables: Tables,
    pub arena: Arena,
    /// Annotations preserved by earlier `calc` runs
    trajectories: Vec<Trajectory>,
    diagnostics: Vec<Diagnostic>,
    /// Lines that executed a command
    executed: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret every line in order against `ground`
    pub fn run<'a, I>(&mut self, lines: I, ground: &mut Ground)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for (idx, line) in lines.into_iter().enumerate() {
            self.run_line(idx + 1, line, ground);
        }
        log::info!(
            "qry: {} commands, {} skipped, {} shots still on the arena",
            self.executed,
            self.diagnostics.len(),
            self.arena.len()
        );
    }

    /// Interpret a single line. `line_no` is only used for reporting.
    pub fn run_line(&mut self, line_no: usize, line: &str, ground: &mut Ground) {
        let result = Command::parse(line).and_then(|command| match command {
            Some(command) => self.execute(command, ground).map(|_| true),
            None => Ok(false),
        });
        match result {
            Ok(true) => self.executed += 1,
            Ok(false) => {}
            Err(error) => {
                log::warn!("qry line {}: {} (skipped)", line_no, error);
                self.diagnostics.push(Diagnostic {
                    line: line_no,
                    error,
                });
            }
        }
    }

    /// Apply one command
    pub fn execute(&mut self, command: Command, ground: &mut Ground) -> Result<(), CommandError> {
        match command {
            Command::Place { shooter, pos } => self.place(shooter, pos),
            Command::Load { loader, count } => {
                self.load(loader, count, ground);
                Ok(())
            }
            Command::Attach {
                shooter,
                left,
                right,
            } => self.attach(shooter, left, right),
            Command::Shift {
                shooter,
                side,
                times,
            } => self.shift(shooter, side, times),
            Command::Fire {
                shooter,
                offset,
                annotated,
            } => self.fire(shooter, offset, annotated, ground),
            Command::Burst {
                shooter,
                side,
                offset,
                step,
            } => self.burst(shooter, side, offset, step, ground),
            Command::Calc => {
                self.calc(ground);
                Ok(())
            }
        }
    }

    /// `pd`: new shooter with an empty chamber and no loaders
    fn place(&mut self, id: ShooterId, pos: DVec2) -> Result<(), CommandError> {
        if !self.tables.insert_shooter(Shooter::new(id, pos)) {
            return Err(CommandError::DuplicateShooter(id));
        }
        log::debug!("pd: shooter {} at ({}, {})", id, pos.x, pos.y);
        Ok(())
    }

    /// `lc`: move up to `count` shapes from the front of the ground onto a loader
    fn load(&mut self, id: LoaderId, count: usize, ground: &mut Ground) {
        let idx = self.tables.get_or_create_loader(id);
        let loader = self.tables.loader_at_mut(idx);
        let mut loaded = 0;
        while loaded < count {
            let Some(shape) = ground.pop_front() else {
                break;
            };
            loader.push(shape);
            loaded += 1;
        }
        log::debug!("lc: loader {} took {} of {} requested shapes", id, loaded, count);
    }

    /// `atch`: attach left/right loaders, creating empty ones as needed
    fn attach(&mut self, id: ShooterId, left: LoaderId, right: LoaderId) -> Result<(), CommandError> {
        if self.tables.shooter_index(id).is_none() {
            return Err(CommandError::UnknownShooter(id));
        }
        self.tables.get_or_create_loader(left);
        self.tables.get_or_create_loader(right);

        let Some(shooter) = self.tables.shooter_mut(id) else {
            return Err(CommandError::UnknownShooter(id));
        };
        shooter.left = Some(left);
        shooter.right = Some(right);
        log::debug!("atch: shooter {} <- left {}, right {}", id, left, right);
        Ok(())
    }

    /// `shft`: press a side button `times` times
    fn shift(&mut self, id: ShooterId, side: Side, times: usize) -> Result<(), CommandError> {
        let idx = self.tables.shooter_index(id).ok_or(CommandError::UnknownShooter(id))?;
        // A failed shift leaves the loader empty or missing, so later presses fail too
        let mut moved = 0;
        for _ in 0..times {
            if !self.tables.shift_once(idx, side) {
                break;
            }
            moved += 1;
        }
        log::debug!("shft: shooter {} {} x{} ({} moved)", id, side, times, moved);
        Ok(())
    }

    /// `dsp`: fire the chambered shape at shooter position + offset
    fn fire(
        &mut self,
        id: ShooterId,
        offset: DVec2,
        annotated: bool,
        ground: &mut Ground,
    ) -> Result<(), CommandError> {
        let idx = self.tables.shooter_index(id).ok_or(CommandError::UnknownShooter(id))?;
        self.fire_at(idx, offset, annotated, ground);
        Ok(())
    }

    fn fire_at(&mut self, shooter_idx: usize, offset: DVec2, annotated: bool, ground: &mut Ground) {
        let shooter = self.tables.shooter_at_mut(shooter_idx);
        let Some(shape) = shooter.chamber.take() else {
            return;
        };
        if !shape.is_geometric() {
            // Style directives never land on the arena
            log::debug!("dsp: shooter {} returns a text style to the ground", shooter.id);
            ground.push_back(shape);
            return;
        }
        let landing = shooter.pos + offset;
        log::debug!(
            "dsp: shooter {} fires {:?} to ({}, {})",
            shooter.id,
            shape.id(),
            landing.x,
            landing.y
        );
        self.arena.push(ArenaEntry {
            shape,
            landing,
            origin: shooter.pos,
            annotated,
        });
    }

    /// `rjd`: shift and fire from one side until its loader runs dry.
    ///
    /// The k-th shot (k from 1) uses offset + k * step and is never annotated.
    fn burst(
        &mut self,
        id: ShooterId,
        side: Side,
        offset: DVec2,
        step: DVec2,
        ground: &mut Ground,
    ) -> Result<(), CommandError> {
        let idx = self.tables.shooter_index(id).ok_or(CommandError::UnknownShooter(id))?;
        if self.tables.resolve_affiliation(id, side).is_none() {
            return Err(CommandError::Unattached { shooter: id, side });
        }

        let mut k = 1.0;
        while self.tables.shift_once(idx, side) {
            self.fire_at(idx, offset + step * k, false, ground);
            k += 1.0;
        }
        log::debug!("rjd: shooter {} fired {} shots from {}", id, k as usize - 1, side);
        Ok(())
    }

    /// `calc`: resolve the arena into the ground, keeping its annotations
    pub fn calc(&mut self, ground: &mut Ground) -> Resolution {
        let resolution = resolve(&mut self.arena, ground);
        self.trajectories.extend(resolution.trajectories.iter().copied());
        resolution
    }

    /// Every annotation to draw: resolved ones first, then shots still on the arena
    pub fn trajectories(&self) -> Vec<Trajectory> {
        self.trajectories
            .iter()
            .copied()
            .chain(self.arena.iter().filter_map(ArenaEntry::trajectory))
            .collect()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of lines that executed a command
    pub fn executed(&self) -> usize {
        self.executed
    }
}
