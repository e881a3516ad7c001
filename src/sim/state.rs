//! Simulation state: ground, arena and the shooter/loader tables
//!
//! Shooters refer to their loaders by id, never by position in the table.
//! Every lookup goes through `Tables::resolve_affiliation` right before use.

use std::collections::VecDeque;
use std::fmt;

use glam::DVec2;

use crate::shape::Shape;

/// Caller-chosen shooter identifier
pub type ShooterId = i32;
/// Caller-chosen loader identifier
pub type LoaderId = i32;

/// Which of a shooter's two loaders a command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// "e" (esquerdo)
    Left,
    /// "d" (direito)
    Right,
}

impl Side {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "e" => Some(Side::Left),
            "d" => Some(Side::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Shapes available for loading, consumed from the front and refilled at the back
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ground {
    shapes: VecDeque<Shape>,
}

impl Ground {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, shape: Shape) {
        self.shapes.push_back(shape);
    }

    pub fn pop_front(&mut self) -> Option<Shape> {
        self.shapes.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Shapes front to back
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }
}

impl FromIterator<Shape> for Ground {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        Self {
            shapes: iter.into_iter().collect(),
        }
    }
}

/// A LIFO magazine of shapes
#[derive(Debug, Clone, PartialEq)]
pub struct Loader {
    pub id: LoaderId,
    shapes: Vec<Shape>,
}

impl Loader {
    pub fn new(id: LoaderId) -> Self {
        Self {
            id,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn pop(&mut self) -> Option<Shape> {
        self.shapes.pop()
    }

    /// Shape that the next `pop` returns
    pub fn top(&self) -> Option<&Shape> {
        self.shapes.last()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// A shooter with a fixed position, a chamber and two loader affiliations
#[derive(Debug, Clone, PartialEq)]
pub struct Shooter {
    pub id: ShooterId,
    pub pos: DVec2,
    /// Shape in shooting position (at most one)
    pub chamber: Option<Shape>,
    /// Left loader id, set by `atch`
    pub left: Option<LoaderId>,
    /// Right loader id, set by `atch`
    pub right: Option<LoaderId>,
}

impl Shooter {
    pub fn new(id: ShooterId, pos: DVec2) -> Self {
        Self {
            id,
            pos,
            chamber: None,
            left: None,
            right: None,
        }
    }

    /// Loader id affiliated on `side`
    pub fn affiliation(&self, side: Side) -> Option<LoaderId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// One shot: what was fired, where it landed and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaEntry {
    pub shape: Shape,
    pub landing: DVec2,
    /// Shooter position at the moment of firing
    pub origin: DVec2,
    /// Draw the trajectory and dimension guides for this shot
    pub annotated: bool,
}

impl ArenaEntry {
    pub fn trajectory(&self) -> Option<Trajectory> {
        self.annotated.then_some(Trajectory {
            origin: self.origin,
            landing: self.landing,
        })
    }
}

/// Annotation kept for the scene writer: a shot from `origin` to `landing`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    pub origin: DVec2,
    pub landing: DVec2,
}

impl Trajectory {
    /// Fire offset (landing - origin)
    pub fn offset(&self) -> DVec2 {
        self.landing - self.origin
    }
}

/// Firing history, most recent shot on top
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arena {
    entries: Vec<ArenaEntry>,
}

impl Arena {
    pub fn push(&mut self, entry: ArenaEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<ArenaEntry> {
        self.entries.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries from oldest to newest, without draining
    pub fn iter(&self) -> impl Iterator<Item = &ArenaEntry> {
        self.entries.iter()
    }
}

/// Shooter and loader tables. Both only grow during a run.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    shooters: Vec<Shooter>,
    loaders: Vec<Loader>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shooters(&self) -> &[Shooter] {
        &self.shooters
    }

    pub fn loaders(&self) -> &[Loader] {
        &self.loaders
    }

    /// Append a shooter; ids must be unique
    pub fn insert_shooter(&mut self, shooter: Shooter) -> bool {
        if self.shooter_index(shooter.id).is_some() {
            return false;
        }
        self.shooters.push(shooter);
        true
    }

    pub fn shooter_index(&self, id: ShooterId) -> Option<usize> {
        self.shooters.iter().position(|s| s.id == id)
    }

    pub fn shooter(&self, id: ShooterId) -> Option<&Shooter> {
        self.shooters.iter().find(|s| s.id == id)
    }

    pub fn shooter_mut(&mut self, id: ShooterId) -> Option<&mut Shooter> {
        self.shooters.iter_mut().find(|s| s.id == id)
    }

    pub fn shooter_at_mut(&mut self, idx: usize) -> &mut Shooter {
        &mut self.shooters[idx]
    }

    pub fn loader_index(&self, id: LoaderId) -> Option<usize> {
        self.loaders.iter().position(|l| l.id == id)
    }

    pub fn loader(&self, id: LoaderId) -> Option<&Loader> {
        self.loaders.iter().find(|l| l.id == id)
    }

    /// Index of the loader with `id`, appending an empty one if none exists
    pub fn get_or_create_loader(&mut self, id: LoaderId) -> usize {
        match self.loader_index(id) {
            Some(idx) => idx,
            None => {
                self.loaders.push(Loader::new(id));
                self.loaders.len() - 1
            }
        }
    }

    pub fn loader_at_mut(&mut self, idx: usize) -> &mut Loader {
        &mut self.loaders[idx]
    }

    /// Current table index of the loader a shooter is attached to on `side`.
    ///
    /// The index is only valid until the loader table grows again.
    pub fn resolve_affiliation(&self, shooter: ShooterId, side: Side) -> Option<usize> {
        let loader_id = self.shooter(shooter)?.affiliation(side)?;
        self.loader_index(loader_id)
    }

    /// Move one shape from the `side` loader into the chamber.
    ///
    /// A shape already chambered is pushed onto the opposite loader first (if
    /// that side is attached). Returns false when the source loader is missing
    /// or empty, leaving everything untouched.
    pub fn shift_once(&mut self, shooter_idx: usize, side: Side) -> bool {
        let shooter_id = self.shooters[shooter_idx].id;
        let Some(source) = self.resolve_affiliation(shooter_id, side) else {
            return false;
        };
        if self.loaders[source].is_empty() {
            return false;
        }
        let target = self.resolve_affiliation(shooter_id, side.opposite());

        if let Some(previous) = self.shooters[shooter_idx].chamber.take() {
            match target {
                Some(target) => self.loaders[target].push(previous),
                None => log::warn!(
                    "shooter {}: no {} loader to receive chambered shape, dropping it",
                    shooter_id,
                    side.opposite()
                ),
            }
        }
        self.shooters[shooter_idx].chamber = self.loaders[source].pop();
        true
    }
}
