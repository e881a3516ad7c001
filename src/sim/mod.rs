//! Deterministic .qry simulation
//!
//! Everything a .qry file does lives here:
//! - Single-threaded, one line fully applied before the next
//! - Shooters and loaders addressed by caller-chosen ids only
//! - No rendering or file-system dependencies

pub mod collision;
pub mod command;
pub mod interpreter;
pub mod resolve;
pub mod state;

pub use collision::{Aabb, shape_aabb, shape_area, shapes_overlap};
pub use command::Command;
pub use interpreter::{Diagnostic, Session};
pub use resolve::{Resolution, resolve};
pub use state::{
    Arena, ArenaEntry, Ground, Loader, LoaderId, Shooter, ShooterId, Side, Tables, Trajectory,
};
