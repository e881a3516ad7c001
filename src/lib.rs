//! geoqry - shape loaders, shooters and an arena over a .geo ground
//!
//! Core modules:
//! - `shape`: Shape sum type (circle, rectangle, line, text, text style)
//! - `geo`: .geo interpreter that populates the ground
//! - `sim`: Deterministic .qry simulation (entity tables, arena, resolver)
//! - `renderer`: SVG scene writer
//! - `settings`: Render configuration
//! - `input`: Line-oriented file reader

pub mod error;
pub mod geo;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod shape;
pub mod sim;

pub use error::{CommandError, Error, Result};
pub use input::FileData;
pub use settings::Settings;
pub use shape::Shape;

/// Geometry constants shared by the area and bounding-box rules
pub mod consts {
    /// Text boxes are one unit wide per character and this tall
    pub const TEXT_HEIGHT: f64 = 20.0;
    /// Area contributed by each character of a text
    pub const TEXT_AREA_PER_CHAR: f64 = 20.0;
    /// Stroke thickness assumed for lines (box is inflated by half of it)
    pub const LINE_THICKNESS: f64 = 2.0;
    /// Line area is this factor times its length
    pub const LINE_AREA_FACTOR: f64 = 2.0;
}

/// Text before the first '.', used to name output documents
pub fn base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Scene;
    use crate::sim::Session;

    #[test]
    fn test_base_name_stops_at_first_dot() {
        assert_eq!(base_name("t1.geo"), "t1");
        assert_eq!(base_name("a.b.qry"), "a");
        assert_eq!(base_name("plain"), "plain");
    }

    #[test]
    fn test_geo_then_qry_end_to_end() {
        let geo = FileData::from_source(
            "arena.geo",
            "c 1 0 0 1 black red\nc 2 0 0 2 black green\nr 3 0 0 10 10 blue white\nt 4 0 0 k y m label\n",
        );
        let qry = FileData::from_source(
            "duel.qry",
            "pd 1 100 100\nlc 1 2\natch 1 1 2\nrjd 1 e 0 0 0 0\ncalc\nbogus line\n",
        );

        let (mut ground, geo_diagnostics) = geo::populate(geo.lines());
        assert!(geo_diagnostics.is_empty());
        assert_eq!(ground.len(), 4);

        let mut session = Session::new();
        session.run(qry.lines(), &mut ground);
        assert_eq!(session.diagnostics().len(), 1);

        // Circle 2 fired first (top of the loader) and beats circle 1 at the same spot
        let ids: Vec<_> = ground.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![Some(3), Some(4), Some(2), Some(1), Some(2)]);
        let recolored = ground.iter().nth(3).unwrap();
        assert_eq!(recolored.border_color(), Some("green"));
        let clone = ground.iter().nth(4).unwrap();
        assert_eq!(clone.fill_color(), Some("black"));

        let trajectories = session.trajectories();
        assert!(trajectories.is_empty());
        let scene = Scene {
            ground: &ground,
            trajectories: &trajectories,
            view_box: 10000.0,
        };
        let svg = renderer::render(&scene, &Settings::default()).unwrap();
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(format!("{}-{}.svg", geo.base_name(), qry.base_name()), "arena-duel.svg");
    }
}
