//! Arena resolution (`calc`)
//!
//! Shots are replayed oldest first and taken two at a time: the older one is
//! I, the newer one J. Overlapping pairs are decided by area; everything that
//! survives goes back to the end of the ground at its landing position.

use super::collision::{shape_area, shapes_overlap};
use super::state::{Arena, ArenaEntry, Ground, Trajectory};
use crate::shape::Shape;

/// What a `calc` run did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Shapes appended to the ground (clones included)
    pub landed: usize,
    /// Shapes not carried forward
    pub destroyed: usize,
    /// Color-swapped clones produced by winning shapes
    pub cloned: usize,
    /// Annotated shots, in firing order
    pub trajectories: Vec<Trajectory>,
}

/// Drain the arena into the ground.
pub fn resolve(arena: &mut Arena, ground: &mut Ground) -> Resolution {
    let mut resolution = Resolution::default();

    // Arena is LIFO; reverse it so popping yields the oldest shot first
    let mut chronological = Vec::with_capacity(arena.len());
    while let Some(entry) = arena.pop() {
        chronological.push(entry);
    }

    while let Some(i) = chronological.pop() {
        resolution.trajectories.extend(i.trajectory());
        let Some(j) = chronological.pop() else {
            log::debug!("calc: unpaired shot lands unchanged");
            land(ground, &mut resolution, &i, i.shape.clone());
            break;
        };
        resolution.trajectories.extend(j.trajectory());
        resolve_pair(ground, &mut resolution, &i, &j);
    }

    log::info!(
        "calc: {} landed, {} destroyed, {} cloned",
        resolution.landed,
        resolution.destroyed,
        resolution.cloned
    );
    resolution
}

fn resolve_pair(ground: &mut Ground, resolution: &mut Resolution, i: &ArenaEntry, j: &ArenaEntry) {
    if !shapes_overlap(&i.shape, i.landing, &j.shape, j.landing) {
        land(ground, resolution, i, i.shape.clone());
        land(ground, resolution, j, j.shape.clone());
        return;
    }

    let area_i = shape_area(&i.shape);
    let area_j = shape_area(&j.shape);

    if area_i < area_j {
        log::debug!("calc: {:?} crushed by {:?}", i.shape.id(), j.shape.id());
        resolution.destroyed += 1;
        land(ground, resolution, j, j.shape.clone());
    } else if area_i > area_j {
        // J takes I's fill as its border; I leaves a color-swapped copy behind
        let j_prime = match i.shape.fill_color() {
            Some(fill) => j.shape.with_border_color(fill),
            None => Some(j.shape.clone()),
        };
        land(ground, resolution, i, i.shape.clone());
        if let Some(j_prime) = j_prime {
            land(ground, resolution, j, j_prime);
        }
        if let Some(swapped) = i.shape.with_swapped_colors() {
            resolution.cloned += 1;
            land(ground, resolution, i, swapped);
        }
    } else {
        land(ground, resolution, i, i.shape.clone());
        land(ground, resolution, j, j.shape.clone());
    }
}

/// Put `shape` on the ground at the entry's landing position
fn land(ground: &mut Ground, resolution: &mut Resolution, entry: &ArenaEntry, shape: Shape) {
    match shape.with_position(entry.landing) {
        Some(placed) => {
            ground.push_back(placed);
            resolution.landed += 1;
        }
        None => resolution.destroyed += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::fixtures::*;
    use glam::DVec2;

    fn shot(shape: Shape, x: f64, y: f64) -> ArenaEntry {
        ArenaEntry {
            shape,
            landing: DVec2::new(x, y),
            origin: DVec2::ZERO,
            annotated: false,
        }
    }

    fn arena_of(entries: Vec<ArenaEntry>) -> Arena {
        let mut arena = Arena::default();
        for e in entries {
            arena.push(e);
        }
        arena
    }

    fn ground_shapes(ground: &Ground) -> Vec<Shape> {
        ground.iter().cloned().collect()
    }

    #[test]
    fn test_empty_arena_leaves_ground_unchanged() {
        let mut ground: Ground = vec![circle(1, 1.0)].into_iter().collect();
        let before = ground.clone();
        let res = resolve(&mut Arena::default(), &mut ground);
        assert_eq!(ground, before);
        assert_eq!(res, Resolution::default());
    }

    #[test]
    fn test_single_shot_lands_unchanged() {
        let mut ground = Ground::new();
        let mut arena = arena_of(vec![shot(rect(1, 2.0, 3.0), 10.0, 10.0)]);
        resolve(&mut arena, &mut ground);

        assert!(arena.is_empty());
        assert_eq!(
            ground_shapes(&ground),
            vec![rect(1, 2.0, 3.0).with_position(DVec2::new(10.0, 10.0)).unwrap()]
        );
    }

    #[test]
    fn test_smaller_overlapping_shape_is_destroyed() {
        let mut ground = Ground::new();
        let mut arena = arena_of(vec![shot(circle(1, 1.0), 5.0, 5.0), shot(circle(2, 2.0), 5.0, 5.0)]);
        let res = resolve(&mut arena, &mut ground);

        assert_eq!(res.destroyed, 1);
        assert_eq!(
            ground_shapes(&ground),
            vec![circle(2, 2.0).with_position(DVec2::new(5.0, 5.0)).unwrap()]
        );
    }

    #[test]
    fn test_larger_overlapping_shape_recolors_and_clones() {
        let mut ground = Ground::new();
        let at = DVec2::new(5.0, 5.0);
        let mut arena = arena_of(vec![shot(circle(1, 3.0), 5.0, 5.0), shot(rect(2, 1.0, 1.0), 5.0, 5.0)]);
        let res = resolve(&mut arena, &mut ground);

        let expected = vec![
            circle(1, 3.0).with_position(at).unwrap(),
            rect(2, 1.0, 1.0)
                .with_border_color("blue")
                .unwrap()
                .with_position(at)
                .unwrap(),
            circle(1, 3.0).with_swapped_colors().unwrap().with_position(at).unwrap(),
        ];
        assert_eq!(ground_shapes(&ground), expected);
        assert_eq!(res.cloned, 1);
        assert_eq!(res.landed, 3);
    }

    #[test]
    fn test_winning_line_leaves_loser_colors_and_makes_no_clone() {
        let mut ground = Ground::new();
        let mut arena = arena_of(vec![shot(line(1, 100.0, 0.0), 0.0, 0.0), shot(circle(2, 1.0), 2.0, 0.0)]);
        let res = resolve(&mut arena, &mut ground);

        let shapes = ground_shapes(&ground);
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[1].border_color(), Some("black"));
        assert_eq!(res.cloned, 0);
    }

    #[test]
    fn test_line_loser_takes_fill_as_color() {
        let mut ground = Ground::new();
        let mut arena = arena_of(vec![shot(rect(1, 50.0, 50.0), 0.0, 0.0), shot(line(2, 3.0, 0.0), 1.0, 1.0)]);
        resolve(&mut arena, &mut ground);

        let shapes = ground_shapes(&ground);
        assert_eq!(shapes[1].border_color(), Some("yellow"));
        assert_eq!(shapes.len(), 3);
    }

    #[test]
    fn test_equal_areas_both_survive() {
        let mut ground = Ground::new();
        let mut arena = arena_of(vec![shot(rect(1, 2.0, 2.0), 0.0, 0.0), shot(rect(2, 4.0, 1.0), 1.0, 0.0)]);
        resolve(&mut arena, &mut ground);

        let ids: Vec<_> = ground.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_non_overlapping_pair_survives_regardless_of_area() {
        let mut ground = Ground::new();
        let mut arena = arena_of(vec![shot(circle(1, 1.0), 0.0, 0.0), shot(circle(2, 10.0), 500.0, 500.0)]);
        let res = resolve(&mut arena, &mut ground);

        assert_eq!(res.destroyed, 0);
        let ids: Vec<_> = ground.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_pairs_follow_firing_order() {
        // Shots 1+2 pair up and 3 is left over, even though 2 and 3 overlap
        let mut ground = Ground::new();
        let mut arena = arena_of(vec![
            shot(circle(1, 1.0), 0.0, 0.0),
            shot(circle(2, 1.0), 100.0, 0.0),
            shot(circle(3, 5.0), 100.0, 0.0),
        ]);
        resolve(&mut arena, &mut ground);

        let ids: Vec<_> = ground.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_annotated_shots_become_trajectories() {
        let mut ground = Ground::new();
        let mut first = shot(circle(1, 1.0), 10.0, 0.0);
        first.annotated = true;
        let mut arena = arena_of(vec![first, shot(circle(2, 1.0), 50.0, 50.0)]);
        let res = resolve(&mut arena, &mut ground);

        assert_eq!(
            res.trajectories,
            vec![Trajectory {
                origin: DVec2::ZERO,
                landing: DVec2::new(10.0, 0.0)
            }]
        );
    }
}
