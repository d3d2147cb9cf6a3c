//! Axis-aligned boxes and 8-way orientation
//!
//! Everything that moves owns exactly one `Rect`; it doubles as the render
//! placement and the collision volume.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Axis-aligned bounding box, stored as center + size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            size: Vec2::new(width, height),
        }
    }

    pub fn square(center: Vec2, side: f32) -> Self {
        Self::new(center, side, side)
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Overlap test; touching edges do not count as overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Horizontally contained in the arena
    pub fn inside_x(&self) -> bool {
        self.left() >= 0.0 && self.right() <= ARENA_WIDTH
    }

    /// Vertically contained in the arena
    pub fn inside_y(&self) -> bool {
        self.top() >= 0.0 && self.bottom() <= ARENA_HEIGHT
    }

    /// Fully inside the arena; leaving via any single side fails this
    pub fn inside_arena(&self) -> bool {
        self.inside_x() && self.inside_y()
    }
}

/// The eight compass orientations the player can face.
///
/// Screen coordinates: +x right, +y down. East is the rest pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Facing {
    /// Map a summed key-delta pair to an orientation. Returns `None` for the
    /// zero vector; facing is then left unchanged by the caller.
    pub fn from_offsets(dx: i32, dy: i32) -> Option<Facing> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Facing::East),
            (1, -1) => Some(Facing::NorthEast),
            (0, -1) => Some(Facing::North),
            (-1, -1) => Some(Facing::NorthWest),
            (-1, 0) => Some(Facing::West),
            (-1, 1) => Some(Facing::SouthWest),
            (0, 1) => Some(Facing::South),
            (1, 1) => Some(Facing::SouthEast),
            _ => None,
        }
    }

    /// Raw integer deltas of this orientation
    pub fn offsets(&self) -> (i32, i32) {
        match self {
            Facing::East => (1, 0),
            Facing::NorthEast => (1, -1),
            Facing::North => (0, -1),
            Facing::NorthWest => (-1, -1),
            Facing::West => (-1, 0),
            Facing::SouthWest => (-1, 1),
            Facing::South => (0, 1),
            Facing::SouthEast => (1, 1),
        }
    }

    /// Unit direction vector; diagonals are normalized
    pub fn unit(&self) -> Vec2 {
        let (dx, dy) = self.offsets();
        Vec2::new(dx as f32, dy as f32).normalize()
    }
}

/// Unit vector pointing from `from` toward `to` (zero if they coincide)
pub fn direction_between(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersects() {
        let a = Rect::square(Vec2::new(100.0, 100.0), 40.0);
        let b = Rect::square(Vec2::new(120.0, 110.0), 40.0);
        let c = Rect::square(Vec2::new(300.0, 100.0), 40.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_rect_touching_edges_do_not_overlap() {
        let a = Rect::square(Vec2::new(100.0, 100.0), 40.0);
        let b = Rect::square(Vec2::new(140.0, 100.0), 40.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_inside_arena_each_side() {
        let mut r = Rect::square(Vec2::new(800.0, 450.0), 40.0);
        assert!(r.inside_arena());

        r.center.x = -1.0;
        assert!(!r.inside_x());
        r.center.x = ARENA_WIDTH + 1.0;
        assert!(!r.inside_x());

        r.center.x = 800.0;
        r.center.y = -1.0;
        assert!(!r.inside_y());
        r.center.y = ARENA_HEIGHT + 1.0;
        assert!(!r.inside_y());
    }

    #[test]
    fn test_facing_from_offsets() {
        assert_eq!(Facing::from_offsets(1, 0), Some(Facing::East));
        assert_eq!(Facing::from_offsets(-1, 1), Some(Facing::SouthWest));
        assert_eq!(Facing::from_offsets(0, -1), Some(Facing::North));
        assert_eq!(Facing::from_offsets(0, 0), None);
    }

    #[test]
    fn test_facing_unit_is_normalized() {
        for facing in [
            Facing::East,
            Facing::NorthEast,
            Facing::North,
            Facing::NorthWest,
            Facing::West,
            Facing::SouthWest,
            Facing::South,
            Facing::SouthEast,
        ] {
            assert!((facing.unit().length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_direction_between() {
        let dir = direction_between(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((dir.x - 0.6).abs() < 1e-6);
        assert!((dir.y - 0.8).abs() < 1e-6);
        assert_eq!(
            direction_between(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0)),
            Vec2::ZERO
        );
    }
}
