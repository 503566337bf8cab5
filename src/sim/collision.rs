//! Collision detection between the actor and the playfield
//!
//! Everything is axis-aligned: the actor is a box, each obstacle pair is two
//! boxes derived from its gap, the ground is a horizontal plane and the top
//! boundary is the line `y = 0`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::spawner::{ObstacleMember, ObstaclePair};

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// What the actor hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Ground,
    Obstacle { pair_id: u32, member: ObstacleMember },
    TopBoundary,
}

/// Every collision the actor is currently involved in, in priority order
pub fn collisions(
    actor: &Actor,
    pairs: &[ObstaclePair],
    ground_y: f32,
    top_boundary: f32,
) -> Vec<CollisionKind> {
    let mut hits = Vec::new();
    let bounds = actor.bounds();

    if bounds.bottom() > ground_y {
        hits.push(CollisionKind::Ground);
    }

    for pair in pairs {
        // Cheap horizontal reject before building member boxes
        if bounds.right() <= pair.x || bounds.left() >= pair.right() {
            continue;
        }
        for member in ObstacleMember::BOTH {
            if bounds.intersects(&pair.member_bounds(member, ground_y)) {
                hits.push(CollisionKind::Obstacle {
                    pair_id: pair.id,
                    member,
                });
            }
        }
    }

    if actor.pos.y < top_boundary {
        hits.push(CollisionKind::TopBoundary);
    }

    hits
}

/// Check the actor against the ground, all live obstacles and the top boundary
///
/// Returns the highest-priority hit only, so that simultaneous hits in one
/// tick still produce a single game-over.
pub fn check_collision(
    actor: &Actor,
    pairs: &[ObstaclePair],
    ground_y: f32,
    top_boundary: f32,
) -> Option<CollisionKind> {
    if !actor.alive {
        return None;
    }
    collisions(actor, pairs, ground_y, top_boundary)
        .into_iter()
        .next()
}
