//! Detection-only contact engine stand-in
//!
//! Minimal replacement for the scene framework's physics contacts: bodies
//! carry category bitmasks, overlap episodes are reported once at onset,
//! and valid torpedo/alien pairs are resolved independently of the order
//! the two bodies arrive in.

use glam::Vec2;

use super::state::EntityId;

/// Collision category bitmasks
pub const CATEGORY_TORPEDO: u32 = 0x1 << 0;
pub const CATEGORY_ALIEN: u32 = 0x1 << 1;

/// A tracked body as seen by the contact engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactBody {
    pub entity: EntityId,
    pub category: u32,
}

/// A begin-contact event between two bodies, in whatever order the engine
/// happened to report them
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub body_a: ContactBody,
    pub body_b: ContactBody,
}

/// A confirmed torpedo-hits-alien pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TorpedoHit {
    pub torpedo: EntityId,
    pub alien: EntityId,
}

/// Classify a contact, independent of body order.
///
/// The pair is normalized by category bitmask, lower value first, then
/// tested by mask rather than equality. Any pairing other than
/// {torpedo, alien} is not ours to handle and yields `None`.
pub fn resolve_contact(contact: &Contact) -> Option<TorpedoHit> {
    let (first, second) = if contact.body_a.category < contact.body_b.category {
        (contact.body_a, contact.body_b)
    } else {
        (contact.body_b, contact.body_a)
    };

    if first.category & CATEGORY_TORPEDO != 0 && second.category & CATEGORY_ALIEN != 0 {
        Some(TorpedoHit {
            torpedo: first.entity,
            alien: second.entity,
        })
    } else {
        None
    }
}

/// Overlap between a circle (torpedo body) and an axis-aligned rectangle
/// (alien sprite bounds)
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect_center: Vec2, rect_size: Vec2) -> bool {
    let half = rect_size * 0.5;
    let closest = center.clamp(rect_center - half, rect_center + half);
    center.distance_squared(closest) <= radius * radius
}

/// Swept circle-vs-rectangle test for precise (continuous) detection.
///
/// The circle's path from `start` to `end` is tested against the rectangle
/// inflated by the radius (slab method), so a body covering many times its
/// own size per step cannot tunnel through a thin target.
pub fn swept_circle_rect_overlap(
    start: Vec2,
    end: Vec2,
    radius: f32,
    rect_center: Vec2,
    rect_size: Vec2,
) -> bool {
    if circle_rect_overlap(start, radius, rect_center, rect_size)
        || circle_rect_overlap(end, radius, rect_center, rect_size)
    {
        return true;
    }

    let half = rect_size * 0.5 + Vec2::splat(radius);
    let min = rect_center - half;
    let max = rect_center + half;
    let dir = end - start;

    let mut t_min = 0.0_f32;
    let mut t_max = 1.0_f32;
    for axis in 0..2 {
        let (s, d, lo, hi) = if axis == 0 {
            (start.x, dir.x, min.x, max.x)
        } else {
            (start.y, dir.y, min.y, max.y)
        };

        if d.abs() < f32::EPSILON {
            // Parallel to this slab: must already be inside it
            if s < lo || s > hi {
                return false;
            }
        } else {
            let inv = 1.0 / d;
            let (t0, t1) = ((lo - s) * inv, (hi - s) * inv);
            let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }
    }
    true
}
