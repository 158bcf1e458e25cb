//! Ground detection: support, slope angle and surface tangent.
//!
//! The sensor itself is engine independent. It asks a `GroundQuery` for the
//! contacts under a box and interprets them; `RapierGroundQuery` answers
//! those queries against the physics world.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::config::GroundConfig;

/// A surface hit reported by a ground query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    /// World-space contact point
    pub point: Vec2,
    /// Surface normal at the contact, pointing away from the surface
    pub normal: Vec2,
}

/// Result of one ground check. Recomputed every fixed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundState {
    pub is_grounded: bool,
    pub is_on_slope: bool,
    /// Unit direction to move along the surface when pressing right
    pub slope_tangent: Vec2,
    /// Angle between the surface normal and world up, in degrees
    pub surface_angle: f32,
}

impl Default for GroundState {
    fn default() -> Self {
        Self {
            is_grounded: false,
            is_on_slope: false,
            slope_tangent: Vec2::X,
            surface_angle: 0.0,
        }
    }
}

/// Source of contacts for the ground check.
pub trait GroundQuery {
    /// All surfaces overlapping an axis-aligned box of `size` centered at `origin`.
    fn cast_box(&self, origin: Vec2, size: Vec2) -> Vec<GroundContact>;
}

/// Movement direction along a surface.
///
/// This is the negated perpendicular of the normal: on flat ground it points
/// to +X, so positive input walks right and slopes are climbed forwards.
pub fn slope_tangent(normal: Vec2) -> Vec2 {
    -normal.perp().normalize_or_zero()
}

/// Angle in degrees between a surface normal and world up.
pub fn surface_angle(normal: Vec2) -> f32 {
    let normal = normal.normalize_or_zero();
    normal.dot(Vec2::Y).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Box-shaped ground check below the player.
#[derive(Component, Debug, Clone)]
pub struct GroundSensor {
    /// Box center relative to the actor position
    pub offset: Vec2,
    pub size: Vec2,
    /// Surfaces steeper than this (degrees) do not count as ground
    pub max_incline: f32,
}

impl GroundSensor {
    pub fn new(offset: Vec2, size: Vec2, max_incline: f32) -> Self {
        assert!(size.x > 0.0 && size.y > 0.0, "ground check size must be positive");
        assert!(max_incline > 0.0, "max incline must be positive");
        Self {
            offset,
            size,
            max_incline,
        }
    }

    pub fn from_config(config: &GroundConfig) -> Self {
        Self::new(config.offset(), config.size(), config.max_incline)
    }

    pub fn origin(&self, position: Vec2) -> Vec2 {
        position + self.offset
    }

    /// Check for walkable ground under `position`.
    ///
    /// While ascending from a jump the check is skipped so the actor does not
    /// re-ground on the surface it just left.
    pub fn sense<Q: GroundQuery + ?Sized>(
        &self,
        position: Vec2,
        ascending_from_jump: bool,
        query: &Q,
    ) -> GroundState {
        if ascending_from_jump {
            return GroundState::default();
        }

        let origin = self.origin(position);
        let contacts = query.cast_box(origin, self.size);

        let Some(hit) = closest_contact(origin, &contacts) else {
            return GroundState::default();
        };

        let angle = surface_angle(hit.normal);
        let tangent = slope_tangent(hit.normal);

        // Too steep: a surface exists but cannot be stood on.
        if angle > self.max_incline {
            return GroundState {
                is_grounded: false,
                is_on_slope: false,
                slope_tangent: tangent,
                surface_angle: angle,
            };
        }

        GroundState {
            is_grounded: true,
            is_on_slope: angle > 0.0,
            slope_tangent: tangent,
            surface_angle: angle,
        }
    }
}

/// Contact nearest to `origin`; the first one wins ties.
fn closest_contact(origin: Vec2, contacts: &[GroundContact]) -> Option<GroundContact> {
    let mut best: Option<(f32, GroundContact)> = None;
    for contact in contacts {
        let distance = origin.distance(contact.point);
        match best {
            Some((best_distance, _)) if distance >= best_distance => {}
            _ => best = Some((distance, *contact)),
        }
    }
    best.map(|(_, contact)| contact)
}

/// Widest gap allowed between two neighbouring probe rays, in pixels.
pub const MAX_PROBE_SPACING: f32 = 4.0;

/// Horizontal offsets of the probe rays across a box of `width`.
///
/// At least `min_probes` rays are cast, and more when needed so that no gap
/// between neighbours is wider than `MAX_PROBE_SPACING`.
pub fn probe_offsets(width: f32, min_probes: usize) -> Vec<f32> {
    let needed = (width / MAX_PROBE_SPACING).ceil() as usize + 1;
    let count = min_probes.max(needed).max(1);
    if count == 1 {
        return vec![0.0];
    }

    let half = width / 2.0;
    (0..count)
        .map(|i| -half + width * i as f32 / (count - 1) as f32)
        .collect()
}

/// Ground query backed by the Rapier physics world.
///
/// The box is probed with a row of downward rays that start at its top edge
/// and travel its full height.
pub struct RapierGroundQuery<'a> {
    context: &'a RapierContext,
    filter: QueryFilter<'a>,
    min_probes: usize,
}

impl<'a> RapierGroundQuery<'a> {
    pub fn new(context: &'a RapierContext, filter: QueryFilter<'a>, min_probes: usize) -> Self {
        Self {
            context,
            filter,
            min_probes,
        }
    }
}

impl GroundQuery for RapierGroundQuery<'_> {
    fn cast_box(&self, origin: Vec2, size: Vec2) -> Vec<GroundContact> {
        let top = origin.y + size.y / 2.0;

        probe_offsets(size.x, self.min_probes)
            .into_iter()
            .filter_map(|dx| {
                let ray_origin = Vec2::new(origin.x + dx, top);
                self.context
                    .cast_ray_and_get_normal(ray_origin, Vec2::NEG_Y, size.y, true, self.filter)
                    .map(|(_, hit)| GroundContact {
                        point: hit.point,
                        normal: hit.normal,
                    })
            })
            // Rays that start inside a collider report no usable normal.
            .filter(|contact| contact.normal != Vec2::ZERO)
            .collect()
    }
}
