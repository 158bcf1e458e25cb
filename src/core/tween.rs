//! Smooth follow for transforms (used by the 2D camera).

use bevy::prelude::*;

/// Eases an entity's translation toward another entity.
#[derive(Component)]
pub struct SmoothFollow {
    /// Entity to follow (None = stay put)
    pub target: Option<Entity>,
    /// Offset added to the target's position
    pub offset: Vec2,
    /// Interpolation speed multiplier (higher = faster)
    pub speed: f32,
}

impl Default for SmoothFollow {
    fn default() -> Self {
        Self {
            target: None,
            offset: Vec2::new(0.0, 60.0),
            speed: 6.0,
        }
    }
}

impl SmoothFollow {
    pub fn new(target: Entity, speed: f32) -> Self {
        Self {
            target: Some(target),
            speed,
            ..default()
        }
    }
}

/// Step a 2D position toward `target`, keeping `z` untouched.
pub fn ease_toward(current: Vec3, target: Vec2, speed: f32, dt: f32) -> Vec3 {
    let t = (speed * dt).clamp(0.0, 1.0);
    let xy = current.truncate().lerp(target, t);
    xy.extend(current.z)
}

/// System that interpolates followers toward their targets.
pub fn update_smooth_follow(
    time: Res<Time>,
    targets: Query<&GlobalTransform, Without<SmoothFollow>>,
    mut followers: Query<(&mut Transform, &SmoothFollow)>,
) {
    let dt = time.delta_secs();

    for (mut transform, follow) in followers.iter_mut() {
        let Some(target) = follow.target else {
            continue;
        };
        let Ok(target_transform) = targets.get(target) else {
            continue;
        };

        let goal = target_transform.translation().truncate() + follow.offset;
        transform.translation = ease_toward(transform.translation, goal, follow.speed, dt);
    }
}
