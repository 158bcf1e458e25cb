//! Flashlight aiming from the cursor or from directional axes.

/// Where the flashlight points, in degrees (0 = right, 90 = up, 180 = left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aim {
    pub angle: f32,
    pub looking_up: bool,
    pub looking_back: bool,
}

/// Aim toward a point given relative to the player. The light never aims
/// below the horizon.
pub fn aim_at(offset_x: f32, offset_y: f32, facing_right: bool, look_up_angle: f32) -> Aim {
    let y = offset_y.max(0.0);
    let angle = if offset_x == 0.0 && y == 0.0 {
        if facing_right {
            0.0
        } else {
            180.0
        }
    } else {
        y.atan2(offset_x).to_degrees()
    };
    classify(angle, facing_right, look_up_angle)
}

/// Aim from a pair of axes in [-1, 1] (keys or a stick).
///
/// Horizontal input picks the side, vertical input tilts the light up to 90°.
/// Strong horizontal input limits the tilt so diagonals stay readable.
pub fn aim_from_axes(x: f32, y: f32, facing_right: bool, look_up_angle: f32) -> Aim {
    let mut angle = if facing_right {
        if x >= 0.0 {
            0.0
        } else {
            180.0
        }
    } else if x <= 0.0 {
        180.0
    } else {
        0.0
    };

    let mut tilt = y.max(0.0);
    let abs_x = x.abs();
    if abs_x > 0.5 {
        tilt = tilt.min(0.5);
    } else if tilt > 0.5 && abs_x > 0.0 {
        tilt = tilt.min(tilt - abs_x);
    }

    angle += if angle > 0.0 { tilt * -90.0 } else { tilt * 90.0 };
    classify(angle, facing_right, look_up_angle)
}

fn classify(angle: f32, facing_right: bool, look_up_angle: f32) -> Aim {
    let min_up = 90.0 - look_up_angle / 2.0;
    let max_up = 90.0 + look_up_angle / 2.0;
    Aim {
        angle,
        looking_up: angle > min_up && angle < max_up,
        looking_back: if facing_right { angle > 90.0 } else { angle < 90.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_below_is_clamped_to_horizon() {
        let aim = aim_at(10.0, -50.0, true, 90.0);
        assert_eq!(aim.angle, 0.0);
        assert!(!aim.looking_up);
        assert!(!aim.looking_back);
    }

    #[test]
    fn cursor_straight_up_looks_up() {
        let aim = aim_at(0.0, 10.0, true, 90.0);
        assert!((aim.angle - 90.0).abs() < 1e-4);
        assert!(aim.looking_up);
    }

    #[test]
    fn cursor_behind_looks_back() {
        let aim = aim_at(-10.0, 1.0, true, 90.0);
        assert!(aim.looking_back);
        let aim = aim_at(-10.0, 1.0, false, 90.0);
        assert!(!aim.looking_back);
    }

    #[test]
    fn axes_tilt_up_on_facing_side() {
        let aim = aim_from_axes(0.0, 1.0, true, 90.0);
        assert_eq!(aim.angle, 90.0);
        let aim = aim_from_axes(0.0, 0.4, false, 90.0);
        assert!((aim.angle - 144.0).abs() < 1e-4);
    }

    #[test]
    fn strong_horizontal_limits_tilt() {
        let aim = aim_from_axes(1.0, 1.0, true, 90.0);
        assert_eq!(aim.angle, 45.0);
        assert!(!aim.looking_up);
    }
}
