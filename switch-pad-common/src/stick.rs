//! Polar-to-cartesian conversion for the analog sticks.

/// Convert a stick's (angle in degrees, intensity) pair into the byte
/// coordinates the device expects.
///
/// The device Y axis grows downward: full up is 0, full down is 255. Zero
/// intensity is the rest position (128, 128) regardless of angle.
pub fn to_cartesian(angle_degrees: u16, intensity: u8) -> (u8, u8) {
    let radians = f64::from(angle_degrees).to_radians();
    let reach = 127.0 * f64::from(intensity) / 255.0;
    let dx = (radians.cos() * reach).round() as i32;
    let dy = (radians.sin() * reach).round() as i32;
    // reach caps at 127, so both coordinates stay within 1..=255.
    ((128 + dx) as u8, (128 - dy) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_intensity_rests_at_center() {
        for angle in [0, 45, 90, 135, 180, 225, 270, 315, 359] {
            assert_eq!(to_cartesian(angle, 0), (128, 128));
        }
    }

    #[test]
    fn full_tilt_cardinal_directions() {
        assert_eq!(to_cartesian(0, 255), (255, 128));
        assert_eq!(to_cartesian(90, 255), (128, 1));
        assert_eq!(to_cartesian(180, 255), (1, 128));
        assert_eq!(to_cartesian(270, 255), (128, 255));
    }

    #[test]
    fn full_tilt_diagonals_land_on_the_circle() {
        // cos(45°) * 127 rounds to 90.
        assert_eq!(to_cartesian(45, 255), (218, 38));
        assert_eq!(to_cartesian(225, 255), (38, 218));
    }

    #[test]
    fn half_intensity_halves_the_deflection() {
        assert_eq!(to_cartesian(0, 128), (192, 128));
        assert_eq!(to_cartesian(90, 128), (128, 64));
    }

    #[test]
    fn angles_wrap_past_a_full_turn() {
        // 450° is the same direction as 90°.
        assert_eq!(to_cartesian(450, 255), to_cartesian(90, 255));
    }
}
