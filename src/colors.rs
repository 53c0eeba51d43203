//! Color palette for game elements
//!
//! Entities carry one of these as their color tag; the renderer reads the
//! rest for scenery and sprite details.

/// Opaque color from a 0xRRGGBB literal
pub const fn hex(rgb: u32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}

pub const SKY: [f32; 4] = hex(0x0f172a);
pub const GROUND: [f32; 4] = hex(0x1e293b);
pub const STAR: [f32; 4] = hex(0xffffff);

pub const SANTA: [f32; 4] = hex(0xef4444);
pub const SLED: [f32; 4] = hex(0xb45309);
pub const RUNNERS: [f32; 4] = hex(0x92400e);
pub const FACE: [f32; 4] = hex(0xfca5a5);
pub const BEARD: [f32; 4] = hex(0xffffff);

pub const POST: [f32; 4] = hex(0xfcd34d);
pub const TARGET: [f32; 4] = hex(0x94a3b8);
pub const TARGET_HEAD: [f32; 4] = hex(0xe2e8f0);
/// Hit particles and the target's open-to-work ring
pub const SUCCESS: [f32; 4] = hex(0x22c55e);

pub const OBSTACLE: [f32; 4] = hex(0xa855f7);
pub const GHOST_EYES: [f32; 4] = hex(0x000000);
pub const ENVELOPE: [f32; 4] = hex(0xffffff);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex(0x000000), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(SUCCESS, hex(0x22c55e));
    }
}
