//! Palette shared by the domain adapters (linear RGB).

pub const GRASS: [f32; 3] = [0.79, 0.88, 0.54];

pub const ASPHALT: [f32; 3] = [0.70, 0.70, 0.70];
pub const LANE_SELECTED: [f32; 3] = [0.95, 0.78, 0.25];
pub const CAR: [f32; 3] = [0.25, 0.35, 0.80];

pub const GESTURE_DOTS: [f32; 3] = [0.35, 0.35, 0.35];
pub const GESTURE_LINES: [f32; 3] = [0.55, 0.55, 0.55];
pub const CONTROL_POINT_SELECTED: [f32; 3] = [0.90, 0.30, 0.20];

pub const RESIDENTIAL: [f32; 3] = [0.98, 0.87, 0.57];
pub const COMMERCIAL: [f32; 3] = [0.62, 0.76, 0.96];
pub const INDUSTRIAL: [f32; 3] = [0.76, 0.62, 0.84];
pub const AGRICULTURAL: [f32; 3] = [0.67, 0.84, 0.45];
pub const LOT_SELECTED: [f32; 3] = [1.0, 1.0, 1.0];

pub const AXIS_X: [f32; 3] = [1.0, 0.0, 0.0];
pub const AXIS_Y: [f32; 3] = [0.0, 1.0, 0.0];
pub const AXIS_Z: [f32; 3] = [0.0, 0.0, 1.0];

/// Opaque RGBA from an RGB palette entry.
pub const fn opaque(rgb: [f32; 3]) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], 1.0]
}
