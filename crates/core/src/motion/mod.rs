//! Motion types
//!
//! Coordinates, axis sets and axis limits shared between the park logic and
//! the host motion abstraction. All coordinates are in millimetres in the
//! G-code coordinate frame.

use bitflags::bitflags;

bitflags! {
    /// Set of cartesian axes (homed axes, axes to home)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Axes: u8 {
        /// X axis
        const X = 0b001;
        /// Y axis
        const Y = 0b010;
        /// Z axis
        const Z = 0b100;
        /// X and Y
        const XY = Self::X.bits() | Self::Y.bits();
        /// All three axes
        const XYZ = Self::X.bits() | Self::Y.bits() | Self::Z.bits();
    }
}

/// Planar position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Xy {
    /// X coordinate (mm)
    pub x: f32,
    /// Y coordinate (mm)
    pub y: f32,
}

impl Xy {
    /// Create a planar position
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Toolhead position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Xyz {
    /// X coordinate (mm)
    pub x: f32,
    /// Y coordinate (mm)
    pub y: f32,
    /// Z coordinate (mm)
    pub z: f32,
}

impl Xyz {
    /// Create a toolhead position
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Planar part of the position
    pub const fn xy(&self) -> Xy {
        Xy::new(self.x, self.y)
    }
}

/// Reachable range of each axis as configured on the printer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisLimits {
    /// Lower limits (`position_min`)
    pub min: Xyz,
    /// Upper limits (`position_max`)
    pub max: Xyz,
}

impl AxisLimits {
    /// Create axis limits
    pub const fn new(min: Xyz, max: Xyz) -> Self {
        Self { min, max }
    }

    /// Clamp X/Y into the axis range.
    ///
    /// Returns the clamped position and whether any coordinate changed.
    /// Inverted limits resolve to the upper limit and NaN limits are ignored.
    pub fn clamp_xy(&self, position: Xyz) -> (Xyz, bool) {
        let x = clamp_axis(position.x, self.min.x, self.max.x);
        let y = clamp_axis(position.y, self.min.y, self.max.y);
        let clamped = x != position.x || y != position.y;
        (Xyz::new(x, y, position.z), clamped)
    }
}

// `f32::clamp` panics on `min > max` or NaN bounds
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> AxisLimits {
        AxisLimits::new(Xyz::new(0.0, -5.0, 0.0), Xyz::new(250.0, 210.0, 220.0))
    }

    #[test]
    fn test_axes_contains() {
        let homed = Axes::X | Axes::Y;
        assert!(homed.contains(Axes::XY));
        assert!(!homed.contains(Axes::Z));
        assert!(!homed.contains(Axes::XYZ));
        assert_eq!(Axes::default(), Axes::empty());
    }

    #[test]
    fn test_clamp_xy_inside_range_is_unchanged() {
        let (pos, clamped) = limits().clamp_xy(Xyz::new(100.0, 0.0, 12.0));
        assert_eq!(pos, Xyz::new(100.0, 0.0, 12.0));
        assert!(!clamped);
    }

    #[test]
    fn test_clamp_xy_out_of_range() {
        let (pos, clamped) = limits().clamp_xy(Xyz::new(250.02, -5.1, 300.0));
        assert_eq!(pos, Xyz::new(250.0, -5.0, 300.0));
        assert!(clamped);
    }

    #[test]
    fn test_clamp_xy_tolerates_bad_limits() {
        let inverted = AxisLimits::new(Xyz::new(10.0, 0.0, 0.0), Xyz::new(0.0, 200.0, 200.0));
        let (pos, clamped) = inverted.clamp_xy(Xyz::new(5.0, 50.0, 1.0));
        assert_eq!(pos, Xyz::new(0.0, 50.0, 1.0));
        assert!(clamped);

        let unknown = AxisLimits::new(
            Xyz::new(f32::NAN, f32::NAN, 0.0),
            Xyz::new(f32::NAN, 200.0, 200.0),
        );
        let (pos, clamped) = unknown.clamp_xy(Xyz::new(5.0, 250.0, 1.0));
        assert_eq!(pos, Xyz::new(5.0, 200.0, 1.0));
        assert!(clamped);
    }
}
