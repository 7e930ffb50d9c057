//! Navigation type definitions

/// Point in the local NED frame, meters.
///
/// Used as the fixed navigation target. Immutable once constructed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    x: f32,
    y: f32,
    z: f32,
}

impl Position {
    /// Create a new position
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// North coordinate (m)
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// East coordinate (m)
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Down coordinate / altitude reference (m)
    pub const fn z(&self) -> f32 {
        self.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_accessors() {
        let target = Position::new(10.0, -2.5, 5.0);
        assert_eq!(target.x(), 10.0);
        assert_eq!(target.y(), -2.5);
        assert_eq!(target.z(), 5.0);
    }

    #[test]
    fn test_position_default_is_origin() {
        assert_eq!(Position::default(), Position::new(0.0, 0.0, 0.0));
    }
}
