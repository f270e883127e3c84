/// A closed interval `[min, max]` of f32 values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// The unit interval [0, 1], the valid range of a color channel.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }
}
