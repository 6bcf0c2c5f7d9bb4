#[derive(Debug, Clone, Copy, PartialEq)]

pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if x is within [min, max) (pixel bounds).
    ///
    /// NaN is never contained.
    pub fn contains_half_open(&self, x: f64) -> bool {
        self.min <= x && x < self.max
    }
}
