//! Traversal costs attached to graph vertices.

/// Inclusive bounds a vertex cost is kept within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostRange {
    pub low: i32,
    pub high: i32,
}

impl CostRange {
    /// Create a range, swapping the bounds if given out of order.
    #[inline]
    pub const fn new(low: i32, high: i32) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self {
                low: high,
                high: low,
            }
        }
    }

    /// Clamp `value` into the range.
    #[inline]
    pub fn clamp(self, value: i32) -> i32 {
        value.clamp(self.low, self.high)
    }

    /// Whether `value` lies inside the range.
    #[inline]
    pub fn contains(self, value: i32) -> bool {
        self.low <= value && value <= self.high
    }
}

impl Default for CostRange {
    fn default() -> Self {
        Self::new(1, 9)
    }
}

/// The cost of entering a vertex, together with the range it may vary in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexCost {
    pub current: i32,
    pub range: CostRange,
}

impl VertexCost {
    /// Create a cost, clamping `current` into `range`.
    pub fn new(current: i32, range: CostRange) -> Self {
        Self {
            current: range.clamp(current),
            range,
        }
    }

    /// Return a copy with a different current cost (clamped).
    pub fn with_current(self, current: i32) -> Self {
        Self::new(current, self.range)
    }
}

impl Default for VertexCost {
    fn default() -> Self {
        Self::new(1, CostRange::default())
    }
}
