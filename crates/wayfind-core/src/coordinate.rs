//! The dimension-agnostic [`Coordinate`] type.
//!
//! A coordinate is an immutable tuple of integers. Its hash is computed once
//! on construction, so coordinates are cheap to use as map keys even in high
//! dimensions.

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

// ---------------------------------------------------------------------------
// Coordinate
// ---------------------------------------------------------------------------

/// An immutable integer tuple of any dimensionality.
///
/// Equality and ordering are by value (ordering is lexicographic, first axis
/// most significant). Two coordinates of different dimensionality are never
/// equal.
#[derive(Clone)]
pub struct Coordinate {
    values: Box<[i32]>,
    hash: u64,
}

impl Coordinate {
    /// Create a coordinate from its per-axis values.
    pub fn new(values: impl Into<Box<[i32]>>) -> Self {
        let values = values.into();
        let mut hasher = DefaultHasher::new();
        values.hash(&mut hasher);
        Self {
            hash: hasher.finish(),
            values,
        }
    }

    /// Per-axis values.
    #[inline]
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Number of axes.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    /// Value on axis `axis`, or `None` past the last axis.
    #[inline]
    pub fn get(&self, axis: usize) -> Option<i32> {
        self.values.get(axis).copied()
    }

    /// Return this coordinate shifted by `offset` (axis by axis).
    ///
    /// Axes missing from `offset` are left unchanged.
    pub fn offset(&self, offset: &[i32]) -> Self {
        let values: Vec<i32> = self
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| v + offset.get(i).copied().unwrap_or(0))
            .collect();
        Self::new(values)
    }

    /// Absolute per-axis differences between two coordinates.
    ///
    /// Only the common axes are compared.
    pub fn deltas<'a>(&'a self, other: &'a Coordinate) -> impl Iterator<Item = i32> + 'a {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).abs())
    }
}

impl<const N: usize> From<[i32; N]> for Coordinate {
    fn from(values: [i32; N]) -> Self {
        Self::new(values.to_vec())
    }
}

impl From<Vec<i32>> for Coordinate {
    fn from(values: Vec<i32>) -> Self {
        Self::new(values)
    }
}

impl From<&[i32]> for Coordinate {
    fn from(values: &[i32]) -> Self {
        Self::new(values.to_vec())
    }
}

// --- trait impls for Coordinate ---

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.values == other.values
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.values.cmp(&other.values)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate{self}")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Coordinate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Coordinate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<i32>::deserialize(deserializer)?;
        Ok(Coordinate::new(values))
    }
}
