//! Distance heuristics between two positions.
//!
//! Every heuristic is dimension-agnostic: it walks the per-axis values of
//! both coordinates pairwise.

use std::f64::consts::SQRT_2;

use wayfind_core::Coordinate;

/// Estimates the distance between two positions.
pub trait Heuristic {
    /// Estimated distance from `a` to `b`.
    fn estimate(&self, a: &Coordinate, b: &Coordinate) -> f64;
}

impl<H: Heuristic + ?Sized> Heuristic for Box<H> {
    #[inline]
    fn estimate(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        (**self).estimate(a, b)
    }
}

impl<H: Heuristic + ?Sized> Heuristic for &H {
    #[inline]
    fn estimate(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        (**self).estimate(a, b)
    }
}

/// Manhattan (L1) distance between two coordinates.
#[inline]
pub fn manhattan(a: &Coordinate, b: &Coordinate) -> i32 {
    a.deltas(b).sum()
}

/// Chebyshev (L∞) distance between two coordinates.
#[inline]
pub fn chebyshev(a: &Coordinate, b: &Coordinate) -> i32 {
    a.deltas(b).max().unwrap_or(0)
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Sum of absolute per-axis differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn estimate(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        manhattan(a, b) as f64
    }
}

/// Largest absolute per-axis difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chebyshev;

impl Heuristic for Chebyshev {
    fn estimate(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        chebyshev(a, b) as f64
    }
}

/// Straight-line distance, rounded to 4 decimal places.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Heuristic for Euclidean {
    fn estimate(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        let sum: f64 = a.deltas(b).map(|d| (d as f64) * (d as f64)).sum();
        round_to(sum.sqrt(), 4)
    }
}

/// Octile distance: `(√2 − 1)·min + max` of the per-axis differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagonal;

impl Heuristic for Diagonal {
    fn estimate(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        let (min, max) = a
            .deltas(b)
            .fold(None, |acc: Option<(i32, i32)>, d| match acc {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            })
            .unwrap_or((0, 0));
        (SQRT_2 - 1.0) * min as f64 + max as f64
    }
}

/// Sum of `|a − b| / (|a| + |b|)` per axis; axes where both are zero add 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canberra;

impl Heuristic for Canberra {
    fn estimate(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        a.values()
            .iter()
            .zip(b.values())
            .map(|(&x, &y)| {
                let denominator = (x.abs() + y.abs()) as f64;
                if denominator == 0.0 {
                    0.0
                } else {
                    (x - y).abs() as f64 / denominator
                }
            })
            .sum()
    }
}

/// Angle in degrees between the two position vectors, rounded to 10
/// decimal places. Zero when either vector has zero length.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cosine;

impl Heuristic for Cosine {
    fn estimate(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        let mut dot = 0.0;
        let mut norm_a = 0.0;
        let mut norm_b = 0.0;
        for (&x, &y) in a.values().iter().zip(b.values()) {
            let (x, y) = (x as f64, y as f64);
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
        let magnitude = (norm_a * norm_b).sqrt();
        if magnitude == 0.0 {
            return 0.0;
        }
        let cos = (dot / magnitude).clamp(-1.0, 1.0);
        round_to(cos.acos().to_degrees(), 10)
    }
}

/// Number of axes on which the coordinates differ.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hamming;

impl Heuristic for Hamming {
    fn estimate(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        a.deltas(b).filter(|&d| d != 0).count() as f64
    }
}

/// Scales another heuristic by a constant weight.
#[derive(Debug, Clone, Copy)]
pub struct Weighted<H> {
    inner: H,
    weight: f64,
}

impl<H: Heuristic> Weighted<H> {
    pub fn new(inner: H, weight: f64) -> Self {
        Self { inner, weight }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl<H: Heuristic> Heuristic for Weighted<H> {
    fn estimate(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        self.inner.estimate(a, b) * self.weight
    }
}
