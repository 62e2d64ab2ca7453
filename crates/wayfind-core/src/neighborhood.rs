//! Neighborhood topologies.
//!
//! A topology maps a coordinate to the set of coordinates one "move" away.
//! The computation is purely geometric: whether a candidate actually exists
//! in a graph (or is an obstacle) is decided later by
//! [`Graph::connect`](crate::Graph::connect).

use std::collections::HashMap;
use std::fmt;

use crate::coordinate::Coordinate;

/// Computes the geometric neighborhood of a coordinate.
///
/// Implementations must never include `c` itself and must be symmetric:
/// if `n` is in `neighborhood(c)` then `c` is in `neighborhood(n)`.
pub trait Neighborhood {
    /// All coordinates one move away from `c`.
    fn neighborhood(&self, c: &Coordinate) -> Vec<Coordinate>;
}

/// The built-in neighborhood topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Every offset in `{-1, 0, 1}` per axis (8 neighbors in 2D).
    #[default]
    Moore,
    /// Cardinal moves only (4 neighbors in 2D).
    VonNeumann,
    /// Non-cardinal moves only (4 neighbors in 2D).
    Diagonal,
    /// ±2 on one axis and ±1 on another (8 neighbors in 2D).
    Knight,
    /// Six fixed offsets on the first two axes.
    Hexagonal,
    /// Every offset within Chebyshev distance 2 (24 neighbors in 2D).
    ExtendedMoore,
}

impl Topology {
    /// All built-in topologies.
    pub const ALL: [Topology; 6] = [
        Topology::Moore,
        Topology::VonNeumann,
        Topology::Diagonal,
        Topology::Knight,
        Topology::Hexagonal,
        Topology::ExtendedMoore,
    ];

    /// Short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Topology::Moore => "moore",
            Topology::VonNeumann => "von-neumann",
            Topology::Diagonal => "diagonal",
            Topology::Knight => "knight",
            Topology::Hexagonal => "hexagonal",
            Topology::ExtendedMoore => "extended-moore",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const HEX_OFFSETS: [[i32; 2]; 6] = [[1, 0], [-1, 0], [0, 1], [0, -1], [1, -1], [-1, 1]];

impl Neighborhood for Topology {
    fn neighborhood(&self, c: &Coordinate) -> Vec<Coordinate> {
        let dims = c.dimensions();
        let mut out = Vec::new();
        match self {
            Topology::Moore => cartesian(dims, 1, &mut |o| {
                if nonzero_axes(o) > 0 {
                    out.push(c.offset(o));
                }
            }),
            Topology::VonNeumann => cartesian(dims, 1, &mut |o| {
                if nonzero_axes(o) == 1 {
                    out.push(c.offset(o));
                }
            }),
            Topology::Diagonal => cartesian(dims, 1, &mut |o| {
                if nonzero_axes(o) > 1 {
                    out.push(c.offset(o));
                }
            }),
            Topology::ExtendedMoore => cartesian(dims, 2, &mut |o| {
                if nonzero_axes(o) > 0 {
                    out.push(c.offset(o));
                }
            }),
            Topology::Knight => {
                let mut offset = vec![0; dims];
                for long in 0..dims {
                    for short in (0..dims).filter(|&s| s != long) {
                        for dl in [-2, 2] {
                            for ds in [-1, 1] {
                                offset[long] = dl;
                                offset[short] = ds;
                                out.push(c.offset(&offset));
                                offset[long] = 0;
                                offset[short] = 0;
                            }
                        }
                    }
                }
            }
            Topology::Hexagonal => {
                if dims >= 2 {
                    out.extend(HEX_OFFSETS.iter().map(|o| c.offset(o)));
                }
            }
        }
        out
    }
}

/// Visit every offset vector in `{-reach..=reach}^dims` (including zero).
fn cartesian(dims: usize, reach: i32, visit: &mut impl FnMut(&[i32])) {
    fn recurse(axis: usize, buf: &mut Vec<i32>, reach: i32, visit: &mut impl FnMut(&[i32])) {
        if axis == buf.len() {
            visit(buf);
            return;
        }
        for d in -reach..=reach {
            buf[axis] = d;
            recurse(axis + 1, buf, reach, visit);
        }
        buf[axis] = 0;
    }
    if dims == 0 {
        return;
    }
    let mut buf = vec![0; dims];
    recurse(0, &mut buf, reach, visit);
}

#[inline]
fn nonzero_axes(offset: &[i32]) -> usize {
    offset.iter().filter(|&&d| d != 0).count()
}

// ---------------------------------------------------------------------------
// NeighborhoodCache
// ---------------------------------------------------------------------------

/// Memoizes a topology per coordinate.
///
/// The candidate set never changes for a fixed coordinate, so each one is
/// computed at most once.
pub struct NeighborhoodCache<N> {
    topology: N,
    cache: HashMap<Coordinate, Box<[Coordinate]>>,
}

impl<N: Neighborhood> NeighborhoodCache<N> {
    /// Create an empty cache over `topology`.
    pub fn new(topology: N) -> Self {
        Self {
            topology,
            cache: HashMap::new(),
        }
    }

    /// The neighborhood of `c`, computing it on first request.
    pub fn get(&mut self, c: &Coordinate) -> &[Coordinate] {
        let topology = &self.topology;
        self.cache
            .entry(c.clone())
            .or_insert_with(|| topology.neighborhood(c).into_boxed_slice())
    }

    /// Number of coordinates computed so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether nothing has been computed yet.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// The wrapped topology.
    pub fn topology(&self) -> &N {
        &self.topology
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn count(t: Topology, c: &Coordinate) -> usize {
        t.neighborhood(c).len()
    }

    #[test]
    fn sizes_in_two_dimensions() {
        let c = Coordinate::from([5, 5]);
        assert_eq!(count(Topology::Moore, &c), 8);
        assert_eq!(count(Topology::VonNeumann, &c), 4);
        assert_eq!(count(Topology::Diagonal, &c), 4);
        assert_eq!(count(Topology::Knight, &c), 8);
        assert_eq!(count(Topology::Hexagonal, &c), 6);
        assert_eq!(count(Topology::ExtendedMoore, &c), 24);
    }

    #[test]
    fn sizes_in_three_dimensions() {
        let c = Coordinate::from([0, 0, 0]);
        assert_eq!(count(Topology::Moore, &c), 26);
        assert_eq!(count(Topology::VonNeumann, &c), 6);
        assert_eq!(count(Topology::Diagonal, &c), 20);
        assert_eq!(count(Topology::Knight, &c), 24);
        assert_eq!(count(Topology::Hexagonal, &c), 6);
        assert_eq!(count(Topology::ExtendedMoore, &c), 124);
    }

    #[test]
    fn von_neumann_is_cardinal() {
        let c = Coordinate::from([0, 0]);
        let got: HashSet<_> = Topology::VonNeumann.neighborhood(&c).into_iter().collect();
        let want: HashSet<_> = [[1, 0], [-1, 0], [0, 1], [0, -1]]
            .into_iter()
            .map(Coordinate::from)
            .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn knight_results_are_unique() {
        let c = Coordinate::from([0, 0, 0]);
        let all = Topology::Knight.neighborhood(&c);
        let unique: HashSet<_> = all.iter().cloned().collect();
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn cache_computes_once() {
        let mut cache = NeighborhoodCache::new(Topology::VonNeumann);
        assert!(cache.is_empty());
        assert_eq!(cache.topology(), &Topology::VonNeumann);
        let c = Coordinate::from([1, 1]);
        assert_eq!(cache.get(&c).len(), 4);
        assert_eq!(cache.get(&c).len(), 4);
        assert_eq!(cache.len(), 1);
    }

    proptest! {
        #[test]
        fn neighborhoods_are_symmetric_and_exclude_self(
            x in -50i32..50,
            y in -50i32..50,
            z in -5i32..5,
            three_d in any::<bool>(),
        ) {
            let c = if three_d {
                Coordinate::from([x, y, z])
            } else {
                Coordinate::from([x, y])
            };
            for t in Topology::ALL {
                let ns = t.neighborhood(&c);
                prop_assert!(!ns.contains(&c), "{} contains self", t);
                for n in &ns {
                    prop_assert!(t.neighborhood(n).contains(&c), "{} not symmetric at {}", t, n);
                }
            }
        }
    }
}
