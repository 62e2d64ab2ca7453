//! The algorithm catalogue and the factory wiring strategies into searches.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PathfindingError;
use crate::frontier::{self, Fifo, MinHeap, RandomPool};
use crate::heuristic::{
    Canberra, Chebyshev, Cosine, Diagonal, Euclidean, Hamming, Heuristic, Manhattan, Weighted,
};
use crate::policy::{AStarRank, GreedyRank, LeeRank, Relax, Wave};
use crate::process::{DeadEndPolicy, PathfindingProcess};
use crate::search::{
    self, BacktrackSearch, BidirectSearch, Cheapest, FirstNeighbor, FrontierSearch,
    IdaStarSearch, LegSearch, Nearest, RandomNeighbor,
};
use crate::step_rule::{CardinalStepRule, DefaultStepRule, LandscapeStepRule, StepRule, WalkStepRule};
use crate::traits::PathGraph;

pub type BoxedHeuristic = Box<dyn Heuristic + Send + Sync>;
pub type BoxedStepRule = Box<dyn StepRule + Send + Sync>;
pub type BoxedSearch<G> = Box<dyn LegSearch<G> + Send>;

// ---------------------------------------------------------------------------
// Strategy descriptions
// ---------------------------------------------------------------------------

/// A built-in heuristic, as data.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum HeuristicKind {
    #[default]
    Manhattan,
    Chebyshev,
    Euclidean,
    Diagonal,
    Canberra,
    Cosine,
    Hamming,
    Weighted {
        inner: Box<HeuristicKind>,
        weight: f64,
    },
}

impl HeuristicKind {
    /// Wrap `self` in a [`Weighted`] heuristic.
    pub fn weighted(self, weight: f64) -> Self {
        HeuristicKind::Weighted {
            inner: Box::new(self),
            weight,
        }
    }

    pub fn build(&self) -> BoxedHeuristic {
        match self {
            HeuristicKind::Manhattan => Box::new(Manhattan),
            HeuristicKind::Chebyshev => Box::new(Chebyshev),
            HeuristicKind::Euclidean => Box::new(Euclidean),
            HeuristicKind::Diagonal => Box::new(Diagonal),
            HeuristicKind::Canberra => Box::new(Canberra),
            HeuristicKind::Cosine => Box::new(Cosine),
            HeuristicKind::Hamming => Box::new(Hamming),
            HeuristicKind::Weighted { inner, weight } => {
                Box::new(Weighted::new(inner.build(), *weight))
            }
        }
    }
}

/// A built-in step rule, as data.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StepRuleKind {
    #[default]
    Default,
    Landscape,
    Cardinal(Box<StepRuleKind>),
    Walk {
        inner: Box<StepRuleKind>,
        walk: f64,
    },
}

impl StepRuleKind {
    pub fn build(&self) -> BoxedStepRule {
        match self {
            StepRuleKind::Default => Box::new(DefaultStepRule),
            StepRuleKind::Landscape => Box::new(LandscapeStepRule),
            StepRuleKind::Cardinal(inner) => Box::new(CardinalStepRule::new(inner.build())),
            StepRuleKind::Walk { inner, walk } => Box::new(WalkStepRule::new(inner.build(), *walk)),
        }
    }
}

/// Strategy parameters handed to [`Algorithm::build`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub heuristic: HeuristicKind,
    pub step_rule: StepRuleKind,
    /// Frontier width of [`Algorithm::Beam`].
    pub beam_width: usize,
    /// Seed of the randomized algorithms; `None` draws one per build.
    pub seed: Option<u64>,
    pub dead_end: DeadEndPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            heuristic: HeuristicKind::default(),
            step_rule: StepRuleKind::default(),
            beam_width: 8,
            seed: None,
            dead_end: DeadEndPolicy::default(),
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_step_rule(mut self, step_rule: StepRuleKind) -> Self {
        self.step_rule = step_rule;
        self
    }

    pub fn with_beam_width(mut self, width: usize) -> Self {
        self.beam_width = width;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_dead_end_policy(mut self, policy: DeadEndPolicy) -> Self {
        self.dead_end = policy;
        self
    }

    /// A generator for random stream `stream`. Streams of a seeded config
    /// are reproducible and distinct from each other.
    fn rng(&self, stream: u64) -> StdRng {
        let seed = self
            .seed
            .unwrap_or_else(|| rand::rng().random_range(0..u64::MAX));
        StdRng::seed_from_u64(seed.wrapping_add(stream))
    }
}

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Every search strategy the engine offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    /// Breadth-first wave.
    Lee,
    Dijkstra,
    AStar,
    /// Heuristic first, accumulated cost on ties.
    AStarGreedy,
    /// Heuristic first, hop count on ties.
    AStarLee,
    DepthFirst,
    DistanceFirst,
    CostGreedy,
    Snake,
    BidirectLee,
    BidirectDijkstra,
    BidirectAStar,
    BidirectRandom,
    IdaStar,
    Random,
    DepthFirstRandom,
    Beam,
}

impl Algorithm {
    pub const ALL: [Algorithm; 17] = [
        Algorithm::Lee,
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::AStarGreedy,
        Algorithm::AStarLee,
        Algorithm::DepthFirst,
        Algorithm::DistanceFirst,
        Algorithm::CostGreedy,
        Algorithm::Snake,
        Algorithm::BidirectLee,
        Algorithm::BidirectDijkstra,
        Algorithm::BidirectAStar,
        Algorithm::BidirectRandom,
        Algorithm::IdaStar,
        Algorithm::Random,
        Algorithm::DepthFirstRandom,
        Algorithm::Beam,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Lee => "lee",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "a-star",
            Algorithm::AStarGreedy => "a-star-greedy",
            Algorithm::AStarLee => "a-star-lee",
            Algorithm::DepthFirst => "depth-first",
            Algorithm::DistanceFirst => "distance-first",
            Algorithm::CostGreedy => "cost-greedy",
            Algorithm::Snake => "snake",
            Algorithm::BidirectLee => "bidirect-lee",
            Algorithm::BidirectDijkstra => "bidirect-dijkstra",
            Algorithm::BidirectAStar => "bidirect-a-star",
            Algorithm::BidirectRandom => "bidirect-random",
            Algorithm::IdaStar => "ida-star",
            Algorithm::Random => "random",
            Algorithm::DepthFirstRandom => "depth-first-random",
            Algorithm::Beam => "beam",
        }
    }

    /// Whether results depend on the random generator.
    pub const fn is_randomized(self) -> bool {
        matches!(
            self,
            Algorithm::BidirectRandom | Algorithm::Random | Algorithm::DepthFirstRandom
        )
    }

    /// Whether the returned cost is minimal for an admissible heuristic.
    pub const fn is_cost_optimal(self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar | Algorithm::IdaStar)
    }

    /// Wire the strategies of `config` into a leg search.
    pub fn build<G: PathGraph>(self, config: &SearchConfig) -> BoxedSearch<G> {
        let h = || config.heuristic.build();
        let r = || config.step_rule.build();
        match self {
            Algorithm::Lee => Box::new(FrontierSearch::new(Fifo::new(), Wave, r())),
            Algorithm::Dijkstra => Box::new(FrontierSearch::new(MinHeap::new(), Relax, r())),
            Algorithm::AStar => Box::new(FrontierSearch::new(
                MinHeap::new(),
                AStarRank::new(h()),
                r(),
            )),
            Algorithm::AStarGreedy => Box::new(FrontierSearch::new(
                MinHeap::new(),
                GreedyRank::new(h()),
                r(),
            )),
            Algorithm::AStarLee => {
                Box::new(FrontierSearch::new(MinHeap::new(), LeeRank::new(h()), r()))
            }
            Algorithm::DepthFirst => Box::new(BacktrackSearch::new(FirstNeighbor)),
            Algorithm::DistanceFirst => Box::new(BacktrackSearch::new(Nearest::new(h()))),
            Algorithm::CostGreedy => Box::new(BacktrackSearch::new(Cheapest::new(r()))),
            Algorithm::Snake => Box::new(BacktrackSearch::new(search::Snake::new(h(), r()))),
            Algorithm::BidirectLee => Box::new(BidirectSearch::new(
                (Fifo::new(), Wave),
                (Fifo::new(), Wave),
                r(),
            )),
            Algorithm::BidirectDijkstra => Box::new(BidirectSearch::new(
                (MinHeap::new(), Relax),
                (MinHeap::new(), Relax),
                r(),
            )),
            Algorithm::BidirectAStar => Box::new(BidirectSearch::new(
                (MinHeap::new(), AStarRank::new(h())),
                (MinHeap::new(), AStarRank::new(h())),
                r(),
            )),
            Algorithm::BidirectRandom => Box::new(BidirectSearch::new(
                (RandomPool::new(config.rng(0)), Wave),
                (RandomPool::new(config.rng(1)), Wave),
                r(),
            )),
            Algorithm::IdaStar => Box::new(IdaStarSearch::new(h(), r())),
            Algorithm::Random => Box::new(FrontierSearch::new(
                RandomPool::new(config.rng(0)),
                Wave,
                r(),
            )),
            Algorithm::DepthFirstRandom => {
                Box::new(BacktrackSearch::new(RandomNeighbor::new(config.rng(0))))
            }
            Algorithm::Beam => Box::new(FrontierSearch::new(
                frontier::Beam::new(config.beam_width),
                GreedyRank::new(h()),
                r(),
            )),
        }
    }

    /// A process over `graph` running this algorithm with `config`.
    pub fn process<'g, G: PathGraph>(
        self,
        graph: &'g G,
        config: &SearchConfig,
    ) -> PathfindingProcess<'g, G, BoxedSearch<G>> {
        PathfindingProcess::new(graph, self.build(config))
            .with_name(self.name())
            .with_dead_end_policy(config.dead_end)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = PathfindingError;

    /// Case-insensitive; `_` and spaces count as `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| PathfindingError::UnknownAlgorithm(s.to_string()))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_roundtrip() {
        let config = SearchConfig::new()
            .with_heuristic(HeuristicKind::Diagonal.weighted(1.5))
            .with_step_rule(StepRuleKind::Cardinal(Box::new(StepRuleKind::Landscape)))
            .with_seed(9)
            .with_dead_end_policy(DeadEndPolicy::Partial);
        let json = serde_json::to_string(&config).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn algorithm_uses_its_name() {
        for a in Algorithm::ALL {
            let json = serde_json::to_string(&a).unwrap();
            assert_eq!(json, format!("\"{}\"", a.name()));
        }
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"beam_width": 3}"#).unwrap();
        assert_eq!(config.beam_width, 3);
        assert_eq!(config.heuristic, HeuristicKind::Manhattan);
    }
}
