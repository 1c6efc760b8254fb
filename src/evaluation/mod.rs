//! Route set evaluation.
//!
//! Scores a candidate route set in two terms:
//!
//! - **Operator cost**: minutes of street covered by buses, each corridor
//!   charged according to [`EdgeCharging`], plus a penalty per hop between
//!   nodes with no street.
//! - **User cost**: hotspot demand routed over the [`TransitSubgraph`] of
//!   covered streets (bus-discounted weights) by Dijkstra, with unreachable
//!   trips charged the unserved penalty.
//!
//! The weighted total is inverted into a fitness where higher is better.

mod cost;
mod evaluator;

pub use cost::{CostModel, EdgeCharging, BEST_FITNESS};
pub use evaluator::{CostBreakdown, Evaluation, FitnessEvaluator, TransitSubgraph};
