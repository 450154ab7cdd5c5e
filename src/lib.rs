//! # cspace_rrt
//! Implements Rapidly-exploring Random Tree (RRT and RRT*) planners over
//! n-dimensional configuration spaces.
//!
//! The planning tree owns the node/parent/cost tables and exposes the
//! per-iteration step operations (sample, nearest, steer, insert, near-set,
//! rewire). Collision checking is supplied by the caller as a boolean
//! predicate over candidate configurations; rendering consumes read-only
//! snapshots of the tree and never drives it.

pub mod error;
pub mod params;
pub mod plot;
pub mod rrt;
pub mod rrt_star;
pub mod sampling;
pub mod solution;
pub mod tree;

pub use error::{PlanningError, PlanningResult};
pub use params::PlannerParams;
pub use rrt::{Rrt, StepOutcome};
pub use rrt_star::RrtStar;
pub use sampling::SampleSpace;
pub use solution::PlanSolution;
pub use tree::{Configuration, PlanningTree, TreeView};
