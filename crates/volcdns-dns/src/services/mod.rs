//! Challenge services
//!
//! Value codec, zone resolution, solver configuration and the challenge
//! solver that ties them to a DNS provider.

pub mod codec;
pub mod config;
pub mod solver;
pub mod zone_resolver;

pub use config::{ChallengeAction, ChallengeRequest, SecretKeySelector, SolverConfig};
pub use solver::{ChallengeSolver, CleanupOutcome, SolverSettings, DEFAULT_TTL, SOLVER_NAME};
pub use zone_resolver::{extract_host, ZoneInfo};
