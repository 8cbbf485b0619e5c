//! Deterministic simulation module
//!
//! Ball physics and bounce detection. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per video frame)
//! - No I/O; the pipeline owns reading and writing
//! - Identical settings and pool always give an identical trace

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, boundary_collision, reflect_velocity};
pub use state::{BallState, BounceEvent, FrameRecord, Simulation, effective_radius, head_scale};
pub use tick::tick;
