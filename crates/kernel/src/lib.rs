//! Simulation guard: the single serialization point for world access.
//!
//! # Invariants
//! - At most one actor holds the world at any instant.
//! - Release happens on every exit path: access is scoped (RAII), never
//!   a manual acquire/release pair.
//! - Discipline violations (reentrant acquire by the holder, poisoned
//!   lock) are fatal; they indicate imminent state corruption.

mod guard;

pub use guard::{SimulationGuard, WorldAccess};
