//! # Chunk Task Module
//!
//! Cooperative, resumable chunk work.
//!
//! Long operations (first-time terrain generation plus the initial face and
//! mesh passes) never run to completion inside a single update tick.
//! Instead they are expressed as step tasks: each call to `step()` performs
//! one bounded unit of work (a terrain column or a mesh row) and reports
//! whether the task wants to be resumed. The world advances every in-flight
//! task by a configured step budget per tick, so the caller is never blocked
//! for a full chunk's generation time.
//!
//! Exactly one task exists per chunk at a time, keyed by coordinate in the
//! world's task map.

pub mod chunk_generation_task;

/// Outcome of one bounded unit of task work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The task holds a resume cursor and wants another step.
    InProgress,
    /// The task has run to completion and can be dropped.
    Done,
}
