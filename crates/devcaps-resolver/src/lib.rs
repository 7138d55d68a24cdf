//! Devcaps Resolver - Probe aggregation and the ready transition
//!
//! The resolver runs a fixed set of independent capability probes against a
//! [`devcaps_platform::Platform`], accumulates results into a
//! [`devcaps_core::Snapshot`], and makes the union visible to readers
//! exactly once all probes of a pass have completed. Probes are spawned as
//! tasks and joined; the outstanding count is derived from the task set,
//! never tracked by hand.

pub mod pass;
pub mod resolver;

pub use pass::PassKind;
pub use resolver::{CapabilityResolver, ResolverEvent};
