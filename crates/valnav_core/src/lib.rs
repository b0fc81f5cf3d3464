//! Public library API for navigating typed dynamic values with paths and patterns.

/// Value model, deterministic paths, wildcard patterns, and the matching engine.
pub mod nav;
