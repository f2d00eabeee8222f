//! Variant trait for game implementations.
//!
//! Variants implement `Variant` to define:
//! - The stacks on the table and their group order
//! - The opening deal
//! - Talon, refill and win overrides
//!
//! The engine calls into `Variant` but never interprets game-specific
//! concepts directly.

pub mod variant;

pub use variant::Variant;
