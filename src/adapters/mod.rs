//! Adapters implementing the ports for external participants.

pub mod human;

pub use human::{HumanPlayer, render_with_indices};
