//! Ports (trait boundaries) between the episode driver and its participants.

pub mod learner;
pub mod observer;

pub use learner::Learner;
pub use observer::Observer;
