//! Episode driver and self-play training
//!
//! [`play_episode`] runs one game between any two [`Learner`](crate::ports::Learner)s;
//! [`TrainingSession`] owns two TD agents and repeats episodes with the
//! opener alternating, feeding [`Observer`](crate::ports::Observer)s along
//! the way.

pub mod episode;
pub mod observers;
pub mod training;

pub use episode::{EpisodeRecord, play_episode};
pub use observers::{MetricsObserver, ProgressObserver};
pub use training::{TrainingConfig, TrainingResult, TrainingSession};
