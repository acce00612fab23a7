//! CLI infrastructure for training, playing against and inspecting agents

pub mod commands;
pub mod config;
pub mod output;
