pub mod agent;
pub mod board;
pub mod config;
pub mod game_repr;
pub mod orchestrator;
