pub mod client;
pub mod colors;
pub mod config;
pub mod demo;
pub mod domains;
pub mod state;

pub use client::{CityClient, WheelOutcome};
pub use config::{ConfigError, ViewerConfig};
pub use state::{AppState, SystemState, UiMode};
