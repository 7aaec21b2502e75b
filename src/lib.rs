//! unidrop - a headless page for the single-open dropdown engine
//!
//! Mounts [`unidrop_core`] dropdowns on a simulated element tree and replays
//! clicks, key presses and host actions described in a JSON scenario.

mod app;
mod cli;
mod config;
mod error;
mod geometry;
mod message;
mod page;

pub use app::{DropdownReport, Report, Simulator};
pub use cli::CliArgs;
pub use config::{ConfigError, DropdownConfig, LogLevel, SimConfig, CONFIG_VERSION};
pub use error::SimError;
pub use geometry::{Point, Rectangle, Size};
pub use message::Step;
pub use page::{ChannelCount, ChannelStats, Document, DocumentChannels, PageElement};
