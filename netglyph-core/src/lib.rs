/*!
 * netglyph core
 * WiFi state probing, tiers and launchers for desktop status bars
 */

pub mod backend;
pub mod config;
pub mod error;
pub mod launcher;
pub mod notify;
pub mod runner;
pub mod signal;

pub use backend::{Connection, Radio, Tool, WifiState};
pub use config::Config;
pub use error::{Error, Result};
pub use notify::Notifier;
pub use runner::{CommandRunner, SystemRunner};
pub use signal::Tier;
