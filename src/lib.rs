//! Builds the awards site configuration from its hand-written source.
//!
//! The source lists nominations and their nominees. Nominees that point at a
//! Discord user id are resolved into display profiles through the Discord
//! API; image and video nominees are normalized locally. The result is
//! written as a single JSON document for the static site.
//!
//! ```no_run
//! # async fn example() -> awards_config::Result<()> {
//! use std::path::Path;
//!
//! use awards_config::{ConfigBuilder, DiscordClient, Settings};
//!
//! let settings = Settings::from_env()?;
//! let mut builder = ConfigBuilder::new(DiscordClient::new(&settings));
//! let summary = builder
//!     .run(Path::new("awards.source.json"), Path::new("awards.json"))
//!     .await?;
//! println!("{} nominees", summary.nominees);
//! # Ok(())
//! # }
//! ```

pub use builder::{BuildSummary, ConfigBuilder};
pub use client::DiscordClient;
pub use config::Settings;
pub use error::{BuildError, Result};
pub use provider::IdentityProvider;

pub mod builder;
mod client;
pub mod config;
pub mod discord;
pub mod error;
pub mod logging;
pub mod model;
mod provider;
