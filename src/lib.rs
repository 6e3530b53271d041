//! Lettrics: writing-tool generation with display-ready output.
//!
//! A request names a tool (essay, poem, application letter, ...) and its
//! form fields. It is validated against the tool catalog, sent to the
//! tool's remote endpoint, and the reply is normalized into plain text with
//! pseudo-bold headings. When the remote side fails, a deterministic
//! template is returned instead, so callers always get content.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use lettrics::prelude::*;
//!
//! # async fn example() -> lettrics::error::Result<()> {
//! let config = Arc::new(LettricsConfig::load()?);
//! let generator = Generator::from_config(config)?;
//! let request = GenerationRequest::new(ToolKind::Poem)
//!     .with_topic("autumn")
//!     .with_param("style", "Haiku");
//! let outcome = generator.generate(&request).await?;
//! println!("{}", outcome.content());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod generation;
pub mod history;
pub mod prelude;
pub mod provider;
pub mod request;
pub mod types;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;
