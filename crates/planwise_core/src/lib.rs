//! Ambient infrastructure shared by Planwise binaries.
//!
//! # Tracing
//!
//! [`TracingConfig`] installs the global `tracing` subscriber. Output goes
//! to stderr so that answers printed on stdout stay clean.
//!
//! ```
//! use planwise_core::{TracingConfig, TracingFormat};
//! use tracing::Level;
//!
//! TracingConfig::new()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Compact)
//!     .with_env_filter("planwise_agent=debug,reqwest=warn")
//!     .init();
//!
//! tracing::debug!("subscriber installed");
//! ```

mod logging;

pub use logging::{ParseFormatError, TracingConfig, TracingFormat};
