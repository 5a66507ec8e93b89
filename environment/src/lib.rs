//! Detect the application's deployment environment from a process
//! environment variable.
//!
//! Two entry points share one reader:
//!
//! - [`Detect`] validates the value against the closed set of
//!   [`Environment`]s (`development`, `production`, `staging`, `testing`).
//! - [`EnvironmentMatcher`] matches the value, case-insensitively, against
//!   a caller-supplied mapping of logical environment names to expected
//!   values.
//!
//! Both read through [`ReadEnv`], so tests can substitute an
//! `InMemoryEnv` (feature `test-support`) for the process table.

pub mod config;
pub mod detect;
pub mod environment;
pub mod error;
pub mod matcher;
pub mod reader;
pub mod source;

pub use config::{MatcherConfig, DEFAULT_VARIABLE};
pub use detect::Detect;
pub use environment::Environment;
pub use error::{DetectError, DetectResult};
pub use matcher::EnvironmentMatcher;
pub use reader::EnvironmentReader;
pub use source::{ReadEnv, SystemEnv};

#[cfg(any(test, feature = "test-support"))]
pub use source::InMemoryEnv;

pub mod prelude {
    pub use crate::config::*;
    pub use crate::detect::*;
    pub use crate::environment::*;
    pub use crate::error::*;
    pub use crate::matcher::*;
    pub use crate::reader::*;
    pub use crate::source::*;
}
