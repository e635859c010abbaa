//! Site builder for lath.
//!
//! Assembles the global render data, composes pages through their layouts,
//! stages built output into the dist directory, and watches the template
//! tree for rebuild-on-change.

pub mod assets;
pub mod builder;
pub mod config;
pub mod data;
pub mod watch;

pub use assets::{stage, AssetError, StageReport};
pub use builder::{BuildConfig, BuildError, BuildReport, BuiltPage, PageOutcome, SiteBuilder};
pub use config::{ConfigError, SiteConfig};
pub use data::{BuildStamp, GlobalData};
pub use watch::FileWatcher;
