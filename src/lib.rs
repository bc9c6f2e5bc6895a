//! nuget-publish - NuGet release automation
//!
//! This library implements a single linear release workflow: resolve a
//! version from project metadata, check the registry's flat-container index
//! for that exact version string, build/pack/push the package when it is
//! new, and optionally tag the commit once all configured projects agree on
//! one version.
//!
//! # Examples
//!
//! ## Deriving a package name
//!
//! ```no_run
//! use std::path::Path;
//! use nuget_publish::utils::project::derive_package_name;
//!
//! let name = derive_package_name(Path::new("src/Foo.Bar/Foo.Bar.csproj"));
//! println!("package: {name}");
//! ```
//!
//! ## Checking version novelty
//!
//! ```no_run
//! use nuget_publish::utils::registry::is_new;
//!
//! # async fn check() -> anyhow::Result<()> {
//! let client = reqwest::Client::new();
//! let new = is_new(&client, "https://api.nuget.org", "Foo.Bar", "1.2.0").await?;
//! println!("1.2.0 is new: {new}");
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod output;
pub mod utils;

pub use commands::publish;
pub use config::Config;
pub use output::OutputRecord;

pub type Result<T> = anyhow::Result<T>;
