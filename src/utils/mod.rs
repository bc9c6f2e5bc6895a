pub mod dotnet;
pub mod git;
pub mod process;
pub mod project;
pub mod registry;

pub use dotnet::publish_package;
pub use git::tag_commit;
pub use project::{derive_package_name, derive_version};
pub use registry::is_new;
