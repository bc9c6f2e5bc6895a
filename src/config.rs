use std::{
    env,
    path::{Path, PathBuf},
};

pub const DEFAULT_VERSION_REGEX: &str = r"^\s*<Version>(.*)</Version>\s*$";
pub const DEFAULT_TAG_FORMAT: &str = "v*";
pub const DEFAULT_NUGET_SOURCE: &str = "https://api.nuget.org";

/// Run configuration, resolved once at startup from the process environment
/// and immutable afterwards.
///
/// Inputs follow the GitHub Actions convention: `INPUT_<NAME>` is preferred
/// over the bare `<NAME>` when both are set. Empty values count as unset.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_files: Vec<PathBuf>,
    pub version_file: Option<PathBuf>,
    pub static_version: Option<String>,
    pub version_regex: String,
    pub tag_commit: bool,
    pub tag_format: String,
    pub nuget_key: String,
    pub nuget_source: String,
    pub include_symbols: bool,
    pub no_build: bool,
    pub output_file: Option<PathBuf>,
}

impl Config {
    /// Infallible by design: a missing project list yields zero loop
    /// iterations, a malformed regex fails the affected project at use time.
    pub fn from_env() -> Self {
        let project_files = input("PROJECT_FILE_PATH")
            .map(|list| {
                list.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            project_files,
            version_file: input("VERSION_FILE_PATH").map(PathBuf::from),
            static_version: input("VERSION_STATIC"),
            version_regex: input("VERSION_REGEX")
                .unwrap_or_else(|| DEFAULT_VERSION_REGEX.to_string()),
            tag_commit: input("TAG_COMMIT").map_or(true, |v| parse_bool(&v)),
            tag_format: input("TAG_FORMAT").unwrap_or_else(|| DEFAULT_TAG_FORMAT.to_string()),
            nuget_key: input("NUGET_KEY").unwrap_or_default(),
            nuget_source: input("NUGET_SOURCE")
                .unwrap_or_else(|| DEFAULT_NUGET_SOURCE.to_string()),
            include_symbols: input("INCLUDE_SYMBOLS").is_some_and(|v| parse_bool(&v)),
            no_build: input("NO_BUILD").is_some_and(|v| parse_bool(&v)),
            // Supplied by the host runner, never INPUT_-prefixed.
            output_file: env::var("GITHUB_OUTPUT")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// The file the version is extracted from: the configured override, or
    /// the project file itself.
    pub fn version_file_for<'a>(&'a self, project_file: &'a Path) -> &'a Path {
        self.version_file.as_deref().unwrap_or(project_file)
    }
}

fn input(name: &str) -> Option<String> {
    env::var(format!("INPUT_{name}"))
        .or_else(|_| env::var(name))
        .ok()
        .filter(|value| !value.is_empty())
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}
