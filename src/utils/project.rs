use {
    anyhow::{Context, Result},
    regex::RegexBuilder,
    std::{fs, path::Path},
};

/// Derives the package name from a project file.
///
/// Looks for a single-line `<PackageId>` element, then a single-line
/// `<AssemblyName>` element, and falls back to the file stem
/// (`Foo.Bar.csproj` -> `Foo.Bar`). Always produces a name.
pub fn derive_package_name(project_file: &Path) -> String {
    if let Ok(content) = fs::read_to_string(project_file) {
        for element in ["PackageId", "AssemblyName"] {
            if let Some(name) = capture_element(&content, element) {
                return name;
            }
        }
    }

    project_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn capture_element(content: &str, element: &str) -> Option<String> {
    let re = RegexBuilder::new(&format!(r"^\s*<{element}>(.*)</{element}>\s*$"))
        .multi_line(true)
        .build()
        .ok()?;
    re.captures(content)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extracts a version from file content using the configured pattern,
/// applied as a multiline search. Returns the first capture group of the
/// first match, or `None` if nothing matches.
pub fn derive_version(content: &str, pattern: &str) -> Result<Option<String>> {
    let re = RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .context(format!("invalid version pattern `{pattern}`"))?;

    Ok(re
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string()))
}
