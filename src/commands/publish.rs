use {
    crate::{
        config::Config,
        output::OutputRecord,
        utils::{dotnet, git, project, registry},
    },
    anyhow::{ensure, Context, Result},
    log::{error, info},
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// Final state of one configured project. A failure is terminal for that
/// project only and never aborts the run.
#[derive(Debug)]
pub enum ProjectOutcome {
    /// The project's version was resolved and it is either newly published
    /// or was already up to date.
    Done { project: PathBuf, version: String },
    Failed { project: PathBuf, reason: String },
}

/// Runs the whole release workflow: every configured project in order, then
/// the tagging decision, then the output flush.
///
/// Per-project failures are logged with the CI error marker and do not
/// change the exit code; only infrastructure failures (the output file
/// cannot be written) propagate.
pub async fn run(config: &Config) -> Result<()> {
    let client = reqwest::Client::new();
    let workdir = Path::new(".");
    let mut outcomes = vec![];

    for project_file in &config.project_files {
        info!("processing {}", project_file.display());
        let outcome = match process_project(config, &client, project_file, workdir).await {
            Ok(version) => ProjectOutcome::Done {
                project: project_file.clone(),
                version,
            },
            Err(err) => {
                let reason = format!("{err:#}");
                error!("##[error] {}: {reason}", project_file.display());
                ProjectOutcome::Failed {
                    project: project_file.clone(),
                    reason,
                }
            }
        };
        outcomes.push(outcome);
    }

    let mut outputs = OutputRecord::new();
    let versions = distinct_versions(&outcomes);
    match versions.as_slice() {
        [] => {}
        [version] if config.tag_commit => match git::tag_commit(version, &config.tag_format) {
            Ok(tag) => outputs.set("VERSION", &tag),
            Err(err) => error!("##[error] tagging failed: {err:#}"),
        },
        [version] => info!("tagging disabled, not tagging {version}"),
        _ => error!(
            "##[error] projects resolved {} distinct versions ({}), refusing to tag",
            versions.len(),
            versions.join(", ")
        ),
    }

    outputs.flush(config.output_file.as_deref())?;
    Ok(())
}

async fn process_project(
    config: &Config,
    client: &reqwest::Client,
    project_file: &Path,
    workdir: &Path,
) -> Result<String> {
    ensure!(
        project_file.exists(),
        "project file {} does not exist",
        project_file.display()
    );

    let version = resolve_version(config, project_file)?;
    let package = project::derive_package_name(project_file);
    info!("resolved {package} {version}");

    if registry::is_new(client, &config.nuget_source, &package, &version).await? {
        dotnet::publish_package(config, project_file, workdir)?;
        info!("published {package} {version}");
    } else {
        info!("{package} {version} is already published, nothing to do");
    }

    Ok(version)
}

fn resolve_version(config: &Config, project_file: &Path) -> Result<String> {
    // A static version bypasses the version file entirely.
    if let Some(version) = &config.static_version {
        return Ok(version.clone());
    }

    let version_file = config.version_file_for(project_file);
    ensure!(
        version_file.exists(),
        "version file {} does not exist",
        version_file.display()
    );
    let content = fs::read_to_string(version_file)
        .context(format!("failed to read {}", version_file.display()))?;

    // An empty capture is as useless as no match.
    project::derive_version(&content, &config.version_regex)?
        .filter(|version| !version.trim().is_empty())
        .context(format!(
            "no version matched in {}",
            version_file.display()
        ))
}

/// The ordered set of distinct versions across `Done` outcomes. Tagging is
/// only safe when this has exactly one element.
pub fn distinct_versions(outcomes: &[ProjectOutcome]) -> Vec<String> {
    let mut versions: Vec<String> = vec![];
    for outcome in outcomes {
        if let ProjectOutcome::Done { version, .. } = outcome {
            if !versions.contains(version) {
                versions.push(version.clone());
            }
        }
    }
    versions
}

#[cfg(test)]
mod tests {
    use {super::*, crate::config::DEFAULT_VERSION_REGEX, pretty_assertions::assert_eq};

    fn test_config() -> Config {
        Config {
            project_files: vec![],
            version_file: None,
            static_version: None,
            version_regex: DEFAULT_VERSION_REGEX.to_string(),
            tag_commit: true,
            tag_format: "v*".to_string(),
            nuget_key: String::new(),
            nuget_source: "https://api.nuget.org".to_string(),
            include_symbols: false,
            no_build: false,
            output_file: None,
        }
    }

    fn done(version: &str) -> ProjectOutcome {
        ProjectOutcome::Done {
            project: PathBuf::from("a.csproj"),
            version: version.to_string(),
        }
    }

    fn failed(reason: &str) -> ProjectOutcome {
        ProjectOutcome::Failed {
            project: PathBuf::from("b.csproj"),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_distinct_versions_identical_projects_collapse() {
        let versions = distinct_versions(&[done("1.2.0"), done("1.2.0")]);
        assert_eq!(versions, vec!["1.2.0"]);
    }

    #[test]
    fn test_distinct_versions_divergent_projects() {
        let versions = distinct_versions(&[done("1.2.0"), done("1.3.0")]);
        assert_eq!(versions, vec!["1.2.0", "1.3.0"]);
    }

    #[test]
    fn test_distinct_versions_ignores_failures() {
        let versions = distinct_versions(&[failed("no version matched"), done("1.2.0")]);
        assert_eq!(versions, vec!["1.2.0"]);

        assert_eq!(distinct_versions(&[failed("boom")]), Vec::<String>::new());
        assert_eq!(distinct_versions(&[]), Vec::<String>::new());
    }

    #[test]
    fn test_resolve_version_static_override() {
        let mut config = test_config();
        config.static_version = Some("9.9.9".to_string());

        // The version file is never touched, so a missing one is fine.
        let version = resolve_version(&config, Path::new("no/such/file.csproj")).unwrap();
        assert_eq!(version, "9.9.9");
    }

    #[test]
    fn test_resolve_version_from_project_file() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("A.csproj");
        fs::write(&project, "<Project>\n  <Version>1.2.0</Version>\n</Project>").unwrap();

        let version = resolve_version(&test_config(), &project).unwrap();
        assert_eq!(version, "1.2.0");
    }

    #[test]
    fn test_resolve_version_from_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("A.csproj");
        let props = dir.path().join("Directory.Build.props");
        fs::write(&project, "<Project></Project>").unwrap();
        fs::write(&props, "<Project>\n  <Version>4.5.6</Version>\n</Project>").unwrap();

        let mut config = test_config();
        config.version_file = Some(props);

        let version = resolve_version(&config, &project).unwrap();
        assert_eq!(version, "4.5.6");
    }

    #[test]
    fn test_resolve_version_no_match_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("A.csproj");
        fs::write(&project, "<Project></Project>").unwrap();

        let err = resolve_version(&test_config(), &project).unwrap_err();
        assert!(err.to_string().contains("no version matched"));
    }

    #[test]
    fn test_resolve_version_empty_match_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("A.csproj");
        fs::write(&project, "<Project>\n  <Version></Version>\n</Project>").unwrap();

        let err = resolve_version(&test_config(), &project).unwrap_err();
        assert!(err.to_string().contains("no version matched"));

        fs::write(&project, "<Project>\n  <Version>   </Version>\n</Project>").unwrap();
        assert!(resolve_version(&test_config(), &project).is_err());
    }

    #[test]
    fn test_resolve_version_missing_file_is_an_error() {
        let err = resolve_version(&test_config(), Path::new("no/such/file.csproj")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
