use {
    super::process::{run_captured, run_inherited},
    crate::config::Config,
    anyhow::{anyhow, Context, Result},
    log::{debug, info},
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// Builds, packs, and pushes one project's package to the registry.
///
/// All artifacts land in (and are pushed from) `workdir`; stale packages
/// from an earlier project in the same run are removed first.
pub fn publish_package(config: &Config, project_file: &Path, workdir: &Path) -> Result<()> {
    clean_artifacts(workdir).context("failed to remove stale package artifacts")?;

    let project = project_file.to_string_lossy();

    if !config.no_build {
        run_inherited("dotnet", &["build", "-c", "Release", &project])
            .context(format!("build failed for {project}"))?;
    }

    let out_dir = workdir.to_string_lossy();
    let mut pack_args = vec!["pack", "-c", "Release"];
    if config.include_symbols {
        pack_args.extend(["--include-symbols", "-p:SymbolPackageFormat=snupkg"]);
    }
    pack_args.extend([project.as_ref(), "-o", out_dir.as_ref()]);
    run_inherited("dotnet", &pack_args).context(format!("pack failed for {project}"))?;

    let packages = collect_packages(workdir)?;
    if packages.is_empty() {
        return Err(anyhow!("pack produced no .nupkg file for {project}"));
    }
    for package in &packages {
        info!("packed {}", package.display());
        push_package(config, package)?;
    }

    Ok(())
}

/// Removes leftover `.nupkg`/`.snupkg` files from the working directory.
pub fn clean_artifacts(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_package_artifact(&path) {
            debug!("removing stale artifact {}", path.display());
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Enumerates the `.nupkg` files produced by the pack step. Symbol packages
/// are pushed implicitly by the registry tooling and are not listed.
pub fn collect_packages(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut packages = vec![];
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "nupkg") {
            packages.push(path);
        }
    }
    packages.sort();
    Ok(packages)
}

fn is_package_artifact(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "nupkg" || ext == "snupkg")
}

fn push_package(config: &Config, package: &Path) -> Result<()> {
    let package_arg = package.to_string_lossy();
    let source_arg = format!(
        "{}/v3/index.json",
        config.nuget_source.trim_end_matches('/')
    );

    let mut args = vec![
        "nuget",
        "push",
        package_arg.as_ref(),
        "--source",
        source_arg.as_str(),
        "--api-key",
        config.nuget_key.as_str(),
        "--skip-duplicate",
    ];
    if !config.include_symbols {
        args.push("--no-symbols");
    }

    info!("pushing {}", package.display());
    let output = run_captured("dotnet", &args)
        .context(format!("push failed for {}", package.display()))?;
    print!("{}", output.stdout);

    if !output.success() {
        return Err(anyhow!(
            "push exited with code {:?} for {}: {}",
            output.code,
            package.display(),
            output.stderr.trim()
        ));
    }
    // The exit code alone is not trusted: some registry tooling reports
    // failures only in its output text. The converse also holds, so this
    // scan can false-positive on benign output containing "error".
    if let Some(line) = find_error_line(&output.stdout) {
        return Err(anyhow!(
            "push output reported an error for {}: {line}",
            package.display()
        ));
    }

    Ok(())
}

/// First line of `text` containing the literal substring `error`
/// (case-sensitive).
pub fn find_error_line(text: &str) -> Option<&str> {
    text.lines().find(|line| line.contains("error"))
}
