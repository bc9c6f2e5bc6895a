use {
    super::process::run_captured,
    anyhow::{anyhow, Result},
    log::info,
};

/// The tag name for a version: the template's first `*` replaced by the
/// version, exactly once.
pub fn format_tag(template: &str, version: &str) -> String {
    template.replacen('*', version, 1)
}

/// Creates the tag locally and pushes it to the default remote. No rollback:
/// a failed push leaves the local tag behind.
pub fn tag_commit(version: &str, template: &str) -> Result<String> {
    let tag = format_tag(template, version);

    info!("tagging commit as {tag}");
    create_tag(&tag)?;
    push_tag(&tag)?;

    Ok(tag)
}

pub fn create_tag(tag: &str) -> Result<()> {
    let output = run_captured("git", &["tag", tag])?;
    if !output.success() {
        return Err(anyhow!(
            "failed to create tag {tag}: {}",
            output.stderr.trim()
        ));
    }
    Ok(())
}

pub fn push_tag(tag: &str) -> Result<()> {
    let output = run_captured("git", &["push", "origin", tag])?;
    if !output.success() {
        return Err(anyhow!("failed to push tag {tag}: {}", output.stderr.trim()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use {super::*, pretty_assertions::assert_eq, serial_test::serial, std::process::Command};

    #[test]
    fn test_format_tag() {
        assert_eq!(format_tag("v*", "2.3.0"), "v2.3.0");
        assert_eq!(format_tag("release-*", "1.0.0"), "release-1.0.0");
        // Only the first marker is replaced.
        assert_eq!(format_tag("*-*", "1.0.0"), "1.0.0-*");
        assert_eq!(format_tag("stable", "1.0.0"), "stable");
    }

    #[test]
    #[serial]
    fn test_create_tag() {
        let temp_dir = tempfile::tempdir().unwrap();
        // Restore the cwd before the tempdir is deleted, so tests outside
        // this serial group never spawn from a removed directory.
        let _restore_cwd = scopeguard::guard(std::env::current_dir().unwrap(), |original| {
            let _ = std::env::set_current_dir(original);
        });
        std::env::set_current_dir(temp_dir.path()).unwrap();
        for args in [
            vec!["init"],
            vec!["config", "user.email", "test@example.com"],
            vec!["config", "user.name", "test"],
            vec!["commit", "--allow-empty", "-m", "initial"],
        ] {
            Command::new("git").args(&args).output().unwrap();
        }

        create_tag("v1.2.3").unwrap();

        let tags = run_captured("git", &["tag", "-l"]).unwrap();
        assert_eq!(tags.stdout.trim(), "v1.2.3");

        // Duplicate tag creation fails.
        assert!(create_tag("v1.2.3").is_err());
    }
}
