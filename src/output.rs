use {
    anyhow::{Context, Result},
    log::warn,
    std::{fs::OpenOptions, io::Write, path::Path},
};

/// Ordered `key=value` result pairs, accumulated in memory and appended to
/// the host-supplied output file once at the end of the run.
#[derive(Debug, Default)]
pub struct OutputRecord {
    entries: Vec<(String, String)>,
}

impl OutputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.entries.push((key.to_string(), value.to_string()));
    }

    /// Appends the newline-joined entries to `path`, creating the file if
    /// needed. Writing nothing is not an error; a missing path only warns,
    /// since local runs have no output file.
    pub fn flush(&self, path: Option<&Path>) -> Result<()> {
        if self.entries.is_empty() {
            return Ok(());
        }
        let Some(path) = path else {
            warn!("no output file configured, discarding {} result(s)", self.entries.len());
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .context(format!("failed to open output file {}", path.display()))?;
        for (key, value) in &self.entries {
            writeln!(file, "{key}={value}")
                .context(format!("failed to write output file {}", path.display()))?;
        }
        Ok(())
    }
}
