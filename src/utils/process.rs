use {
    anyhow::{anyhow, Result},
    std::process::{Command, Stdio},
};

/// Captured result of a finished child process: exit code plus both output
/// streams, so callers can classify the outcome instead of sniffing text
/// out of a raw string.
#[derive(Debug)]
pub struct ProcessOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a command with inherited stdio, for long-running steps whose
/// output should stream live. Fails on a non-zero exit.
pub fn run_inherited(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .status()
        .map_err(|e| anyhow!("failed to run `{program}`: {e}"))?;

    if !status.success() {
        return Err(anyhow!(
            "`{program} {}` exited with {status}",
            args.join(" ")
        ));
    }
    Ok(())
}

/// Runs a command with captured stdio, for steps whose output must be
/// inspected. The caller decides what a failure is.
pub fn run_captured(program: &str, args: &[&str]) -> Result<ProcessOutput> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| anyhow!("failed to run `{program}`: {e}"))?;

    Ok(ProcessOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}
