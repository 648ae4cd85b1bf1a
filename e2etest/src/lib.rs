use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::process::Stdio;

/// Subset of `cargo metadata --format-version 1`
#[derive(Serialize, Deserialize, Debug)]
pub struct CargoMetadataV1 {
    /// Full-path of the target directory
    target_directory: String,
    /// Full-path of the workspace directory
    workspace_root: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CargoLocateOutput {
    /// Full-path of the workspace root's Cargo.toml
    root: String,
}

pub fn run_shell_cmd(cmd: &str) -> Result<(String, String)> {
    run_shell_cmd_at(cmd, ".")
}

fn run_shell_cmd_at(cmd: &str, cwd: &str) -> Result<(String, String)> {
    let result = Command::new("bash")
        .current_dir(cwd)
        .arg("-c")
        .arg(cmd)
        .output()
        .with_context(|| format!("failed to execute shell cmd: {cmd}"))?;
    let stdout = String::from_utf8_lossy(&result.stdout);
    let stdout = stdout.trim().to_string();
    let stderr = String::from_utf8_lossy(&result.stderr);
    let stderr = stderr.trim().to_string();
    Ok((stdout, stderr))
}

pub fn run_shell_cmd_at_nocapture(cmd: &str, cwd: &str) -> Result<()> {
    eprintln!("Running: {cmd}");
    let status = Command::new("bash")
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .current_dir(cwd)
        .arg("-c")
        .arg(cmd)
        .status()
        .with_context(|| format!("failed to execute shell cmd: {cmd}"))?;
    if !status.success() {
        bail!("shell cmd failed with {status}: {cmd}");
    }
    Ok(())
}

fn get_first_line(s: &str) -> String {
    let s = s.split('\n').collect::<Vec<&str>>();
    // the first line of text should always be there, so this unwrap will not panic
    s.first().unwrap().to_string()
}

/// Where the built fontfix binary lives, plus how to run it.
#[derive(Debug)]
pub struct DevEnv {
    fontfix_bin_path: String,
}
impl DevEnv {
    /// A setup function to be called at the beginning of every test case.
    /// Locates the workspace with cargo and builds the release binary the
    /// tests drive. Concurrent calls are fine: cargo serializes the builds
    /// and the later ones are no-ops.
    pub fn new() -> Result<Self> {
        let cargo_version = get_first_line(&run_shell_cmd("cargo --version")?.0);
        println!("Cargo version : {cargo_version}");

        let cargo_workspace_root = &run_shell_cmd("cargo locate-project --workspace")?.0;
        let cargo_workspace_root: CargoLocateOutput =
            serde_json::from_str(cargo_workspace_root.as_str())?;
        let cargo_workspace_root = cargo_workspace_root.root;
        eprintln!("{cargo_workspace_root}");

        let cargo_metadata = &run_shell_cmd(&format!(
            "cargo metadata --format-version 1 --manifest-path {cargo_workspace_root}"
        ))?
        .0;
        let cargo_metadata: CargoMetadataV1 = serde_json::from_str(cargo_metadata.as_str())?;
        println!("Cargo metadata  : {cargo_metadata:?}");

        run_shell_cmd_at_nocapture(
            "cargo build --release -p fontfix",
            &cargo_metadata.workspace_root,
        )?;

        let mut bin_path = PathBuf::from(&cargo_metadata.target_directory);
        bin_path.push("release");
        bin_path.push("fontfix");
        let fontfix_bin_path = bin_path.to_string_lossy().to_string();

        Ok(Self { fontfix_bin_path })
    }
    pub fn fontfix_bin_path(&self) -> &str {
        &self.fontfix_bin_path
    }
    /// Runs the built binary with `args`, with `dir` as its working
    /// directory, capturing stdout, stderr and the exit status.
    pub fn run_fontfix_at(&self, dir: &Path, args: &[&str]) -> Result<Output> {
        Command::new(&self.fontfix_bin_path)
            .args(args)
            .current_dir(dir)
            .output()
            .with_context(|| format!("failed to spawn {}", self.fontfix_bin_path))
    }
}
