//! Provenance sidecars for generated instance files.
//!
//! `gen` writes `<stem>.provenance.json` next to its output so a batch can be
//! regenerated: the sampler parameters and seed go in, together with the code
//! revision and the call site that produced it.

use anyhow::{Context, Result};
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Parameters of one `gen` run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenParams {
    pub count: usize,
    pub wires: usize,
    pub side: i64,
    pub seed: u64,
    /// Replay indices of the instances actually written, in file order.
    pub indices: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

/// Document written next to an artifact (or printed by `report`).
#[derive(Debug, Serialize)]
pub struct Provenance<P: Serialize> {
    pub code_rev: String,
    pub engine_version: &'static str,
    pub callsite: Callsite,
    pub params: P,
    pub outputs: Vec<String>,
}

impl<P: Serialize> Provenance<P> {
    #[track_caller]
    pub fn new(params: P, outputs: Vec<String>) -> Self {
        let loc = Location::caller();
        Self {
            code_rev: current_git_rev(),
            engine_version: wiring::VERSION,
            callsite: Callsite {
                file: loc.file(),
                line: loc.line(),
            },
            params,
            outputs,
        }
    }
}

/// Write `<artifact stem>.provenance.json` describing `artifact`.
#[track_caller]
pub fn write_sidecar<P: Serialize>(artifact: &Path, params: P) -> Result<PathBuf> {
    let path = provenance_path(artifact);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    let doc = Provenance::new(params, vec![artifact.to_string_lossy().into_owned()]);
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote provenance sidecar");
    Ok(path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("instances"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Build-time `GIT_COMMIT`, then the runtime variable, then `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
