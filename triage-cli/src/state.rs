use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn triage_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".triage"))
}

pub fn ensure_triage_home() -> Result<PathBuf> {
    let dir = triage_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Read a task list from `path`, or from stdin when `path` is `-`.
pub fn read_task_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut s = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut s).context("read stdin")?;
        return Ok(s);
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
