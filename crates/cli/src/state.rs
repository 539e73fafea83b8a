use anyhow::{Context, Result};
use respect_issuance::{FractalRespect, IssuanceSnapshot};
use respect_types::Clock;
use tempfile::NamedTempFile;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub fn load(path: &Path, clock: Arc<dyn Clock>) -> Result<FractalRespect> {
    let raw = fs::read_to_string(path).with_context(|| {
        format!(
            "failed to read state {} (run `respect init` first)",
            path.display()
        )
    })?;
    let snapshot: IssuanceSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse state {}", path.display()))?;
    FractalRespect::from_snapshot(snapshot, clock)
        .with_context(|| format!("state {} is inconsistent", path.display()))
}

/// Replace the state file atomically: the snapshot is written to a sibling
/// temp file and renamed over `path`, so the old state survives a crash.
pub fn save(path: &Path, respect: &FractalRespect) -> Result<()> {
    let json = serde_json::to_string_pretty(&respect.snapshot())?;
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
            parent
        }
        None => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .with_context(|| format!("failed to write state {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("failed to replace state {}", path.display()))?;
    Ok(())
}
