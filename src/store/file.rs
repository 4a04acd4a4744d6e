use anyhow::{Context, Result};
use fs2::FileExt;
use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::map::StoredPitMap;

/// Writes `map` to `path` as pretty JSON.
///
/// The write goes to a temporary sibling first and is renamed into place, all
/// under an exclusive lock on `<path>.lock`, so readers never observe a
/// partially written file.
pub fn save_map(path: &Path, map: &StoredPitMap) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create map directory {}", parent.display()))?;
    }

    let lock_path = lock_path(path);
    let lock_file = open_lock(&lock_path)?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("failed to lock map file {}", lock_path.display()))?;

    let result = save_map_inner(path, map);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!("failed to unlock map file {}: {}", lock_path.display(), err)
    });

    result
}

fn save_map_inner(path: &Path, map: &StoredPitMap) -> Result<()> {
    let json_bytes = serde_json::to_vec_pretty(map).context("failed to serialise pit map")?;

    let tmp_path = temp_path(path);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .with_context(|| format!("failed to open temporary map file {}", tmp_path.display()))?;
        tmp_file
            .write_all(&json_bytes)
            .context("failed to write pit map")?;
        tmp_file
            .sync_all()
            .context("failed to sync temporary map file")?;
    }

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "failed to move temporary map file {} -> {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    info!(
        "Pit map '{}' saved to {} ({} bytes)",
        map.name,
        path.display(),
        json_bytes.len()
    );
    Ok(())
}

/// Reads a map previously written by [`save_map`], under a shared lock.
pub fn load_map(path: &Path) -> Result<StoredPitMap> {
    let lock_path = lock_path(path);
    let lock_file = open_lock(&lock_path)?;
    lock_file
        .lock_shared()
        .with_context(|| format!("failed to acquire shared lock {}", lock_path.display()))?;

    let result = load_map_inner(path);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!("failed to unlock map file {}: {}", lock_path.display(), err)
    });

    result
}

fn load_map_inner(path: &Path) -> Result<StoredPitMap> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read map file {}", path.display()))?;
    let map: StoredPitMap = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse map file {}", path.display()))?;
    debug!(
        "Loaded pit map '{}' with {} elements from {}",
        map.name,
        map.canvas_data.len(),
        path.display()
    );
    Ok(map)
}

fn open_lock(lock_path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .with_context(|| format!("failed to open map lock file {}", lock_path.display()))
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

fn temp_path(target: &Path) -> PathBuf {
    let base = target.as_os_str().to_owned();
    let with_suffix = |suffix: String| {
        let mut name = base.clone();
        name.push(suffix);
        PathBuf::from(name)
    };

    let mut candidate = with_suffix(".tmp".to_string());
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = with_suffix(format!(".tmp{counter}"));
    }
    candidate
}
