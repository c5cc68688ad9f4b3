//! Integrity manifest utility for batterylife artifacts.
//!
//! Writes `manifest.json` with the SHA-256 digests of `scaler.json` and
//! `model.json`. The app verifies these digests before loading.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin write_manifest -- <artifact_dir>
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use batterylife::adapters::artifacts::{ArtifactManifest, MANIFEST_FILE};

fn parse_args() -> Result<PathBuf> {
    let mut args = env::args().skip(1);
    let Some(dir) = args.next() else {
        bail!("Usage: write_manifest <artifact_dir>");
    };
    if let Some(extra) = args.next() {
        bail!("Unexpected argument: {extra}");
    }

    let dir = PathBuf::from(dir);
    // Accept a path to one of the artifacts as well as the directory.
    if dir.is_file() {
        return dir
            .parent()
            .map(PathBuf::from)
            .context("Artifact path has no parent directory");
    }
    Ok(dir)
}

fn main() -> Result<()> {
    let artifact_dir = parse_args()?;

    let manifest = ArtifactManifest::for_dir(&artifact_dir)
        .with_context(|| format!("Failed to hash artifacts in {artifact_dir:?}"))?;
    let bytes = serde_json::to_vec_pretty(&manifest).context("Failed to serialize manifest")?;

    let manifest_path = artifact_dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, &bytes)
        .with_context(|| format!("Failed to write {manifest_path:?}"))?;

    println!("Wrote {manifest_path:?}");
    for (name, digest) in &manifest.files {
        println!("  {name}: {digest}");
    }

    Ok(())
}
