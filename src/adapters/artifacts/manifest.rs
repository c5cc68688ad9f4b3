//! Integrity manifest: SHA-256 digests of the artifact files.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{ArtifactLoadError, MANIFEST_FILE, MODEL_FILE, SCALER_FILE};

/// Manifest format version.
pub const MANIFEST_VERSION: u32 = 1;

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// `manifest.json`: file name to SHA-256 hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub version: u32,
    pub files: BTreeMap<String, String>,
}

impl ArtifactManifest {
    /// Hash both artifacts in `dir`.
    ///
    /// # Errors
    /// Returns error if either artifact is missing or unreadable.
    pub fn for_dir(dir: &Path) -> Result<Self, ArtifactLoadError> {
        let mut files = BTreeMap::new();
        for name in [SCALER_FILE, MODEL_FILE] {
            let bytes = read_bytes(&dir.join(name))?;
            files.insert(name.to_string(), sha256_hex(&bytes));
        }

        Ok(Self {
            version: MANIFEST_VERSION,
            files,
        })
    }

    /// Verify the artifacts in `dir` against its manifest.
    ///
    /// Returns `Ok(false)` when no manifest is present.
    ///
    /// # Errors
    /// Returns `ArtifactLoadError::Integrity` if the manifest is unsupported,
    /// omits an artifact, or any digest differs.
    pub fn verify_dir(dir: &Path) -> Result<bool, ArtifactLoadError> {
        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Ok(false);
        }

        let manifest: ArtifactManifest = super::read_json(&manifest_path)?;
        if manifest.version != MANIFEST_VERSION {
            return Err(ArtifactLoadError::Integrity {
                file: MANIFEST_FILE.to_string(),
                reason: format!("unsupported manifest version {}", manifest.version),
            });
        }

        for name in [SCALER_FILE, MODEL_FILE] {
            let expected = manifest
                .files
                .get(name)
                .ok_or_else(|| ArtifactLoadError::Integrity {
                    file: name.to_string(),
                    reason: "not listed in manifest".to_string(),
                })?;

            let actual = sha256_hex(&read_bytes(&dir.join(name))?);
            if !actual.eq_ignore_ascii_case(expected.trim()) {
                return Err(ArtifactLoadError::Integrity {
                    file: name.to_string(),
                    reason: "digest mismatch".to_string(),
                });
            }
        }

        Ok(true)
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ArtifactLoadError> {
    if !path.is_file() {
        return Err(ArtifactLoadError::Missing {
            path: path.to_path_buf(),
        });
    }
    std::fs::read(path).map_err(|source| ArtifactLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use tempfile::tempdir;

    fn write_manifest(dir: &Path, manifest: &ArtifactManifest) {
        let json = serde_json::to_vec_pretty(manifest).expect("serialize manifest");
        std::fs::write(dir.join(MANIFEST_FILE), json).expect("write manifest");
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_absent_manifest_is_not_an_error() {
        let dir = tempdir().expect("tempdir");
        assert!(!ArtifactManifest::verify_dir(dir.path()).expect("verify"));
    }

    #[test]
    fn test_roundtrip_verifies() {
        let dir = tempdir().expect("tempdir");
        write(dir.path(), SCALER_FILE, &scaler_json());
        write(dir.path(), MODEL_FILE, &linear_json());

        let manifest = ArtifactManifest::for_dir(dir.path()).expect("manifest");
        write_manifest(dir.path(), &manifest);

        assert!(ArtifactManifest::verify_dir(dir.path()).expect("verify"));
    }

    #[test]
    fn test_tampered_artifact_fails() {
        let dir = tempdir().expect("tempdir");
        write(dir.path(), SCALER_FILE, &scaler_json());
        write(dir.path(), MODEL_FILE, &linear_json());
        let manifest = ArtifactManifest::for_dir(dir.path()).expect("manifest");
        write_manifest(dir.path(), &manifest);

        let mut model = linear_json();
        model["estimator"]["intercept"] = 99.0.into();
        write(dir.path(), MODEL_FILE, &model);

        match ArtifactManifest::verify_dir(dir.path()) {
            Err(ArtifactLoadError::Integrity { file, .. }) => assert_eq!(file, MODEL_FILE),
            other => panic!("expected integrity failure, got {other:?}"),
        }
    }

    #[test]
    fn test_unlisted_artifact_fails() {
        let dir = tempdir().expect("tempdir");
        write(dir.path(), SCALER_FILE, &scaler_json());
        write(dir.path(), MODEL_FILE, &linear_json());
        let mut manifest = ArtifactManifest::for_dir(dir.path()).expect("manifest");
        manifest.files.remove(SCALER_FILE);
        write_manifest(dir.path(), &manifest);

        assert!(matches!(
            ArtifactManifest::verify_dir(dir.path()),
            Err(ArtifactLoadError::Integrity { .. })
        ));
    }
}
