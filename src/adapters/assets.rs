//! Static image assets: background, banner and band icons.
//!
//! The terminal UI never decodes these files. They are checked at startup so
//! a broken install fails loudly instead of rendering an incomplete screen.

use std::path::{Path, PathBuf};

use crate::domain::SeverityBand;

/// Page background image.
pub const BACKGROUND: &str = "background.jpg";

/// Title banner image.
pub const BANNER: &str = "battery_banner.png";

/// Every asset that must be present.
pub const REQUIRED_ASSETS: [&str; 5] = [BACKGROUND, BANNER, "high.png", "medium.png", "low.png"];

/// Errors raised while checking assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Missing asset '{name}' at {path:?}")]
    Missing { name: String, path: PathBuf },

    #[error("Asset '{name}' at {path:?} is empty")]
    Empty { name: String, path: PathBuf },

    #[error("Failed to read asset '{name}' at {path:?}: {source}")]
    Io {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A checked asset file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub name: &'static str,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// All required assets, checked once at startup.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    dir: PathBuf,
    assets: Vec<Asset>,
}

impl AssetCatalog {
    /// Check every required asset in `dir`.
    ///
    /// # Errors
    /// Returns the first missing, empty or unreadable asset.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let mut assets = Vec::with_capacity(REQUIRED_ASSETS.len());

        for name in REQUIRED_ASSETS {
            let path = dir.join(name);
            let metadata = match std::fs::metadata(&path) {
                Ok(m) if m.is_file() => m,
                Ok(_) => {
                    return Err(AssetError::Missing {
                        name: name.to_string(),
                        path,
                    })
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(AssetError::Missing {
                        name: name.to_string(),
                        path,
                    })
                }
                Err(source) => {
                    return Err(AssetError::Io {
                        name: name.to_string(),
                        path,
                        source,
                    })
                }
            };

            if metadata.len() == 0 {
                return Err(AssetError::Empty {
                    name: name.to_string(),
                    path,
                });
            }

            assets.push(Asset {
                name,
                path,
                size_bytes: metadata.len(),
            });
        }

        tracing::info!("Checked {} assets in {:?}", assets.len(), dir);

        Ok(Self {
            dir: dir.to_path_buf(),
            assets,
        })
    }

    /// Directory the assets were loaded from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn banner(&self) -> Option<&Asset> {
        self.get(BANNER)
    }

    /// Icon shown next to a severity band.
    #[must_use]
    pub fn icon(&self, band: SeverityBand) -> Option<&Asset> {
        self.get(band.icon_asset())
    }
}

#[cfg(test)]
pub(crate) fn write_test_assets(dir: &Path) {
    for name in REQUIRED_ASSETS {
        std::fs::write(dir.join(name), b"\x89PNG\r\n\x1a\n").expect("write asset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_all_assets_present() {
        let dir = tempdir().expect("tempdir");
        write_test_assets(dir.path());

        let catalog = AssetCatalog::load(dir.path()).expect("assets should load");
        assert_eq!(catalog.banner().map(|a| a.name), Some(BANNER));
        assert_eq!(
            catalog.icon(SeverityBand::Moderate).map(|a| a.name),
            Some("medium.png")
        );
        assert_eq!(catalog.get(BACKGROUND).map(|a| a.size_bytes), Some(8));
    }

    #[test]
    fn test_missing_asset_named() {
        let dir = tempdir().expect("tempdir");
        write_test_assets(dir.path());
        std::fs::remove_file(dir.path().join("low.png")).expect("remove");

        match AssetCatalog::load(dir.path()) {
            Err(AssetError::Missing { name, .. }) => assert_eq!(name, "low.png"),
            other => panic!("expected missing asset, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_asset_rejected() {
        let dir = tempdir().expect("tempdir");
        write_test_assets(dir.path());
        std::fs::write(dir.path().join(BACKGROUND), b"").expect("truncate");

        assert!(matches!(
            AssetCatalog::load(dir.path()),
            Err(AssetError::Empty { .. })
        ));
    }

    #[test]
    fn test_bundled_assets_present() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("images");
        assert!(AssetCatalog::load(&dir).is_ok());
    }
}
