//! Board catalog
//!
//! Loads board manifests (`<id>.json`) from a directory and hands out copies
//! decorated with their resolved debug tools.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{DebugConfigError, Result};
use crate::manifest::BoardManifest;
use crate::packages::PackageDirLookup;
use crate::platform::HostPlatform;
use crate::resolver::resolve_debug_tools;

#[derive(Debug, Clone, Default)]
pub struct BoardCatalog {
    boards: BTreeMap<String, BoardManifest>,
}

impl BoardCatalog {
    /// Load every `*.json` manifest in `boards_dir`.
    ///
    /// A missing directory gives an empty catalog; broken manifests are skipped.
    pub fn load(boards_dir: &Path) -> Result<Self> {
        let mut catalog = Self::default();
        if !boards_dir.exists() {
            warn!("Boards directory {} does not exist", boards_dir.display());
            return Ok(catalog);
        }

        let pattern = boards_dir.join("*.json");
        let pattern_str = pattern.to_string_lossy();
        let entries = glob::glob(&pattern_str).map_err(|e| DebugConfigError::InvalidManifest {
            path: pattern.clone(),
            reason: format!("Invalid glob pattern: {}", e),
        })?;

        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Glob error: {}", e);
                    continue;
                }
            };
            match BoardManifest::load(&path) {
                Ok(board) => catalog.insert(board),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        info!("Loaded {} board manifests from {}", catalog.len(), boards_dir.display());
        Ok(catalog)
    }

    pub fn insert(&mut self, board: BoardManifest) {
        self.boards.insert(board.id.clone(), board);
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Undecorated manifest as loaded.
    pub fn get(&self, id: &str) -> Option<&BoardManifest> {
        self.boards.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.boards.keys().map(String::as_str)
    }

    /// Resolve debug tools for one board.
    pub fn board(
        &self,
        id: &str,
        host: HostPlatform,
        packages: &dyn PackageDirLookup,
    ) -> Result<BoardManifest> {
        let mut board = self
            .get(id)
            .cloned()
            .ok_or_else(|| DebugConfigError::BoardNotFound(id.to_string()))?;
        resolve_debug_tools(&mut board, host, packages)?;
        Ok(board)
    }

    /// Decorated boards: the one named by `id`, or all of them in id order.
    pub fn get_boards(
        &self,
        id: Option<&str>,
        host: HostPlatform,
        packages: &dyn PackageDirLookup,
    ) -> Result<Vec<BoardManifest>> {
        match id {
            Some(id) => Ok(vec![self.board(id, host, packages)?]),
            None => self
                .ids()
                .map(|id| self.board(id, host, packages))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn no_packages(_: &str) -> Option<PathBuf> {
        None
    }

    fn write_boards(dir: &Path) {
        fs::write(
            dir.join("hifive1-revb.json"),
            r#"{"name": "HiFive1 Rev B", "upload": {"protocols": ["jlink"]},
                "debug": {"jlink_device": "FE310", "onboard_tools": ["jlink"]}}"#,
        )
        .unwrap();
        fs::write(
            dir.join("e31.json"),
            r#"{"name": "E31 Core", "build": {"mabi": "ilp32"},
                "debug": {"qemu_machine": "sifive_e", "renode_machine": "sifive-e31"}}"#,
        )
        .unwrap();
        fs::write(dir.join("broken.json"), "{").unwrap();
        fs::write(dir.join("README.md"), "not a board").unwrap();
    }

    #[test]
    fn test_load_skips_broken() {
        let tmp = TempDir::new().unwrap();
        write_boards(tmp.path());
        let catalog = BoardCatalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["e31", "hifive1-revb"]);
        assert_eq!(catalog.get("e31").unwrap().name, "E31 Core");
    }

    #[test]
    fn test_load_missing_dir() {
        let catalog = BoardCatalog::load(Path::new("/nonexistent/boards")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_get_boards_decorates_copies() {
        let tmp = TempDir::new().unwrap();
        write_boards(tmp.path());
        let catalog = BoardCatalog::load(tmp.path()).unwrap();

        let all = catalog.get_boards(None, HostPlatform::unix(), &no_packages).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].debug.tools.keys().collect::<Vec<_>>(), vec!["qemu", "renode"]);
        assert_eq!(all[1].debug.tools.keys().collect::<Vec<_>>(), vec!["jlink"]);

        assert!(catalog.get("hifive1-revb").unwrap().debug.tools.is_empty());
    }

    #[test]
    fn test_get_single_board() {
        let tmp = TempDir::new().unwrap();
        write_boards(tmp.path());
        let catalog = BoardCatalog::load(tmp.path()).unwrap();

        let one = catalog
            .get_boards(Some("hifive1-revb"), HostPlatform::unix(), &no_packages)
            .unwrap();
        assert_eq!(one.len(), 1);
        assert!(one[0].debug.tools["jlink"].onboard);

        let err = catalog
            .get_boards(Some("nope"), HostPlatform::unix(), &no_packages)
            .unwrap_err();
        assert!(matches!(err, DebugConfigError::BoardNotFound(_)));
    }

    #[test]
    fn test_get_boards_propagates_authoring_error() {
        let mut catalog = BoardCatalog::default();
        catalog.insert(
            BoardManifest::from_json("bad", r#"{"upload": {"protocols": ["jlink"]}}"#).unwrap(),
        );
        let err = catalog.get_boards(None, HostPlatform::unix(), &no_packages).unwrap_err();
        assert_eq!(err.board(), Some("bad"));
    }
}
