//! Package directory lookup
//!
//! Debug tool resolution only needs to know where an installed package lives.
//! Installation and version selection happen elsewhere.

use std::collections::HashMap;
use std::path::PathBuf;

/// Resolves a logical package name (e.g. `framework-freedom-e-sdk`) to its
/// installation directory.
pub trait PackageDirLookup {
    fn package_dir(&self, name: &str) -> Option<PathBuf>;
}

impl<F> PackageDirLookup for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn package_dir(&self, name: &str) -> Option<PathBuf> {
        self(name)
    }
}

/// Filesystem-backed lookup: explicit overrides first, then `<root>/<name>`.
#[derive(Debug, Clone, Default)]
pub struct PackageDirs {
    root: Option<PathBuf>,
    overrides: HashMap<String, PathBuf>,
}

impl PackageDirs {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            overrides: HashMap::new(),
        }
    }

    /// Pin a package to a specific directory.
    pub fn with_override(mut self, name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.overrides.insert(name.into(), dir.into());
        self
    }
}

impl PackageDirLookup for PackageDirs {
    fn package_dir(&self, name: &str) -> Option<PathBuf> {
        if let Some(dir) = self.overrides.get(name) {
            return Some(dir.clone());
        }
        let candidate = self.root.as_ref()?.join(name);
        candidate.is_dir().then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lookup_under_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("tool-openocd-riscv")).unwrap();

        let dirs = PackageDirs::new(Some(tmp.path().to_path_buf()));
        assert_eq!(
            dirs.package_dir("tool-openocd-riscv"),
            Some(tmp.path().join("tool-openocd-riscv"))
        );
        assert!(dirs.package_dir("framework-freedom-e-sdk").is_none());
    }

    #[test]
    fn test_override_wins() {
        let dirs = PackageDirs::new(None).with_override("framework-freedom-e-sdk", "/opt/sdk");
        assert_eq!(
            dirs.package_dir("framework-freedom-e-sdk"),
            Some(PathBuf::from("/opt/sdk"))
        );
        assert!(dirs.package_dir("tool-jlink").is_none());
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |name: &str| (name == "a").then(|| PathBuf::from("/a"));
        assert_eq!(lookup.package_dir("a"), Some(PathBuf::from("/a")));
        assert!(lookup.package_dir("b").is_none());
    }
}
