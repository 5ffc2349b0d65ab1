//! Host platform facts that influence executable naming

use serde::Serialize;

/// The host a debug server will be launched on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HostPlatform {
    /// Windows family host (`.exe` suffixes, `bin/` layouts)
    pub windows: bool,
}

impl HostPlatform {
    /// Platform of the running process.
    pub const fn current() -> Self {
        Self { windows: cfg!(windows) }
    }

    pub const fn windows() -> Self {
        Self { windows: true }
    }

    pub const fn unix() -> Self {
        Self { windows: false }
    }

    /// Pick a value depending on the host family.
    pub fn select<T>(self, windows: T, other: T) -> T {
        if self.windows { windows } else { other }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_matches_target() {
        assert_eq!(HostPlatform::current().windows, cfg!(windows));
    }

    #[test]
    fn test_select() {
        assert_eq!(HostPlatform::windows().select("a.exe", "a"), "a.exe");
        assert_eq!(HostPlatform::unix().select("a.exe", "a"), "a");
    }
}
