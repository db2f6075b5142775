//! Source location of a log call
//!
//! Locations are captured with `#[track_caller]`: every public emission
//! method, and each internal function between it and [`CallSite::capture`],
//! carries the attribute, so the recorded location is the user's call and
//! never a frame inside this crate.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    file: Cow<'static, str>,
    line: u32,
    column: u32,
}

impl CallSite {
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Location of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    #[inline]
    pub fn capture() -> Self {
        let location = Location::caller();
        Self {
            file: Cow::Borrowed(location.file()),
            line: location.line(),
            column: location.column(),
        }
    }

    /// Placeholder for events whose origin is not known
    pub fn unknown() -> Self {
        Self::new("<unknown>", 0, 0)
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn nested() -> CallSite {
        CallSite::capture()
    }

    #[test]
    fn test_capture_points_at_caller() {
        let line = line!() + 1;
        let site = CallSite::capture();
        assert_eq!(site.file(), file!());
        assert_eq!(site.line(), line);
    }

    #[test]
    fn test_capture_skips_tracked_frames() {
        let line = line!() + 1;
        let site = nested();
        assert_eq!(site.line(), line);
    }

    #[test]
    fn test_display() {
        let site = CallSite::new("src/lib.rs", 12, 5);
        assert_eq!(site.to_string(), "src/lib.rs:12");
    }
}
