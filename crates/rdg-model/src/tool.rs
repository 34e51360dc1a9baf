//! Assessment tool variants and their block markers.
//!
//! Each tool owns two marker pairs bounding its admission and discharge
//! form blocks. Marker headers are matched exactly, ignoring ASCII case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const FIM_MARKERS: [&str; 4] = [
    "FIM admission form start",
    "FIM admission form end",
    "FIM discharge form start",
    "FIM discharge form end",
];

pub const MBI_MARKERS: [&str; 4] = [
    "MBI admission form start",
    "MBI admission form end",
    "MBI discharge form start",
    "MBI discharge form end",
];

/// Assessment instrument family selected for a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentTool {
    /// Functional Independence Measure.
    #[default]
    Fim,
    /// Modified Barthel Index.
    Mbi,
}

impl AssessmentTool {
    /// Resolve a user selection. Anything other than `MBI` selects FIM.
    pub fn from_selection(selection: Option<&str>) -> Self {
        match selection {
            Some(value) if value.trim().eq_ignore_ascii_case("MBI") => AssessmentTool::Mbi,
            _ => AssessmentTool::Fim,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentTool::Fim => "FIM",
            AssessmentTool::Mbi => "MBI",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            AssessmentTool::Fim => AssessmentTool::Mbi,
            AssessmentTool::Mbi => AssessmentTool::Fim,
        }
    }

    /// Start/end markers in admission-then-discharge order.
    pub fn markers(&self) -> &'static [&'static str; 4] {
        match self {
            AssessmentTool::Fim => &FIM_MARKERS,
            AssessmentTool::Mbi => &MBI_MARKERS,
        }
    }

    /// The (start, end) marker pairs of this tool.
    pub fn marker_pairs(&self) -> [(&'static str, &'static str); 2] {
        let markers = self.markers();
        [(markers[0], markers[1]), (markers[2], markers[3])]
    }

    /// Returns true if `header` is one of this tool's markers.
    pub fn is_marker(&self, header: &str) -> bool {
        let header = header.trim();
        self.markers()
            .iter()
            .any(|marker| marker.eq_ignore_ascii_case(header))
    }
}

impl fmt::Display for AssessmentTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FIM" => Ok(AssessmentTool::Fim),
            "MBI" => Ok(AssessmentTool::Mbi),
            _ => Err(format!("Unknown assessment tool: {s}")),
        }
    }
}

/// Tool detected from an existing header sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectedTool {
    Fim,
    Mbi,
    /// Markers of both tools are present.
    Mix,
    /// No marker of either tool is present.
    None,
}

impl DetectedTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectedTool::Fim => "FIM",
            DetectedTool::Mbi => "MBI",
            DetectedTool::Mix => "MIX",
            DetectedTool::None => "",
        }
    }
}

impl fmt::Display for DetectedTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_selection_defaults_to_fim() {
        assert_eq!(AssessmentTool::from_selection(None), AssessmentTool::Fim);
        assert_eq!(
            AssessmentTool::from_selection(Some("barthel")),
            AssessmentTool::Fim
        );
        assert_eq!(
            AssessmentTool::from_selection(Some(" mbi ")),
            AssessmentTool::Mbi
        );
    }

    #[test]
    fn markers_match_ignoring_case() {
        assert!(AssessmentTool::Fim.is_marker("fim ADMISSION form start"));
        assert!(!AssessmentTool::Fim.is_marker("MBI admission form start"));
        assert!(!AssessmentTool::Mbi.is_marker("MBI admission form"));
    }
}
