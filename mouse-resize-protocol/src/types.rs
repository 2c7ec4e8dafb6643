//! Shared value types for remote-control requests

use std::fmt;

use serde::{Deserialize, Serialize};

/// Resize direction of a `resize-window` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Change the window width
    Horizontal,
    /// Change the window height
    Vertical,
    /// Pseudo-axis: go back to the default layout size
    Reset,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
            Axis::Reset => "reset",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_display_matches_wire_name() {
        for axis in [Axis::Horizontal, Axis::Vertical, Axis::Reset] {
            let json = serde_json::to_string(&axis).unwrap();
            assert_eq!(json, format!("\"{}\"", axis));
        }
    }

    #[test]
    fn test_axis_deserialize() {
        let axis: Axis = serde_json::from_str("\"vertical\"").unwrap();
        assert_eq!(axis, Axis::Vertical);
        assert!(serde_json::from_str::<Axis>("\"diagonal\"").is_err());
    }
}
