use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-stage output counts of one processed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSummary {
    pub width: usize,
    pub height: usize,
    pub contours: usize,
    pub filtered_contours: usize,
    pub stripes: usize,
    pub left: usize,
    pub right: usize,
    pub unclassified: usize,
    pub targets: usize,
}

impl fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}: contours={} filtered={} stripes={} left={} right={} neither={} targets={}",
            self.width,
            self.height,
            self.contours,
            self.filtered_contours,
            self.stripes,
            self.left,
            self.right,
            self.unclassified,
            self.targets
        )
    }
}
