use std::fmt;

use glam::DVec2;
use toothmap_svg::NodeId;

use crate::rows::{Row, SplitPolicy, TOOTH_COUNT, ToothId};
use crate::transform::AffineTransform;

/// Conditions the run recovered from on its own
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    TransformNotFound,
    UnexpectedShapeCount { found: usize },
    /// Path has no `d` attribute and was left unlabeled
    MissingPathData { id: Option<String> },
    /// No move command in `d`; the anchor fell back to the origin
    AnchorDefaulted { id: Option<String> },
    NoShapes,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::TransformNotFound => write!(
                f,
                "No group with a transform matrix found, using identity (rows may be misordered)"
            ),
            Warning::UnexpectedShapeCount { found } => write!(
                f,
                "Expected {TOOTH_COUNT} paths, found {found}; splitting rows at the mean y instead"
            ),
            Warning::MissingPathData { id } => {
                write!(f, "Skipping path {} without path data", display_id(id))
            }
            Warning::AnchorDefaulted { id } => write!(
                f,
                "No move command in path {}, anchoring it at (0, 0)",
                display_id(id)
            ),
            Warning::NoShapes => write!(f, "No paths to label"),
        }
    }
}

fn display_id(id: &Option<String>) -> String {
    match id {
        Some(id) => format!("'{id}'"),
        None => "(no id)".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub node: NodeId,
    pub previous_id: Option<String>,
    pub tooth: ToothId,
    pub row: Row,
    /// Anchor after the transform was applied
    pub position: DVec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelReport {
    /// Paths found in the document, including skipped ones
    pub path_count: usize,
    /// `None` when no matrix group was found and identity was used
    pub transform: Option<AffineTransform>,
    /// `None` when there was nothing to partition
    pub policy: Option<SplitPolicy>,
    /// Top row first, each row left to right
    pub assignments: Vec<Assignment>,
    pub warnings: Vec<Warning>,
}

impl LabelReport {
    pub fn tooth_for(&self, node: NodeId) -> Option<ToothId> {
        self.assignments
            .iter()
            .find(|a| a.node == node)
            .map(|a| a.tooth)
    }
}
