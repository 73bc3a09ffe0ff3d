//! Splitting shapes into the upper and lower rows of the chart and numbering
//! them.
//!
//! Universal numbering runs left to right along the top row (1..16) and then
//! back right to left along the bottom row (17..32), so the leftmost shape of
//! the bottom row is 32.

use std::cmp::Ordering;
use std::fmt;

use glam::DVec2;

pub const TEETH_PER_ROW: usize = 16;
pub const TOOTH_COUNT: usize = 2 * TEETH_PER_ROW;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Row {
    Top,
    Bottom,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::Top => write!(f, "top"),
            Row::Bottom => write!(f, "bottom"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitPolicy {
    /// Exactly [`TOOTH_COUNT`] shapes: the 16 highest form the top row.
    Halves,
    /// Any other count: shapes above the mean y form the top row.
    MeanSplit { mean_y: f64 },
}

/// Shape indices per row, each in ascending y order
#[derive(Debug, Clone, PartialEq)]
pub struct RowSplit {
    pub top: Vec<usize>,
    pub bottom: Vec<usize>,
    pub policy: SplitPolicy,
}

/// `tooth-N` identifier.
///
/// Under the mean-split fallback a row can hold more than 16 shapes, so the
/// number may leave 1..=32 (and even reach zero or below); it is formatted
/// as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToothId(i64);

impl ToothId {
    pub fn number(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ToothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tooth-{}", self.0)
    }
}

/// Label chosen for the shape at `index`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLabel {
    pub index: usize,
    pub row: Row,
    pub tooth: ToothId,
}

/// Split mapped positions into two rows. Smaller y is higher on screen.
pub fn partition(positions: &[DVec2]) -> RowSplit {
    let mut by_y: Vec<usize> = (0..positions.len()).collect();
    by_y.sort_by(|&a, &b| compare(positions[a].y, positions[b].y));

    if positions.len() == TOOTH_COUNT {
        let bottom = by_y.split_off(TEETH_PER_ROW);
        return RowSplit {
            top: by_y,
            bottom,
            policy: SplitPolicy::Halves,
        };
    }

    let mean_y = if positions.is_empty() {
        0.0
    } else {
        positions.iter().map(|p| p.y).sum::<f64>() / positions.len() as f64
    };
    let (top, bottom): (Vec<usize>, Vec<usize>) = by_y
        .into_iter()
        .partition(|&i| positions[i].y < mean_y);

    RowSplit {
        top,
        bottom,
        policy: SplitPolicy::MeanSplit { mean_y },
    }
}

/// Number both rows left to right: the top row counts up from 1, the bottom
/// row counts down from 32. Top row labels come first in the result.
pub fn assign_labels(split: &RowSplit, positions: &[DVec2]) -> Vec<RowLabel> {
    let mut labels = Vec::with_capacity(split.top.len() + split.bottom.len());

    for (rank, index) in sorted_by_x(&split.top, positions).into_iter().enumerate() {
        labels.push(RowLabel {
            index,
            row: Row::Top,
            tooth: ToothId(rank as i64 + 1),
        });
    }
    for (rank, index) in sorted_by_x(&split.bottom, positions).into_iter().enumerate() {
        labels.push(RowLabel {
            index,
            row: Row::Bottom,
            tooth: ToothId(TOOTH_COUNT as i64 - rank as i64),
        });
    }

    labels
}

// Stable, so equal x keeps the incoming (y) order
fn sorted_by_x(indices: &[usize], positions: &[DVec2]) -> Vec<usize> {
    let mut sorted = indices.to_vec();
    sorted.sort_by(|&a, &b| compare(positions[a].x, positions[b].x));
    sorted
}

// Signed zeros compare equal so they keep their incoming order
fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
