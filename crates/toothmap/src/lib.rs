//! Label the teeth of a dental chart SVG.
//!
//! Each `<path>` is reduced to one anchor point (the target of its first move
//! command), mapped through the chart's group transform, sorted into an upper
//! and a lower row and given a `tooth-N` id following universal numbering.

use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::DVec2;
use toothmap_svg::SvgDocument;

pub mod anchor;
pub mod report;
pub mod rows;
pub mod shapes;
pub mod transform;

pub use report::{Assignment, LabelReport, Warning};
pub use rows::{Row, SplitPolicy, ToothId};
pub use transform::AffineTransform;

/// Chart labeled when no file is given
pub const DEFAULT_CHART_PATH: &str = "public/dental_chart-01.svg";

#[derive(Debug, Clone)]
pub struct LabelConfig {
    pub input: PathBuf,
    /// Where to write the result; the input is overwritten when `None`
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_CHART_PATH),
            output: None,
            dry_run: false,
        }
    }
}

impl LabelConfig {
    pub fn output_path(&self) -> &std::path::Path {
        self.output.as_deref().unwrap_or(&self.input)
    }
}

/// Assign `tooth-N` ids to every path of `doc`, overwriting their `id`
/// attributes in place.
pub fn label_document(doc: &mut SvgDocument) -> LabelReport {
    let mut warnings = Vec::new();

    let located = transform::locate_transform(doc);
    match located {
        Some(t) => log::debug!("Using group transform {t}"),
        None => warnings.push(Warning::TransformNotFound),
    }
    let transform = located.unwrap_or_default();

    let found = shapes::locate_shapes(doc);
    let path_count = found.len();
    log::debug!("Found {path_count} paths");
    if path_count != rows::TOOTH_COUNT {
        warnings.push(Warning::UnexpectedShapeCount { found: path_count });
    }

    let mut shapes = Vec::with_capacity(found.len());
    let mut positions = Vec::with_capacity(found.len());
    for shape in found {
        let Some(d) = shape.path_data.as_deref() else {
            warnings.push(Warning::MissingPathData { id: shape.id });
            continue;
        };
        let anchor = anchor::extract_anchor(d).unwrap_or_else(|| {
            warnings.push(Warning::AnchorDefaulted {
                id: shape.id.clone(),
            });
            DVec2::ZERO
        });
        positions.push(transform.map(anchor));
        shapes.push(shape);
    }

    if shapes.is_empty() {
        warnings.push(Warning::NoShapes);
        return LabelReport {
            path_count,
            transform: located,
            policy: None,
            assignments: Vec::new(),
            warnings,
        };
    }

    let split = rows::partition(&positions);
    log::debug!(
        "Row split {:?}: {} top, {} bottom",
        split.policy,
        split.top.len(),
        split.bottom.len()
    );

    let assignments = rows::assign_labels(&split, &positions)
        .into_iter()
        .map(|label| {
            let shape = &shapes[label.index];
            if let Some(el) = doc.element_mut(shape.node) {
                el.set_attr("id", label.tooth.to_string());
            }
            Assignment {
                node: shape.node,
                previous_id: shape.id.clone(),
                tooth: label.tooth,
                row: label.row,
                position: positions[label.index],
            }
        })
        .collect();

    LabelReport {
        path_count,
        transform: located,
        policy: Some(split.policy),
        assignments,
        warnings,
    }
}

/// A labeled chart that has not been written back yet
#[derive(Debug)]
pub struct LabeledChart {
    pub document: SvgDocument,
    pub report: LabelReport,
}

/// Load the chart named by `config` and label it in memory.
pub fn label_chart(config: &LabelConfig) -> Result<LabeledChart> {
    let mut document = SvgDocument::load(&config.input)
        .with_context(|| format!("Failed to load chart {:?}", config.input))?;
    let report = label_document(&mut document);
    Ok(LabeledChart { document, report })
}

impl LabeledChart {
    /// Write the chart to the configured output, or nothing on a dry run.
    pub fn save(&self, config: &LabelConfig) -> Result<()> {
        if config.dry_run {
            log::debug!("Dry run, not writing {:?}", config.output_path());
            return Ok(());
        }
        self.document
            .save(config.output_path())
            .with_context(|| format!("Failed to save chart {:?}", config.output_path()))
    }
}

/// Load the chart, label it and write it back (unless `dry_run`).
pub fn run(config: &LabelConfig) -> Result<LabelReport> {
    let chart = label_chart(config)?;
    chart.save(config)?;
    Ok(chart.report)
}
