use toothmap_svg::{NodeId, SvgDocument};

/// A `<path>` in the chart, addressed by handle so labels are written back
/// into the document it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub node: NodeId,
    /// Identifier before labeling
    pub id: Option<String>,
    /// Shape-description (`d`) attribute
    pub path_data: Option<String>,
}

/// All paths in document order, namespaced ones preferred.
pub fn locate_shapes(doc: &SvgDocument) -> Vec<Shape> {
    doc.find_svg_elements("path")
        .into_iter()
        .filter_map(|node| {
            let el = doc.element(node)?;
            Some(Shape {
                node,
                id: el.attr("id").map(str::to_string),
                path_data: el.attr("d").map(str::to_string),
            })
        })
        .collect()
}
