//! Owned, editable SVG element tree.
//!
//! Documents are read with quick-xml's namespace-aware reader into an arena of
//! nodes, edited through [`NodeId`] handles and written back with a fresh
//! UTF-8 declaration. Anything the editor does not touch (comments, text,
//! doctype, attribute order) is written back as it was read.
//!
//! ```rust
//! use toothmap_svg::SvgDocument;
//!
//! let mut doc = SvgDocument::parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><path id="p1" d="M0 0"/></svg>"#)?;
//! let path = doc.find_svg_elements("path")[0];
//! doc.element_mut(path).unwrap().set_attr("id", "tooth-1");
//! assert!(doc.to_xml_string()?.contains(r#"id="tooth-1""#));
//! # Ok::<(), toothmap_svg::SvgError>(())
//! ```

mod document;
mod element;
mod error;

pub use document::{Descendants, SvgDocument};
pub use element::{Element, NodeId};
pub use error::{Result, SvgError};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
