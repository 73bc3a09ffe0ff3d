use std::io::{Cursor, Write};
use std::path::Path;

use atomicwrites::{AtomicFile, OverwriteBehavior};
use quick_xml::{
    NsReader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, Event},
    name::ResolveResult,
};

use crate::element::{Element, NodeId};
use crate::error::{Result, SvgError, xml_error};

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Element(Element),
    /// Text, CDATA, comments, processing instructions and entity references,
    /// kept as read so they round-trip untouched.
    Content(Event<'static>),
}

/// Parsed SVG document.
///
/// Nodes live in an arena and are addressed by [`NodeId`]; holding an id
/// instead of a copy means edits made through [`SvgDocument::element_mut`]
/// land in the document that will be written back.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    nodes: Vec<Node>,
    root: NodeId,
    prolog: Vec<Event<'static>>,
    epilog: Vec<Event<'static>>,
}

impl SvgDocument {
    /// Parse a document from a string
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = NsReader::from_str(xml);
        let mut nodes: Vec<Node> = Vec::new();
        let mut open: Vec<NodeId> = Vec::new();
        let mut root: Option<NodeId> = None;
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();

        loop {
            let position = reader.buffer_position();
            let (resolved, event) = match reader.read_resolved_event() {
                Ok(next) => next,
                Err(err) => return Err(xml_error(position, err)),
            };
            let namespace = match resolved {
                ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
                ResolveResult::Unbound => None,
                ResolveResult::Unknown(prefix) => {
                    return Err(SvgError::UnknownPrefix(
                        String::from_utf8_lossy(&prefix).into_owned(),
                    ));
                }
            };

            match event {
                Event::Start(e) | Event::Empty(e) if root.is_some() && open.is_empty() => {
                    return Err(SvgError::MultipleRoots(
                        String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    ));
                }
                Event::Start(e) => {
                    let id = push_element(&mut nodes, &e, namespace, false, position)?;
                    attach(&mut nodes, &open, &mut root, id);
                    open.push(id);
                }
                Event::Empty(e) => {
                    let id = push_element(&mut nodes, &e, namespace, true, position)?;
                    attach(&mut nodes, &open, &mut root, id);
                }
                Event::End(e) => {
                    if open.pop().is_none() {
                        return Err(SvgError::UnexpectedEnd(
                            String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                        ));
                    }
                }
                // The declaration is regenerated on save
                Event::Decl(_) => {}
                Event::Eof => break,
                other => {
                    let other = other.into_owned();
                    match open.last() {
                        Some(&parent) => {
                            let id = NodeId(nodes.len());
                            nodes.push(Node::Content(other));
                            if let Node::Element(el) = &mut nodes[parent.0] {
                                el.children.push(id);
                            }
                        }
                        None if root.is_none() => prolog.push(other),
                        None => epilog.push(other),
                    }
                }
            }
        }

        if let Some(&unclosed) = open.last()
            && let Node::Element(el) = &nodes[unclosed.0]
        {
            return Err(SvgError::UnclosedElement(el.name.clone()));
        }

        let root = root.ok_or(SvgError::MissingRoot)?;
        log::debug!("Parsed SVG document with {} nodes", nodes.len());

        Ok(Self {
            nodes,
            root,
            prolog,
            epilog,
        })
    }

    /// Read and parse a document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|source| SvgError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&xml)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Element behind `id`, `None` for text-like nodes or foreign ids
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id.0)? {
            Node::Element(el) => Some(el),
            Node::Content(_) => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(id.0)? {
            Node::Element(el) => Some(el),
            Node::Content(_) => None,
        }
    }

    /// All elements in document order, root first
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![self.root],
        }
    }

    /// Elements below the root with the given local name.
    ///
    /// Elements in the SVG namespace are preferred; only when there are none
    /// does the lookup fall back to elements in no namespace at all.
    pub fn find_svg_elements(&self, local_name: &str) -> Vec<NodeId> {
        let qualified = self.find_below_root(local_name, Some(crate::SVG_NAMESPACE));
        if !qualified.is_empty() {
            return qualified;
        }

        let unqualified = self.find_below_root(local_name, None);
        if !unqualified.is_empty() {
            log::debug!(
                "No namespaced <{local_name}> elements, using {} unqualified ones",
                unqualified.len()
            );
        }
        unqualified
    }

    fn find_below_root(&self, local_name: &str, namespace: Option<&str>) -> Vec<NodeId> {
        self.descendants()
            .skip(1)
            .filter(|&id| {
                self.element(id)
                    .is_some_and(|el| el.local_name() == local_name && el.namespace() == namespace)
            })
            .collect()
    }

    /// Serialize to a UTF-8 string with an XML declaration
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let starts_with_newline = matches!(
            self.prolog.first(),
            Some(Event::Text(text)) if text.starts_with(b"\n") || text.starts_with(b"\r\n")
        );
        if !starts_with_newline {
            writer.get_mut().write_all(b"\n")?;
        }

        for event in &self.prolog {
            writer.write_event(event.clone())?;
        }
        self.write_node(&mut writer, self.root)?;
        for event in &self.epilog {
            writer.write_event(event.clone())?;
        }

        Ok(String::from_utf8(writer.into_inner().into_inner())?)
    }

    fn write_node(&self, writer: &mut Writer<Cursor<Vec<u8>>>, id: NodeId) -> Result<()> {
        match &self.nodes[id.0] {
            Node::Content(event) => writer.write_event(event.clone())?,
            Node::Element(el) if el.children.is_empty() && el.self_closing => {
                writer.write_event(Event::Empty(el.to_start()))?;
            }
            Node::Element(el) => {
                writer.write_event(Event::Start(el.to_start()))?;
                for &child in &el.children {
                    self.write_node(writer, child)?;
                }
                writer.write_event(Event::End(BytesEnd::new(el.name.as_str())))?;
            }
        }
        Ok(())
    }

    /// Serialize and replace the file at `path`. Existing contents are
    /// overwritten without a backup.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let xml = self.to_xml_string()?;

        // The temp file goes next to the target, which needs a non-empty parent
        let target = match path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Path::new(".").join(path),
            _ => path.to_path_buf(),
        };
        AtomicFile::new(&target, OverwriteBehavior::AllowOverwrite)
            .write(|f| {
                f.write_all(xml.as_bytes())?;
                f.flush()
            })
            .map_err(|err| SvgError::Write {
                path: path.to_path_buf(),
                source: match err {
                    atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => e,
                },
            })?;

        log::debug!("Wrote {} bytes to {:?}", xml.len(), path);
        Ok(())
    }
}

/// Pre-order walk over the elements of a document
pub struct Descendants<'a> {
    doc: &'a SvgDocument,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.stack.pop() {
            if let Some(el) = self.doc.element(id) {
                self.stack.extend(el.children.iter().rev().copied());
                return Some(id);
            }
        }
        None
    }
}

fn push_element(
    nodes: &mut Vec<Node>,
    start: &BytesStart,
    namespace: Option<String>,
    self_closing: bool,
    position: u64,
) -> Result<NodeId> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| xml_error(position, err))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| xml_error(position, err))?
            .into_owned();
        attributes.push((key, value));
    }

    let id = NodeId(nodes.len());
    nodes.push(Node::Element(Element {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        namespace,
        attributes,
        children: Vec::new(),
        self_closing,
    }));
    Ok(id)
}

fn attach(nodes: &mut [Node], open: &[NodeId], root: &mut Option<NodeId>, id: NodeId) {
    match open.last() {
        Some(&parent) => {
            if let Node::Element(el) = &mut nodes[parent.0] {
                el.children.push(id);
            }
        }
        None => *root = Some(id),
    }
}
