use quick_xml::events::BytesStart;

/// Index of a node inside an [`SvgDocument`](crate::SvgDocument) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// An element as written in the source: qualified name, resolved namespace,
/// attributes in source order (values unescaped) and child nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) name: String,
    pub(crate) namespace: Option<String>,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) self_closing: bool,
}

impl Element {
    /// Qualified name, including any prefix (e.g. `svg:path`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name with the prefix stripped
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    /// Namespace URI the element resolved to, `None` when it is in no namespace
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrite an attribute in place, appending it when absent.
    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key.to_string(), value)),
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn to_start(&self) -> BytesStart<'_> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_element() -> Element {
        Element {
            name: "svg:path".to_string(),
            namespace: Some(crate::SVG_NAMESPACE.to_string()),
            attributes: vec![
                ("id".to_string(), "path12".to_string()),
                ("d".to_string(), "m 10,20 z".to_string()),
            ],
            children: vec![],
            self_closing: true,
        }
    }

    #[test]
    fn test_local_name_strips_prefix() {
        let el = path_element();
        assert_eq!(el.name(), "svg:path");
        assert_eq!(el.local_name(), "path");
    }

    #[test]
    fn test_set_attr_overwrites_in_place() {
        let mut el = path_element();
        el.set_attr("id", "tooth-4");
        assert_eq!(el.attr("id"), Some("tooth-4"));

        // Source order is kept so the rewritten file diffs cleanly
        let keys: Vec<_> = el.attributes().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["id", "d"]);
    }

    #[test]
    fn test_set_attr_appends_missing() {
        let mut el = path_element();
        el.set_attr("class", "tooth");
        assert_eq!(el.attr("class"), Some("tooth"));
        assert_eq!(el.attributes().count(), 3);
    }
}
