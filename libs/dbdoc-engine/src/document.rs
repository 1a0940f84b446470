/// Root element.
pub const DATABASE: &str = "database";
/// Schema element, direct child of the root.
pub const SCHEMA: &str = "schema";
/// Database object element; child of the root or of another object.
pub const OBJECT: &str = "object";
/// Column element; child of an object.
pub const COLUMN: &str = "column";

/// Attribute set on the root: when the document was built.
pub const DATE_GENERATED: &str = "dateGenerated";

/// Ordered attribute bag with unique names.
///
/// Names are whatever the row source used as column names, so this is a
/// list rather than a fixed struct. Overwriting a name keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == &name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One element of the metadata document.
///
/// Children are owned by their parent and only ever appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNode {
    tag: String,
    attributes: Attributes,
    children: Vec<DocumentNode>,
}

impl DocumentNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::default(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.set(name, value);
    }

    pub fn children(&self) -> &[DocumentNode] {
        &self.children
    }

    pub fn push_child(&mut self, child: DocumentNode) {
        self.children.push(child);
    }

    /// First child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&DocumentNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// First child with the given tag, appended if there is none yet.
    pub fn child_or_insert(&mut self, tag: &str) -> &mut DocumentNode {
        let index = match self.children.iter().position(|c| c.tag == tag) {
            Some(i) => i,
            None => {
                self.children.push(DocumentNode::new(tag));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    pub fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a DocumentNode> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// This node and all its descendants, depth-first pre-order.
    pub fn descendants(&self) -> Vec<&DocumentNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

/// Unlinks the subtree level by level, so dropping a deep document takes
/// constant stack.
impl Drop for DocumentNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
