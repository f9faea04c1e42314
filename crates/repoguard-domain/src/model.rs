use repoguard_types::DocPath;

/// Which document family a file belongs to, and therefore which half of the
/// check catalog applies to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Ruleset,
    Workflow,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Ruleset => "ruleset",
            DocumentKind::Workflow => "workflow",
        }
    }
}

/// One parsed policy document. Immutable once loaded.
///
/// `source` keeps the raw file contents because several workflow checks are
/// line-oriented text scans rather than tree walks.
#[derive(Clone, Debug)]
pub struct Document {
    pub path: DocPath,
    pub kind: DocumentKind,
    pub source: String,
    pub root: Node,
}

impl Document {
    /// Iterate source lines with 1-based line numbers.
    pub fn lines(&self) -> impl Iterator<Item = (u32, &str)> {
        self.source
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx as u32 + 1, line))
    }
}

/// Tagged-union document tree.
///
/// Mappings are kept as ordered key/value pairs so iteration follows document
/// order and messages stay deterministic.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Sequence(Vec<Node>),
    Mapping(Vec<(String, Node)>),
}

impl Node {
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[(String, Node)]> {
        match self {
            Node::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Mapping lookup; `None` for non-mapping nodes.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::Null,
            serde_json::Value::Bool(b) => Node::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Int(i)
                } else {
                    Node::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Node::Str(s),
            serde_json::Value::Array(items) => {
                Node::Sequence(items.into_iter().map(Node::from).collect())
            }
            serde_json::Value::Object(entries) => Node::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Node::from(v)))
                    .collect(),
            ),
        }
    }
}
