use camino::Utf8Path;
use repoguard_domain::model::{Document, DocumentKind, Node};
use repoguard_types::DocPath;

/// Loader failure, split so callers can treat the two cases differently:
/// a parse failure becomes a finding, an IO failure aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {path}: {message}")]
    Parse { path: String, message: String },
}

impl LoadError {
    pub fn parse_message(&self) -> Option<&str> {
        match self {
            LoadError::Parse { message, .. } => Some(message),
            LoadError::Io { .. } => None,
        }
    }
}

/// Read and parse one document from `dir`.
///
/// Rulesets are JSON, workflows are YAML; either way the parsed value is
/// converted into the domain tree. The raw source text is kept on the
/// document for line-oriented checks.
pub fn load_document(
    dir: &Utf8Path,
    name: &DocPath,
    kind: DocumentKind,
) -> Result<Document, LoadError> {
    let abs = dir.join(name.as_str());
    let source = std::fs::read_to_string(&abs).map_err(|source| LoadError::Io {
        path: abs.to_string(),
        source,
    })?;

    let root = parse_source(&source, kind).map_err(|message| LoadError::Parse {
        path: name.as_str().to_string(),
        message,
    })?;

    Ok(Document {
        path: name.clone(),
        kind,
        source,
        root,
    })
}

/// Parse document text into the domain tree. The error string carries the
/// parser's own diagnostic (line/column where the parser provides it).
pub fn parse_source(source: &str, kind: DocumentKind) -> Result<Node, String> {
    match kind {
        DocumentKind::Ruleset => serde_json::from_str::<serde_json::Value>(source)
            .map(Node::from)
            .map_err(|err| err.to_string()),
        DocumentKind::Workflow => serde_yaml::from_str::<serde_yaml::Value>(source)
            .map(yaml_to_node)
            .map_err(|err| err.to_string()),
    }
}

fn yaml_to_node(value: serde_yaml::Value) -> Node {
    match value {
        serde_yaml::Value::Null => Node::Null,
        serde_yaml::Value::Bool(b) => Node::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Node::Int(i)
            } else {
                Node::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_yaml::Value::String(s) => Node::Str(s),
        serde_yaml::Value::Sequence(items) => {
            Node::Sequence(items.into_iter().map(yaml_to_node).collect())
        }
        serde_yaml::Value::Mapping(entries) => Node::Mapping(
            entries
                .into_iter()
                .filter_map(|(key, value)| scalar_key(&key).map(|k| (k, yaml_to_node(value))))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_node(tagged.value),
    }
}

/// Mapping keys in the domain tree are strings; scalar YAML keys are
/// stringified and non-scalar keys dropped.
fn scalar_key(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
