use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical document path used in findings and reports.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - usually just a file name relative to the scanned directory
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct DocPath(String);

impl Default for DocPath {
    fn default() -> Self {
        DocPath::new(".")
    }
}

impl DocPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        // Avoid empty path; keep it explicit.
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_utf8_pathbuf(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.0.clone())
    }
}

impl From<&Utf8Path> for DocPath {
    fn from(value: &Utf8Path) -> Self {
        DocPath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for DocPath {
    fn from(value: Utf8PathBuf) -> Self {
        DocPath::new(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_backslashes_and_dot_prefix() {
        assert_eq!(DocPath::new(".\\ci.yml").as_str(), "ci.yml");
        assert_eq!(DocPath::new("./rulesets/main.json").as_str(), "rulesets/main.json");
    }

    #[test]
    fn empty_becomes_dot() {
        assert_eq!(DocPath::new("").as_str(), ".");
    }
}
