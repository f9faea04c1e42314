use globset::{Glob, GlobSet, GlobSetBuilder};
use repoguard_types::{DocPath, Location};

pub fn build_allowlist(allow: &[String]) -> Option<GlobSet> {
    if allow.is_empty() {
        return None;
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in allow {
        // Treat allowlist entries as glob patterns (case-sensitive).
        let glob =
            Glob::new(pattern).expect("allowlist patterns must be validated in repoguard-settings");
        builder.add(glob);
    }
    Some(
        builder
            .build()
            .expect("allowlist patterns must be validated in repoguard-settings"),
    )
}

pub fn is_allowed(allow: Option<&GlobSet>, value: &str) -> bool {
    allow.map(|set| set.is_match(value)).unwrap_or(false)
}

pub fn doc_location(path: &DocPath) -> Option<Location> {
    Some(Location {
        path: path.clone(),
        line: None,
        col: None,
    })
}

pub fn line_location(path: &DocPath, line: u32) -> Option<Location> {
    Some(Location {
        path: path.clone(),
        line: Some(line),
        col: None,
    })
}
