use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - document path
/// - salient subject (action reference, job name, pattern kind, ...)
///
/// The line number is deliberately excluded so reordering a workflow file
/// does not churn fingerprints.
pub fn fingerprint_for_finding(
    check_id: &str,
    code: &str,
    doc_path: &str,
    subject: &str,
) -> String {
    let canonical = [check_id, code, doc_path, subject].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
