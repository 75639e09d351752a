use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};

/// Length of the short commit label
const COMMIT_ID_LEN: usize = 7;

/// Compute the SHA-1 hex digest recorded in tracked_files
pub fn content_digest(content: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Short display label for a commit. Not unique: two commits with the same
/// message in the same instant collide.
pub fn commit_id(message: &str, timestamp: &DateTime<Utc>) -> String {
    let mut digest = content_digest(format!("{}{}", message, timestamp.to_rfc3339()).as_bytes());
    digest.truncate(COMMIT_ID_LEN);
    digest
}
