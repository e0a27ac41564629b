//! Naming rules for batches created implicitly by session uploads.

/// Description stored on a batch that was created on behalf of a session.
pub const AUTO_BATCH_DESCRIPTION: &str = "Automatically created from session";

/// Number of leading id characters used in an auto-created batch name.
const AUTO_BATCH_NAME_ID_CHARS: usize = 8;

/// Placeholder name for a batch created because a session referenced an
/// unknown batch id, e.g. `Auto-created batch 3f2a9c1b`.
pub fn auto_batch_name(batch_id: &str) -> String {
    let prefix: String = batch_id.chars().take(AUTO_BATCH_NAME_ID_CHARS).collect();
    format!("Auto-created batch {prefix}")
}
