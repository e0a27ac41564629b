/// Primary keys are opaque text identifiers (UUID v4 for server-generated
/// rows, caller-chosen for batches created by the mobile client).
pub type DbId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh server-side identifier.
pub fn new_id() -> DbId {
    uuid::Uuid::new_v4().to_string()
}
