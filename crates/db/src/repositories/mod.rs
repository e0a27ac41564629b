//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod batch_repo;
pub mod session_repo;
pub mod user_repo;

pub use batch_repo::BatchRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
