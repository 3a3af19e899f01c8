//! Database repositories.

pub mod activity_log;
pub mod entity_directory;
pub mod report;
pub mod user;

pub use activity_log::{ActivityLogFilter, ActivityLogRepository, SearchFilter};
pub use entity_directory::{EntityDirectory, ResolvedEntity};
pub use report::{ReportFilter, ReportRepository};
pub use user::UserRepository;
