//! Business logic services.

pub mod account;
pub mod activity_log;
pub mod report;

pub use account::AccountService;
pub use activity_log::{
    ActivityListQuery, ActivityLogService, ActivityStatistics, RecordActivityInput,
};
pub use report::{
    ApproveReportInput, ReportContext, ReportListQuery, ReportService, ReportStatistics,
    StartReviewInput, StatusCounts, SubmitReportInput,
};
