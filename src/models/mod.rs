pub mod audit;
pub mod common;
pub mod courses;
pub mod grades;
pub mod roster;
pub mod scores;
pub mod students;
pub mod terms;

pub use common::{ApiResponse, ErrorCode, PaginationInfo};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
