use serde::Deserialize;
use ts_rs::TS;

// 创建课程请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

// 课程列表查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct CourseListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}
