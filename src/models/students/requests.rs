use serde::Deserialize;
use ts_rs::TS;

// 创建学生请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: Option<String>,
    pub rfid: Option<String>,
}

// 学生列表查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct StudentListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}
