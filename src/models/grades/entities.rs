use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 学生的学期加权百分比，没有考试成绩时为空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct StudentTermGrade {
    pub student_id: String,
    pub percentage: Option<f64>,
}
