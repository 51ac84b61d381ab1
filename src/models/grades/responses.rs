use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::StudentTermGrade;
use crate::models::terms::entities::Term;

/// 学期成绩汇总报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct TermGradeReport {
    pub term: Term,
    pub graded: usize,
    pub ungraded: usize,
    pub total: usize,
    pub average: Option<f64>,
    pub rows: Vec<StudentTermGrade>,
}
