use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 上传文件中解析出的一行花名册数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/roster.ts")]
pub struct RosterImportRow {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub middle_initial: Option<String>,
    /// 在源文件中的行号（表头为第 1 行）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl RosterImportRow {
    pub fn new(
        student_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            middle_initial: None,
            line: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

// 单行导入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/roster.ts")]
pub enum ImportStatus {
    Imported,
    Skipped,
    Error,
}

impl std::fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportStatus::Imported => write!(f, "imported"),
            ImportStatus::Skipped => write!(f, "skipped"),
            ImportStatus::Error => write!(f, "error"),
        }
    }
}

/// 每个输入行对应且仅对应一个结果，`row` 从 1 开始；
/// 来自上传文件时 `line` 为源文件行号
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/roster.ts")]
pub struct ImportOutcome {
    pub row: usize,
    pub student_id: String,
    pub status: ImportStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl ImportOutcome {
    pub fn with_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    pub fn imported(row: usize, student_id: &str, message: impl Into<String>) -> Self {
        Self::with_status(row, student_id, ImportStatus::Imported, message)
    }

    pub fn skipped(row: usize, student_id: &str, message: impl Into<String>) -> Self {
        Self::with_status(row, student_id, ImportStatus::Skipped, message)
    }

    pub fn error(row: usize, student_id: &str, message: impl Into<String>) -> Self {
        Self::with_status(row, student_id, ImportStatus::Error, message)
    }

    fn with_status(
        row: usize,
        student_id: &str,
        status: ImportStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row,
            student_id: student_id.to_string(),
            status,
            message: message.into(),
            line: None,
        }
    }
}
