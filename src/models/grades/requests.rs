use serde::Deserialize;

// 成绩导出参数
#[derive(Debug, Clone, Deserialize)]
pub struct GradeExportParams {
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "csv".to_string()
}
