use serde::Deserialize;

// 导入模板下载参数
#[derive(Debug, Clone, Deserialize)]
pub struct RosterTemplateParams {
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "csv".to_string()
}
