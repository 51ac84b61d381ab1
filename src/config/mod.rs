//! 配置管理模块
//!
//! 静态配置按 `config.toml` → `config.{APP_ENV}` → 环境变量 的顺序合并。

mod r#impl;
mod structs;

pub use structs::*;
