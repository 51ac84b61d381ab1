//! 成绩计算与花名册导入核心逻辑
//!
//! 这里的函数不依赖 HTTP 与数据库：调用方负责加载数据，
//! 持久化写入通过 [`roster::RosterGateway`] 与 [`scores::ScoreWriter`] 注入。

pub mod aggregate;
pub mod report;
pub mod roster;
pub mod scores;
pub mod weights;

pub use aggregate::{compute_term_percentage, compute_term_percentages};
pub use report::{summarize, summarize_grades};
pub use roster::{RosterGateway, reconcile};
pub use scores::{ScoreBook, ScoreWriter, reconcile_scores};
pub use weights::{TermConfigError, validate, validate_all, validate_setups};
