//! 6x5 小棋盘 AI 引擎
//!
//! 包含:
//! - 棋局评估函数
//! - Minimax + Alpha-Beta 搜索
//! - 迭代加深（按时间预算截止）
//! - 难度配置

#[cfg(feature = "async")]
mod background;
mod config;
mod error;
mod evaluate;
mod search;

#[cfg(feature = "async")]
pub use background::search_in_background;
pub use config::{AiConfig, Difficulty, MAX_SEARCH_DEPTH};
pub use error::{AiError, Result};
pub use evaluate::Evaluator;
pub use search::{best_move, AiEngine, SearchResult};
