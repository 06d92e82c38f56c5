//! AI 错误类型

use thiserror::Error;

/// AI 配置错误
#[derive(Error, Debug)]
pub enum AiError {
    /// 搜索深度超出范围
    #[error("Invalid search depth: {depth} (expected 1..={max})")]
    InvalidDepth { depth: u8, max: u8 },

    /// 配置解析失败
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// AI 操作结果类型
pub type Result<T> = std::result::Result<T, AiError>;
