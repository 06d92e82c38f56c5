//! 错误类型定义

use thiserror::Error;

/// 规则错误
///
/// 只在边界处产生（解析、带校验的走子），走法生成与判定本身不会失败。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChessError {
    /// 无效的位置
    #[error("Invalid position: ({row}, {col})")]
    InvalidPosition { row: u8, col: u8 },

    /// 没有棋子
    #[error("No piece at {square}")]
    NoPiece { square: String },

    /// 不是你的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 非法走法（不符合走子规则或会让己方被将军）
    #[error("Illegal move: {from} -> {to}")]
    IllegalMove { from: String, to: String },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 快照的格子数不对
    #[error("Invalid board snapshot: expected 30 squares, got {squares} squares")]
    InvalidSnapshot { squares: usize },

    /// 无效的坐标记法
    #[error("Invalid notation: {input}")]
    InvalidNotation { input: String },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
