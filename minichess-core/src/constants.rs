//! 规则常量定义

/// 棋盘行数
pub const BOARD_ROWS: usize = 6;

/// 棋盘列数
pub const BOARD_COLS: usize = 5;

/// 格子总数
pub const BOARD_SQUARES: usize = BOARD_ROWS * BOARD_COLS;

/// 中路列（中心控制加分所在列）
pub const CENTER_COL: u8 = (BOARD_COLS / 2) as u8;

/// 白方兵的起始行（向上走，行号递减）
pub const LIGHT_PAWN_ROW: u8 = 4;

/// 黑方兵的起始行（向下走，行号递增）
pub const DARK_PAWN_ROW: u8 = 1;

/// 默认搜索时间（毫秒）
pub const DEFAULT_TIME_LIMIT_MS: u64 = 5000;

/// 搜索最大层数，超过后强制静态评估（防止失控）
pub const MAX_SEARCH_PLY: u32 = 100;

/// 将死分值（按层数修正，越快将死分越高）
pub const MATE_SCORE: i32 = 100_000;
