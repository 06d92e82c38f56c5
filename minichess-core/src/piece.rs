//! 棋子定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_COLS, BOARD_ROWS, DARK_PAWN_ROW, LIGHT_PAWN_ROW};

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// 获取棋子的子力分值（用于 AI 评估）
    pub fn value(&self) -> i32 {
        match self {
            PieceType::Pawn => 100,
            PieceType::Knight => 320,
            PieceType::Bishop => 330,
            PieceType::Rook => 500,
            PieceType::Queen => 900,
            PieceType::King => 20000,
        }
    }

    /// 获取 FEN 字符（白方大写，黑方小写）
    pub fn to_fen_char(&self, side: Side) -> char {
        let c = match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        match side {
            Side::Light => c.to_ascii_uppercase(),
            Side::Dark => c,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<(PieceType, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::Light
        } else {
            Side::Dark
        };
        let piece_type = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some((piece_type, side))
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 白方（先手，在下方，向上走）
    Light,
    /// 黑方（后手，在上方，向下走）
    Dark,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
        }
    }

    /// 兵前进方向（行号增量）
    pub fn forward(&self) -> i8 {
        match self {
            Side::Light => -1,
            Side::Dark => 1,
        }
    }

    /// 兵的起始行（可以走两步）
    pub fn pawn_start_row(&self) -> u8 {
        match self {
            Side::Light => LIGHT_PAWN_ROW,
            Side::Dark => DARK_PAWN_ROW,
        }
    }

    /// 兵的升变行（对方底线）
    pub fn promotion_row(&self) -> u8 {
        match self {
            Side::Light => 0,
            Side::Dark => (BOARD_ROWS - 1) as u8,
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Side::Light => 'w',
            Side::Dark => 'b',
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Side> {
        match c {
            'w' | 'W' => Some(Side::Light),
            'b' | 'B' => Some(Side::Dark),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Light => write!(f, "light"),
            Side::Dark => write!(f, "dark"),
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub side: Side,
}

impl Piece {
    /// 创建新棋子
    pub fn new(piece_type: PieceType, side: Side) -> Self {
        Self { piece_type, side }
    }

    /// 获取棋子显示的符号
    pub fn symbol(&self) -> char {
        match (self.piece_type, self.side) {
            (PieceType::King, Side::Light) => '♔',
            (PieceType::Queen, Side::Light) => '♕',
            (PieceType::Rook, Side::Light) => '♖',
            (PieceType::Bishop, Side::Light) => '♗',
            (PieceType::Knight, Side::Light) => '♘',
            (PieceType::Pawn, Side::Light) => '♙',
            (PieceType::King, Side::Dark) => '♚',
            (PieceType::Queen, Side::Dark) => '♛',
            (PieceType::Rook, Side::Dark) => '♜',
            (PieceType::Bishop, Side::Dark) => '♝',
            (PieceType::Knight, Side::Dark) => '♞',
            (PieceType::Pawn, Side::Dark) => '♟',
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        self.piece_type.to_fen_char(self.side)
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Piece> {
        PieceType::from_fen_char(c).map(|(piece_type, side)| Piece { piece_type, side })
    }

    /// 获取棋子分值
    pub fn value(&self) -> i32 {
        self.piece_type.value()
    }
}

/// 棋盘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 行 (0-5)，0 为黑方底线
    pub row: u8,
    /// 列 (0-4)
    pub col: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_ROWS && (col as usize) < BOARD_COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < BOARD_ROWS && (self.col as usize) < BOARD_COLS
    }

    /// 获取偏移后的位置
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Position> {
        let new_row = self.row as i8 + dr;
        let new_col = self.col as i8 + dc;
        if new_row >= 0
            && (new_row as usize) < BOARD_ROWS
            && new_col >= 0
            && (new_col as usize) < BOARD_COLS
        {
            Some(Position {
                row: new_row as u8,
                col: new_col as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_COLS + self.col as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_ROWS * BOARD_COLS {
            Some(Position {
                row: (index / BOARD_COLS) as u8,
                col: (index % BOARD_COLS) as u8,
            })
        } else {
            None
        }
    }

    /// 按行优先顺序遍历所有格子
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_ROWS * BOARD_COLS).map(|i| Position {
            row: (i / BOARD_COLS) as u8,
            col: (i % BOARD_COLS) as u8,
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 与坐标记法一致：列 a-e，行 1-6（从白方底线数起）
        write!(
            f,
            "{}{}",
            (b'a' + self.col) as char,
            BOARD_ROWS - self.row as usize
        )
    }
}
