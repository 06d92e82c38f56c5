//! FEN 格式解析和生成
//!
//! 6x5 小棋盘的 FEN 格式：
//! `<棋盘> <走子方>`
//!
//! 棋盘从第 0 行（黑方底线）写到第 5 行，行之间用 `/` 分隔，数字表示连续空格。
//! 走子方 `w` 为白方，`b` 为黑方。
//!
//! 示例：
//! `rnqkb/ppppp/5/5/PPPPP/RNQKB w`

use crate::board::{Board, BoardState};
use crate::constants::{BOARD_COLS, BOARD_ROWS};
use crate::error::ChessError;
use crate::piece::{Piece, PieceType, Position, Side};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnqkb/ppppp/5/5/PPPPP/RNQKB w";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为棋盘状态
    pub fn parse(fen: &str) -> Result<BoardState, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(ChessError::InvalidFen {
                reason: "Empty FEN string".to_string(),
            });
        }

        // 解析棋盘
        let board = Self::parse_board(parts[0])?;

        // 解析走子方（默认白方）
        let side_to_move = match parts.get(1) {
            Some(s) => s
                .chars()
                .next()
                .and_then(Side::from_fen_char)
                .ok_or_else(|| ChessError::InvalidFen {
                    reason: format!("Invalid side to move: {}", s),
                })?,
            None => Side::Light,
        };

        Ok(BoardState::from_board(board, side_to_move))
    }

    /// 解析棋盘部分
    pub fn parse_board(board_str: &str) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_ROWS {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected {} rows, got {}", BOARD_ROWS, rows.len()),
            });
        }

        for (row_idx, row) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in row.chars() {
                if col >= BOARD_COLS {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }

                if let Some(empty_count) = c.to_digit(10) {
                    col += empty_count as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    board.set(Position::new_unchecked(row_idx as u8, col as u8), Some(piece));
                    col += 1;
                } else {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if col != BOARD_COLS {
                return Err(ChessError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected {}", row_idx, col, BOARD_COLS),
                });
            }
        }

        // 每方最多一个王
        for side in [Side::Light, Side::Dark] {
            let kings = board
                .pieces(side)
                .iter()
                .filter(|(_, p)| p.piece_type == PieceType::King)
                .count();
            if kings > 1 {
                return Err(ChessError::InvalidFen {
                    reason: format!("{} has {} kings", side, kings),
                });
            }
        }

        Ok(board)
    }

    /// 将棋盘状态转换为 FEN 字符串
    pub fn to_string(state: &BoardState) -> String {
        format!(
            "{} {}",
            Self::board_to_string(&state.board),
            state.side_to_move.to_fen_char()
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_ROWS);

        for row in 0..BOARD_ROWS as u8 {
            let mut line = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_COLS as u8 {
                if let Some(piece) = board.get(Position::new_unchecked(row, col)) {
                    if empty_count > 0 {
                        line.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    line.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                line.push_str(&empty_count.to_string());
            }

            rows.push(line);
        }

        rows.join("/")
    }

    /// 解析初始局面
    pub fn initial() -> BoardState {
        BoardState::initial()
    }
}
