//! 6x5 小棋盘国际象棋规则库
//!
//! 包含:
//! - 棋子、棋盘、位置等核心数据结构
//! - 走法生成、将军检测和局面判定
//! - FEN 与坐标记法

mod board;
mod constants;
mod error;
mod fen;
mod moves;
mod notation;
mod piece;

pub use board::{Board, BoardState};
pub use constants::*;
pub use error::{ChessError, Result};
pub use fen::{Fen, INITIAL_FEN};
pub use moves::{GameStatus, Move, MoveGenerator};
pub use notation::Notation;
pub use piece::{Piece, PieceType, Position, Side};
