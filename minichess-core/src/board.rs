//! 棋盘状态

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{BOARD_COLS, BOARD_ROWS, BOARD_SQUARES};
use crate::error::{ChessError, Result};
use crate::moves::{Move, MoveGenerator};
use crate::piece::{Piece, PieceType, Position, Side};

/// 初始布局（第 0 行为黑方底线）
const INITIAL_LAYOUT: [[char; BOARD_COLS]; BOARD_ROWS] = [
    ['r', 'n', 'q', 'k', 'b'],
    ['p', 'p', 'p', 'p', 'p'],
    ['.', '.', '.', '.', '.'],
    ['.', '.', '.', '.', '.'],
    ['P', 'P', 'P', 'P', 'P'],
    ['R', 'N', 'Q', 'K', 'B'],
];

/// 棋盘
///
/// 搜索中每个节点持有自己的副本：先 `clone` 再修改，从不原地修改后撤销。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    /// 6x5 棋盘，索引为 row * 5 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

/// 反序列化的中间形式，格子数不对的快照直接拒绝
#[derive(Deserialize)]
struct BoardSnapshot {
    squares: Vec<Option<Piece>>,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = ChessError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self> {
        if snapshot.squares.len() != BOARD_SQUARES {
            return Err(ChessError::InvalidSnapshot {
                squares: snapshot.squares.len(),
            });
        }
        Ok(Self {
            squares: snapshot.squares,
        })
    }
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; BOARD_SQUARES],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (row, cells) in INITIAL_LAYOUT.iter().enumerate() {
            for (col, &c) in cells.iter().enumerate() {
                board.set(
                    Position::new_unchecked(row as u8, col as u8),
                    Piece::from_fen_char(c),
                );
            }
        }
        board
    }

    /// 获取指定位置的棋子（越界返回 None）
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares.get(pos.to_index()).copied().flatten()
        } else {
            None
        }
    }

    /// 按有符号坐标获取棋子，越界返回 None 而不是报错
    pub fn piece_at(&self, row: i8, col: i8) -> Option<Piece> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(Position::new_unchecked(row as u8, col as u8))
    }

    /// 设置指定位置的棋子（越界时忽略）
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if !pos.is_valid() {
            return;
        }
        if let Some(square) = self.squares.get_mut(pos.to_index()) {
            *square = piece;
        }
    }

    /// 复制棋盘并执行走法，返回新棋盘和被吃的棋子
    ///
    /// 兵走到对方底线时升变为同色的后。原棋盘保持不变。
    pub fn apply_move(&self, mv: Move) -> (Board, Option<Piece>) {
        let mut next = self.clone();
        let captured = next.move_piece(mv.from, mv.to);
        (next, captured)
    }

    /// 移动棋子（不检查规则），处理兵的升变
    fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.get(from);
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, piece.map(|p| Self::promote_if_needed(p, to)));
        captured
    }

    /// 兵到达底线升变为后
    fn promote_if_needed(piece: Piece, to: Position) -> Piece {
        if piece.piece_type == PieceType::Pawn && to.row == piece.side.promotion_row() {
            Piece::new(PieceType::Queen, piece.side)
        } else {
            piece
        }
    }

    /// 查找指定阵营的王的位置
    pub fn find_king(&self, side: Side) -> Option<Position> {
        Position::all().find(|&pos| {
            self.get(pos) == Some(Piece::new(PieceType::King, side))
        })
    }

    /// 获取指定阵营的所有棋子位置（行优先顺序）
    pub fn pieces(&self, side: Side) -> Vec<(Position, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.side == side)
            .collect()
    }

    /// 获取所有棋子（行优先顺序）
    pub fn all_pieces(&self) -> Vec<(Position, Piece)> {
        Position::all()
            .filter_map(|pos| self.get(pos).map(|piece| (pos, piece)))
            .collect()
    }

    /// 任意一方的王被吃掉即游戏结束
    pub fn is_game_over(&self) -> bool {
        self.find_king(Side::Light).is_none() || self.find_king(Side::Dark).is_none()
    }

    /// 胜方：对方的王已被吃掉的一方
    pub fn winner(&self) -> Option<Side> {
        if self.find_king(Side::Dark).is_none() {
            Some(Side::Light)
        } else if self.find_king(Side::Light).is_none() {
            Some(Side::Dark)
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// 棋盘加走子方
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub side_to_move: Side,
}

impl BoardState {
    /// 创建初始状态（白方先走）
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Side::Light,
        }
    }

    /// 从棋盘创建状态
    pub fn from_board(board: Board, side_to_move: Side) -> Self {
        Self {
            board,
            side_to_move,
        }
    }

    /// 切换走子方
    pub fn switch_turn(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// 当前走子方的所有合法走法
    pub fn legal_moves(&self) -> Vec<Move> {
        MoveGenerator::all_legal_moves(&self.board, self.side_to_move)
    }

    /// 校验并执行走法，成功后切换走子方
    pub fn play(&mut self, mv: Move) -> Result<Option<Piece>> {
        if self.board.is_game_over() {
            return Err(ChessError::GameOver);
        }
        for pos in [mv.from, mv.to] {
            if !pos.is_valid() {
                return Err(ChessError::InvalidPosition {
                    row: pos.row,
                    col: pos.col,
                });
            }
        }

        let piece = self.board.get(mv.from).ok_or_else(|| ChessError::NoPiece {
            square: mv.from.to_string(),
        })?;
        if piece.side != self.side_to_move {
            return Err(ChessError::NotYourTurn);
        }
        if !MoveGenerator::legal_moves(&self.board, mv.from, self.side_to_move).contains(&mv.to) {
            return Err(ChessError::IllegalMove {
                from: mv.from.to_string(),
                to: mv.to.to_string(),
            });
        }

        let (next, captured) = self.board.apply_move(mv);
        if next.get(mv.to).map(|p| p.piece_type) != Some(piece.piece_type) {
            debug!("{} pawn promoted at {}", piece.side, mv.to);
        }
        self.board = next;
        self.switch_turn();
        Ok(captured)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}
