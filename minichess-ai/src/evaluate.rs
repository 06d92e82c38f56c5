//! 棋局评估函数

use minichess_core::{
    Board, MoveGenerator, Piece, PieceType, Position, Side, BOARD_ROWS, CENTER_COL,
};

/// 中路控制加分
const CENTER_BONUS: i32 = 10;

/// 将军加分（被将军的一方扣分）
const CHECK_BONUS: i32 = 50;

/// 评估器
///
/// 固定视角：正值对黑方有利，负值对白方有利。
pub struct Evaluator;

/// 棋子位置分值表（以棋子自己的视角，第 0 行是对方底线）
/// 索引为 [行][列]
mod position_tables {
    use minichess_core::{BOARD_COLS, BOARD_ROWS};

    /// 兵的位置分值
    pub const PAWN: [[i32; BOARD_COLS]; BOARD_ROWS] = [
        [0, 0, 0, 0, 0],      // 升变行
        [50, 50, 50, 50, 50], // 即将升变
        [10, 10, 20, 10, 10],
        [5, 5, 10, 5, 5],
        [0, 0, 0, 0, 0], // 起始行
        [0, 0, 0, 0, 0],
    ];

    /// 马的位置分值
    pub const KNIGHT: [[i32; BOARD_COLS]; BOARD_ROWS] = [
        [-50, -40, -30, -40, -50],
        [-40, -20, 0, -20, -40],
        [-30, 5, 10, 5, -30],
        [-30, 5, 10, 5, -30],
        [-40, -20, 0, -20, -40],
        [-50, -40, -30, -40, -50],
    ];

    /// 王的位置分值（留在底线更安全）
    pub const KING: [[i32; BOARD_COLS]; BOARD_ROWS] = [
        [-30, -40, -40, -40, -30],
        [-30, -40, -40, -40, -30],
        [-30, -40, -40, -40, -30],
        [-30, -40, -40, -40, -30],
        [-20, -30, -30, -30, -20],
        [20, 20, 0, 0, 20],
    ];
}

impl Evaluator {
    /// 评估棋局（黑方视角，正值对黑方有利）
    pub fn evaluate(board: &Board) -> i32 {
        let mut score = 0;

        for (pos, piece) in board.all_pieces() {
            let piece_score = Self::evaluate_piece(pos, piece);
            match piece.side {
                Side::Dark => score += piece_score,
                Side::Light => score -= piece_score,
            }
        }

        if MoveGenerator::is_in_check(board, Side::Dark) {
            score -= CHECK_BONUS;
        }
        if MoveGenerator::is_in_check(board, Side::Light) {
            score += CHECK_BONUS;
        }

        score
    }

    /// 评估单个棋子的价值（子力 + 位置分 + 中路控制）
    fn evaluate_piece(pos: Position, piece: Piece) -> i32 {
        let center = if pos.col == CENTER_COL { CENTER_BONUS } else { 0 };
        piece.value() + Self::position_bonus(pos, piece) + center
    }

    /// 获取位置加成分
    fn position_bonus(pos: Position, piece: Piece) -> i32 {
        let row = match piece.side {
            Side::Light => pos.row as usize,
            // 黑方需要镜像（行翻转）
            Side::Dark => BOARD_ROWS - 1 - pos.row as usize,
        };
        let col = pos.col as usize;

        match piece.piece_type {
            PieceType::Pawn => position_tables::PAWN[row][col],
            PieceType::Knight => position_tables::KNIGHT[row][col],
            PieceType::King => position_tables::KING[row][col],
            // 象、车、后不加位置分
            _ => 0,
        }
    }

    /// 快速评估（仅计算子力差）
    pub fn evaluate_material(board: &Board) -> i32 {
        board
            .all_pieces()
            .into_iter()
            .map(|(_, piece)| match piece.side {
                Side::Dark => piece.value(),
                Side::Light => -piece.value(),
            })
            .sum()
    }

    /// 任意一方的王被吃掉即游戏结束
    pub fn is_game_over(board: &Board) -> bool {
        board.is_game_over()
    }

    /// 胜方
    pub fn winner(board: &Board) -> Option<Side> {
        board.winner()
    }
}
