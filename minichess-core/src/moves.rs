//! 走法生成和验证

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::{PieceType, Position, Side};

/// 马的 8 个跳法
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// 斜线方向
const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// 直线方向
const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 周围 8 个方向（王的走法、后的射线）
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 走法
///
/// 不带升变标记：兵到底线时由 `Board::apply_move` 自动升变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// 局面状态（站在走子方的角度）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 正常进行
    Ongoing,
    /// 走子方被将军，但有应将的走法
    Check,
    /// 走子方被将死
    Checkmate { winner: Side },
    /// 走子方无子可动且未被将军（和棋）
    Stalemate,
    /// 有一方的王已被吃掉
    KingCaptured { winner: Side },
}

impl GameStatus {
    /// 是否已分出结果（胜负或和棋）
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定格子上棋子的所有伪合法目标（不考虑将军）
    ///
    /// 这是攻击检测使用的入口：判断某格是否被攻击时不能再做自将过滤，
    /// 否则会无限递归。
    pub fn pseudo_legal_moves(board: &Board, pos: Position) -> Vec<Position> {
        let piece = match board.get(pos) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        let mut moves = Vec::with_capacity(16);
        let side = piece.side;
        match piece.piece_type {
            PieceType::Pawn => Self::generate_pawn_moves(board, pos, side, &mut moves),
            PieceType::Knight => Self::generate_step_moves(board, pos, side, &KNIGHT_OFFSETS, &mut moves),
            PieceType::Bishop => Self::generate_sliding_moves(board, pos, side, &DIAGONALS, &mut moves),
            PieceType::Rook => Self::generate_sliding_moves(board, pos, side, &ORTHOGONALS, &mut moves),
            PieceType::Queen => Self::generate_sliding_moves(board, pos, side, &ALL_DIRECTIONS, &mut moves),
            PieceType::King => Self::generate_step_moves(board, pos, side, &ALL_DIRECTIONS, &mut moves),
        }
        moves
    }

    /// 生成指定格子上棋子的合法目标（过滤掉会让己方王被攻击的走法）
    ///
    /// 格子为空或棋子不属于 `side` 时返回空列表。
    pub fn legal_moves(board: &Board, pos: Position, side: Side) -> Vec<Position> {
        match board.get(pos) {
            Some(piece) if piece.side == side => {}
            _ => return Vec::new(),
        }

        Self::pseudo_legal_moves(board, pos)
            .into_iter()
            .filter(|&to| {
                // 模拟走法
                let (test_board, _) = board.apply_move(Move::new(pos, to));
                !Self::is_in_check(&test_board, side)
            })
            .collect()
    }

    /// 生成指定阵营的所有合法走法，按行优先顺序扫描棋盘
    ///
    /// 顺序是确定的，搜索在分值相同时选第一个遇到的走法。
    pub fn all_legal_moves(board: &Board, side: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(32);
        for (from, _) in board.pieces(side) {
            moves.extend(
                Self::legal_moves(board, from, side)
                    .into_iter()
                    .map(|to| Move::new(from, to)),
            );
        }
        moves
    }

    /// 生成兵的走法
    fn generate_pawn_moves(board: &Board, pos: Position, side: Side, moves: &mut Vec<Position>) {
        let forward = side.forward();

        // 前进一步，起始行且两格都空时可以前进两步
        if let Some(one) = pos.offset(forward, 0) {
            if board.get(one).is_none() {
                moves.push(one);

                if pos.row == side.pawn_start_row() {
                    if let Some(two) = pos.offset(2 * forward, 0) {
                        if board.get(two).is_none() {
                            moves.push(two);
                        }
                    }
                }
            }
        }

        // 斜向吃子
        for dc in [-1i8, 1i8] {
            if let Some(to) = pos.offset(forward, dc) {
                if matches!(board.get(to), Some(target) if target.side != side) {
                    moves.push(to);
                }
            }
        }
    }

    /// 生成单步走法（马、王）
    fn generate_step_moves(
        board: &Board,
        pos: Position,
        side: Side,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Position>,
    ) {
        for &(dr, dc) in offsets {
            if let Some(to) = pos.offset(dr, dc) {
                Self::try_add_move(board, to, side, moves);
            }
        }
    }

    /// 生成射线走法（象、车、后）
    fn generate_sliding_moves(
        board: &Board,
        pos: Position,
        side: Side,
        directions: &[(i8, i8)],
        moves: &mut Vec<Position>,
    ) {
        for &(dr, dc) in directions {
            let mut current = pos;
            while let Some(to) = current.offset(dr, dc) {
                if let Some(target) = board.get(to) {
                    // 遇到棋子：对方的可以吃，然后停下
                    if target.side != side {
                        moves.push(to);
                    }
                    break;
                }
                moves.push(to);
                current = to;
            }
        }
    }

    /// 尝试添加走法（目标为空或为对方棋子）
    fn try_add_move(board: &Board, to: Position, side: Side, moves: &mut Vec<Position>) {
        match board.get(to) {
            Some(target) if target.side == side => {}
            _ => moves.push(to),
        }
    }

    /// 检查目标格是否被 `by` 一方攻击
    pub fn is_square_attacked(board: &Board, target: Position, by: Side) -> bool {
        board
            .pieces(by)
            .into_iter()
            .any(|(pos, _)| Self::pseudo_legal_moves(board, pos).contains(&target))
    }

    /// 检查指定阵营是否被将军
    pub fn is_in_check(board: &Board, side: Side) -> bool {
        match board.find_king(side) {
            Some(king_pos) => Self::is_square_attacked(board, king_pos, side.opponent()),
            // 王已被吃，游戏结束优先于将军
            None => false,
        }
    }

    /// 检查是否被将死
    pub fn is_checkmate(board: &Board, side: Side) -> bool {
        Self::is_in_check(board, side) && Self::all_legal_moves(board, side).is_empty()
    }

    /// 检查是否无子可动但未被将军
    pub fn is_stalemate(board: &Board, side: Side) -> bool {
        !Self::is_in_check(board, side) && Self::all_legal_moves(board, side).is_empty()
    }

    /// 判定走子方面对的局面状态
    pub fn status(board: &Board, side_to_move: Side) -> GameStatus {
        if let Some(winner) = board.winner() {
            return GameStatus::KingCaptured { winner };
        }

        let in_check = Self::is_in_check(board, side_to_move);
        let has_moves = !Self::all_legal_moves(board, side_to_move).is_empty();
        match (in_check, has_moves) {
            (true, false) => GameStatus::Checkmate {
                winner: side_to_move.opponent(),
            },
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Ongoing,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::fen::Fen;
    use crate::piece::Piece;

    fn pos(row: u8, col: u8) -> Position {
        Position::new_unchecked(row, col)
    }

    fn sorted(mut moves: Vec<Position>) -> Vec<Position> {
        moves.sort_by_key(|p| p.to_index());
        moves
    }

    fn single(piece: Piece, at: Position) -> Board {
        let mut board = Board::empty();
        board.set(at, Some(piece));
        board
    }

    #[test]
    fn test_initial_move_count() {
        let board = Board::initial();
        let moves = MoveGenerator::all_legal_moves(&board, Side::Light);

        // 初始局面白方共 12 个合法走法:
        // 兵 (4,0)-(4,4): 各可进一步或两步，共 5*2=10
        // 马 (5,1): 跳到 (3,0) 和 (3,2)，(4,3) 被己方兵占据，共 2
        // 车、后、王、象: 被己方棋子包围，无走法
        assert_eq!(moves.len(), 12);

        let mut expected = Vec::new();
        for col in 0..5 {
            expected.push(Move::new(pos(4, col), pos(3, col)));
            expected.push(Move::new(pos(4, col), pos(2, col)));
        }
        expected.push(Move::new(pos(5, 1), pos(3, 0)));
        expected.push(Move::new(pos(5, 1), pos(3, 2)));
        assert_eq!(moves, expected);

        // 黑方对称，也是 12 个
        assert_eq!(MoveGenerator::all_legal_moves(&board, Side::Dark).len(), 12);
    }

    #[test]
    fn test_pawn_moves() {
        let light = Piece::new(PieceType::Pawn, Side::Light);

        // 起始行可以走两步
        let board = single(light, pos(4, 2));
        assert_eq!(
            MoveGenerator::pseudo_legal_moves(&board, pos(4, 2)),
            vec![pos(3, 2), pos(2, 2)]
        );

        // 不在起始行只能走一步
        let board = single(light, pos(3, 2));
        assert_eq!(MoveGenerator::pseudo_legal_moves(&board, pos(3, 2)), vec![pos(2, 2)]);

        // 黑兵向下走
        let dark = Piece::new(PieceType::Pawn, Side::Dark);
        let board = single(dark, pos(1, 1));
        assert_eq!(
            MoveGenerator::pseudo_legal_moves(&board, pos(1, 1)),
            vec![pos(2, 1), pos(3, 1)]
        );
    }

    #[test]
    fn test_pawn_blocked() {
        let light = Piece::new(PieceType::Pawn, Side::Light);
        let blocker = Piece::new(PieceType::Knight, Side::Dark);

        // 正前方被挡住，两步也不能走，且不能直吃
        let mut board = single(light, pos(4, 2));
        board.set(pos(3, 2), Some(blocker));
        assert!(MoveGenerator::pseudo_legal_moves(&board, pos(4, 2)).is_empty());

        // 第二格被挡住，只能走一步
        let mut board = single(light, pos(4, 2));
        board.set(pos(2, 2), Some(blocker));
        assert_eq!(MoveGenerator::pseudo_legal_moves(&board, pos(4, 2)), vec![pos(3, 2)]);
    }

    #[test]
    fn test_pawn_captures() {
        let mut board = single(Piece::new(PieceType::Pawn, Side::Light), pos(3, 2));
        board.set(pos(2, 1), Some(Piece::new(PieceType::Rook, Side::Dark)));
        board.set(pos(2, 3), Some(Piece::new(PieceType::Rook, Side::Light)));

        // 只能吃对方棋子
        assert_eq!(
            MoveGenerator::pseudo_legal_moves(&board, pos(3, 2)),
            vec![pos(2, 2), pos(2, 1)]
        );
    }

    #[test]
    fn test_knight_moves() {
        let board = single(Piece::new(PieceType::Knight, Side::Light), pos(2, 2));
        let moves = MoveGenerator::pseudo_legal_moves(&board, pos(2, 2));
        assert_eq!(moves.len(), 8);

        // 角落只有 2 个跳法
        let board = single(Piece::new(PieceType::Knight, Side::Dark), pos(0, 0));
        assert_eq!(
            sorted(MoveGenerator::pseudo_legal_moves(&board, pos(0, 0))),
            vec![pos(1, 2), pos(2, 1)]
        );
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let mut board = Board::initial();
        board.set(pos(3, 0), Some(Piece::new(PieceType::Pawn, Side::Light)));
        // 马可以越过兵，但不能落在己方棋子上
        assert_eq!(MoveGenerator::pseudo_legal_moves(&board, pos(5, 1)), vec![pos(3, 2)]);
    }

    #[test]
    fn test_bishop_moves() {
        let board = single(Piece::new(PieceType::Bishop, Side::Light), pos(2, 2));
        let moves = sorted(MoveGenerator::pseudo_legal_moves(&board, pos(2, 2)));
        assert_eq!(
            moves,
            sorted(vec![
                pos(1, 1), pos(0, 0),
                pos(1, 3), pos(0, 4),
                pos(3, 1), pos(4, 0),
                pos(3, 3), pos(4, 4),
            ])
        );
    }

    #[test]
    fn test_rook_blocked_and_capture() {
        let mut board = single(Piece::new(PieceType::Rook, Side::Light), pos(3, 0));
        board.set(pos(1, 0), Some(Piece::new(PieceType::Pawn, Side::Dark)));
        board.set(pos(3, 3), Some(Piece::new(PieceType::Pawn, Side::Light)));

        let moves = sorted(MoveGenerator::pseudo_legal_moves(&board, pos(3, 0)));
        assert_eq!(
            moves,
            sorted(vec![
                // 向上：(2,0) 空，(1,0) 可吃后停止
                pos(2, 0), pos(1, 0),
                // 向下
                pos(4, 0), pos(5, 0),
                // 向右：(3,3) 是己方棋子，停在其前
                pos(3, 1), pos(3, 2),
            ])
        );
    }

    #[test]
    fn test_queen_moves() {
        let board = single(Piece::new(PieceType::Queen, Side::Dark), pos(2, 2));
        // 4 条斜线 8 格 + 直线 5 + 4 格
        assert_eq!(MoveGenerator::pseudo_legal_moves(&board, pos(2, 2)).len(), 17);
    }

    #[test]
    fn test_king_moves() {
        let board = single(Piece::new(PieceType::King, Side::Light), pos(2, 2));
        assert_eq!(MoveGenerator::pseudo_legal_moves(&board, pos(2, 2)).len(), 8);

        let board = single(Piece::new(PieceType::King, Side::Light), pos(5, 4));
        assert_eq!(
            sorted(MoveGenerator::pseudo_legal_moves(&board, pos(5, 4))),
            vec![pos(4, 3), pos(4, 4), pos(5, 3)]
        );
    }

    #[test]
    fn test_empty_square_and_wrong_side() {
        let board = Board::initial();
        assert!(MoveGenerator::pseudo_legal_moves(&board, pos(2, 2)).is_empty());
        assert!(MoveGenerator::legal_moves(&board, pos(2, 2), Side::Light).is_empty());
        // 轮到白方时查询黑兵
        assert!(MoveGenerator::legal_moves(&board, pos(1, 0), Side::Light).is_empty());
        // 越界
        assert!(MoveGenerator::legal_moves(&board, pos(8, 8), Side::Light).is_empty());
    }

    #[test]
    fn test_check_detection() {
        let state = Fen::parse("3k1/5/5/5/5/3RK w").unwrap();
        assert!(MoveGenerator::is_in_check(&state.board, Side::Dark));
        assert!(!MoveGenerator::is_in_check(&state.board, Side::Light));

        // 被挡住就不算将军
        let state = Fen::parse("3k1/3p1/5/5/5/3RK w").unwrap();
        assert!(!MoveGenerator::is_in_check(&state.board, Side::Dark));
    }

    #[test]
    fn test_check_by_knight_and_pawn() {
        let state = Fen::parse("3k1/5/4N/5/5/K4 b").unwrap();
        assert!(MoveGenerator::is_in_check(&state.board, Side::Dark));

        let state = Fen::parse("5/5/5/5/1p3/K4 w").unwrap();
        assert!(MoveGenerator::is_in_check(&state.board, Side::Light));

        // 兵正前方不构成将军
        let state = Fen::parse("5/5/5/5/p4/K4 w").unwrap();
        assert!(!MoveGenerator::is_in_check(&state.board, Side::Light));
    }

    #[test]
    fn test_missing_king_not_in_check() {
        let state = Fen::parse("5/5/5/5/5/R3K w").unwrap();
        assert!(!MoveGenerator::is_in_check(&state.board, Side::Dark));
    }

    #[test]
    fn test_square_attacked() {
        let board = single(Piece::new(PieceType::Rook, Side::Light), pos(5, 0));
        assert!(MoveGenerator::is_square_attacked(&board, pos(0, 0), Side::Light));
        assert!(MoveGenerator::is_square_attacked(&board, pos(5, 4), Side::Light));
        assert!(!MoveGenerator::is_square_attacked(&board, pos(4, 1), Side::Light));
        assert!(!MoveGenerator::is_square_attacked(&board, pos(0, 0), Side::Dark));
    }

    #[test]
    fn test_pinned_piece() {
        // 白车被钉在王前，只能沿列移动
        let state = Fen::parse("k1r2/5/5/5/2R2/2K2 w").unwrap();
        let moves = sorted(MoveGenerator::legal_moves(&state.board, pos(4, 2), Side::Light));
        assert_eq!(moves, vec![pos(0, 2), pos(1, 2), pos(2, 2), pos(3, 2)]);
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let state = Fen::parse("k4/5/5/5/1r3/4K w").unwrap();
        let moves = sorted(MoveGenerator::legal_moves(&state.board, pos(5, 4), Side::Light));
        // (4,3) 和 (4,4) 在黑车的攻击线上
        assert_eq!(moves, vec![pos(5, 3)]);
    }

    #[test]
    fn test_legal_moves_filter_check() {
        let state = Fen::parse("3k1/5/5/5/5/3RK w").unwrap();
        let moves = MoveGenerator::all_legal_moves(&state.board, Side::Dark);
        assert!(!moves.is_empty());

        // 所有合法走法后都不应该被将军
        for mv in &moves {
            let (next, _) = state.board.apply_move(*mv);
            assert!(!MoveGenerator::is_in_check(&next, Side::Dark));
        }
    }

    #[test]
    fn test_king_capture_is_pseudo_legal() {
        // 吃王本身是合法的终局走法
        let state = Fen::parse("3k1/5/5/5/5/3RK w").unwrap();
        let moves = MoveGenerator::legal_moves(&state.board, pos(5, 3), Side::Light);
        assert!(moves.contains(&pos(0, 3)));

        let (next, captured) = state.board.apply_move(Move::new(pos(5, 3), pos(0, 3)));
        assert_eq!(captured, Some(Piece::new(PieceType::King, Side::Dark)));
        assert!(next.is_game_over());
        assert_eq!(next.winner(), Some(Side::Light));
    }

    #[test]
    fn test_checkmate() {
        // 黑王在角落，两个白车封锁第 0、1 行
        let state = Fen::parse("k3R/4R/5/5/5/2K2 b").unwrap();
        assert!(!state.board.is_game_over());
        assert!(MoveGenerator::is_in_check(&state.board, Side::Dark));
        assert!(MoveGenerator::all_legal_moves(&state.board, Side::Dark).is_empty());
        assert!(MoveGenerator::is_checkmate(&state.board, Side::Dark));
        assert!(!MoveGenerator::is_stalemate(&state.board, Side::Dark));
        assert_eq!(
            MoveGenerator::status(&state.board, Side::Dark),
            GameStatus::Checkmate { winner: Side::Light }
        );
    }

    #[test]
    fn test_stalemate() {
        // 黑王未被将军，但所有相邻格都被白后控制
        let state = Fen::parse("k4/5/1Q3/5/5/4K b").unwrap();
        assert!(!MoveGenerator::is_in_check(&state.board, Side::Dark));
        assert!(MoveGenerator::all_legal_moves(&state.board, Side::Dark).is_empty());
        assert!(MoveGenerator::is_stalemate(&state.board, Side::Dark));
        assert!(!MoveGenerator::is_checkmate(&state.board, Side::Dark));
        assert_eq!(MoveGenerator::status(&state.board, Side::Dark), GameStatus::Stalemate);
        assert!(GameStatus::Stalemate.is_terminal());
    }

    #[test]
    fn test_status_check_and_ongoing() {
        let state = Fen::parse("3k1/5/5/5/5/3RK b").unwrap();
        assert_eq!(MoveGenerator::status(&state.board, Side::Dark), GameStatus::Check);
        assert!(!GameStatus::Check.is_terminal());

        assert_eq!(
            MoveGenerator::status(&Board::initial(), Side::Light),
            GameStatus::Ongoing
        );

        let state = Fen::parse("5/5/5/5/5/3RK b").unwrap();
        assert_eq!(
            MoveGenerator::status(&state.board, Side::Dark),
            GameStatus::KingCaptured { winner: Side::Light }
        );
    }

    #[test]
    fn test_random_playouts_respect_legality() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..20 {
            let mut board = Board::initial();
            let mut side = Side::Light;

            for _ in 0..60 {
                if board.is_game_over() {
                    break;
                }
                for check_side in [Side::Light, Side::Dark] {
                    let all = MoveGenerator::all_legal_moves(&board, check_side);

                    // 每个合法走法都不会让己方王被攻击
                    for mv in &all {
                        let (next, _) = board.apply_move(*mv);
                        assert!(!MoveGenerator::is_in_check(&next, check_side));
                    }

                    // 总数等于逐格合法目标之和，且无重复
                    let per_cell: usize = board
                        .pieces(check_side)
                        .iter()
                        .map(|(p, _)| MoveGenerator::legal_moves(&board, *p, check_side).len())
                        .sum();
                    assert_eq!(all.len(), per_cell);
                    let unique: HashSet<_> = all.iter().collect();
                    assert_eq!(unique.len(), all.len());
                }

                let moves = MoveGenerator::all_legal_moves(&board, side);
                let Some(mv) = moves.choose(&mut rng) else {
                    break;
                };
                let mover = board.get(mv.from).unwrap();
                let (next, _) = board.apply_move(*mv);

                // 只有到达底线的兵会变成后，其他棋子原样落地
                let landed = next.get(mv.to).unwrap();
                if mover.piece_type == PieceType::Pawn && mv.to.row == side.promotion_row() {
                    assert_eq!(landed, Piece::new(PieceType::Queen, side));
                } else {
                    assert_eq!(landed, mover);
                }

                board = next;
                side = side.opponent();
            }
        }
    }
}
