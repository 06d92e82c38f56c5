//! 坐标记法
//!
//! 列用字母 a-e（从左到右），行用数字 1-6（从白方底线数起）。
//! 第 0 行对应 6，第 5 行对应 1。

use crate::constants::{BOARD_COLS, BOARD_ROWS};
use crate::error::ChessError;
use crate::moves::Move;
use crate::piece::Position;

/// 坐标记法
pub struct Notation;

impl Notation {
    /// 格子坐标，如 `a1`
    pub fn square(pos: Position) -> String {
        pos.to_string()
    }

    /// 解析格子坐标
    pub fn parse_square(s: &str) -> Result<Position, ChessError> {
        let invalid = || ChessError::InvalidNotation {
            input: s.to_string(),
        };

        let mut chars = s.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return Err(invalid()),
        };

        let col = (file.to_ascii_lowercase() as u32).wrapping_sub('a' as u32) as usize;
        let rank = rank.to_digit(10).ok_or_else(invalid)? as usize;
        if col >= BOARD_COLS || rank == 0 || rank > BOARD_ROWS {
            return Err(invalid());
        }

        Ok(Position::new_unchecked((BOARD_ROWS - rank) as u8, col as u8))
    }

    /// 走法显示，如 `a2 → a3`
    pub fn to_coordinate(mv: &Move) -> String {
        format!("{} → {}", mv.from, mv.to)
    }

    /// 解析紧凑走法，如 `a2a3`
    pub fn parse_move(s: &str) -> Result<Move, ChessError> {
        let s = s.trim();
        if !s.is_ascii() || s.len() != 4 {
            return Err(ChessError::InvalidNotation {
                input: s.to_string(),
            });
        }
        let from = Self::parse_square(&s[..2])?;
        let to = Self::parse_square(&s[2..])?;
        Ok(Move::new(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        assert_eq!(Notation::square(Position::new_unchecked(5, 0)), "a1");
        assert_eq!(Notation::square(Position::new_unchecked(0, 0)), "a6");
        assert_eq!(Notation::square(Position::new_unchecked(3, 2)), "c3");
    }

    #[test]
    fn test_parse_square() {
        assert_eq!(Notation::parse_square("a1").unwrap(), Position::new_unchecked(5, 0));
        assert_eq!(Notation::parse_square("E6").unwrap(), Position::new_unchecked(0, 4));

        for bad in ["", "a", "a0", "a7", "f1", "11", "a1x"] {
            assert!(
                matches!(Notation::parse_square(bad), Err(ChessError::InvalidNotation { .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_move_notation() {
        let mv = Move::new(Position::new_unchecked(4, 0), Position::new_unchecked(3, 0));
        assert_eq!(Notation::to_coordinate(&mv), "a2 → a3");
        assert_eq!(Notation::parse_move("a2a3").unwrap(), mv);
        assert!(Notation::parse_move("a2a").is_err());
        assert!(Notation::parse_move("a2→a3").is_err());
    }
}
