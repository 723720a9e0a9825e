//! Word scoring

use super::board::{bonus_at, Board, Bonus};

/// Score of the word currently on the board.
///
/// The word is the span from the first to the last occupied square. A span
/// with any empty square scores 0, which is how non-continuous words get
/// rejected at submit time. Double-letter squares double their own tile;
/// each double-word square in the span doubles the whole word. Totals
/// saturate at `u32::MAX` rather than wrapping.
pub fn score_word(board: &Board) -> u32 {
    let Some((start, end)) = board.span() else {
        return 0;
    };

    let mut sum: u32 = 0;
    let mut multiplier: u32 = 1;

    for index in start..=end {
        let Some(tile) = board.get(index) else {
            return 0;
        };

        let letter_score = match bonus_at(index) {
            Some(Bonus::DoubleLetter) => tile.value.saturating_mul(2),
            Some(Bonus::DoubleWord) => {
                multiplier *= 2;
                tile.value
            }
            None => tile.value,
        };
        sum = sum.saturating_add(letter_score);
    }

    sum.saturating_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::{Tile, TileId, BOARD_SIZE};

    fn board_with(tiles: &[(usize, u32)]) -> Board {
        let mut board = Board::new();
        for (n, &(index, value)) in tiles.iter().enumerate() {
            board.place(
                index,
                Tile {
                    id: TileId(n as u64),
                    letter: 'X',
                    value,
                },
            );
        }
        board
    }

    #[test]
    fn test_empty_board_scores_zero() {
        assert_eq!(score_word(&Board::new()), 0);
    }

    #[test]
    fn test_single_tile_on_plain_square() {
        for index in (0..BOARD_SIZE).filter(|&i| bonus_at(i).is_none()) {
            assert_eq!(score_word(&board_with(&[(index, 4)])), 4);
        }
    }

    #[test]
    fn test_double_letter_only_doubles_its_tile() {
        // 5 and 7 plain, 6 double letter
        assert_eq!(score_word(&board_with(&[(5, 1), (6, 3), (7, 2)])), 1 + 6 + 2);
    }

    #[test]
    fn test_double_word_doubles_whole_word() {
        assert_eq!(score_word(&board_with(&[(2, 1)])), 2);
        assert_eq!(score_word(&board_with(&[(1, 3), (2, 1)])), 8);
    }

    #[test]
    fn test_double_words_compound() {
        // Span 2..=12 covers both double-word and both double-letter squares
        let tiles: Vec<(usize, u32)> = (2..=12).map(|i| (i, 1)).collect();
        let board = board_with(&tiles);
        // 11 tiles, 6 and 8 doubled -> 13, times 2 * 2
        assert_eq!(score_word(&board), 13 * 4);
    }

    #[test]
    fn test_gap_zeroes_score() {
        assert_eq!(score_word(&board_with(&[(1, 3), (3, 10)])), 0);
        assert_eq!(score_word(&board_with(&[(0, 5), (1, 5), (14, 5)])), 0);
    }

    #[test]
    fn test_huge_values_saturate() {
        assert_eq!(score_word(&board_with(&[(6, u32::MAX)])), u32::MAX);
        assert_eq!(score_word(&board_with(&[(1, 3_000_000_000), (2, 1)])), u32::MAX);
    }

    #[test]
    fn test_largest_catalog_value_fits() {
        use crate::game::catalog::MAX_TILE_VALUE;
        let tiles: Vec<(usize, u32)> = (0..BOARD_SIZE)
            .map(|i| (i, MAX_TILE_VALUE))
            .collect();
        // 15 tiles plus two double letters, times two double words
        assert_eq!(score_word(&board_with(&tiles)), MAX_TILE_VALUE * 17 * 4);
    }

    #[test]
    fn test_score_is_idempotent() {
        let board = board_with(&[(10, 2), (11, 3), (12, 4)]);
        let first = score_word(&board);
        assert_eq!(first, (2 + 3 + 4) * 2);
        assert_eq!(score_word(&board), first);
    }
}
