use std::{fmt, ops};

use serde::{Deserialize, Serialize};

use super::square::{Square, NUM_SQUARES};

/// A set of squares, one bit per square.
/// Serialised as the ordered list of square names, so the stored form does not depend on the bit layout.
#[derive(PartialEq, Eq, Clone, Copy, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Square>", from = "Vec<Square>")]
pub struct BitBoard {
    pub board: u128,
}

impl ops::BitOr for BitBoard {
    type Output = BitBoard;
    #[inline]
    fn bitor(self, rhs: BitBoard) -> BitBoard {
        BitBoard::from_u128(self.board | rhs.board)
    }
}

impl BitBoard {
    #[inline]
    pub const fn empty() -> Self {
        BitBoard { board: 0 }
    }

    #[inline]
    pub const fn full() -> Self {
        BitBoard {
            board: (1 << NUM_SQUARES) - 1,
        }
    }

    #[inline]
    pub const fn from_u128(n: u128) -> Self {
        BitBoard { board: n }
    }

    #[inline]
    pub fn get(self, square: Square) -> bool {
        self.board & (1 << square.into_inner()) != 0
    }

    // Sets the square to true
    #[inline]
    pub fn set(self, square: Square) -> Self {
        BitBoard::from_u128(self.board | 1 << square.into_inner())
    }

    // Sets the square to false
    #[inline]
    pub fn clear(self, square: Square) -> Self {
        BitBoard::from_u128(self.board & !(1 << square.into_inner()))
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.board == 0
    }

    #[inline]
    pub fn count(self) -> u8 {
        self.board.count_ones() as u8
    }
}

impl FromIterator<Square> for BitBoard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter()
            .fold(BitBoard::empty(), |board, square| board.set(square))
    }
}

impl From<Vec<Square>> for BitBoard {
    fn from(squares: Vec<Square>) -> Self {
        squares.into_iter().collect()
    }
}

impl From<BitBoard> for Vec<Square> {
    fn from(board: BitBoard) -> Self {
        board.into_iter().collect()
    }
}

impl IntoIterator for BitBoard {
    type Item = Square;
    type IntoIter = BitBoardIter;

    fn into_iter(self) -> Self::IntoIter {
        BitBoardIter::new(self)
    }
}

pub struct BitBoardIter {
    board: BitBoard,
}

impl BitBoardIter {
    fn new(board: BitBoard) -> Self {
        BitBoardIter { board }
    }
}

impl Iterator for BitBoardIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.board.is_empty() {
            None
        } else {
            let square = Square::from_u8(self.board.board.trailing_zeros() as u8);
            self.board = self.board.clear(square);
            Some(square)
        }
    }
}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries((*self).into_iter()).finish()
    }
}
