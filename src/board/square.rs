use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::piece::Colour;

pub const NUM_FILES: u8 = 8;
pub const NUM_RANKS: u8 = 4;
pub const SQUARES_PER_SECTION: u8 = NUM_FILES * NUM_RANKS;
pub const NUM_SQUARES: usize = 3 * SQUARES_PER_SECTION as usize;

/// A location on the board.
/// The board consists of three 4x8 sections, one on each player's home side.
/// Squares are named by section, file and rank, e.g. `BA1` or `RH4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Square {
    inner: u8,
}

impl Square {
    pub const fn from_u8(inner: u8) -> Self {
        assert!((inner as usize) < NUM_SQUARES);
        Square { inner }
    }

    pub const fn from_section_rank_file(section: Colour, rank: u8, file: u8) -> Self {
        assert!(rank < NUM_RANKS && file < NUM_FILES);
        Square::from_u8(section as u8 * SQUARES_PER_SECTION + rank * NUM_FILES + file)
    }

    pub const fn into_inner(self) -> u8 {
        self.inner
    }

    /// The player whose home section contains this square
    pub const fn section(self) -> Colour {
        match self.inner / SQUARES_PER_SECTION {
            0 => Colour::Blue,
            1 => Colour::Green,
            _ => Colour::Red,
        }
    }

    /// Rank within the section, counted from the section owner's back rank
    pub const fn rank(self) -> u8 {
        (self.inner % SQUARES_PER_SECTION) / NUM_FILES
    }

    pub const fn file(self) -> u8 {
        self.inner % NUM_FILES
    }

    /// Every square on the board, in index order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES as u8).map(Square::from_u8)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.section().letter(),
            (b'A' + self.file()) as char,
            self.rank() + 1
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid square \"{0}\"")]
pub struct ParseSquareError(pub String);

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let error = || ParseSquareError(input.to_string());
        let mut chars = input.chars();
        let (Some(section), Some(file), Some(rank), None) =
            (chars.next(), chars.next(), chars.next(), chars.next())
        else {
            return Err(error());
        };
        let section = Colour::from_letter(section).ok_or_else(error)?;
        if !('A'..='H').contains(&file) || !('1'..='4').contains(&rank) {
            return Err(error());
        }
        Ok(Square::from_section_rank_file(
            section,
            rank as u8 - b'1',
            file as u8 - b'A',
        ))
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = ParseSquareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
