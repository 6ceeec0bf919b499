use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three players. Turn order is Blue, Green, Red.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colour {
    Blue,
    Green,
    Red,
}

impl Colour {
    pub const ALL: [Colour; 3] = [Colour::Blue, Colour::Green, Colour::Red];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The player who moves after this one
    pub const fn next(self) -> Self {
        match self {
            Colour::Blue => Colour::Green,
            Colour::Green => Colour::Red,
            Colour::Red => Colour::Blue,
        }
    }

    /// Single-letter prefix used in square names, e.g. the `B` in `BA1`
    pub const fn letter(self) -> char {
        match self {
            Colour::Blue => 'B',
            Colour::Green => 'G',
            Colour::Red => 'R',
        }
    }

    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'B' => Some(Colour::Blue),
            'G' => Some(Colour::Green),
            'R' => Some(Colour::Red),
            _ => None,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Colour::Blue => "Blue",
            Colour::Green => "Green",
            Colour::Red => "Red",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Material value of the piece. Capturing a king ends the game, so it outweighs everything else.
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 100,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub colour: Colour,
}

impl Piece {
    pub const fn new(kind: PieceKind, colour: Colour) -> Self {
        Piece { kind, colour }
    }

    pub const fn value(self) -> i32 {
        self.kind.value()
    }
}

/// Total material value of a collection of pieces
pub fn material_value<'a>(pieces: impl IntoIterator<Item = &'a Piece>) -> i32 {
    pieces.into_iter().map(|piece| piece.value()).sum()
}
