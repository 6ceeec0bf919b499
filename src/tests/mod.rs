
#[cfg(test)]
use std::path::PathBuf;

#[cfg(test)]
use crate::agent::StorePaths;
#[cfg(test)]
use crate::board::{
    BitBoard, Board, Colour, Move, Piece, PieceKind, PieceKind::*, Square, NUM_SQUARES,
};
#[cfg(test)]
use crate::error::SnapshotError;

#[cfg(test)]
pub(crate) fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[cfg(test)]
pub(crate) fn mv(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to))
}

/// A minimal engine for exercising the agent.
///
/// Unless a fixed list of legal moves is given, a piece may step one rank forwards or backwards
/// within its section, onto any square not held by its own side.
#[cfg(test)]
#[derive(Clone, Debug)]
pub(crate) struct TestBoard {
    squares: Vec<Option<Piece>>,
    side_to_move: Colour,
    move_count: u32,
    game_over: bool,
    captured: [Vec<Piece>; 3],
    legal_moves: Option<Vec<Move>>,
    fail_snapshot: bool,
}

#[cfg(test)]
impl TestBoard {
    pub fn empty() -> Self {
        TestBoard {
            squares: vec![None; NUM_SQUARES],
            side_to_move: Colour::Blue,
            move_count: 0,
            game_over: false,
            captured: [vec![], vec![], vec![]],
            legal_moves: None,
            fail_snapshot: false,
        }
    }

    pub fn start_position() -> Self {
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Self::empty();
        for colour in Colour::ALL {
            for (file, kind) in back_rank.iter().enumerate() {
                board.squares[Square::from_section_rank_file(colour, 0, file as u8).into_inner()
                    as usize] = Some(Piece::new(*kind, colour));
                board.squares[Square::from_section_rank_file(colour, 1, file as u8).into_inner()
                    as usize] = Some(Piece::new(Pawn, colour));
            }
        }
        board
    }

    pub fn with_piece(mut self, square: &str, kind: PieceKind, colour: Colour) -> Self {
        self.squares[sq(square).into_inner() as usize] = Some(Piece::new(kind, colour));
        self
    }

    pub fn without_piece(mut self, square: &str) -> Self {
        self.squares[sq(square).into_inner() as usize] = None;
        self
    }

    pub fn with_legal_moves(mut self, moves: Vec<Move>) -> Self {
        self.legal_moves = Some(moves);
        self
    }

    pub fn with_move_count(mut self, move_count: u32) -> Self {
        self.move_count = move_count;
        self
    }

    pub fn with_side_to_move(mut self, colour: Colour) -> Self {
        self.side_to_move = colour;
        self
    }

    pub fn with_captured(mut self, colour: Colour, kind: PieceKind, by_colour: Colour) -> Self {
        self.captured[by_colour.index()].push(Piece::new(kind, colour));
        self
    }

    pub fn finished(mut self) -> Self {
        self.game_over = true;
        self
    }

    pub fn failing_snapshots(mut self) -> Self {
        self.fail_snapshot = true;
        self
    }

    pub fn do_move(&mut self, mv: Move) {
        assert!(self.is_legal_move(mv.from, mv.to), "Illegal move {}", mv);
        let piece = self.squares[mv.from.into_inner() as usize].take();
        if let Some(captured) = self.squares[mv.to.into_inner() as usize] {
            self.captured[self.side_to_move.index()].push(captured);
            if captured.kind == King {
                self.game_over = true;
            }
        }
        self.squares[mv.to.into_inner() as usize] = piece;
        self.side_to_move = self.side_to_move.next();
        self.move_count += 1;
        if let Some(moves) = self.legal_moves.as_mut() {
            moves.clear();
        }
    }
}

#[cfg(test)]
impl Board for TestBoard {
    fn positions(&self, colour: Colour) -> BitBoard {
        Square::all()
            .filter(|square| {
                self.squares[square.into_inner() as usize]
                    .is_some_and(|piece| piece.colour == colour)
            })
            .collect()
    }

    fn piece(&self, square: Square) -> Option<Piece> {
        self.squares[square.into_inner() as usize]
    }

    fn is_legal_move(&self, from: Square, to: Square) -> bool {
        if let Some(moves) = self.legal_moves.as_ref() {
            return moves.contains(&Move::new(from, to));
        }
        let Some(piece) = self.piece(from) else {
            return false;
        };
        piece.colour == self.side_to_move
            && from.section() == to.section()
            && from.file() == to.file()
            && from.rank().abs_diff(to.rank()) == 1
            && self
                .piece(to)
                .map_or(true, |target| target.colour != piece.colour)
    }

    fn side_to_move(&self) -> Colour {
        self.side_to_move
    }

    fn move_count(&self) -> u32 {
        self.move_count
    }

    fn game_over(&self) -> bool {
        self.game_over
    }

    fn captured(&self, colour: Colour) -> &[Piece] {
        &self.captured[colour.index()]
    }

    fn snapshot(&self) -> Result<Self, SnapshotError> {
        if self.fail_snapshot {
            Err(SnapshotError("test board refuses to be copied".to_string()))
        } else {
            Ok(self.clone())
        }
    }
}

/// Store paths in a fresh temporary directory, unique to the test
#[cfg(test)]
pub(crate) fn temp_store_paths(test_name: &str) -> StorePaths {
    let dir: PathBuf =
        std::env::temp_dir().join(format!("qchess-{}-{}", test_name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    StorePaths::in_dir(dir)
}

#[cfg(test)]
#[test]
fn test_board_start_position_test() {
    let mut board = TestBoard::start_position();
    for colour in Colour::ALL {
        assert_eq!(board.positions(colour).count(), 16);
    }
    assert_eq!(board.occupied().count(), 48);

    let mut moves = vec![];
    board.generate_moves(&mut moves);
    assert_eq!(moves.len(), 8, "Only Blue's pawns can move: {:?}", moves);
    assert!(moves.iter().all(|mv| mv.from.section() == Colour::Blue));

    board.do_move(mv("BA2", "BA3"));
    assert_eq!(board.side_to_move(), Colour::Green);
    assert_eq!(board.move_count(), 1);
}
