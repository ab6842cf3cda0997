use std::fmt;
use std::str::FromStr;

use shakmaty::{File, Rank, Square, fen::Fen, fen::ParseFenError};
use thiserror::Error;

pub use shakmaty::{Color, Role};

/// Width and height of the board.
pub const SIZE: u8 = 8;

const BACK_RANK: [Role; SIZE as usize] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// Error when parsing algebraic square notation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid square notation: '{0}'")]
pub struct LocationParseError(String);

/// Error when constructing a board from external input.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid FEN: {0}")]
    Fen(#[from] ParseFenError),
    #[error("{0:?} has no king")]
    MissingKing(Color),
    #[error("{0:?} has more than one king")]
    ExtraKing(Color),
    #[error("more than one piece placed on {0}")]
    Occupied(Location),
    #[error("{0:?} is in check while not on move")]
    OpponentInCheck(Color),
}

/// A square on the grid.
///
/// Row 0 is black's back rank (rank 8), row 7 is white's back rank
/// (rank 1). Column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    row: u8,
    col: u8,
}

impl Location {
    /// Creates a location, or `None` if it lies outside the grid.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < SIZE && col < SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// The location `d_row` rows and `d_col` columns away, if still on the grid.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Self::new(row, col)
    }

    /// All 64 locations, row by row starting from black's back rank.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..SIZE).flat_map(|row| (0..SIZE).map(move |col| Location { row, col }))
    }
}

impl From<Location> for Square {
    fn from(location: Location) -> Self {
        Square::from_coords(
            File::new(u32::from(location.col)),
            Rank::new(u32::from(SIZE - 1 - location.row)),
        )
    }
}

impl From<Square> for Location {
    fn from(square: Square) -> Self {
        let col = u32::from(square.file()) as u8;
        let rank = u32::from(square.rank()) as u8;
        Location {
            row: SIZE - 1 - rank,
            col,
        }
    }
}

/// Parse algebraic notation like "e2" into a location.
impl FromStr for Location {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Square>()
            .map(Location::from)
            .map_err(|_| LocationParseError(s.to_owned()))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Square::from(*self), f)
    }
}

/// What a slot holds: nothing, or a piece of some color and role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Occupant {
    #[default]
    Empty,
    Occupied { color: Color, role: Role },
}

/// The value stored in every board slot.
///
/// Empty squares hold a sentinel with [`Occupant::Empty`] rather than
/// being absent. `location` always equals the coordinates of the slot
/// holding the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub occupant: Occupant,
    pub has_moved: bool,
    pub location: Location,
}

impl Piece {
    /// The empty sentinel for `location`.
    #[inline]
    pub const fn empty(location: Location) -> Self {
        Self {
            occupant: Occupant::Empty,
            has_moved: false,
            location,
        }
    }

    /// An unmoved piece.
    #[inline]
    pub const fn new(color: Color, role: Role, location: Location) -> Self {
        Self {
            occupant: Occupant::Occupied { color, role },
            has_moved: false,
            location,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant == Occupant::Empty
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        match self.occupant {
            Occupant::Occupied { color, .. } => Some(color),
            Occupant::Empty => None,
        }
    }

    #[inline]
    pub fn role(&self) -> Option<Role> {
        match self.occupant {
            Occupant::Occupied { role, .. } => Some(role),
            Occupant::Empty => None,
        }
    }

    /// True if this slot holds a piece of `color`.
    #[inline]
    pub fn is_color(&self, color: Color) -> bool {
        self.color() == Some(color)
    }

    /// True if this slot holds a piece of the opposite color.
    #[inline]
    pub fn is_enemy_of(&self, color: Color) -> bool {
        self.color() == Some(color.other())
    }

    /// FEN letter for the piece, uppercase for white.
    pub fn char(&self) -> Option<char> {
        match self.occupant {
            Occupant::Occupied { color, role } => Some(shakmaty::Piece { color, role }.char()),
            Occupant::Empty => None,
        }
    }
}

/// Row on which pawns of `color` start.
#[inline]
pub(crate) const fn pawn_home_row(color: Color) -> u8 {
    match color {
        Color::White => SIZE - 2,
        Color::Black => 1,
    }
}

/// Fixed 8×8 grid of piece slots.
///
/// Boards are values: moves produce a new board through
/// [`Board::with_move`] rather than mutating cells in place.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    slots: [[Piece; SIZE as usize]; SIZE as usize],
}

impl Board {
    fn empty() -> Self {
        let mut slots = [[Piece::empty(Location { row: 0, col: 0 }); SIZE as usize]; SIZE as usize];
        for location in Location::all() {
            slots[location.row as usize][location.col as usize] = Piece::empty(location);
        }
        Self { slots }
    }

    /// The standard starting position with no piece marked as moved.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (col, role) in (0..SIZE).zip(BACK_RANK) {
            board.place(Location { row: 0, col }, Color::Black, role);
            board.place(Location { row: 1, col }, Color::Black, Role::Pawn);
            board.place(Location { row: 6, col }, Color::White, Role::Pawn);
            board.place(Location { row: 7, col }, Color::White, role);
        }
        board
    }

    /// Builds a board from an explicit piece list.
    ///
    /// Each side must have exactly one king. Pawns placed off their home
    /// row are marked as moved; everything else starts unmoved.
    pub fn from_pieces(
        pieces: impl IntoIterator<Item = (Location, Color, Role)>,
    ) -> Result<Self, BoardError> {
        let mut board = Self::empty();
        for (location, color, role) in pieces {
            if !board.at(location).is_empty() {
                return Err(BoardError::Occupied(location));
            }
            board.place(location, color, role);
            if role == Role::Pawn && location.row != pawn_home_row(color) {
                board.slot_mut(location).has_moved = true;
            }
        }

        for color in Color::ALL {
            let kings = board
                .pieces_of(color)
                .filter(|piece| piece.role() == Some(Role::King))
                .count();
            match kings {
                0 => return Err(BoardError::MissingKing(color)),
                1 => {}
                _ => return Err(BoardError::ExtraKing(color)),
            }
        }
        Ok(board)
    }

    /// Looks up a slot by signed coordinates.
    ///
    /// Returns `None` when the coordinates are off the board, which is
    /// distinct from an empty square (`Some` holding the sentinel).
    #[inline]
    pub fn piece_at(&self, row: i8, col: i8) -> Option<Piece> {
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        Location::new(row, col).map(|location| self.at(location))
    }

    /// The slot at an in-bounds location.
    #[inline]
    pub fn at(&self, location: Location) -> Piece {
        self.slots[location.row as usize][location.col as usize]
    }

    /// Every non-empty slot.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.slots
            .iter()
            .flatten()
            .filter(|piece| !piece.is_empty())
    }

    /// Every piece belonging to `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |piece| piece.is_color(color))
    }

    /// Where `color`'s king stands.
    pub fn king_location(&self, color: Color) -> Option<Location> {
        self.pieces_of(color)
            .find(|piece| piece.role() == Some(Role::King))
            .map(|piece| piece.location)
    }

    /// A copy of this board with the piece on `from` moved to `to`.
    ///
    /// Whatever stood on `to` is captured, `from` becomes empty and the
    /// moved piece is marked as moved with its location updated.
    #[must_use]
    pub fn with_move(&self, from: Location, to: Location) -> Board {
        let mut next = *self;
        let mut moved = self.at(from);
        moved.has_moved = true;
        moved.location = to;
        *next.slot_mut(from) = Piece::empty(from);
        *next.slot_mut(to) = moved;
        next
    }

    /// Piece placement part of FEN, e.g. `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub fn to_fen(&self) -> String {
        shakmaty::Board::from(self).to_string()
    }

    fn place(&mut self, location: Location, color: Color, role: Role) {
        *self.slot_mut(location) = Piece::new(color, role, location);
    }

    #[inline]
    fn slot_mut(&mut self, location: Location) -> &mut Piece {
        &mut self.slots[location.row as usize][location.col as usize]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl From<&Board> for shakmaty::Board {
    fn from(board: &Board) -> Self {
        let mut out = shakmaty::Board::empty();
        for piece in board.pieces() {
            if let Occupant::Occupied { color, role } = piece.occupant {
                out.set_piece_at(Square::from(piece.location), shakmaty::Piece { color, role });
            }
        }
        out
    }
}

impl TryFrom<&shakmaty::Board> for Board {
    type Error = BoardError;

    fn try_from(board: &shakmaty::Board) -> Result<Self, Self::Error> {
        Board::from_pieces(Location::all().filter_map(|location| {
            board
                .piece_at(Square::from(location))
                .map(|piece| (location, piece.color, piece.role))
        }))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.to_fen()).finish()
    }
}

/// Parses a full FEN string into a board and the side to move.
///
/// Only piece placement and the side to move are read. Castling rights,
/// en passant squares and move counters are parsed but ignored, and pawns
/// on their last rank are accepted since pieces never promote.
pub fn parse_fen(fen: &str) -> Result<(Board, Color), BoardError> {
    let fen: Fen = fen.trim().parse()?;
    let setup = fen.as_setup();
    let board = Board::try_from(&setup.board)?;
    Ok((board, setup.turn))
}
