//! The board state the drag-and-drop engine feeds: squares, piece codes and the game store.
//!
//! There are no chess rules here. A board is a plain square → piece mapping and any move is
//! accepted.

mod binding;
mod store;

pub use binding::StoreBinding;
pub use store::{Board, GameStore, GlobalStore};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    Square(String),
    Piece(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Square(s) => write!(f, "not a square name: {s:?} (expected a1..h8)"),
            Self::Piece(s) => write!(f, "not a piece code: {s:?} (expected e.g. \"wp\", \"bk\")"),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    fn code(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    fn code(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    fn from_code(c: char) -> Option<Self> {
        Some(match c {
            'p' => Self::Pawn,
            'n' => Self::Knight,
            'b' => Self::Bishop,
            'r' => Self::Rook,
            'q' => Self::Queen,
            'k' => Self::King,
            _ => return None,
        })
    }
}

/// A piece, written as a two-letter code: color (`w`/`b`) then kind (`p n b r q k`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

impl std::str::FromStr for Piece {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let piece = match (chars.next(), chars.next(), chars.next()) {
            (Some(color), Some(kind), None) => {
                let color = match color {
                    'w' => Color::White,
                    'b' => Color::Black,
                    _ => return Err(ParseError::Piece(s.to_owned())),
                };
                PieceKind::from_code(kind).map(|kind| Self::new(color, kind))
            }
            _ => None,
        };
        piece.ok_or_else(|| ParseError::Piece(s.to_owned()))
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.color.code(), self.kind.code())
    }
}

impl From<Piece> for String {
    fn from(piece: Piece) -> Self {
        piece.to_string()
    }
}

impl TryFrom<String> for Piece {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A board square, `a1` through `h8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// `file` and `rank` are zero-based. `None` off the board.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { rank, file })
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn is_light(self) -> bool {
        (self.file + self.rank) % 2 == 1
    }

    /// All 64 squares, `a1`, `b1`, … `h8`.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Self { rank, file }))
    }
}

impl std::str::FromStr for Square {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok(Self {
                file: file - b'a',
                rank: rank - b'1',
            }),
            _ => Err(ParseError::Square(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_names() {
        let e2: Square = "e2".parse().unwrap();
        assert_eq!((e2.file(), e2.rank()), (4, 1));
        assert_eq!(e2.to_string(), "e2");
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a10".parse::<Square>().is_err());
        assert_eq!(Square::all().count(), 64);
        assert_eq!(Square::all().last().map(|s| s.to_string()).as_deref(), Some("h8"));
        assert!(!"a1".parse::<Square>().unwrap().is_light());
        assert!("h1".parse::<Square>().unwrap().is_light());
    }

    #[test]
    fn piece_codes() {
        let wp: Piece = "wp".parse().unwrap();
        assert_eq!(wp, Piece::new(Color::White, PieceKind::Pawn));
        assert_eq!(Piece::new(Color::Black, PieceKind::Knight).to_string(), "bn");
        assert_eq!("".parse::<Piece>(), Err(ParseError::Piece(String::new())));
        assert!("xp".parse::<Piece>().is_err());
        assert!("wx".parse::<Piece>().is_err());
        assert!("wpp".parse::<Piece>().is_err());
    }
}
