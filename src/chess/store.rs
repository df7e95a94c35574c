use std::collections::BTreeMap;

use super::{Color, Piece, PieceKind, Square};

/// Every square of the board mapped to its piece, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Board(BTreeMap<Square, Option<Piece>>);

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self(Square::all().map(|sq| (sq, None)).collect())
    }

    /// The standard starting position.
    pub fn initial() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for sq in Square::all() {
            let piece = match sq.rank() {
                0 => Some(Piece::new(Color::White, BACK_RANK[sq.file() as usize])),
                1 => Some(Piece::new(Color::White, PieceKind::Pawn)),
                6 => Some(Piece::new(Color::Black, PieceKind::Pawn)),
                7 => Some(Piece::new(Color::Black, BACK_RANK[sq.file() as usize])),
                _ => None,
            };
            board.set(sq, piece);
        }
        board
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.0.get(&square).copied().flatten()
    }

    /// Returns what was on the square before.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        self.0.insert(square, piece).flatten()
    }

    /// Occupied squares in `a1`..`h8` order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.0
            .iter()
            .filter_map(|(&sq, piece)| piece.map(|piece| (sq, piece)))
    }
}

/// Game state shared by the board view: position, captured pieces and whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GameStore {
    pub theme: String,
    pub board: Board,

    /// Captured pieces, in capture order.
    pub out_of_board: Vec<Piece>,

    pub next_move: Color,
}

impl Default for GameStore {
    fn default() -> Self {
        Self {
            theme: "default".to_owned(),
            board: Board::initial(),
            out_of_board: Vec::new(),
            next_move: Color::White,
        }
    }
}

impl GameStore {
    /// Moves whatever stands on `from` to `to`, capturing what was there, and passes the turn.
    ///
    /// Nothing happens (and the turn is kept) if `from` is empty. No legality checks.
    pub fn update_piece(&mut self, from: Square, to: Square) -> bool {
        let Some(piece) = self.board.set(from, None) else {
            return false;
        };
        if let Some(captured) = self.board.set(to, Some(piece)) {
            self.out_of_board.push(captured);
        }
        self.switch_players();
        log::debug!("moved {piece} {from} -> {to}, {:?} to move", self.next_move);
        true
    }

    pub fn switch_players(&mut self) {
        self.next_move = self.next_move.opposite();
    }

    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn next_move(&self) -> Color {
        self.next_move
    }
}

/// Application-wide UI state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GlobalStore {
    pub app_name: String,
    pub app_version: String,
    pub lang: String,
    pub menu_visible: bool,
}

impl Default for GlobalStore {
    fn default() -> Self {
        Self {
            app_name: "VChess".to_owned(),
            app_version: "0.0.1".to_owned(),
            lang: "pt-br".to_owned(),
            menu_visible: true,
        }
    }
}

impl GlobalStore {
    pub fn set_lang(&mut self, lang: impl Into<String>) {
        self.lang = lang.into();
    }

    pub fn toggle_menu_visible(&mut self) {
        self.menu_visible = !self.menu_visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn piece(code: &str) -> Piece {
        code.parse().unwrap()
    }

    #[test]
    fn initial_position() {
        let board = Board::initial();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.get(sq("e1")), Some(piece("wk")));
        assert_eq!(board.get(sq("d8")), Some(piece("bq")));
        assert_eq!(board.get(sq("g7")), Some(piece("bp")));
        assert_eq!(board.get(sq("e4")), None);
    }

    #[test]
    fn update_piece_moves_and_flips_turn() {
        let mut store = GameStore::default();
        assert!(store.update_piece(sq("e2"), sq("e4")));
        assert_eq!(store.board().get(sq("e2")), None);
        assert_eq!(store.board().get(sq("e4")), Some(piece("wp")));
        assert_eq!(store.next_move(), Color::Black);
        assert!(store.out_of_board.is_empty());
    }

    #[test]
    fn update_piece_captures() {
        let mut store = GameStore::default();
        assert!(store.update_piece(sq("d1"), sq("d7")));
        assert_eq!(store.out_of_board, [piece("bp")]);
        assert_eq!(store.board().get(sq("d7")), Some(piece("wq")));
    }

    #[test]
    fn update_from_empty_square_is_a_no_op() {
        let mut store = GameStore::default();
        assert!(!store.update_piece(sq("e4"), sq("e5")));
        assert_eq!(store, GameStore::default());
    }

    #[test]
    fn global_store_mutations() {
        let mut global = GlobalStore::default();
        assert_eq!(global.app_name, "VChess");
        global.set_lang("en");
        global.toggle_menu_visible();
        assert_eq!(global.lang, "en");
        assert!(!global.menu_visible);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn store_serializes_with_square_and_piece_codes() {
        let mut store = GameStore::default();
        store.update_piece(sq("e2"), sq("e4"));
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["board"]["e4"], "wp");
        assert_eq!(json["board"]["e2"], serde_json::Value::Null);
        assert_eq!(json["nextMove"], "black");

        let text = ron::to_string(&store).unwrap();
        let back: GameStore = ron::from_str(&text).unwrap();
        assert_eq!(back, store);
    }
}
