#![forbid(unsafe_code)]

pub mod chess;
pub mod dom;
pub mod drag_drop;
pub mod i18n;
pub mod router;

pub use chess::{Board, Color, GameStore, GlobalStore, Piece, PieceKind, Square, StoreBinding};
pub use dom::{Dom, MemoryDom, NodeId, Selector, SelectorError};
pub use drag_drop::{
    DragAndDrop, DragDropOptions, DragPhase, DragSession, PointerEvent, PointerEventKind,
    Propagation, Targeting,
};
pub use i18n::Translator;
pub use router::{Route, RouteName, Router};
