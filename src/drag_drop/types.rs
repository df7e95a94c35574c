use egui::{PointerButton, Pos2, Vec2};

use super::schedule::TaskHandle;

/// The record describing the current drag, handed to every hook.
///
/// `DragSession::default()` is the idle zero-state; the engine returns to it after every
/// commit or cancel.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<N> {
    /// True between a qualifying press and the release that resolves it.
    pub dragging: bool,

    /// The element being moved. The document owns it.
    pub element: Option<N>,

    /// Latest pointer position, in document coordinates.
    pub pointer_position: Pos2,

    /// Pointer position at press time, in document coordinates.
    pub pointer_start: Pos2,

    /// Element's document-space top-left at press time.
    pub element_origin: Pos2,

    pub element_size: Vec2,

    /// Pointer position minus element top-left at press time (the grab point).
    pub pointer_offset_within_element: Vec2,

    /// Document-space origin of the element's containing block.
    pub container_offset: Vec2,

    /// Resolved on release.
    pub drop_target: Option<N>,

    /// Label of the source (e.g. `e2`), or empty.
    pub start_coordinate: String,

    /// Label of the drop target, or empty.
    pub end_coordinate: String,
}

impl<N> Default for DragSession<N> {
    fn default() -> Self {
        Self {
            dragging: false,
            element: None,
            pointer_position: Pos2::ZERO,
            pointer_start: Pos2::ZERO,
            element_origin: Pos2::ZERO,
            element_size: Vec2::ZERO,
            pointer_offset_within_element: Vec2::ZERO,
            container_offset: Vec2::ZERO,
            drop_target: None,
            start_coordinate: String::new(),
            end_coordinate: String::new(),
        }
    }
}

impl<N: PartialEq> DragSession<N> {
    /// `true` if this is the idle zero-state.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,

    /// Released over an accepted target; the element is animating into it.
    Committing,

    /// Released without a valid drop; the element is animating back.
    Canceling,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEventKind {
    Press(PointerButton),
    Move,
    Release,
}

/// A raw pointer event, positioned in document (page) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent<N> {
    pub kind: PointerEventKind,
    pub page_pos: Pos2,

    /// Element the event was dispatched to. Only presses need it.
    pub target: Option<N>,
}

impl<N> PointerEvent<N> {
    pub fn press(target: N, page_pos: Pos2) -> Self {
        Self {
            kind: PointerEventKind::Press(PointerButton::Primary),
            page_pos,
            target: Some(target),
        }
    }

    pub fn moved(page_pos: Pos2) -> Self {
        Self {
            kind: PointerEventKind::Move,
            page_pos,
            target: None,
        }
    }

    pub fn release(page_pos: Pos2) -> Self {
        Self {
            kind: PointerEventKind::Release,
            page_pos,
            target: None,
        }
    }
}

/// Whether the host should keep running its default handling for an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Settle<N> {
    Commit { target: N },
    Cancel,
}

#[derive(Clone, Copy, Debug)]
pub(super) enum Phase<N> {
    Idle,
    Dragging,
    Settling { settle: Settle<N>, task: TaskHandle },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Task<N> {
    ClearTransition(N),
    Settle,
}
