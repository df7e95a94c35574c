use std::cell::RefCell;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use super::{GameStore, Square};
use crate::drag_drop::{DragAndDrop, DragSession};

fn squares<N>(session: &DragSession<N>) -> Option<(Square, Square)> {
    let from = session.start_coordinate.parse().ok()?;
    let to = session.end_coordinate.parse().ok()?;
    Some((from, to))
}

/// Connects a [`GameStore`] to a drag-and-drop engine: a committed drop from one square to
/// another becomes [`GameStore::update_piece`].
#[derive(Clone, Debug)]
pub struct StoreBinding {
    store: Rc<RefCell<GameStore>>,
    enforce_turn_order: bool,
}

impl StoreBinding {
    pub fn new(store: Rc<RefCell<GameStore>>) -> Self {
        Self {
            store,
            enforce_turn_order: false,
        }
    }

    /// Only let the side to move pick up pieces.
    pub fn enforce_turn_order(mut self, enforce: bool) -> Self {
        self.enforce_turn_order = enforce;
        self
    }

    /// Installs the `on_drop` hook (and `can_drag`, when enforcing turn order).
    pub fn attach<N: Copy + Eq + Hash + Debug + 'static>(self, engine: &mut DragAndDrop<N>) {
        if self.enforce_turn_order {
            let store = Rc::clone(&self.store);
            engine.set_can_drag(move |session| {
                let Ok(from) = session.start_coordinate.parse::<Square>() else {
                    return false;
                };
                let store = store.borrow();
                store
                    .board()
                    .get(from)
                    .is_some_and(|piece| piece.color == store.next_move())
            });
        }

        let store = self.store;
        engine.set_on_drop(move |session| match squares(session) {
            Some((from, to)) if from != to => {
                store.borrow_mut().update_piece(from, to);
            }
            _ => log::debug!(
                "drop {:?} -> {:?} does not name two squares; board unchanged",
                session.start_coordinate,
                session.end_coordinate
            ),
        });
    }
}
