use std::fmt::Debug;
use std::hash::Hash;

use super::types::Phase;
use super::{Binding, DragAndDrop};
use crate::dom::Dom;

impl<N: Copy + Eq + Hash + Debug> DragAndDrop<N> {
    pub fn is_bound(&self) -> bool {
        matches!(self.binding, Binding::Bound { .. })
    }

    /// Starts listening: every element matching the drag selector becomes a press source and
    /// loses the host's native drag/select behavior. Returns `false` if already bound.
    pub fn bind<D: Dom<Node = N>>(&mut self, dom: &mut D) -> bool {
        if self.is_bound() {
            return false;
        }
        let mut draggables = dom.query_selector_all(&self.drag_selector);
        draggables.retain(|&node| !dom.has_class(node, &self.options.placeholder_class));
        for &node in &draggables {
            dom.set_native_drag_enabled(node, false);
        }
        self.debug_log_event(format!(
            "bind {} draggables ({})",
            draggables.len(),
            self.drag_selector
        ));
        self.binding = Binding::Bound { draggables };
        true
    }

    /// Stops listening and restores native behavior on every element [`Self::bind`] touched.
    ///
    /// A drag in progress is put back immediately; a pending commit or cancel is completed.
    /// Returns `false` if already unbound.
    pub fn unbind<D: Dom<Node = N>>(&mut self, dom: &mut D) -> bool {
        let Binding::Bound { draggables } = std::mem::replace(&mut self.binding, Binding::Unbound)
        else {
            return false;
        };
        match self.phase {
            Phase::Dragging => self.cancel_now(dom),
            Phase::Settling { .. } => self.flush(dom),
            Phase::Idle => {}
        }
        for node in draggables {
            dom.set_native_drag_enabled(node, true);
        }
        self.debug_log_event("unbind");
        true
    }

    /// Picks up draggables added since [`Self::bind`].
    pub fn rebind<D: Dom<Node = N>>(&mut self, dom: &mut D) {
        self.unbind(dom);
        self.bind(dom);
    }
}

#[cfg(test)]
mod tests {
    use egui::{Rect, pos2, vec2};

    use crate::dom::{Dom as _, MemoryDom};
    use crate::drag_drop::{DragAndDrop, DragDropOptions};

    #[test]
    fn bind_and_unbind_are_idempotent_inverses() {
        let mut dom = MemoryDom::new(vec2(100.0, 100.0));
        let root = dom.root();
        let cell = dom.create_element("div", &["droppable"]);
        dom.set_frame(cell, Rect::from_min_size(pos2(0.0, 0.0), vec2(50.0, 50.0)));
        dom.append_child(root, cell);
        let item = dom.create_element("div", &["draggable"]);
        dom.append_child(cell, item);

        let mut dnd = DragAndDrop::new(DragDropOptions::default()).unwrap();
        assert!(!dnd.unbind(&mut dom));

        assert!(dnd.bind(&mut dom));
        assert!(!dnd.bind(&mut dom));
        assert!(dnd.is_bound());
        assert!(!dom.native_drag_enabled(item));
        assert!(dom.native_drag_enabled(cell));

        assert!(dnd.unbind(&mut dom));
        assert!(!dnd.unbind(&mut dom));
        assert!(!dnd.is_bound());
        assert!(dom.native_drag_enabled(item));
    }
}
