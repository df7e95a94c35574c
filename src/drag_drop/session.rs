use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use egui::{PointerButton, Pos2, Vec2};

use super::geometry::{compensate_scroll, cumulative_offset, document_box};
use super::resolver::resolve_drop_target;
use super::types::{DragSession, Phase, Propagation};
use super::{Binding, DragAndDrop};
use crate::dom::{Dom, InlineStyle, Position};

fn is_inclusive_descendant<D: Dom>(dom: &D, node: D::Node, ancestor: D::Node) -> bool {
    let mut current = Some(node);
    while let Some(n) = current {
        if n == ancestor {
            return true;
        }
        current = dom.parent(n);
    }
    false
}

impl<N: Copy + Eq + Hash + Debug> DragAndDrop<N> {
    /// The bound draggable that `target` belongs to, if any.
    fn bound_draggable<D: Dom<Node = N>>(&self, dom: &D, target: N) -> Option<N> {
        let Binding::Bound { draggables } = &self.binding else {
            return None;
        };
        let mut current = Some(target);
        while let Some(node) = current {
            if draggables.contains(&node) {
                return Some(node);
            }
            current = dom.parent(node);
        }
        None
    }

    /// Where the element's top-left goes, relative to its containing block, with the pointer
    /// at `pointer`.
    pub(super) fn follow_offset(&self, pointer: Pos2) -> Vec2 {
        let s = &self.session;
        let local = pointer - s.container_offset;
        if self.options.center_on_get {
            (local - s.element_size * 0.5).to_vec2().round()
        } else {
            (local - s.pointer_offset_within_element).to_vec2()
        }
    }

    /// Topmost drop candidate under `page_pos`. Never `element`, one of its descendants, or a
    /// placeholder of the current session.
    fn drop_target_at<D: Dom<Node = N>>(&self, dom: &mut D, element: N, page_pos: Pos2) -> Option<N> {
        let point = compensate_scroll(dom, page_pos);
        let drop_selector = &self.drop_selector;
        let placeholders = &self.placeholders;
        resolve_drop_target(dom, point, |dom, n| {
            drop_selector.matches(dom, n)
                && !placeholders.contains(&n)
                && !is_inclusive_descendant(dom, n, element)
        })
    }

    pub(super) fn press<D: Dom<Node = N>>(
        &mut self,
        dom: &mut D,
        target: N,
        button: PointerButton,
        page_pos: Pos2,
        now: Duration,
    ) -> Propagation {
        if button != PointerButton::Primary {
            return Propagation::Continue;
        }
        let Some(element) = self.bound_draggable(dom, target) else {
            return Propagation::Continue;
        };

        match self.phase {
            Phase::Idle => {}
            Phase::Settling { .. } => self.flush(dom),
            Phase::Dragging => {
                self.debug_log_event(format!("press ignored: already dragging {:?}", self.session.element));
                return Propagation::Continue;
            }
        }

        let rect = document_box(dom, element);
        self.session = DragSession {
            dragging: true,
            element: Some(element),
            pointer_position: page_pos,
            pointer_start: page_pos,
            element_origin: rect.min,
            element_size: rect.size(),
            pointer_offset_within_element: page_pos - rect.min,
            container_offset: cumulative_offset(dom, element),
            drop_target: None,
            start_coordinate: self.coordinate_of(dom, element),
            end_coordinate: String::new(),
        };

        if !self.hooks.allows_drag(&self.session) {
            self.debug_log_event(format!("catch vetoed element={element:?}"));
            self.session = DragSession::default();
            return Propagation::Continue;
        }

        self.hooks.caught(&self.session);

        dom.add_class(element, &self.options.dragging_class);
        let style = InlineStyle {
            position: Some(Position::Absolute),
            offset: Some((rect.min - self.session.container_offset).to_vec2()),
            size: Some(rect.size()),
            z_index: Some(self.options.drag_index),
            ..dom.inline_style(element)
        };
        dom.set_inline_style(element, style);

        let placeholder = self.make_placeholder(dom, element);
        dom.insert_before(placeholder, element);

        self.phase = Phase::Dragging;
        self.debug_log_event(format!(
            "catch element={element:?} from={:?} origin=({:.1},{:.1}) pointer=({:.1},{:.1})",
            self.session.start_coordinate, rect.min.x, rect.min.y, page_pos.x, page_pos.y
        ));

        if self.options.center_on_get {
            let centered = self.follow_offset(page_pos);
            self.animate_to(dom, element, centered, now);
        }
        Propagation::Stop
    }

    pub(super) fn pointer_moved<D: Dom<Node = N>>(
        &mut self,
        dom: &mut D,
        page_pos: Pos2,
    ) -> Propagation {
        if !matches!(self.phase, Phase::Dragging) {
            return Propagation::Continue;
        }
        let Some(element) = self.live_element(dom) else {
            return Propagation::Continue;
        };

        self.session.pointer_position = page_pos;
        self.update_hover(dom, element, page_pos);

        let mut style = dom.inline_style(element);
        style.offset = Some(self.follow_offset(page_pos));
        dom.set_inline_style(element, style);
        Propagation::Stop
    }

    fn update_hover<D: Dom<Node = N>>(&mut self, dom: &mut D, element: N, page_pos: Pos2) {
        if let Some(previous) = self.hovered.take() {
            dom.remove_class(previous, &self.options.drop_hover_class);
        }
        if let Some(candidate) = self.drop_target_at(dom, element, page_pos) {
            if dom.parent(element) != Some(candidate) {
                dom.add_class(candidate, &self.options.drop_hover_class);
                self.hovered = Some(candidate);
            }
        }
    }

    pub(super) fn release<D: Dom<Node = N>>(
        &mut self,
        dom: &mut D,
        page_pos: Pos2,
        now: Duration,
    ) -> Propagation {
        if !matches!(self.phase, Phase::Dragging) {
            return Propagation::Continue;
        }
        let Some(element) = self.live_element(dom) else {
            return Propagation::Continue;
        };

        self.session.pointer_position = page_pos;
        self.session.dragging = false;

        if page_pos == self.session.pointer_start {
            self.debug_log_event("release at press point: cancel");
            self.begin_cancel(dom, element, now);
            return Propagation::Stop;
        }

        let Some(target) = self.drop_target_at(dom, element, page_pos) else {
            self.debug_log_event("release over no drop target: cancel");
            self.begin_cancel(dom, element, now);
            return Propagation::Stop;
        };

        self.session.drop_target = Some(target);
        self.session.end_coordinate = self.coordinate_of(dom, target);

        if dom.parent(element) == Some(target) {
            self.debug_log_event(format!("release over own parent {target:?}: cancel"));
            self.begin_cancel(dom, element, now);
            return Propagation::Stop;
        }

        if !self.hooks.allows_drop(&self.session) {
            self.debug_log_event(format!("drop vetoed target={target:?}: cancel"));
            self.begin_cancel(dom, element, now);
            return Propagation::Stop;
        }

        self.begin_commit(dom, element, target, now);
        Propagation::Stop
    }
}
