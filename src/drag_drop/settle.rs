use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use egui::Vec2;

use super::{DragAndDrop, Targeting};
use super::geometry::document_box;
use super::types::{DragSession, Phase, Settle, Task};
use crate::dom::{Dom, InlineStyle, Position};

impl<N: Copy + Eq + Hash + Debug> DragAndDrop<N> {
    /// The dragged element, provided it is still in the document.
    ///
    /// An element removed mid-drag is not recovered: the session is dropped and the element is
    /// left as it is.
    pub(super) fn live_element<D: Dom<Node = N>>(&mut self, dom: &mut D) -> Option<N> {
        let element = self.session.element?;
        if dom.is_attached(element) {
            return Some(element);
        }

        log::warn!("dragged element {element:?} was removed from the document mid-drag");
        self.debug_log_event(format!("abort: element {element:?} detached"));
        self.scheduler
            .cancel_where(|task| matches!(task, Task::ClearTransition(n) if *n == element));
        if let Phase::Settling { task, .. } = self.phase {
            self.scheduler.cancel(task);
        }
        for placeholder in self.placeholders.drain(..) {
            dom.remove(placeholder);
        }
        if let Some(hovered) = self.hovered.take() {
            dom.remove_class(hovered, &self.options.drop_hover_class);
        }
        self.session = DragSession::default();
        self.phase = Phase::Idle;
        None
    }

    pub(super) fn make_placeholder<D: Dom<Node = N>>(&mut self, dom: &mut D, element: N) -> N {
        let placeholder = dom.clone_node(element);
        dom.remove_class(placeholder, &self.options.dragging_class);
        if let Targeting::Class { draggable, .. } = &self.options.targeting {
            dom.remove_class(placeholder, draggable);
        }
        dom.add_class(placeholder, &self.options.placeholder_class);
        let style = InlineStyle {
            position: Some(Position::Static),
            opacity: Some(0.0),
            z_index: None,
            ..dom.inline_style(placeholder)
        };
        dom.set_inline_style(placeholder, style);
        self.placeholders.push(placeholder);
        placeholder
    }

    /// Eases the element to `offset` (relative to its containing block) over the animation time.
    pub(super) fn animate_to<D: Dom<Node = N>>(
        &mut self,
        dom: &mut D,
        element: N,
        offset: Vec2,
        now: Duration,
    ) {
        let time = self.options.animation_time();
        let mut style = dom.inline_style(element);
        style.transition = Some(time);
        style.offset = Some(offset);
        dom.set_inline_style(element, style);
        self.scheduler
            .schedule(now + time, Task::ClearTransition(element));
    }

    fn enter_settle(&mut self, settle: Settle<N>, now: Duration) {
        let task = self
            .scheduler
            .schedule(now + self.options.animation_time(), Task::Settle);
        self.phase = Phase::Settling { settle, task };
    }

    pub(super) fn begin_cancel<D: Dom<Node = N>>(&mut self, dom: &mut D, element: N, now: Duration) {
        let home = (self.session.element_origin - self.session.container_offset).to_vec2();
        self.animate_to(dom, element, home, now);
        self.enter_settle(Settle::Cancel, now);
    }

    pub(super) fn begin_commit<D: Dom<Node = N>>(
        &mut self,
        dom: &mut D,
        element: N,
        target: N,
        now: Duration,
    ) {
        self.hooks.dropped(&self.session);

        let landing = self.make_placeholder(dom, element);
        dom.append_child(target, landing);
        let slot = document_box(dom, landing).min - self.session.container_offset;
        self.animate_to(dom, element, slot.to_vec2(), now);

        self.debug_log_event(format!(
            "drop element={element:?} target={target:?} {:?} -> {:?}",
            self.session.start_coordinate, self.session.end_coordinate
        ));
        self.enter_settle(Settle::Commit { target }, now);
    }

    /// Applies the final state of the pending commit or cancel.
    pub(super) fn finish<D: Dom<Node = N>>(&mut self, dom: &mut D) {
        if let Phase::Settling { settle, .. } = self.phase {
            self.complete(dom, settle);
        }
    }

    /// Final state of a commit or cancel, then back to idle.
    fn complete<D: Dom<Node = N>>(&mut self, dom: &mut D, settle: Settle<N>) {
        let Some(element) = self.live_element(dom) else {
            return;
        };

        match settle {
            Settle::Commit { target } => {
                dom.append_child(target, element);
                self.debug_log_event(format!("commit element={element:?} parent={target:?}"));
            }
            Settle::Cancel => {
                self.hooks.canceled(&self.session);
                self.debug_log_event(format!("cancel element={element:?}"));
            }
        }

        for placeholder in self.placeholders.drain(..) {
            dom.remove(placeholder);
        }
        if let Some(hovered) = self.hovered.take() {
            dom.remove_class(hovered, &self.options.drop_hover_class);
        }
        dom.remove_class(element, &self.options.dragging_class);
        dom.set_inline_style(element, InlineStyle::default());
        self.scheduler
            .cancel_where(|task| matches!(task, Task::ClearTransition(n) if *n == element));

        self.session = DragSession::default();
        self.phase = Phase::Idle;
    }

    /// Puts an in-flight drag back without animating.
    pub(super) fn cancel_now<D: Dom<Node = N>>(&mut self, dom: &mut D) {
        if !matches!(self.phase, Phase::Dragging) {
            return;
        }
        self.session.dragging = false;
        self.debug_log_event("in-flight drag canceled without animation");
        self.complete(dom, Settle::Cancel);
    }
}
