//! Pointer-driven drag-and-drop of document elements.
//!
//! A press on a bound draggable element lifts it out of the flow (leaving an invisible
//! placeholder in its slot) and makes it follow the pointer. While it moves, the topmost drop
//! candidate under the pointer is highlighted. On release the drag either commits (the element
//! animates into the drop target and is reparented there) or cancels (it animates back).
//!
//! The engine never owns elements; it drives a [`Dom`] handed to each call. Time is supplied by
//! the host so the settle animations can be completed from [`DragAndDrop::advance`].

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use crate::dom::{Dom, Selector, SelectorError};

mod binder;
mod debug;
pub mod geometry;
mod hooks;
mod options;
pub mod resolver;
pub mod schedule;
mod session;
mod settle;
mod types;


pub use hooks::{Callback, Labeler, Predicate, square_label};
pub use options::{DragDropOptions, Targeting};
pub use types::{DragPhase, DragSession, PointerEvent, PointerEventKind, Propagation};

use hooks::Hooks;
use schedule::Scheduler;
use types::{Phase, Settle, Task};

#[derive(Debug)]
enum Binding<N> {
    Unbound,
    Bound { draggables: Vec<N> },
}

/// The drag-and-drop engine. One drag session at a time.
///
/// ```
/// use std::time::Duration;
///
/// use egui::{Rect, pos2, vec2};
/// use vchess::dom::{Dom as _, MemoryDom};
/// use vchess::drag_drop::{DragAndDrop, DragDropOptions, DragPhase, PointerEvent};
///
/// let mut dom = MemoryDom::new(vec2(200.0, 100.0));
/// let root = dom.root();
/// let from = dom.create_element("div", &["droppable"]);
/// dom.set_frame(from, Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0)));
/// dom.append_child(root, from);
/// let to = dom.create_element("div", &["droppable"]);
/// dom.set_frame(to, Rect::from_min_size(pos2(100.0, 0.0), vec2(100.0, 100.0)));
/// dom.append_child(root, to);
/// let item = dom.create_element("div", &["draggable"]);
/// dom.append_child(from, item);
///
/// let mut dnd = DragAndDrop::new(DragDropOptions::default()).unwrap();
/// dnd.bind(&mut dom);
///
/// let t0 = Duration::ZERO;
/// dnd.handle_event(&mut dom, &PointerEvent::press(item, pos2(50.0, 50.0)), t0);
/// dnd.handle_event(&mut dom, &PointerEvent::moved(pos2(150.0, 50.0)), t0);
/// dnd.handle_event(&mut dom, &PointerEvent::release(pos2(150.0, 50.0)), t0);
/// assert_eq!(dnd.phase(), DragPhase::Committing);
///
/// dnd.advance(&mut dom, Duration::from_millis(120));
/// assert_eq!(dnd.phase(), DragPhase::Idle);
/// assert_eq!(dom.parent(item), Some(to));
/// ```
#[derive(Debug)]
pub struct DragAndDrop<N> {
    options: DragDropOptions,
    drag_selector: Selector,
    drop_selector: Selector,
    coordinate_selector: Selector,

    hooks: Hooks<N>,
    session: DragSession<N>,
    phase: Phase<N>,
    binding: Binding<N>,

    /// The one element carrying the hover class, if any.
    hovered: Option<N>,

    /// Placeholders inserted by the current session.
    placeholders: Vec<N>,

    scheduler: Scheduler<Task<N>>,

    debug_log: VecDeque<String>,
    debug_counter: u64,
}

impl<N: Copy + Eq + Hash + Debug> DragAndDrop<N> {
    pub fn new(options: DragDropOptions) -> Result<Self, SelectorError> {
        let (drag_selector, drop_selector) = options.targeting.selectors()?;
        let coordinate_selector = Selector::class(options.coordinate_class.as_str());
        Ok(Self {
            options,
            drag_selector,
            drop_selector,
            coordinate_selector,
            hooks: Hooks::default(),
            session: DragSession::default(),
            phase: Phase::Idle,
            binding: Binding::Unbound,
            hovered: None,
            placeholders: Vec::new(),
            scheduler: Scheduler::default(),
            debug_log: VecDeque::new(),
            debug_counter: 0,
        })
    }

    pub fn options(&self) -> &DragDropOptions {
        &self.options
    }

    /// Snapshot of the current session (zero-state while idle).
    pub fn session(&self) -> &DragSession<N> {
        &self.session
    }

    pub fn phase(&self) -> DragPhase {
        match self.phase {
            Phase::Idle => DragPhase::Idle,
            Phase::Dragging => DragPhase::Dragging,
            Phase::Settling {
                settle: Settle::Commit { .. },
                ..
            } => DragPhase::Committing,
            Phase::Settling {
                settle: Settle::Cancel,
                ..
            } => DragPhase::Canceling,
        }
    }

    /// Element currently carrying the drop-hover class.
    pub fn hovered(&self) -> Option<N> {
        self.hovered
    }

    /// Earliest time at which [`Self::advance`] has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn set_can_drag(&mut self, f: impl FnMut(&DragSession<N>) -> bool + 'static) {
        self.hooks.can_drag = Some(Box::new(f));
    }

    pub fn set_can_drop(&mut self, f: impl FnMut(&DragSession<N>) -> bool + 'static) {
        self.hooks.can_drop = Some(Box::new(f));
    }

    pub fn set_on_catch(&mut self, f: impl FnMut(&DragSession<N>) + 'static) {
        self.hooks.on_catch = Some(Box::new(f));
    }

    pub fn set_on_drop(&mut self, f: impl FnMut(&DragSession<N>) + 'static) {
        self.hooks.on_drop = Some(Box::new(f));
    }

    pub fn set_on_cancel(&mut self, f: impl FnMut(&DragSession<N>) + 'static) {
        self.hooks.on_cancel = Some(Box::new(f));
    }

    /// Replaces [`square_label`] as the way coordinate labels are read from class lists.
    pub fn set_coordinate_labeler(&mut self, f: impl Fn(&[String]) -> Option<String> + 'static) {
        self.hooks.labeler = Some(Box::new(f));
    }

    /// Empties every hook slot.
    pub fn clear_hooks(&mut self) {
        self.hooks = Hooks::default();
    }

    /// Runs due scheduled work, then dispatches the event.
    pub fn handle_event<D: Dom<Node = N>>(
        &mut self,
        dom: &mut D,
        event: &PointerEvent<N>,
        now: Duration,
    ) -> Propagation {
        self.advance(dom, now);
        match event.kind {
            PointerEventKind::Press(button) => match event.target {
                Some(target) => self.press(dom, target, button, event.page_pos, now),
                None => Propagation::Continue,
            },
            PointerEventKind::Move => self.pointer_moved(dom, event.page_pos),
            PointerEventKind::Release => self.release(dom, event.page_pos, now),
        }
    }

    /// Runs every scheduled task due at `now`: transition clean-ups and settle completion.
    pub fn advance<D: Dom<Node = N>>(&mut self, dom: &mut D, now: Duration) {
        for (handle, task) in self.scheduler.take_due(now) {
            match task {
                Task::ClearTransition(node) => {
                    let mut style = dom.inline_style(node);
                    style.transition = None;
                    dom.set_inline_style(node, style);
                }
                Task::Settle => match self.phase {
                    Phase::Settling { task, .. } if task == handle => self.finish(dom),
                    _ => {
                        log::warn!("stale settle task {handle:?} in phase {:?}", self.phase());
                    }
                },
            }
        }
    }

    /// Completes a pending commit or cancel right away.
    pub fn flush<D: Dom<Node = N>>(&mut self, dom: &mut D) {
        if let Phase::Settling { task, .. } = self.phase {
            self.scheduler.cancel(task);
            self.debug_log_event("settle flushed");
            self.finish(dom);
        }
    }

    fn coordinate_of<D: Dom<Node = N>>(&self, dom: &D, node: N) -> String {
        dom.closest(node, &self.coordinate_selector)
            .map(|holder| self.hooks.label(dom.class_list(holder)))
            .unwrap_or_default()
    }
}
