use egui::Pos2;

use crate::dom::{Dom, PointerEvents};

/// Disables hit testing on elements and puts every override back when dropped.
struct HitTestMask<'a, D: Dom> {
    dom: &'a mut D,
    saved: Vec<(D::Node, Option<PointerEvents>)>,
}

impl<'a, D: Dom> HitTestMask<'a, D> {
    fn new(dom: &'a mut D) -> Self {
        Self {
            dom,
            saved: Vec::new(),
        }
    }

    fn disable(&mut self, node: D::Node) {
        let mut style = self.dom.inline_style(node);
        self.saved.push((node, style.pointer_events));
        style.pointer_events = Some(PointerEvents::None);
        self.dom.set_inline_style(node, style);
    }
}

impl<D: Dom> Drop for HitTestMask<'_, D> {
    fn drop(&mut self) {
        for (node, pointer_events) in self.saved.drain(..).rev() {
            let mut style = self.dom.inline_style(node);
            style.pointer_events = pointer_events;
            self.dom.set_inline_style(node, style);
        }
    }
}

/// Every element under a viewport point, topmost first.
///
/// Hit testing only reports the topmost element, which during a drag is usually the dragged
/// element itself. Each element found is made transparent to the pointer so the next query
/// reaches the one beneath; the overrides are restored before returning.
pub fn element_stack_at<D: Dom>(dom: &mut D, point: Pos2) -> Vec<D::Node> {
    let mut stack = Vec::new();
    let mut mask = HitTestMask::new(dom);
    while let Some(top) = mask.dom.element_from_point(point) {
        if stack.contains(&top) {
            break;
        }
        stack.push(top);
        mask.disable(top);
    }
    drop(mask);
    stack
}

/// Topmost element under a viewport point that satisfies `accepts`.
pub fn resolve_drop_target<D: Dom>(
    dom: &mut D,
    point: Pos2,
    mut accepts: impl FnMut(&D, D::Node) -> bool,
) -> Option<D::Node> {
    let stack = element_stack_at(dom, point);
    stack.into_iter().find(|&node| accepts(&*dom, node))
}
