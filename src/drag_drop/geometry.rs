use egui::{Pos2, Rect, Vec2};

use crate::dom::Dom;

/// Current viewport-relative box of `element`.
pub fn bounding_box<D: Dom>(dom: &D, element: D::Node) -> Rect {
    dom.bounding_rect(element)
}

/// Box of `element` in document (page) coordinates.
pub fn document_box<D: Dom>(dom: &D, element: D::Node) -> Rect {
    dom.bounding_rect(element).translate(dom.scroll_offset())
}

/// Document-space origin that absolute offsets of `element` are relative to.
///
/// Walks the ancestors up to the root container and stops at the first non-static one; its
/// scroll-compensated box gives the origin. No positioned ancestor yields zero.
pub fn cumulative_offset<D: Dom>(dom: &D, element: D::Node) -> Vec2 {
    let root = dom.root();
    let mut current = dom.parent(element);
    while let Some(ancestor) = current {
        if ancestor == root {
            break;
        }
        if dom.position(ancestor).is_positioned() {
            return document_box(dom, ancestor).min.to_vec2();
        }
        current = dom.parent(ancestor);
    }
    Vec2::ZERO
}

/// Document (page) point to viewport point.
pub fn compensate_scroll<D: Dom>(dom: &D, page_pos: Pos2) -> Pos2 {
    page_pos - dom.scroll_offset()
}

#[cfg(test)]
mod tests {
    use egui::{pos2, vec2};

    use super::*;
    use crate::dom::{MemoryDom, Position};

    #[test]
    fn offsets_follow_nearest_positioned_ancestor() {
        let mut dom = MemoryDom::new(vec2(800.0, 800.0));
        let root = dom.root();
        let board = dom.create_element("div", &["board"]);
        dom.set_frame(board, Rect::from_min_size(pos2(100.0, 50.0), vec2(400.0, 400.0)));
        dom.append_child(root, board);
        let square = dom.create_element("div", &["square"]);
        dom.set_frame(square, Rect::from_min_size(pos2(150.0, 100.0), vec2(50.0, 50.0)));
        dom.append_child(board, square);
        let piece = dom.create_element("div", &["piece"]);
        dom.append_child(square, piece);

        assert_eq!(cumulative_offset(&dom, piece), Vec2::ZERO);

        dom.set_stylesheet_position(board, Position::Relative);
        assert_eq!(cumulative_offset(&dom, piece), vec2(100.0, 50.0));

        dom.set_stylesheet_position(square, Position::Relative);
        assert_eq!(cumulative_offset(&dom, piece), vec2(150.0, 100.0));

        // Scrolling changes viewport boxes, not document-space offsets.
        dom.set_scroll_offset(vec2(0.0, 30.0));
        assert_eq!(cumulative_offset(&dom, piece), vec2(150.0, 100.0));
        assert_eq!(bounding_box(&dom, piece).min, pos2(150.0, 70.0));
        assert_eq!(document_box(&dom, piece).min, pos2(150.0, 100.0));
        assert_eq!(compensate_scroll(&dom, pos2(160.0, 110.0)), pos2(160.0, 80.0));
    }
}
