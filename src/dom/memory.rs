use ahash::HashMap;
use egui::{Pos2, Rect, Vec2};

use super::{Dom, InlineStyle, PointerEvents, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,

    /// Explicit document-space layout box. `None` fills the parent.
    frame: Option<Rect>,

    position: Position,
    style: InlineStyle,
    native_drag: bool,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            parent: None,
            children: Vec::new(),
            frame: None,
            position: Position::Static,
            style: InlineStyle::default(),
            native_drag: true,
        }
    }
}

/// Retained, arena-backed element tree with a deliberately simple layout model.
///
/// - An element with a frame occupies that document-space rectangle.
/// - An element without a frame fills its parent.
/// - An `Absolute` element sits at its containing block's origin plus its inline `offset`,
///   sized by its inline `size` (else its flow size).
///
/// Hit testing picks the highest stacking `z_index` first, then the latest element in document
/// order. Removed nodes keep their id; they are simply no longer attached.
#[derive(Clone, Debug)]
pub struct MemoryDom {
    elements: Vec<Element>,
    root: NodeId,
    scroll: Vec2,
    ids: HashMap<String, NodeId>,
}

impl MemoryDom {
    /// A document whose `body` covers `size` points.
    pub fn new(size: Vec2) -> Self {
        let mut body = Element::new("body");
        body.frame = Some(Rect::from_min_size(Pos2::ZERO, size));
        Self {
            elements: vec![body],
            root: NodeId(0),
            scroll: Vec2::ZERO,
            ids: HashMap::default(),
        }
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str, classes: &[&str]) -> NodeId {
        let mut element = Element::new(tag);
        element.classes = classes.iter().map(|c| (*c).to_owned()).collect();
        self.push(element)
    }

    fn push(&mut self, element: Element) -> NodeId {
        let id = NodeId(self.elements.len() as u32);
        self.elements.push(element);
        id
    }

    pub fn set_element_id(&mut self, node: NodeId, id: &str) {
        if let Some(old) = self.elements[node.index()].id.replace(id.to_owned()) {
            self.ids.remove(&old);
        }
        self.ids.insert(id.to_owned(), node);
    }

    /// Looks up an attached element by id.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids
            .get(id)
            .copied()
            .filter(|&node| self.is_attached(node))
    }

    pub fn set_frame(&mut self, node: NodeId, frame: Rect) {
        self.elements[node.index()].frame = Some(frame);
    }

    pub fn set_stylesheet_position(&mut self, node: NodeId, position: Position) {
        self.elements[node.index()].position = position;
    }

    pub fn set_scroll_offset(&mut self, scroll: Vec2) {
        self.scroll = scroll;
    }

    pub fn native_drag_enabled(&self, node: NodeId) -> bool {
        self.elements[node.index()].native_drag
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.elements[node.index()].parent.take() {
            self.elements[parent.index()].children.retain(|&c| c != node);
        }
    }

    /// Document-space border box.
    pub fn document_rect(&self, node: NodeId) -> Rect {
        let element = &self.elements[node.index()];
        let flow = element.frame.unwrap_or_else(|| match element.parent {
            Some(parent) => self.document_rect(parent),
            None => Rect::NOTHING,
        });

        if self.position(node) != Position::Absolute {
            return flow;
        }

        let origin = self
            .containing_block(node)
            .map(|block| self.document_rect(block).min)
            .unwrap_or(Pos2::ZERO);
        let offset = element.style.offset.unwrap_or_else(|| flow.min - origin);
        let size = element.style.size.unwrap_or_else(|| flow.size());
        Rect::from_min_size(origin + offset, size)
    }

    fn containing_block(&self, node: NodeId) -> Option<NodeId> {
        let mut current = self.elements[node.index()].parent;
        while let Some(n) = current {
            if n == self.root {
                return None;
            }
            if self.position(n).is_positioned() {
                return Some(n);
            }
            current = self.elements[n.index()].parent;
        }
        None
    }

    fn stacking_z(&self, node: NodeId) -> i32 {
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(z) = self.elements[n.index()].style.z_index {
                if self.position(n).is_positioned() {
                    return z;
                }
            }
            current = self.elements[n.index()].parent;
        }
        0
    }

    fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.elements.len());
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.elements[node.index()].children.iter().rev().copied());
        }
        order
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        self.root
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == self.root {
                return true;
            }
            current = self.elements.get(n.index()).and_then(|e| e.parent);
        }
        false
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.elements[node.index()].parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.elements[node.index()].children.clone()
    }

    fn tag_name(&self, node: NodeId) -> &str {
        &self.elements[node.index()].tag
    }

    fn element_id(&self, node: NodeId) -> Option<&str> {
        self.elements[node.index()].id.as_deref()
    }

    fn class_list(&self, node: NodeId) -> &[String] {
        &self.elements[node.index()].classes
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        let classes = &mut self.elements[node.index()].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.elements[node.index()].classes.retain(|c| c != class);
    }

    fn stylesheet_position(&self, node: NodeId) -> Position {
        self.elements[node.index()].position
    }

    fn inline_style(&self, node: NodeId) -> InlineStyle {
        self.elements[node.index()].style
    }

    fn set_inline_style(&mut self, node: NodeId, style: InlineStyle) {
        self.elements[node.index()].style = style;
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.document_rect(node).translate(-self.scroll)
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn element_from_point(&self, point: Pos2) -> Option<NodeId> {
        let doc_point = point + self.scroll;
        self.preorder()
            .into_iter()
            .enumerate()
            .filter(|&(_, node)| {
                self.elements[node.index()].style.pointer_events != Some(PointerEvents::None)
                    && self.document_rect(node).contains(doc_point)
            })
            .max_by_key(|&(order, node)| (self.stacking_z(node), order))
            .map(|(_, node)| node)
    }

    fn clone_node(&mut self, node: NodeId) -> NodeId {
        let mut copy = self.elements[node.index()].clone();
        copy.id = None;
        copy.parent = None;
        copy.children.clear();
        self.push(copy)
    }

    fn insert_before(&mut self, node: NodeId, reference: NodeId) {
        let Some(parent) = self.elements[reference.index()].parent else {
            return;
        };
        self.detach(node);
        let siblings = &mut self.elements[parent.index()].children;
        let at = siblings
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(siblings.len());
        siblings.insert(at, node);
        self.elements[node.index()].parent = Some(parent);
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.elements[parent.index()].children.push(child);
        self.elements[child.index()].parent = Some(parent);
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    fn set_native_drag_enabled(&mut self, node: NodeId, enabled: bool) {
        self.elements[node.index()].native_drag = enabled;
    }
}
