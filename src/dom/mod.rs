//! The document the drag-and-drop engine runs against.
//!
//! [`Dom`] is the small slice of a browser-like element tree the engine needs: parent/child
//! structure, a class list, inline style, geometry and "topmost element at point" hit testing.
//! [`MemoryDom`] is a retained in-memory implementation for tests and headless hosts.

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use egui::{Pos2, Rect, Vec2};

mod memory;
mod selector;

pub use memory::{MemoryDom, NodeId};
pub use selector::{Selector, SelectorError};

/// How an element takes part in layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
}

impl Position {
    /// Non-static elements are containing blocks for absolutely positioned descendants.
    pub fn is_positioned(self) -> bool {
        !matches!(self, Self::Static)
    }
}

/// Whether an element takes part in hit testing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PointerEvents {
    #[default]
    Auto,
    None,
}

/// Per-element style overrides. `InlineStyle::default()` clears every override.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct InlineStyle {
    pub position: Option<Position>,

    /// Top-left corner, relative to the containing block. Only meaningful for `Absolute`.
    pub offset: Option<Vec2>,

    pub size: Option<Vec2>,
    pub z_index: Option<i32>,
    pub opacity: Option<f32>,

    /// Duration of the ease-out transition applied to geometry changes.
    pub transition: Option<Duration>,

    pub pointer_events: Option<PointerEvents>,
}

/// A browser-like element tree.
///
/// Coordinates returned by [`Dom::bounding_rect`] and taken by [`Dom::element_from_point`] are
/// viewport-relative; add [`Dom::scroll_offset`] to get document (page) coordinates.
pub trait Dom {
    type Node: Copy + Eq + Hash + Debug;

    /// The document root (`body`).
    fn root(&self) -> Self::Node;

    /// `true` if the node is connected to [`Dom::root`].
    fn is_attached(&self, node: Self::Node) -> bool;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    fn tag_name(&self, node: Self::Node) -> &str;

    fn element_id(&self, node: Self::Node) -> Option<&str>;

    fn class_list(&self, node: Self::Node) -> &[String];

    fn add_class(&mut self, node: Self::Node, class: &str);

    fn remove_class(&mut self, node: Self::Node, class: &str);

    /// Position scheme from the element's stylesheet, ignoring inline overrides.
    fn stylesheet_position(&self, node: Self::Node) -> Position;

    fn inline_style(&self, node: Self::Node) -> InlineStyle;

    fn set_inline_style(&mut self, node: Self::Node, style: InlineStyle);

    /// Current viewport-relative border box.
    fn bounding_rect(&self, node: Self::Node) -> Rect;

    /// How far the viewport is scrolled into the document.
    fn scroll_offset(&self) -> Vec2;

    /// Topmost attached element under a viewport point whose pointer events are not disabled.
    fn element_from_point(&self, point: Pos2) -> Option<Self::Node>;

    /// Shallow, detached copy of an element: tag, classes, layout and inline style. Ids are
    /// not copied.
    fn clone_node(&mut self, node: Self::Node) -> Self::Node;

    /// Moves `node` into `reference`'s parent, right before `reference`.
    fn insert_before(&mut self, node: Self::Node, reference: Self::Node);

    /// Moves `child` to the end of `parent`'s children.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Detaches the node (and its subtree) from the document.
    fn remove(&mut self, node: Self::Node);

    /// Toggles the host's native drag-start and select-start behavior on an element.
    fn set_native_drag_enabled(&mut self, node: Self::Node, enabled: bool);

    fn has_class(&self, node: Self::Node, class: &str) -> bool {
        self.class_list(node).iter().any(|c| c == class)
    }

    /// Effective position scheme: inline override, else stylesheet.
    fn position(&self, node: Self::Node) -> Position {
        self.inline_style(node)
            .position
            .unwrap_or_else(|| self.stylesheet_position(node))
    }

    fn matches(&self, node: Self::Node, selector: &Selector) -> bool
    where
        Self: Sized,
    {
        selector.matches(self, node)
    }

    /// Nearest ancestor-or-self matching `selector`.
    fn closest(&self, node: Self::Node, selector: &Selector) -> Option<Self::Node>
    where
        Self: Sized,
    {
        let mut current = Some(node);
        while let Some(n) = current {
            if selector.matches(self, n) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    /// Every attached element matching `selector`, in document order.
    fn query_selector_all(&self, selector: &Selector) -> Vec<Self::Node>
    where
        Self: Sized,
    {
        let mut found = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            if selector.matches(self, node) {
                found.push(node);
            }
            stack.extend(self.children(node).into_iter().rev());
        }
        found
    }
}
