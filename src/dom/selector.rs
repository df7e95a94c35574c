use itertools::Itertools as _;

use super::Dom;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorError {
    Empty,
    UnexpectedChar { found: char, at: usize },
    EmptyName { at: usize },
    /// Descendant/child/sibling combinators are not supported.
    Combinator { at: usize },
}

impl std::fmt::Display for SelectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty selector"),
            Self::UnexpectedChar { found, at } => {
                write!(f, "unexpected character {found:?} at byte {at}")
            }
            Self::EmptyName { at } => write!(f, "missing name after '#' or '.' at byte {at}"),
            Self::Combinator { at } => {
                write!(f, "combinators are not supported (at byte {at})")
            }
        }
    }
}

impl std::error::Error for SelectorError {}

/// `tag#id.class.class`; every part optional, `*` matches any tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches<D: Dom>(&self, dom: &D, node: D::Node) -> bool {
        if let Some(tag) = &self.tag {
            if !dom.tag_name(node).eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if dom.element_id(node) != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| dom.has_class(node, c))
    }
}

impl std::fmt::Display for Compound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{tag}")?,
            None if self.id.is_none() && self.classes.is_empty() => write!(f, "*")?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}

/// A comma-separated list of compound selectors. An element matches if any compound matches.
///
/// ```
/// use vchess::dom::Selector;
///
/// let sel: Selector = "div.square.droppable, .board".parse().unwrap();
/// assert_eq!(sel.to_string(), "div.square.droppable, .board");
/// assert!("div .piece".parse::<Selector>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl Selector {
    /// Matches elements carrying `class`.
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            alternatives: vec![Compound {
                classes: vec![class.into()],
                ..Default::default()
            }],
        }
    }

    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut alternatives = Vec::new();
        let mut offset = 0;
        for part in source.split(',') {
            alternatives.push(Self::parse_compound(part, offset)?);
            offset += part.len() + 1;
        }
        Ok(Self { alternatives })
    }

    fn parse_compound(part: &str, base: usize) -> Result<Compound, SelectorError> {
        let leading = part.len() - part.trim_start().len();
        let text = part.trim();
        if text.is_empty() {
            return Err(SelectorError::Empty);
        }
        let base = base + leading;

        let mut compound = Compound::default();
        let mut chars = text.char_indices().peekable();
        while let Some((at, c)) = chars.next() {
            match c {
                '*' if at == 0 => {}
                '#' | '.' => {
                    let mut name = String::new();
                    while let Some(&(_, n)) = chars.peek() {
                        if !is_name_char(n) {
                            break;
                        }
                        name.push(n);
                        chars.next();
                    }
                    if name.is_empty() {
                        return Err(SelectorError::EmptyName { at: base + at });
                    }
                    if c == '#' {
                        compound.id = Some(name);
                    } else {
                        compound.classes.push(name);
                    }
                }
                c if at == 0 && is_name_char(c) => {
                    let mut tag = String::from(c);
                    while let Some(&(_, n)) = chars.peek() {
                        if !is_name_char(n) {
                            break;
                        }
                        tag.push(n);
                        chars.next();
                    }
                    compound.tag = Some(tag.to_ascii_lowercase());
                }
                c if c.is_whitespace() || matches!(c, '>' | '+' | '~') => {
                    return Err(SelectorError::Combinator { at: base + at });
                }
                found => {
                    return Err(SelectorError::UnexpectedChar {
                        found,
                        at: base + at,
                    });
                }
            }
        }
        Ok(compound)
    }

    pub fn matches<D: Dom>(&self, dom: &D, node: D::Node) -> bool {
        self.alternatives.iter().any(|c| c.matches(dom, node))
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.alternatives.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use egui::{Rect, pos2, vec2};

    use super::*;
    use crate::dom::MemoryDom;

    #[test]
    fn parses_compound_and_list() {
        let sel = Selector::parse("DIV#board.square.e2 , .piece").unwrap();
        assert_eq!(sel.to_string(), "div#board.square.e2, .piece");
        assert_eq!(Selector::parse("*").unwrap().to_string(), "*");
    }

    #[test]
    fn rejects_what_it_cannot_match() {
        assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
        assert_eq!(Selector::parse(".a,"), Err(SelectorError::Empty));
        assert_eq!(
            Selector::parse("div .piece"),
            Err(SelectorError::Combinator { at: 3 })
        );
        assert_eq!(
            Selector::parse(".a > .b"),
            Err(SelectorError::Combinator { at: 2 })
        );
        assert_eq!(Selector::parse("div.#x"), Err(SelectorError::EmptyName { at: 3 }));
        assert_eq!(
            Selector::parse(".a[href]"),
            Err(SelectorError::UnexpectedChar { found: '[', at: 2 })
        );
    }

    #[test]
    fn matches_tag_id_and_classes() {
        let mut dom = MemoryDom::new(vec2(100.0, 100.0));
        let root = dom.root();
        let el = dom.create_element("div", &["square", "droppable", "e2"]);
        dom.set_element_id(el, "e2-square");
        dom.set_frame(el, Rect::from_min_size(pos2(0.0, 0.0), vec2(10.0, 10.0)));
        dom.append_child(root, el);

        assert!(Selector::class("square").matches(&dom, el));
        assert!(Selector::parse("div.square.e2").unwrap().matches(&dom, el));
        assert!(Selector::parse("#e2-square").unwrap().matches(&dom, el));
        assert!(Selector::parse("span, .droppable").unwrap().matches(&dom, el));
        assert!(!Selector::parse("span.square").unwrap().matches(&dom, el));
        assert!(!Selector::parse(".square.e4").unwrap().matches(&dom, el));
    }
}
