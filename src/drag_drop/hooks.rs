use super::types::DragSession;

pub type Predicate<N> = Box<dyn FnMut(&DragSession<N>) -> bool>;
pub type Callback<N> = Box<dyn FnMut(&DragSession<N>)>;

/// Maps the class list of a coordinate element to its label.
pub type Labeler = Box<dyn Fn(&[String]) -> Option<String>>;

/// Integrator callbacks. Empty slots allow everything and do nothing.
///
/// A panicking hook unwinds through the engine; the drag state is not repaired.
pub(super) struct Hooks<N> {
    pub(super) can_drag: Option<Predicate<N>>,
    pub(super) can_drop: Option<Predicate<N>>,
    pub(super) on_catch: Option<Callback<N>>,
    pub(super) on_drop: Option<Callback<N>>,
    pub(super) on_cancel: Option<Callback<N>>,
    pub(super) labeler: Option<Labeler>,
}

impl<N> Default for Hooks<N> {
    fn default() -> Self {
        Self {
            can_drag: None,
            can_drop: None,
            on_catch: None,
            on_drop: None,
            on_cancel: None,
            labeler: None,
        }
    }
}

impl<N> std::fmt::Debug for Hooks<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("can_drag", &self.can_drag.is_some())
            .field("can_drop", &self.can_drop.is_some())
            .field("on_catch", &self.on_catch.is_some())
            .field("on_drop", &self.on_drop.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .field("labeler", &self.labeler.is_some())
            .finish()
    }
}

impl<N> Hooks<N> {
    pub(super) fn allows_drag(&mut self, session: &DragSession<N>) -> bool {
        self.can_drag.as_mut().is_none_or(|f| f(session))
    }

    pub(super) fn allows_drop(&mut self, session: &DragSession<N>) -> bool {
        self.can_drop.as_mut().is_none_or(|f| f(session))
    }

    pub(super) fn caught(&mut self, session: &DragSession<N>) {
        if let Some(f) = &mut self.on_catch {
            f(session);
        }
    }

    pub(super) fn dropped(&mut self, session: &DragSession<N>) {
        if let Some(f) = &mut self.on_drop {
            f(session);
        }
    }

    pub(super) fn canceled(&mut self, session: &DragSession<N>) {
        if let Some(f) = &mut self.on_cancel {
            f(session);
        }
    }

    pub(super) fn label(&self, classes: &[String]) -> String {
        let label = match &self.labeler {
            Some(labeler) => labeler(classes),
            None => square_label(classes),
        };
        label.unwrap_or_default()
    }
}

/// First class token naming a board square: a file `a`..`h` then a rank `1`..`8`.
pub fn square_label(classes: &[String]) -> Option<String> {
    classes
        .iter()
        .find(|c| {
            matches!(c.as_bytes(), [file, rank] if (b'a'..=b'h').contains(file) && (b'1'..=b'8').contains(rank))
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| (*c).to_owned()).collect()
    }

    #[test]
    fn square_label_picks_square_token() {
        assert_eq!(
            square_label(&classes(&["square", "dark", "e4", "droppable"])),
            Some("e4".to_owned())
        );
        assert_eq!(square_label(&classes(&["square", "i9", "e44", "E4"])), None);
    }

    #[test]
    fn empty_slots_allow_and_ignore() {
        let mut hooks = Hooks::<u32>::default();
        let session = DragSession::default();
        assert!(hooks.allows_drag(&session));
        assert!(hooks.allows_drop(&session));
        hooks.dropped(&session);
        assert_eq!(hooks.label(&classes(&["square", "a1"])), "a1");
        assert_eq!(hooks.label(&classes(&["board"])), "");
    }
}
