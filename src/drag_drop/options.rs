use std::time::Duration;

use crate::dom::{Selector, SelectorError};

/// Which elements can be dragged and which accept drops.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Targeting {
    /// Elements carrying these class names.
    Class {
        draggable: String,
        droppable: String,
    },

    /// Elements matching these selectors (see [`Selector`] for the supported subset).
    Selector { drag: String, drop: String },
}

impl Default for Targeting {
    fn default() -> Self {
        Self::Class {
            draggable: "draggable".to_owned(),
            droppable: "droppable".to_owned(),
        }
    }
}

impl Targeting {
    pub(crate) fn selectors(&self) -> Result<(Selector, Selector), SelectorError> {
        match self {
            Self::Class {
                draggable,
                droppable,
            } => Ok((Selector::class(draggable), Selector::class(droppable))),
            Self::Selector { drag, drop } => Ok((Selector::parse(drag)?, Selector::parse(drop)?)),
        }
    }
}

/// Options for [`super::DragAndDrop`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DragDropOptions {
    pub targeting: Targeting,

    /// Class applied to the dragged element for the duration of the drag.
    pub dragging_class: String,

    /// Class applied to the drop candidate currently under the pointer.
    pub drop_hover_class: String,

    /// Duration (ms) of the catch (when centering), drop and cancel animations.
    #[cfg_attr(feature = "serde", serde(rename = "animationTime"))]
    pub animation_time_ms: u64,

    /// Center the element on the pointer when it is caught, and keep it centered.
    pub center_on_get: bool,

    /// `z_index` of the dragged element.
    pub drag_index: i32,

    /// Class of the invisible clones that hold the element's slot while it moves.
    pub placeholder_class: String,

    /// Elements carrying this class provide the `start_coordinate`/`end_coordinate` labels.
    pub coordinate_class: String,

    /// If true, record engine events in a small ring buffer (see `debug_log_text`).
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep.
    pub debug_event_log_capacity: usize,
}

impl Default for DragDropOptions {
    fn default() -> Self {
        Self {
            targeting: Targeting::default(),
            dragging_class: "dragging".to_owned(),
            drop_hover_class: "can-drop".to_owned(),
            animation_time_ms: 120,
            center_on_get: false,
            drag_index: 9999,
            placeholder_class: "dnd-placeholder".to_owned(),
            coordinate_class: "square".to_owned(),
            debug_event_log: false,
            debug_event_log_capacity: 200,
        }
    }
}

impl DragDropOptions {
    pub fn animation_time(&self) -> Duration {
        Duration::from_millis(self.animation_time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_targeting_builds_single_class_selectors() {
        let (drag, drop) = Targeting::default().selectors().unwrap();
        assert_eq!(drag.to_string(), ".draggable");
        assert_eq!(drop.to_string(), ".droppable");
    }

    #[test]
    fn selector_targeting_reports_bad_selectors() {
        let targeting = Targeting::Selector {
            drag: ".piece".to_owned(),
            drop: ".board .square".to_owned(),
        };
        assert_eq!(
            targeting.selectors().unwrap_err(),
            SelectorError::Combinator { at: 6 }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_config_keeps_defaults() {
        let options: DragDropOptions = serde_json::from_str(
            r#"{
                "targeting": { "selector": { "drag": ".piece", "drop": ".square" } },
                "animationTime": 200,
                "centerOnGet": true
            }"#,
        )
        .unwrap();
        assert_eq!(options.animation_time(), Duration::from_millis(200));
        assert!(options.center_on_get);
        assert_eq!(options.drop_hover_class, "can-drop");
        assert_eq!(options.drag_index, 9999);
        assert_eq!(
            options.targeting,
            Targeting::Selector {
                drag: ".piece".to_owned(),
                drop: ".square".to_owned(),
            }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ron_config() {
        let options: DragDropOptions = ron::from_str(
            r#"(targeting: class(draggable: "piece", droppable: "square"), dragIndex: 50)"#,
        )
        .unwrap();
        assert_eq!(options.drag_index, 50);
        let (drag, _) = options.targeting.selectors().unwrap();
        assert_eq!(drag.to_string(), ".piece");
    }
}
