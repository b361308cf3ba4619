//! Typed view over a kanban node's style bag.
//!
//! Readers go through [`KanbanStyle::resolve`] instead of falling back to
//! literals at each use site.

use crate::bag::Bag;
use crate::column::Column;
use crate::task::Task;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_BACKGROUND: &str = "#ffffff";
const DEFAULT_COLUMN_BACKGROUND: &str = "#f4f5f7";
const DEFAULT_CARD_BACKGROUND: &str = "#ffffff";
const DEFAULT_TEXT_COLOR: &str = "#172b4d";
const DEFAULT_BORDER_RADIUS: &str = "8px";
const DEFAULT_COLUMN_GAP: &str = "16px";
const DEFAULT_COLUMN_WIDTH: &str = "272px";
const DEFAULT_PADDING: &str = "8px";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_gap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedKanbanStyle {
    pub background_color: String,
    pub column_background_color: String,
    pub card_background_color: String,
    pub text_color: String,
    pub border_radius: String,
    pub column_gap: String,
    pub column_width: String,
    pub padding: String,
}

impl KanbanStyle {
    /// Read the known keys out of a style bag; other keys are ignored.
    ///
    /// Numeric values are read as pixels. A known key holding any other
    /// non-string value is treated as absent.
    pub fn from_bag(style: &Bag) -> Self {
        let read = |key: &str| match style.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(format!("{}px", n)),
            Some(other) => {
                tracing::warn!("Ignoring style {} with unsupported value {}", key, other);
                None
            }
        };
        Self {
            background_color: read("backgroundColor"),
            column_background_color: read("columnBackgroundColor"),
            card_background_color: read("cardBackgroundColor"),
            text_color: read("textColor"),
            border_radius: read("borderRadius"),
            column_gap: read("columnGap"),
            column_width: read("columnWidth"),
            padding: read("padding"),
        }
    }

    pub fn resolve(&self) -> ResolvedKanbanStyle {
        fn pick(value: &Option<String>, default: &str) -> String {
            value.clone().unwrap_or_else(|| default.to_string())
        }
        ResolvedKanbanStyle {
            background_color: pick(&self.background_color, DEFAULT_BACKGROUND),
            column_background_color: pick(
                &self.column_background_color,
                DEFAULT_COLUMN_BACKGROUND,
            ),
            card_background_color: pick(&self.card_background_color, DEFAULT_CARD_BACKGROUND),
            text_color: pick(&self.text_color, DEFAULT_TEXT_COLOR),
            border_radius: pick(&self.border_radius, DEFAULT_BORDER_RADIUS),
            column_gap: pick(&self.column_gap, DEFAULT_COLUMN_GAP),
            column_width: pick(&self.column_width, DEFAULT_COLUMN_WIDTH),
            padding: pick(&self.padding, DEFAULT_PADDING),
        }
    }
}

impl ResolvedKanbanStyle {
    pub fn column_background<'a>(&'a self, column: &'a Column) -> &'a str {
        column
            .background_color
            .as_deref()
            .unwrap_or(&self.column_background_color)
    }

    pub fn card_background<'a>(&'a self, task: &'a Task) -> &'a str {
        task.color.as_deref().unwrap_or(&self.card_background_color)
    }
}
