//! Style/props bags and the shallow merge protocol.
//!
//! Every component node carries two flat maps: `style` (presentation) and
//! `props` (component configuration). Controls never write a node directly;
//! they build a [`NodePatch`] and hand it to the owning container through an
//! [`UpdateSink`]. The merge itself is pure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flat, unordered key-value map.
pub type Bag = Map<String, Value>;

/// Shallow-merge `patch` over `current`.
///
/// Keys present in `patch` overwrite wholesale. Nested objects are replaced,
/// not merged field by field, so a control changing one nested field must
/// send the full nested object back.
pub fn apply_patch(current: &Bag, patch: &Bag) -> Bag {
    let mut merged = current.clone();
    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Patch emitted by a control panel or renderer for a single node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Bag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Bag>,
}

impl NodePatch {
    pub fn style(style: Bag) -> Self {
        Self {
            style: Some(style),
            props: None,
        }
    }

    pub fn props(props: Bag) -> Self {
        Self {
            style: None,
            props: Some(props),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.style.is_none() && self.props.is_none()
    }

    /// Merge each present bag into the node's own bag.
    pub fn apply_to(&self, node: &mut crate::ComponentNode) {
        if let Some(style) = &self.style {
            node.style = apply_patch(&node.style, style);
        }
        if let Some(props) = &self.props {
            node.props = apply_patch(&node.props, props);
        }
    }
}

/// The owning container's commit callback.
///
/// Invoked once per emitted patch. The container decides where the merged
/// result goes (local state, a global store, a remote call).
pub trait UpdateSink {
    fn on_update(&mut self, component_id: &str, patch: NodePatch);
}

/// Sink that keeps every patch it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub updates: Vec<(String, NodePatch)>,
}

impl UpdateSink for RecordingSink {
    fn on_update(&mut self, component_id: &str, patch: NodePatch) {
        self.updates.push((component_id.to_string(), patch));
    }
}

impl<F> UpdateSink for F
where
    F: FnMut(&str, NodePatch),
{
    fn on_update(&mut self, component_id: &str, patch: NodePatch) {
        self(component_id, patch)
    }
}
