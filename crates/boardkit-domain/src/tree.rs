//! Generic component tree and the read-only todo-list lookup.

use crate::bag::{Bag, NodePatch};
use boardkit_core::{BoardError, BoardResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TODO_COMPONENT_TYPE: &str = "TODO";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub style: Bag,
    #[serde(default)]
    pub props: Bag,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    pub fn new(id: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            name: None,
            style: Bag::new(),
            props: Bag::new(),
            children: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_todo_list(&self) -> bool {
        self.component_type == TODO_COMPONENT_TYPE
    }
}

/// A page: a forest of top-level component nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub components: Vec<ComponentNode>,
}

impl Page {
    pub fn find(&self, id: &str) -> Option<&ComponentNode> {
        find_node(&self.components, id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ComponentNode> {
        find_node_mut(&mut self.components, id)
    }

    /// Merge a patch into the node, returning `NotFound` when absent.
    pub fn commit(&mut self, component_id: &str, patch: &NodePatch) -> BoardResult<()> {
        let node = self
            .find_mut(component_id)
            .ok_or_else(|| BoardError::not_found(format!("Component {}", component_id)))?;
        patch.apply_to(node);
        Ok(())
    }
}

/// Depth-first search through a forest of nodes.
pub fn find_node<'a>(forest: &'a [ComponentNode], id: &str) -> Option<&'a ComponentNode> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}

pub fn find_node_mut<'a>(
    forest: &'a mut [ComponentNode],
    id: &str,
) -> Option<&'a mut ComponentNode> {
    for node in forest.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    #[serde(default, alias = "title")]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoList {
    pub id: String,
    pub items: Vec<TodoItem>,
}

impl TodoList {
    /// Read the list out of a `TODO` node. Items that fail to parse are skipped.
    pub fn from_node(node: &ComponentNode) -> Self {
        let items = node
            .props
            .get("tasks")
            .and_then(Value::as_array)
            .map(|tasks| {
                tasks
                    .iter()
                    .filter_map(|t| serde_json::from_value(t.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            id: node.id.clone(),
            items,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|i| i.completed).count()
    }
}

/// Resolve a weak todo-list reference. Only `TODO` nodes match.
pub fn find_todo_list_by_id(forest: &[ComponentNode], id: &str) -> Option<TodoList> {
    find_node(forest, id)
        .filter(|node| node.is_todo_list())
        .map(TodoList::from_node)
}

/// Flip one todo item and build the props patch carrying the whole list.
pub fn toggle_todo_item(node: &ComponentNode, item_id: &str) -> BoardResult<NodePatch> {
    if !node.is_todo_list() {
        return Err(BoardError::Validation(format!(
            "Component {} is not a todo list",
            node.id
        )));
    }
    let mut list = TodoList::from_node(node);
    let item = list
        .items
        .iter_mut()
        .find(|i| i.id == item_id)
        .ok_or_else(|| BoardError::not_found(format!("Todo item {}", item_id)))?;
    item.completed = !item.completed;
    todo_items_patch(&list.items)
}

/// Append a todo item and build the props patch carrying the whole list.
pub fn add_todo_item(node: &ComponentNode, item: TodoItem) -> BoardResult<NodePatch> {
    if !node.is_todo_list() {
        return Err(BoardError::Validation(format!(
            "Component {} is not a todo list",
            node.id
        )));
    }
    let mut list = TodoList::from_node(node);
    list.items.push(item);
    todo_items_patch(&list.items)
}

fn todo_items_patch(items: &[TodoItem]) -> BoardResult<NodePatch> {
    let tasks =
        serde_json::to_value(items).map_err(|e| BoardError::Serialization(e.to_string()))?;
    let mut props = Bag::new();
    props.insert("tasks".to_string(), tasks);
    Ok(NodePatch::props(props))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn todo_node(id: &str, items: Value) -> ComponentNode {
        let mut node = ComponentNode::new(id, TODO_COMPONENT_TYPE);
        node.props.insert("tasks".to_string(), items);
        node
    }

    fn sample_forest() -> Vec<ComponentNode> {
        let mut container = ComponentNode::new("root", "CONTAINER");
        let mut inner = ComponentNode::new("section", "CONTAINER");
        inner.children.push(todo_node(
            "todo-1",
            json!([
                {"id": "a", "text": "one", "completed": true},
                {"id": "b", "text": "two", "completed": false}
            ]),
        ));
        container.children.push(inner);
        vec![container, ComponentNode::new("text-1", "TEXT")]
    }

    #[test]
    fn test_find_node_depth_first() {
        let forest = sample_forest();
        assert_eq!(find_node(&forest, "todo-1").unwrap().id, "todo-1");
        assert_eq!(find_node(&forest, "text-1").unwrap().component_type, "TEXT");
        assert!(find_node(&forest, "missing").is_none());
    }

    #[test]
    fn test_find_todo_list_only_matches_todo_nodes() {
        let forest = sample_forest();
        let list = find_todo_list_by_id(&forest, "todo-1").unwrap();
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.completed_count(), 1);

        assert!(find_todo_list_by_id(&forest, "text-1").is_none());
        assert!(find_todo_list_by_id(&forest, "missing").is_none());
    }

    #[test]
    fn test_todo_list_without_tasks_is_empty() {
        let node = ComponentNode::new("t", TODO_COMPONENT_TYPE);
        assert!(TodoList::from_node(&node).items.is_empty());
    }

    #[test]
    fn test_toggle_todo_item_returns_full_list() {
        let forest = sample_forest();
        let node = find_node(&forest, "todo-1").unwrap();
        let patch = toggle_todo_item(node, "b").unwrap();

        let tasks = patch.props.unwrap()["tasks"].clone();
        assert_eq!(tasks.as_array().unwrap().len(), 2);
        assert_eq!(tasks[1]["completed"], json!(true));
        assert_eq!(tasks[0]["completed"], json!(true));
    }

    #[test]
    fn test_toggle_unknown_item() {
        let forest = sample_forest();
        let node = find_node(&forest, "todo-1").unwrap();
        assert!(matches!(
            toggle_todo_item(node, "zzz"),
            Err(BoardError::NotFound(_))
        ));
    }

    #[test]
    fn test_page_commit_merges_into_nested_node() {
        let mut page = Page {
            components: sample_forest(),
        };
        let node = page.find("todo-1").unwrap().clone();
        let patch = add_todo_item(
            &node,
            TodoItem {
                id: "c".into(),
                text: "three".into(),
                completed: false,
            },
        )
        .unwrap();
        page.commit("todo-1", &patch).unwrap();

        let list = find_todo_list_by_id(&page.components, "todo-1").unwrap();
        assert_eq!(list.items.len(), 3);
        assert!(page.commit("missing", &patch).is_err());
    }

    #[test]
    fn test_node_type_serializes_as_type() {
        let node = ComponentNode::new("x", "KANBAN");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "KANBAN");
        assert!(json.get("children").is_none());
    }
}
