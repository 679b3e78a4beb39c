//! Menu tree model

use serde::{Deserialize, Serialize};

/// A node of the menu tree as delivered by the web client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Menu id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Bound action reference, e.g. `ir.actions.client,94`
    #[serde(default)]
    pub action: Option<String>,
    /// Parent menu id and its full name
    #[serde(default)]
    pub parent: Option<(u64, String)>,
    /// Child menus
    #[serde(default)]
    pub children: Vec<MenuEntry>,
}

impl MenuEntry {
    /// Create a menu without action
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            action: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Bind an action
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set the parent
    pub fn with_parent(mut self, id: u64, full_name: impl Into<String>) -> Self {
        self.parent = Some((id, full_name.into()));
        self
    }

    /// Append a child
    pub fn with_child(mut self, child: MenuEntry) -> Self {
        self.children.push(child);
        self
    }

    /// Full path of the entry: parent full name and own name
    pub fn full_name(&self) -> String {
        match &self.parent {
            Some((_, parent)) => format!("{}/{}", parent, self.name),
            None => self.name.clone(),
        }
    }
}

/// A searchable, actionable menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Menu id
    pub menu_id: u64,
    /// Parent menu id
    pub parent_id: Option<u64>,
    /// Full path
    pub path: String,
    /// Action reference
    pub action: String,
}

impl MenuItem {
    /// Numeric id of the bound action (`ir.actions.client,94` gives 94)
    pub fn action_id(&self) -> Option<u64> {
        self.action
            .split_once(',')
            .and_then(|(_, id)| id.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let root = MenuEntry::new(1, "Settings");
        assert_eq!(root.full_name(), "Settings");
        let child = MenuEntry::new(2, "Actions").with_parent(1, "Settings/Technical");
        assert_eq!(child.full_name(), "Settings/Technical/Actions");
    }

    #[test]
    fn test_action_id() {
        let item = MenuItem {
            menu_id: 1,
            parent_id: None,
            path: "Discuss".to_string(),
            action: "ir.actions.client,94".to_string(),
        };
        assert_eq!(item.action_id(), Some(94));

        let item = MenuItem {
            action: "ir.actions.client".to_string(),
            ..item
        };
        assert_eq!(item.action_id(), None);
    }

    #[test]
    fn test_deserialize_tree() {
        let json = r#"{"id":1,"name":"Sales","children":[
            {"id":2,"name":"Orders","action":"ir.actions.act_window,10","parent":[1,"Sales"]}
        ]}"#;
        let entry: MenuEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.children[0].full_name(), "Sales/Orders");
        assert!(entry.action.is_none());
    }
}
