//! Network object groups and their member resolution state

use crate::provision::resolver::{Resolution, str_list_to_list};

/// One row of the `Network Object Groups` tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkObjectGroup {
    pub name: String,
    /// Member names in cell order
    pub member_names: Vec<String>,
    /// Ids of the members that resolved, in member order
    pub member_ids: Vec<String>,
    pub group_id: Option<String>,
    /// Members that did not resolve to exactly one usable object
    pub unresolved_names: Vec<String>,
    pub error: Option<String>,
}

impl NetworkObjectGroup {
    /// Build a group from its name and the raw comma-separated member cell
    pub fn new(name: &str, members: &str) -> Self {
        NetworkObjectGroup {
            name: name.trim().to_string(),
            member_names: str_list_to_list(members),
            member_ids: Vec::new(),
            group_id: None,
            unresolved_names: Vec::new(),
            error: None,
        }
    }

    /// Record the outcome of member-name resolution
    pub fn apply_resolution(&mut self, resolution: Resolution) {
        self.member_ids = resolution.ids;
        self.unresolved_names = resolution.unresolved;
        debug_assert!(self.is_fully_accounted());
    }

    /// Report every member as unresolved, for groups that never reach
    /// resolution
    pub fn leave_unresolved(&mut self) {
        self.apply_resolution(Resolution {
            ids: Vec::new(),
            unresolved: self.member_names.clone(),
        });
    }

    /// Every requested member is either resolved or reported, exactly once
    pub fn is_fully_accounted(&self) -> bool {
        self.member_ids.len() + self.unresolved_names.len() == self.member_names.len()
    }

    /// Attributes in column order: name, member names, member ids, group id,
    /// unresolved names, error
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.member_names.join(", "),
            self.member_ids.join(", "),
            self.group_id.clone().unwrap_or_default(),
            self.unresolved_names.join(", "),
            self.error.clone().unwrap_or_default(),
        ]
    }
}
