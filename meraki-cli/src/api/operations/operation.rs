//! Core Operation types for Meraki Dashboard requests

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::constants::status;
use crate::api::models::{NetworkContext, id_to_string};

/// Represents a single request that can be executed against the Dashboard API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// GET organizations/{orgId}/networkObjects
    ListNetworkObjects { org_id: String },
    /// GET organizations/{orgId}/networkObjectGroups/
    ListNetworkObjectGroups { org_id: String },
    /// POST organizations/{orgId}/networkObjects
    CreateNetworkObject {
        org_id: String,
        /// {name, type, value, networkObjectGroupIds}
        data: Value,
    },
    /// POST organizations/{orgId}/networkObjectGroups/
    CreateNetworkObjectGroup {
        org_id: String,
        /// {name, networkObjectIds}
        data: Value,
    },
    /// PUT networks/{networkId}/appliance/firewall/l3FirewallRules
    ///
    /// Bulk replace: the body carries the full ordered rule list.
    ReplaceL3FirewallRules { network_id: String, data: Value },
}

/// Result of executing an Operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    /// The operation that was executed
    pub operation: Operation,
    /// HTTP status code from the response
    pub status_code: u16,
    /// Raw response body
    pub body: String,
}

impl Operation {
    pub fn list_network_objects(ctx: &NetworkContext) -> Self {
        Self::ListNetworkObjects {
            org_id: ctx.org_id.clone(),
        }
    }

    pub fn list_network_object_groups(ctx: &NetworkContext) -> Self {
        Self::ListNetworkObjectGroups {
            org_id: ctx.org_id.clone(),
        }
    }

    pub fn create_network_object(ctx: &NetworkContext, data: Value) -> Self {
        Self::CreateNetworkObject {
            org_id: ctx.org_id.clone(),
            data,
        }
    }

    pub fn create_network_object_group(ctx: &NetworkContext, data: Value) -> Self {
        Self::CreateNetworkObjectGroup {
            org_id: ctx.org_id.clone(),
            data,
        }
    }

    pub fn replace_l3_firewall_rules(ctx: &NetworkContext, data: Value) -> Self {
        Self::ReplaceL3FirewallRules {
            network_id: ctx.network_id.clone(),
            data,
        }
    }

    /// Path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            Self::ListNetworkObjects { org_id } | Self::CreateNetworkObject { org_id, .. } => {
                format!("organizations/{}/networkObjects", org_id)
            }
            Self::ListNetworkObjectGroups { org_id }
            | Self::CreateNetworkObjectGroup { org_id, .. } => {
                format!("organizations/{}/networkObjectGroups/", org_id)
            }
            Self::ReplaceL3FirewallRules { network_id, .. } => {
                format!("networks/{}/appliance/firewall/l3FirewallRules", network_id)
            }
        }
    }

    /// Get the HTTP method for this operation
    pub fn http_method(&self) -> &'static str {
        match self {
            Self::ListNetworkObjects { .. } => "GET",
            Self::ListNetworkObjectGroups { .. } => "GET",
            Self::CreateNetworkObject { .. } => "POST",
            Self::CreateNetworkObjectGroup { .. } => "POST",
            Self::ReplaceL3FirewallRules { .. } => "PUT",
        }
    }

    /// Get the operation type as a string
    pub fn operation_type(&self) -> &'static str {
        match self {
            Self::ListNetworkObjects { .. } => "list_network_objects",
            Self::ListNetworkObjectGroups { .. } => "list_network_object_groups",
            Self::CreateNetworkObject { .. } => "create_network_object",
            Self::CreateNetworkObjectGroup { .. } => "create_network_object_group",
            Self::ReplaceL3FirewallRules { .. } => "replace_l3_firewall_rules",
        }
    }

    /// JSON body, if the request carries one
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::ListNetworkObjects { .. } | Self::ListNetworkObjectGroups { .. } => None,
            Self::CreateNetworkObject { data, .. }
            | Self::CreateNetworkObjectGroup { data, .. }
            | Self::ReplaceL3FirewallRules { data, .. } => Some(data),
        }
    }

    /// The only status code that counts as success for this request
    pub fn expected_status(&self) -> u16 {
        match self {
            Self::CreateNetworkObject { .. } | Self::CreateNetworkObjectGroup { .. } => {
                status::CREATED
            }
            Self::ListNetworkObjects { .. }
            | Self::ListNetworkObjectGroups { .. }
            | Self::ReplaceL3FirewallRules { .. } => status::OK,
        }
    }

    /// Whether executing this operation changes state on the server
    pub fn is_mutation(&self) -> bool {
        self.http_method() != "GET"
    }
}

impl OperationResult {
    pub fn new(operation: Operation, status_code: u16, body: impl Into<String>) -> Self {
        Self {
            operation,
            status_code,
            body: body.into(),
        }
    }

    /// Check if this result represents a successful operation
    pub fn is_success(&self) -> bool {
        self.status_code == self.operation.expected_status()
    }

    /// Check if this result represents a failed operation
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Parse the response body as JSON
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).with_context(|| {
            format!(
                "Response to {} was not valid JSON",
                self.operation.operation_type()
            )
        })
    }

    /// Server-assigned `id` of a created resource
    pub fn created_id(&self) -> Option<String> {
        self.json().ok()?.get("id").and_then(id_to_string)
    }
}
