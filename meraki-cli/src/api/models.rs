//! Data models shared by the API client and the provisioning pipeline

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Organization/network scope plus credentials for one run.
///
/// Built once from configuration and passed by reference into every
/// operation; nothing mutates it afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkContext {
    pub org_id: String,
    pub network_id: String,
    pub api_key: String,
}

impl NetworkContext {
    pub fn new(
        org_id: impl Into<String>,
        network_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            org_id: org_id.into(),
            network_id: network_id.into(),
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for NetworkContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkContext")
            .field("org_id", &self.org_id)
            .field("network_id", &self.network_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// A network object as returned by `GET organizations/{orgId}/networkObjects`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteNetworkObject {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A network object group as returned by `GET organizations/{orgId}/networkObjectGroups/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteNetworkObjectGroup {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "networkObjectIds", default)]
    pub network_object_ids: Vec<Value>,
}

/// Render a server-assigned identifier as a string.
///
/// The Dashboard API is not consistent about whether ids are JSON strings or
/// numbers, so both are accepted.
pub fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_to_string(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid identifier: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remote_object_accepts_numeric_and_string_ids() {
        let objects: Vec<RemoteNetworkObject> = serde_json::from_value(json!([
            {"id": 42, "name": "web", "type": "cidr", "value": "10.0.0.0/24"},
            {"id": "100", "name": "dns", "type": "fqdn", "value": "dns.example.com"}
        ]))
        .unwrap();

        assert_eq!(objects[0].id, "42");
        assert_eq!(objects[0].kind.as_deref(), Some("cidr"));
        assert_eq!(objects[1].id, "100");
    }

    #[test]
    fn test_remote_object_rejects_missing_id_shape() {
        let result: Result<RemoteNetworkObject, _> =
            serde_json::from_value(json!({"id": null, "name": "web"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_context_debug_hides_api_key() {
        let ctx = NetworkContext::new("org", "net", "secret-key");
        let rendered = format!("{:?}", ctx);
        assert!(rendered.contains("org"));
        assert!(!rendered.contains("secret-key"));
    }
}
