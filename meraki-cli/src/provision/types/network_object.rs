//! Network objects: named CIDR/FQDN/address definitions

use std::fmt;

/// Vendor object type.
///
/// Known kinds are matched exactly; anything else is passed to the API
/// verbatim so the server stays the authority on what is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    Cidr,
    Fqdn,
    IpAndMask,
    Other(String),
}

impl From<&str> for ObjectKind {
    fn from(s: &str) -> Self {
        match s {
            "cidr" => ObjectKind::Cidr,
            "fqdn" => ObjectKind::Fqdn,
            "ipAndMask" => ObjectKind::IpAndMask,
            other => ObjectKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Cidr => write!(f, "cidr"),
            ObjectKind::Fqdn => write!(f, "fqdn"),
            ObjectKind::IpAndMask => write!(f, "ipAndMask"),
            ObjectKind::Other(s) => write!(f, "{}", s),
        }
    }
}

/// One row of the `Network Object` tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkObject {
    /// Trimmed object name, unique within the organization
    pub name: String,
    pub kind: ObjectKind,
    pub value: String,
    /// Server-assigned id once created
    pub id: Option<String>,
    /// Raw API response body, or a local validation message
    pub error: Option<String>,
}

impl NetworkObject {
    pub fn new(name: &str, kind: impl Into<ObjectKind>, value: impl Into<String>) -> Self {
        NetworkObject {
            name: name.trim().to_string(),
            kind: kind.into(),
            value: value.into(),
            id: None,
            error: None,
        }
    }

    /// Names of required fields that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.kind.to_string().trim().is_empty() {
            missing.push("type");
        }
        if self.value.trim().is_empty() {
            missing.push("value");
        }
        missing
    }

    /// Attributes in column order: name, type, value, id, error
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.kind.to_string(),
            self.value.clone(),
            self.id.clone().unwrap_or_default(),
            self.error.clone().unwrap_or_default(),
        ]
    }
}
