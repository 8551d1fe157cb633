//! Layer-3 firewall rules

use std::fmt;
use std::str::FromStr;

use anyhow::{Error, bail};

/// Rules are always submitted with syslog disabled
pub const SYSLOG_ENABLED: bool = false;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Allow,
    Deny,
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(Policy::Allow),
            "deny" => Ok(Policy::Deny),
            _ => bail!("Unknown policy '{}' (expected allow or deny)", s),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Allow => write!(f, "allow"),
            Policy::Deny => write!(f, "deny"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
    Icmp,
    Any,
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            "icmp" => Ok(Protocol::Icmp),
            "any" => Ok(Protocol::Any),
            _ => bail!("Unknown protocol '{}' (expected tcp, udp, icmp or any)", s),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
            Protocol::Icmp => write!(f, "icmp"),
            Protocol::Any => write!(f, "any"),
        }
    }
}

/// One row of the `Firewall Rule` tab. Row order is rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirewallRule {
    pub policy: Policy,
    pub protocol: Protocol,
    pub src_port: String,
    pub src_cidr: String,
    pub dest_port: String,
    pub dest_cidr: String,
    pub comment: String,
    pub error: Option<String>,
}

impl FirewallRule {
    /// Attributes in column order: policy, protocol, srcPort, srcCidr,
    /// destPort, destCidr, comment, error
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.policy.to_string(),
            self.protocol.to_string(),
            self.src_port.clone(),
            self.src_cidr.clone(),
            self.dest_port.clone(),
            self.dest_cidr.clone(),
            self.comment.clone(),
            self.error.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse_is_case_insensitive() {
        assert_eq!("Allow".parse::<Policy>().unwrap(), Policy::Allow);
        assert_eq!(" deny ".parse::<Policy>().unwrap(), Policy::Deny);
        assert!("permit".parse::<Policy>().is_err());
    }

    #[test]
    fn test_protocol_parse() {
        assert_eq!("TCP".parse::<Protocol>().unwrap(), Protocol::Tcp);
        assert_eq!("any".parse::<Protocol>().unwrap(), Protocol::Any);
        let err = "".parse::<Protocol>().unwrap_err();
        assert!(err.to_string().contains("Unknown protocol"));
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(Policy::Deny.to_string(), "deny");
        assert_eq!(Protocol::Icmp.to_string(), "icmp");
    }
}
