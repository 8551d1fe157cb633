//! Submission sequencer
//!
//! Sends records to the Dashboard API strictly one request at a time, in
//! spreadsheet order. A failed request is recorded on its record and the
//! sequence carries on: partial success is expected, and the saved
//! spreadsheet is the audit trail.

use colored::*;

use crate::api::{MerakiApi, NetworkContext, Operation, OperationResult, list_network_objects};

use super::payload::{
    firewall_rules_payload, network_object_group_payload, network_object_payload,
};
use super::resolver::{DuplicatePolicy, NameIndex, resolve_names};
use super::types::{FirewallRule, NetworkObject, NetworkObjectGroup};

/// Counts for one spreadsheet section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    pub section: &'static str,
    /// Records sent to the API
    pub submitted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Records not sent because they already carried an error
    pub skipped: usize,
}

impl SectionSummary {
    pub fn new(section: &'static str) -> Self {
        Self {
            section,
            submitted: 0,
            succeeded: 0,
            failed: 0,
            skipped: 0,
        }
    }
}

/// Outcome of one create request, reduced to what a record stores
enum Outcome {
    Created(String),
    Failed(String),
}

async fn submit_create(api: &dyn MerakiApi, operation: &Operation) -> Outcome {
    match api.execute(operation).await {
        Ok(result) => created_outcome(&result),
        Err(e) => Outcome::Failed(format!("{:#}", e)),
    }
}

fn created_outcome(result: &OperationResult) -> Outcome {
    if result.is_error() {
        return Outcome::Failed(result.body.clone());
    }
    match result.created_id() {
        Some(id) => Outcome::Created(id),
        None => Outcome::Failed(format!(
            "HTTP {} without an id in the response: {}",
            result.status_code, result.body
        )),
    }
}

fn print_outcome(kind: &str, name: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Created(id) => println!("{}: {} -> {}", kind, name, id.bright_green()),
        Outcome::Failed(error) => println!("{}: {} -> {}", kind, name, error.red()),
    }
}

/// Create every network object, one POST per record.
///
/// Records that already carry an error (failed presence checks) are skipped.
pub async fn create_network_objects(
    api: &dyn MerakiApi,
    ctx: &NetworkContext,
    objects: &mut [NetworkObject],
) -> SectionSummary {
    let mut summary = SectionSummary::new("network objects");

    for object in objects.iter_mut() {
        if object.error.is_some() {
            summary.skipped += 1;
            continue;
        }

        let operation = Operation::create_network_object(ctx, network_object_payload(object));
        summary.submitted += 1;
        let outcome = submit_create(api, &operation).await;
        print_outcome("Network Object", &object.name, &outcome);

        match outcome {
            Outcome::Created(id) => {
                object.id = Some(id);
                summary.succeeded += 1;
            }
            Outcome::Failed(error) => {
                log::debug!("Network object '{}' failed: {}", object.name, error);
                object.error = Some(error);
                summary.failed += 1;
            }
        }
    }

    summary
}

/// Resolve members against the organization's current inventory and create
/// every group, one POST per record.
///
/// The inventory is fetched once. If that fails, every pending group records
/// the failure and nothing is submitted. Groups that are not submitted report
/// all of their members as unresolved.
pub async fn create_network_object_groups(
    api: &dyn MerakiApi,
    ctx: &NetworkContext,
    groups: &mut [NetworkObjectGroup],
    policy: DuplicatePolicy,
) -> SectionSummary {
    let mut summary = SectionSummary::new("network object groups");

    let inventory = match list_network_objects(api, ctx).await {
        Ok(inventory) => inventory,
        Err(e) => {
            let message = format!("{:#}", e);
            log::error!("{}", message);
            for group in groups.iter_mut() {
                group.leave_unresolved();
                if group.error.is_some() {
                    summary.skipped += 1;
                } else {
                    group.error = Some(message.clone());
                    summary.failed += 1;
                }
            }
            return summary;
        }
    };

    let index = NameIndex::from_remote(&inventory);
    log::info!("Resolving group members against {} network objects", index.len());

    for group in groups.iter_mut() {
        if group.error.is_some() {
            group.leave_unresolved();
            summary.skipped += 1;
            continue;
        }

        let resolution = resolve_names(&group.member_names, &index, policy);
        group.apply_resolution(resolution);
        if !group.unresolved_names.is_empty() {
            log::warn!(
                "Group '{}': unresolved members {}",
                group.name,
                group.unresolved_names.join(", ")
            );
        }

        let operation =
            Operation::create_network_object_group(ctx, network_object_group_payload(group));
        summary.submitted += 1;
        let outcome = submit_create(api, &operation).await;
        print_outcome("Object Group", &group.name, &outcome);

        match outcome {
            Outcome::Created(id) => {
                group.group_id = Some(id);
                summary.succeeded += 1;
            }
            Outcome::Failed(error) => {
                log::debug!("Object group '{}' failed: {}", group.name, error);
                group.error = Some(error);
                summary.failed += 1;
            }
        }
    }

    summary
}

/// Replace the network's L3 rule set with `rules`, in order, in one PUT.
///
/// On failure the response body is recorded on every rule of the batch. An
/// empty list is never sent: it would wipe the network's existing rules.
pub async fn replace_firewall_rules(
    api: &dyn MerakiApi,
    ctx: &NetworkContext,
    rules: &mut [FirewallRule],
) -> SectionSummary {
    let mut summary = SectionSummary::new("firewall rules");

    if rules.is_empty() {
        log::warn!("No firewall rules to submit, leaving the existing rule set untouched");
        return summary;
    }

    let operation = Operation::replace_l3_firewall_rules(ctx, firewall_rules_payload(rules));
    summary.submitted = rules.len();

    let error = match api.execute(&operation).await {
        Ok(result) if result.is_success() => None,
        Ok(result) => Some(result.body),
        Err(e) => Some(format!("{:#}", e)),
    };

    match error {
        None => {
            println!(
                "Firewall Rules: {} rules -> {}",
                rules.len(),
                "replaced".bright_green()
            );
            for rule in rules.iter_mut() {
                rule.error = None;
            }
            summary.succeeded = rules.len();
        }
        Some(error) => {
            println!("Firewall Rules: {} rules -> {}", rules.len(), error.red());
            log::debug!("Firewall rule replacement failed: {}", error);
            for rule in rules.iter_mut() {
                rule.error = Some(error.clone());
            }
            summary.failed = rules.len();
        }
    }

    summary
}
