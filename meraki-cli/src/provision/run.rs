//! One provisioning run over a loaded workbook

use anyhow::{Context, Result};
use colored::*;
use serde::{Deserialize, Serialize};

use crate::api::{MerakiApi, NetworkContext, Operation, list_network_objects};

use super::excel::{self, FirewallRuleSheet, Workbook, sheets};
use super::payload::{
    firewall_rules_payload, network_object_group_payload, network_object_payload,
};
use super::resolver::{DuplicatePolicy, NameIndex, resolve_names};
use super::sequencer::{
    SectionSummary, create_network_object_groups, create_network_objects, replace_firewall_rules,
};

/// Which spreadsheet tabs are processed in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sections {
    pub objects: bool,
    pub groups: bool,
    pub rules: bool,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            objects: true,
            groups: true,
            rules: true,
        }
    }
}

impl Sections {
    pub fn any(&self) -> bool {
        self.objects || self.groups || self.rules
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub sections: Sections,
    pub duplicate_policy: DuplicatePolicy,
}

/// What happened in a run, per section
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub summaries: Vec<SectionSummary>,
    /// Sections that could not run at all, with the reason
    pub skipped: Vec<(&'static str, String)>,
}

impl RunReport {
    pub fn failed_records(&self) -> usize {
        self.summaries.iter().map(|s| s.failed).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_records() > 0 || !self.skipped.is_empty()
    }
}

fn banner(title: &str) {
    println!("{}", "*".repeat(60).dimmed());
    println!("{}", title.bold());
}

/// Process every enabled section in order: objects, groups, rules.
///
/// Results are written back into `workbook`; saving it is up to the caller.
/// A section that cannot run (missing tab, invalid rule rows) is reported
/// and the remaining sections still run.
pub async fn run(
    api: &dyn MerakiApi,
    ctx: &NetworkContext,
    options: &RunOptions,
    workbook: &mut Workbook,
) -> RunReport {
    let mut report = RunReport::default();

    if options.sections.objects {
        banner("Starting Network Object Section");
        record(&mut report, "network objects", run_objects(api, ctx, workbook).await);
    }

    if options.sections.groups {
        banner("Starting Network Object Groups Section");
        record(
            &mut report,
            "network object groups",
            run_groups(api, ctx, options.duplicate_policy, workbook).await,
        );
    }

    if options.sections.rules {
        banner("Starting Firewall Rules Section");
        record(&mut report, "firewall rules", run_rules(api, ctx, workbook).await);
    }

    report
}

fn record(report: &mut RunReport, section: &'static str, result: Result<SectionSummary>) {
    match result {
        Ok(summary) => report.summaries.push(summary),
        Err(e) => {
            let reason = format!("{:#}", e);
            log::error!("Skipping {}: {}", section, reason);
            println!("{} {}", "Skipped:".yellow().bold(), reason);
            report.skipped.push((section, reason));
        }
    }
}

fn missing_sheet(workbook: &Workbook, name: &str) -> String {
    format!(
        "Sheet '{}' not found in workbook (found: {})",
        name,
        workbook.sheet_names().join(", ")
    )
}

fn sheet<'a>(workbook: &'a Workbook, name: &str) -> Result<&'a excel::Sheet> {
    workbook
        .sheet(name)
        .with_context(|| missing_sheet(workbook, name))
}

fn sheet_mut<'a>(workbook: &'a mut Workbook, name: &str) -> Result<&'a mut excel::Sheet> {
    if workbook.sheet(name).is_none() {
        anyhow::bail!(missing_sheet(workbook, name));
    }
    workbook
        .sheet_mut(name)
        .with_context(|| format!("Sheet '{}' not found in workbook", name))
}

async fn run_objects(
    api: &dyn MerakiApi,
    ctx: &NetworkContext,
    workbook: &mut Workbook,
) -> Result<SectionSummary> {
    let mut objects = excel::read_network_objects(sheet(workbook, sheets::NETWORK_OBJECTS)?);
    log::info!("Read {} network objects", objects.len());

    let summary = create_network_objects(api, ctx, &mut objects.records).await;
    excel::write_network_objects(sheet_mut(workbook, sheets::NETWORK_OBJECTS)?, &objects);
    Ok(summary)
}

async fn run_groups(
    api: &dyn MerakiApi,
    ctx: &NetworkContext,
    policy: DuplicatePolicy,
    workbook: &mut Workbook,
) -> Result<SectionSummary> {
    let mut groups =
        excel::read_network_object_groups(sheet(workbook, sheets::NETWORK_OBJECT_GROUPS)?);
    log::info!("Read {} network object groups", groups.len());

    let summary = create_network_object_groups(api, ctx, &mut groups.records, policy).await;
    excel::write_network_object_groups(
        sheet_mut(workbook, sheets::NETWORK_OBJECT_GROUPS)?,
        &groups,
    );
    Ok(summary)
}

async fn run_rules(
    api: &dyn MerakiApi,
    ctx: &NetworkContext,
    workbook: &mut Workbook,
) -> Result<SectionSummary> {
    let FirewallRuleSheet {
        mut rules,
        rejected,
    } = excel::read_firewall_rules(sheet(workbook, sheets::FIREWALL_RULES)?);
    log::info!("Read {} firewall rules", rules.len());

    // A bulk replace with some rows missing would silently drop those rules
    if !rejected.is_empty() {
        let reason = format!(
            "not submitted: {} invalid rule row(s) in '{}'",
            rejected.len(),
            sheets::FIREWALL_RULES
        );
        for rule in rules.records.iter_mut() {
            rule.error = Some(reason.clone());
        }
        excel::write_firewall_rules(sheet_mut(workbook, sheets::FIREWALL_RULES)?, &rules, &rejected);
        anyhow::bail!("Firewall rules {}", reason);
    }

    let summary = replace_firewall_rules(api, ctx, &mut rules.records).await;
    excel::write_firewall_rules(sheet_mut(workbook, sheets::FIREWALL_RULES)?, &rules, &rejected);
    Ok(summary)
}

/// Build every request a run would send, without sending any of them.
///
/// Group members are resolved against the live inventory (a read-only GET)
/// so the printed group payloads carry real ids.
pub async fn plan(
    api: &dyn MerakiApi,
    ctx: &NetworkContext,
    options: &RunOptions,
    workbook: &Workbook,
) -> Result<Vec<Operation>> {
    let mut operations = Vec::new();

    if options.sections.objects {
        let objects = excel::read_network_objects(sheet(workbook, sheets::NETWORK_OBJECTS)?);
        for object in objects.records.iter().filter(|o| o.error.is_none()) {
            operations.push(Operation::create_network_object(
                ctx,
                network_object_payload(object),
            ));
        }
    }

    if options.sections.groups {
        let mut groups =
            excel::read_network_object_groups(sheet(workbook, sheets::NETWORK_OBJECT_GROUPS)?);
        let inventory = list_network_objects(api, ctx).await?;
        let index = NameIndex::from_remote(&inventory);
        for group in groups.records.iter_mut().filter(|g| g.error.is_none()) {
            let resolution = resolve_names(&group.member_names, &index, options.duplicate_policy);
            group.apply_resolution(resolution);
            if !group.unresolved_names.is_empty() {
                println!(
                    "{} group '{}' has unresolved members: {}",
                    "Warning:".yellow(),
                    group.name,
                    group.unresolved_names.join(", ")
                );
            }
            operations.push(Operation::create_network_object_group(
                ctx,
                network_object_group_payload(group),
            ));
        }
    }

    if options.sections.rules {
        let parsed = excel::read_firewall_rules(sheet(workbook, sheets::FIREWALL_RULES)?);
        if let Some((row, reason)) = parsed.rejected.iter().next() {
            anyhow::bail!("Firewall rule on row {}: {}", row + 1, reason);
        }
        if !parsed.rules.is_empty() {
            operations.push(Operation::replace_l3_firewall_rules(
                ctx,
                firewall_rules_payload(&parsed.rules.records),
            ));
        }
    }

    Ok(operations)
}
