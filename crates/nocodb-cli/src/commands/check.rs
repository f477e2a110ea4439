//! Check command.
//!
//! `nocodb-mcp check` - Report each required backend setting as SET or
//! MISSING, optionally verifying the credentials against the backend.

use anyhow::Result;
use nocodb_core::{ConnectionConfig, NocoConfig};
use nocodb_mcp::Translator;
use nocodb_mcp::envelope::is_error;
use nocodb_mcp::params::ListTablesParams;
use serde_json::Value;
use std::time::Duration;

/// Upper bound for the `--ping` round trip.
const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Severity level for check findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Info,
}

/// A single check finding.
#[derive(Debug, Clone)]
pub struct CheckFinding {
    pub severity: Severity,
    pub category: String,
    pub message: String,
}

impl CheckFinding {
    fn error(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            category: category.into(),
            message: message.into(),
        }
    }

    fn info(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            category: category.into(),
            message: message.into(),
        }
    }
}

/// Results from running all checks.
#[derive(Debug, Default)]
pub struct CheckResults {
    pub findings: Vec<CheckFinding>,
}

impl CheckResults {
    fn extend(&mut self, findings: impl IntoIterator<Item = CheckFinding>) {
        self.findings.extend(findings);
    }

    /// Returns true if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    /// Print human-readable summary.
    pub fn print_summary(&self) {
        for finding in &self.findings {
            let icon = match finding.severity {
                Severity::Error => "✗",
                Severity::Info => "✓",
            };
            println!("  {} [{}] {}", icon, finding.category, finding.message);
        }

        println!();
        println!("{}", "═".repeat(60));
        if self.has_errors() {
            println!("❌ {} problem(s) found.", self.error_count());
        } else {
            println!("✅ All checks passed!");
        }
    }
}

/// Report every required setting as SET or MISSING.
pub fn check_settings(connection: &ConnectionConfig) -> Vec<CheckFinding> {
    connection
        .settings()
        .into_iter()
        .map(|status| {
            if status.is_set {
                CheckFinding::info("settings", format!("{}: SET ({})", status.env, status.setting))
            } else {
                CheckFinding::error(
                    "settings",
                    format!("{}: MISSING ({} is required)", status.env, status.setting),
                )
            }
        })
        .collect()
}

/// List the base's tables to verify URL, token and base id together.
pub async fn check_backend(connection: &ConnectionConfig) -> CheckFinding {
    let translator = Translator::new(connection.clone().with_timeout(PING_TIMEOUT));
    let envelope = translator
        .list_tables(ListTablesParams {
            page_size: 1,
            ..ListTablesParams::default()
        })
        .await;

    if is_error(&envelope) {
        let message = envelope
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return CheckFinding::error("backend", format!("Listing tables failed: {}", message));
    }

    let total = envelope
        .pointer("/pageInfo/totalRows")
        .and_then(Value::as_u64);
    match total {
        Some(total) => CheckFinding::info("backend", format!("Reachable, {} table(s) in base", total)),
        None => CheckFinding::info("backend", "Reachable"),
    }
}

pub async fn run(config: &NocoConfig, ping: bool) -> Result<()> {
    println!("🔍 Checking NocoDB MCP configuration...");
    println!();

    let connection = config.backend.resolve();
    let mut results = CheckResults::default();

    println!("  📋 Checking required settings...");
    results.extend(check_settings(&connection));

    if ping {
        if results.has_errors() {
            println!("  ⏭️  Skipping backend check, settings are missing");
        } else {
            println!("  🌐 Contacting {}...", connection.base_url);
            results.extend([check_backend(&connection).await]);
        }
    }

    results.print_summary();

    if results.has_errors() {
        anyhow::bail!("Configuration check failed with {} error(s)", results.error_count());
    }

    Ok(())
}
