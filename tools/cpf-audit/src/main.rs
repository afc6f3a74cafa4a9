//! cpf-audit: batch CPF validation for import files.
//!
//! Reads one identifier per line (any punctuation), validates each, and
//! flags duplicates within the batch on the canonical form, so two
//! differently punctuated spellings of one CPF count as the same
//! identifier. Intended for vetting exports from legacy systems before a
//! bulk import into the registry.
//!
//! Exit code is 1 when any line is invalid or duplicated.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use frota_cpf::{validate, Cpf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cpf-audit", about = "Validate CPF identifiers for batch import")]
struct Args {
    /// File with one identifier per line; reads stdin when omitted.
    /// Blank lines and lines starting with '#' are skipped.
    input: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Report {
    checked: usize,
    valid: usize,
    findings: Vec<String>,
}

fn audit<R: BufRead>(reader: R) -> Result<Report> {
    let mut report = Report::default();
    let mut first_seen: HashMap<Cpf, usize> = HashMap::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("failed to read input")?;
        let lineno = idx + 1;
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }

        report.checked += 1;
        match validate(entry) {
            Ok(cpf) => {
                if let Some(original) = first_seen.get(&cpf) {
                    report.findings.push(format!(
                        "line {lineno}: {entry}: duplicate of line {original}"
                    ));
                } else {
                    first_seen.insert(cpf, lineno);
                    report.valid += 1;
                }
            }
            Err(e) => report.findings.push(format!("line {lineno}: {entry}: {e}")),
        }
    }

    Ok(report)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let report = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            audit(BufReader::new(file))?
        }
        None => audit(io::stdin().lock())?,
    };

    debug!(checked = report.checked, findings = report.findings.len(), "audit complete");

    for finding in &report.findings {
        eprintln!("{finding}");
    }
    println!(
        "{} identifiers checked, {} valid, {} findings",
        report.checked,
        report.valid,
        report.findings.len()
    );

    if !report.findings.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
