//! Scan build-state files for out-of-workspace header dependencies.
//!
//! The inputs are loosely Makefile-shaped: lines beginning with a tab
//! are command lines and skipped; on any other line, whitespace-
//! separated content after the first colon is a dependency list. Only
//! `.h`-suffixed tokens are inspected. Continuation lines and variable
//! expansion are not supported.

use crate::deps::ScanDeps;
use hdrfence_domain::{Finding, RuleSet};
use hdrfence_ports::LogFields;
use hdrfence_shared::Result;
use std::collections::{BTreeMap, BTreeSet};

/// Input payload for a scan run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanInput {
    /// Workspace root; headers resolving outside it are candidates.
    pub workspace: String,
    /// Build-state files to scan, in order.
    pub state_files: Vec<String>,
}

/// Scan every state file sequentially, fail-fast, in input order.
pub fn scan_state_files(
    deps: &ScanDeps,
    rules: &RuleSet,
    input: &ScanInput,
) -> Result<Vec<Finding>> {
    if let Some(logger) = deps.logger.as_ref() {
        let mut fields = LogFields::new();
        fields.insert("files".into(), serde_json::Value::from(input.state_files.len()));
        fields.insert(
            "workspace".into(),
            serde_json::Value::from(input.workspace.clone()),
        );
        logger.info("scan.start", "Scan started", Some(fields));
    }

    let mut findings = Vec::new();
    for statefile in &input.state_files {
        findings.extend(scan_state_file(deps, rules, &input.workspace, statefile)?);
    }

    if let Some(logger) = deps.logger.as_ref() {
        let mut fields = LogFields::new();
        fields.insert("findings".into(), serde_json::Value::from(findings.len()));
        logger.info("scan.completed", "Scan completed", Some(fields));
    }

    Ok(findings)
}

/// Scan one state file and return its unsuppressed findings.
///
/// Candidate headers are collected per raw target key with set
/// semantics, re-canonicalized, then checked against the rule set. An
/// unreadable state file or a malformed target-ignore rule is fatal to
/// the whole run; there is no per-file recovery.
pub fn scan_state_file(
    deps: &ScanDeps,
    rules: &RuleSet,
    workspace: &str,
    statefile: &str,
) -> Result<Vec<Finding>> {
    let source = deps.fs.read_file_text(statefile)?;
    let directory = dirname(statefile).to_owned();

    let mut hits: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for line in source.lines() {
        // Skip command lines and anything without a dependency list. A
        // line whose first character is `:` still contains a colon and
        // is not skipped.
        if line.starts_with('\t') || !line.contains(':') {
            continue;
        }

        // First colon only; later colons stay embedded in the
        // dependency text. The left side is the raw grouping key even
        // when it names several targets.
        let Some((targets, dependencies)) = line.split_once(':') else {
            continue;
        };

        for token in dependencies.split(' ') {
            let token = token.trim();
            if !token.ends_with(".h") {
                continue;
            }

            let path = if token.starts_with('/') {
                token.to_owned()
            } else {
                deps.fs.realpath(&join(&directory, token))
            };

            // String-prefix containment, kept deliberately: a workspace
            // of /foo also suppresses /foobar/x.h.
            if !path.starts_with(workspace) {
                hits.entry(targets.to_owned()).or_default().insert(path);
            }
        }
    }

    let candidate_count: usize = hits.values().map(BTreeSet::len).sum();
    let mut findings = Vec::new();
    let mut suppressed = 0usize;

    for (target, paths) in &hits {
        // Second canonicalization pass: absolute tokens were taken
        // verbatim above and resolve here, before dedup and matching.
        let canonical: BTreeSet<String> =
            paths.iter().map(|path| deps.fs.realpath(path)).collect();

        for path in canonical {
            if rules.matches(&directory, target, &path)? {
                suppressed += 1;
                continue;
            }
            findings.push(Finding {
                directory: directory.clone(),
                target: target.clone(),
                header_path: path,
            });
        }
    }

    if let Some(logger) = deps.logger.as_ref() {
        let mut fields = LogFields::new();
        fields.insert("statefile".into(), serde_json::Value::from(statefile));
        fields.insert("candidates".into(), serde_json::Value::from(candidate_count));
        fields.insert("suppressed".into(), serde_json::Value::from(suppressed));
        fields.insert("findings".into(), serde_json::Value::from(findings.len()));
        logger.info("scan.file.completed", "State file scanned", Some(fields));
    }

    Ok(findings)
}

/// Directory component of a path, POSIX string semantics: no separator
/// yields the empty string, and trailing separators in the head are
/// trimmed unless the head is the root itself.
fn dirname(path: &str) -> &str {
    let Some(index) = path.rfind('/') else {
        return "";
    };
    let head = path.get(..=index).unwrap_or("");
    let trimmed = head.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Join a relative token onto a directory, POSIX string semantics: an
/// empty directory leaves the token untouched (it resolves against the
/// working directory later).
fn join(directory: &str, token: &str) -> String {
    if directory.is_empty() {
        return token.to_owned();
    }
    if directory.ends_with('/') {
        format!("{directory}{token}")
    } else {
        format!("{directory}/{token}")
    }
}
