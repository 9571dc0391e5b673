//! Load and index the exception list.

use crate::deps::ScanDeps;
use hdrfence_domain::RuleSet;
use hdrfence_ports::LogFields;
use hdrfence_shared::Result;

/// Read the exception list through the filesystem port and parse it.
///
/// An unopenable file surfaces as an `io:*` error, distinct from the
/// `rules:*` parse errors; either way no partial rule set is returned.
pub fn load_rule_set(deps: &ScanDeps, path: &str, sysroot: Option<&str>) -> Result<RuleSet> {
    let source = deps.fs.read_file_text(path)?;
    let rules = RuleSet::parse(&source, path, sysroot)?;

    if let Some(logger) = deps.logger.as_ref() {
        let mut fields = LogFields::new();
        fields.insert("file".into(), serde_json::Value::from(path));
        fields.insert(
            "headerRules".into(),
            serde_json::Value::from(rules.header_rule_count()),
        );
        fields.insert(
            "dirRules".into(),
            serde_json::Value::from(rules.dir_rule_count()),
        );
        fields.insert(
            "targetRules".into(),
            serde_json::Value::from(rules.target_rule_count()),
        );
        logger.info("rules.loaded", "Exception list loaded", Some(fields));
    }

    Ok(rules)
}
