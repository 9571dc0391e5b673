//! Exception-rule model and matching engine.
//!
//! An exception list is a text file of rules, one per line, plus blank
//! lines and `#` comments. Each rule is one of the keywords
//! `IGNORE_HEADER`, `IGNORE_TARGET`, `IGNORE_DIR` followed by a pattern.
//!
//! - `IGNORE_HEADER` takes a glob to ignore a given header's use. When a
//!   sysroot is supplied at load time the pattern is additionally
//!   reinterpreted relative to that root; both forms are kept.
//! - `IGNORE_DIR` takes a glob to ignore any problems under a directory.
//! - `IGNORE_TARGET` takes an absolute directory, a `:`, and a glob to
//!   match against the make target. The `dir:glob` split happens at
//!   match time, not load time.

use globset::{Glob, GlobMatcher};
use hdrfence_shared::{ErrorCode, ErrorEnvelope, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Rule keyword for header patterns.
pub const KEYWORD_IGNORE_HEADER: &str = "IGNORE_HEADER";
/// Rule keyword for target patterns.
pub const KEYWORD_IGNORE_TARGET: &str = "IGNORE_TARGET";
/// Rule keyword for directory patterns.
pub const KEYWORD_IGNORE_DIR: &str = "IGNORE_DIR";

/// One parsed exception rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    /// Suppress findings whose header matches the pattern.
    HeaderIgnore(String),
    /// Suppress findings whose state-file directory matches the pattern.
    DirIgnore(String),
    /// Raw `dir:target-glob` pattern, split when queried.
    TargetIgnore(String),
}

/// A deduplicated set of patterns with optional compiled globs.
///
/// Keyed by the pattern string so inserting a pattern twice behaves
/// identically to once. A pattern the glob compiler rejects keeps its
/// prefix/literal matching and simply has no glob tier (shell fnmatch
/// accepts every pattern, so load must not fail here).
#[derive(Debug, Clone, Default)]
struct PatternSet {
    patterns: BTreeMap<String, Option<GlobMatcher>>,
}

impl PatternSet {
    fn insert(&mut self, pattern: String) {
        if self.patterns.contains_key(&pattern) {
            return;
        }
        let matcher = Glob::new(&pattern)
            .ok()
            .map(|glob| glob.compile_matcher());
        self.patterns.insert(pattern, matcher);
    }

    /// Prefix match OR whole-string glob match against any stored pattern.
    fn matches(&self, value: &str) -> bool {
        self.patterns.iter().any(|(pattern, matcher)| {
            value.starts_with(pattern.as_str())
                || matcher
                    .as_ref()
                    .is_some_and(|matcher| matcher.is_match(Path::new(value)))
        })
    }

    fn len(&self) -> usize {
        self.patterns.len()
    }
}

/// Immutable, indexed set of exception rules.
///
/// Built once from an exception list at startup and queried once per
/// candidate finding; never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    ignore_headers: PatternSet,
    ignore_dirs: PatternSet,
    ignore_targets: BTreeSet<String>,
}

impl RuleSet {
    /// Parse an exception list from text.
    ///
    /// `origin` names the source (a file path) in error messages. When
    /// `sysroot` is given, every header pattern is also inserted joined
    /// under the sysroot with its leading `/` stripped; the raw form is
    /// retained alongside.
    pub fn parse(source: &str, origin: &str, sysroot: Option<&str>) -> Result<Self> {
        let mut rules = Self::default();

        for (index, raw_line) in source.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            let [keyword, pattern] = tokens.as_slice() else {
                return Err(ErrorEnvelope::expected(
                    ErrorCode::malformed_line(),
                    format!("{origin}: {line_number}: malformed line: '{line}'"),
                )
                .with_metadata("file", origin)
                .with_metadata("line", line_number.to_string())
                .with_metadata("content", line));
            };

            match *keyword {
                KEYWORD_IGNORE_HEADER => {
                    if let Some(root) = sysroot {
                        rules.insert(Rule::HeaderIgnore(join_under_sysroot(root, pattern)));
                    }
                    rules.insert(Rule::HeaderIgnore((*pattern).to_owned()));
                },
                KEYWORD_IGNORE_TARGET => {
                    rules.insert(Rule::TargetIgnore((*pattern).to_owned()));
                },
                KEYWORD_IGNORE_DIR => {
                    rules.insert(Rule::DirIgnore((*pattern).to_owned()));
                },
                unknown => {
                    return Err(ErrorEnvelope::expected(
                        ErrorCode::unknown_keyword(),
                        format!("{origin}: {line_number}: unknown rule: {unknown}"),
                    )
                    .with_metadata("file", origin)
                    .with_metadata("line", line_number.to_string())
                    .with_metadata("content", line));
                },
            }
        }

        Ok(rules)
    }

    /// Insert a single rule (set semantics).
    pub fn insert(&mut self, rule: Rule) {
        match rule {
            Rule::HeaderIgnore(pattern) => self.ignore_headers.insert(pattern),
            Rule::DirIgnore(pattern) => self.ignore_dirs.insert(pattern),
            Rule::TargetIgnore(pattern) => {
                self.ignore_targets.insert(pattern);
            },
        }
    }

    /// Returns true when a (directory, target, header) triple is
    /// suppressed by any rule.
    ///
    /// Header rules match `header` by string prefix or glob; dir rules
    /// match `dir` the same way; target rules require the directory to
    /// equal the rule's directory exactly and the target to glob-match.
    /// A target rule without exactly one `:` fails the whole query.
    pub fn matches(&self, dir: &str, target: &str, header: &str) -> Result<bool> {
        if self.ignore_headers.matches(header) {
            return Ok(true);
        }
        if self.ignore_dirs.matches(dir) {
            return Ok(true);
        }
        for raw in &self.ignore_targets {
            let fields: Vec<&str> = raw.split(':').collect();
            let [rule_dir, target_glob] = fields.as_slice() else {
                return Err(ErrorEnvelope::expected(
                    ErrorCode::malformed_target_rule(),
                    format!("malformed IGNORE_TARGET rule: '{raw}'"),
                )
                .with_metadata("content", raw.as_str()));
            };
            if *rule_dir == dir && glob_matches(target_glob, target) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Number of header-ignore patterns (sysroot forms included).
    #[must_use]
    pub fn header_rule_count(&self) -> usize {
        self.ignore_headers.len()
    }

    /// Number of dir-ignore patterns.
    #[must_use]
    pub fn dir_rule_count(&self) -> usize {
        self.ignore_dirs.len()
    }

    /// Number of target-ignore patterns.
    #[must_use]
    pub fn target_rule_count(&self) -> usize {
        self.ignore_targets.len()
    }
}

/// Whole-string glob match with a literal-equality fallback for
/// patterns the compiler rejects.
fn glob_matches(pattern: &str, value: &str) -> bool {
    match Glob::new(pattern) {
        Ok(glob) => glob.compile_matcher().is_match(Path::new(value)),
        Err(_) => pattern == value,
    }
}

/// Join a pattern under the sysroot, stripping any leading `/`.
fn join_under_sysroot(sysroot: &str, pattern: &str) -> String {
    Path::new(sysroot)
        .join(pattern.trim_start_matches('/'))
        .to_string_lossy()
        .into_owned()
}
