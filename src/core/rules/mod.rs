//! Replacement rule model: validation, normalization, and defaults.
//!
//! A [`RuleSet`] is built from raw [`RuleSpec`] entries via
//! [`RuleSet::validate`], which is total: every rule in a constructed set
//! has all matcher options populated (engine defaults fill the gaps) and a
//! stable identifier. Application order is list order; the engine never
//! reorders rules.
//!
//! # Examples
//!
//! ```rust
//! use swapx_cli::core::rules::{MatchDefaults, RuleSet, RuleSpec};
//!
//! let rules = RuleSet::validate(
//!     vec![RuleSpec::new("alpha", "beta"), RuleSpec::new("beta", "gamma")],
//!     &MatchDefaults::default(),
//! )
//! .unwrap();
//! assert_eq!(rules.len(), 2);
//! assert!(rules.iter().all(|r| r.enabled));
//! ```

pub mod document;
pub mod matcher;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, error::SwapXError};

/// Engine-level matcher defaults inherited by rules that do not override
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchDefaults {
    /// Whether matching is case sensitive when a rule does not say.
    pub case_sensitive: bool,
    /// Whether matches must be whole words when a rule does not say.
    pub whole_word: bool,
}

impl Default for MatchDefaults {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
        }
    }
}

/// Raw rule entry as supplied by a caller, a CLI flag, or a rule document.
///
/// Optional fields inherit the engine defaults during validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    /// Stable identifier; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Literal text to search for. Must be non-empty.
    pub from: String,
    /// Literal replacement text. May be empty (deletion).
    #[serde(default)]
    pub to: String,
    /// Whether the rule participates in runs. Defaults to true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Per-rule case sensitivity override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    /// Per-rule whole-word override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whole_word: Option<bool>,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RuleSpec {
    /// Create a minimal spec with everything else inheriting defaults.
    pub fn new<S1: Into<String>, S2: Into<String>>(from: S1, to: S2) -> Self {
        Self {
            id: None,
            from: from.into(),
            to: to.into(),
            enabled: None,
            case_sensitive: None,
            whole_word: None,
            description: None,
        }
    }

    /// Parse a `FROM=TO` CLI argument into a spec.
    ///
    /// The first `=` splits the pair; everything after it (including
    /// further `=` characters) is the replacement. An empty replacement is
    /// allowed, an empty search string is rejected later by validation.
    pub fn parse_cli_pair(pair: &str) -> Result<Self> {
        match pair.split_once('=') {
            Some((from, to)) => Ok(Self::new(from, to)),
            None => Err(SwapXError::config(format!(
                "Invalid rule '{}': expected FROM=TO",
                pair
            ))),
        }
    }
}

/// A fully validated replacement rule.
///
/// Every field is populated; construction goes through
/// [`RuleSet::validate`] only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Stable identifier, unique within the set unless the caller supplied
    /// duplicates.
    pub id: String,
    /// Literal search text (never empty, never a regex).
    pub from: String,
    /// Literal replacement text.
    pub to: String,
    /// Disabled rules are skipped entirely; output is identical to the
    /// rule being absent.
    pub enabled: bool,
    /// Case-sensitive matching for this rule.
    pub case_sensitive: bool,
    /// Whole-word matching for this rule.
    pub whole_word: bool,
    /// Optional description, surfaced in previews.
    pub description: Option<String>,
}

/// Ordered, validated collection of rules.
///
/// The order of the backing list is the order of application: rule *N*
/// observes the output of rules 1..*N*−1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Validate a raw rule list against the engine defaults.
    ///
    /// # Errors
    ///
    /// - [`SwapXError::EmptyRuleSet`] when `specs` is empty.
    /// - [`SwapXError::InvalidRule`] when a rule's `from` is empty.
    pub fn validate(specs: Vec<RuleSpec>, defaults: &MatchDefaults) -> Result<Self> {
        if specs.is_empty() {
            return Err(SwapXError::EmptyRuleSet);
        }
        let mut rules = Vec::with_capacity(specs.len());
        for (index, spec) in specs.into_iter().enumerate() {
            if spec.from.is_empty() {
                return Err(SwapXError::rule(index, "'from' must not be empty"));
            }
            rules.push(Rule {
                id: spec
                    .id
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| format!("rule_{}", Uuid::new_v4().simple())),
                from: spec.from,
                to: spec.to,
                enabled: spec.enabled.unwrap_or(true),
                case_sensitive: spec.case_sensitive.unwrap_or(defaults.case_sensitive),
                whole_word: spec.whole_word.unwrap_or(defaults.whole_word),
                description: spec.description,
            });
        }
        Ok(Self { rules })
    }

    /// Number of rules in the set, disabled ones included.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the set holds no rules. Unreachable through `validate`,
    /// kept for the usual `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate all rules in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Iterate only the enabled rules in application order.
    pub fn enabled(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.enabled)
    }

    /// The longest `from` among enabled rules, in bytes. Zero when every
    /// rule is disabled.
    pub fn max_pattern_len(&self) -> usize {
        self.enabled().map(|r| r.from.len()).max().unwrap_or(0)
    }
}
