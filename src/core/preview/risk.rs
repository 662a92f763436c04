//! Qualitative risk scoring for a previewed run.
//!
//! The assessment is additive over four factors with fixed weights; the
//! thresholds below are part of the public contract and stable across
//! runs:
//!
//! | factor | condition | weight |
//! |---|---|---|
//! | `wide-change` | > 50% of analyzed files would change | +2 |
//! | `very-wide-change` | > 80% of analyzed files would change | +3 (replaces `wide-change`) |
//! | `dense-changes` | mean replacements per changed file > 20 | +1 |
//! | `very-dense-changes` | mean replacements per changed file > 50 | +2 (replaces `dense-changes`) |
//! | `short-pattern` | any enabled rule's `from` is shorter than 3 characters | +2 |
//! | `cascade` | a later rule's `from` occurs inside an earlier enabled rule's `to` | +2 |
//!
//! A total score of 5 or more is High, 2 or more is Medium, otherwise
//! Low.

use crate::core::rules::RuleSet;

/// Qualitative risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    /// Nothing noteworthy; a straight run is reasonable.
    Low,
    /// Worth reviewing the samples first.
    Medium,
    /// Inspect a dry-run diff before writing anything.
    High,
}

impl RiskLevel {
    /// Stable machine-readable level string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// One contributing factor with its weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskFactor {
    /// Stable factor code (see the module table).
    pub code: &'static str,
    /// Human-readable detail.
    pub detail: String,
    /// Score contribution.
    pub weight: u32,
}

/// Risk level plus the factors that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    /// Derived level.
    pub level: RiskLevel,
    /// Total additive score.
    pub score: u32,
    /// Contributing factors, highest weight first.
    pub factors: Vec<RiskFactor>,
}

/// Score a previewed run.
///
/// `analyzed` and `changed` describe the sampled prefix;
/// `total_replacements` is the substitution count over that prefix.
pub fn assess(
    rules: &RuleSet,
    analyzed: usize,
    changed: usize,
    total_replacements: usize,
) -> RiskAssessment {
    let mut factors = Vec::new();

    if analyzed > 0 {
        let ratio = changed as f64 / analyzed as f64;
        if ratio > 0.8 {
            factors.push(RiskFactor {
                code: "very-wide-change",
                detail: format!(
                    "{} of {} analyzed files would change",
                    changed, analyzed
                ),
                weight: 3,
            });
        } else if ratio > 0.5 {
            factors.push(RiskFactor {
                code: "wide-change",
                detail: format!(
                    "{} of {} analyzed files would change",
                    changed, analyzed
                ),
                weight: 2,
            });
        }
    }

    if changed > 0 {
        let mean = total_replacements as f64 / changed as f64;
        if mean > 50.0 {
            factors.push(RiskFactor {
                code: "very-dense-changes",
                detail: format!("{:.1} replacements per changed file", mean),
                weight: 2,
            });
        } else if mean > 20.0 {
            factors.push(RiskFactor {
                code: "dense-changes",
                detail: format!("{:.1} replacements per changed file", mean),
                weight: 1,
            });
        }
    }

    let short: Vec<_> = rules
        .enabled()
        .filter(|rule| rule.from.chars().count() < 3)
        .map(|rule| rule.from.clone())
        .collect();
    if !short.is_empty() {
        factors.push(RiskFactor {
            code: "short-pattern",
            detail: format!(
                "patterns shorter than 3 characters may over-match: {}",
                short.join(", ")
            ),
            weight: 2,
        });
    }

    if let Some((earlier, later)) = find_cascade(rules) {
        factors.push(RiskFactor {
            code: "cascade",
            detail: format!(
                "rule '{}' matches inside the replacement of earlier rule '{}'",
                later, earlier
            ),
            weight: 2,
        });
    }

    factors.sort_by(|a, b| b.weight.cmp(&a.weight));
    let score: u32 = factors.iter().map(|f| f.weight).sum();
    let level = if score >= 5 {
        RiskLevel::High
    } else if score >= 2 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    RiskAssessment {
        level,
        score,
        factors,
    }
}

/// First (earlier-id, later-id) pair where the later rule's pattern is a
/// substring of the earlier rule's replacement.
fn find_cascade(rules: &RuleSet) -> Option<(String, String)> {
    let enabled: Vec<_> = rules.enabled().collect();
    for (i, earlier) in enabled.iter().enumerate() {
        for later in &enabled[i + 1..] {
            if !earlier.to.is_empty() && earlier.to.contains(&later.from) {
                return Some((earlier.id.clone(), later.id.clone()));
            }
        }
    }
    None
}

// Unit tests: documented thresholds
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::{MatchDefaults, RuleSpec};

    fn rule_set(specs: Vec<RuleSpec>) -> RuleSet {
        RuleSet::validate(specs, &MatchDefaults::default()).unwrap()
    }

    #[test]
    fn test_quiet_run_is_low() {
        let rules = rule_set(vec![RuleSpec::new("longpattern", "replacement")]);
        let risk = assess(&rules, 10, 2, 4);
        assert_eq!(risk.level, RiskLevel::Low);
        assert!(risk.factors.is_empty());
    }

    #[test]
    fn test_wide_change_is_medium() {
        let rules = rule_set(vec![RuleSpec::new("longpattern", "replacement")]);
        let risk = assess(&rules, 10, 6, 6);
        assert_eq!(risk.level, RiskLevel::Medium);
        assert_eq!(risk.factors[0].code, "wide-change");
    }

    #[test]
    fn test_very_wide_replaces_wide() {
        let rules = rule_set(vec![RuleSpec::new("longpattern", "replacement")]);
        let risk = assess(&rules, 10, 9, 9);
        assert!(risk.factors.iter().any(|f| f.code == "very-wide-change"));
        assert!(!risk.factors.iter().any(|f| f.code == "wide-change"));
    }

    #[test]
    fn test_short_pattern_flagged() {
        let rules = rule_set(vec![RuleSpec::new("ab", "xy")]);
        let risk = assess(&rules, 10, 1, 1);
        assert!(risk.factors.iter().any(|f| f.code == "short-pattern"));
        assert_eq!(risk.level, RiskLevel::Medium);
    }

    #[test]
    fn test_cascade_detected() {
        let rules = rule_set(vec![
            RuleSpec::new("alpha", "beta plus"),
            RuleSpec::new("beta", "gamma"),
        ]);
        let risk = assess(&rules, 10, 1, 1);
        assert!(risk.factors.iter().any(|f| f.code == "cascade"));
    }

    #[test]
    fn test_cascade_ignores_disabled_rules() {
        let mut first = RuleSpec::new("alpha", "beta plus");
        first.enabled = Some(false);
        let rules = rule_set(vec![first, RuleSpec::new("beta", "gamma")]);
        let risk = assess(&rules, 10, 1, 1);
        assert!(!risk.factors.iter().any(|f| f.code == "cascade"));
    }

    #[test]
    fn test_stacked_factors_reach_high() {
        // very wide change (+3) and a short pattern (+2) add up to high
        let rules = rule_set(vec![RuleSpec::new("a", "b")]);
        let risk = assess(&rules, 10, 9, 9);
        assert_eq!(risk.level, RiskLevel::High);
        assert!(risk.score >= 5);
    }

    #[test]
    fn test_dense_changes_thresholds() {
        let rules = rule_set(vec![RuleSpec::new("longpattern", "replacement")]);
        let dense = assess(&rules, 10, 2, 50);
        assert!(dense.factors.iter().any(|f| f.code == "dense-changes"));
        let very_dense = assess(&rules, 10, 2, 200);
        assert!(
            very_dense
                .factors
                .iter()
                .any(|f| f.code == "very-dense-changes")
        );
    }

    #[test]
    fn test_zero_analyzed_is_low() {
        let rules = rule_set(vec![RuleSpec::new("longpattern", "x")]);
        let risk = assess(&rules, 0, 0, 0);
        assert_eq!(risk.level, RiskLevel::Low);
    }
}
