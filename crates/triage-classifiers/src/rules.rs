//! Rule-based domain boost layer
//!
//! Encodes dispatcher knowledge the statistical model under-weights: two
//! fixed ordered lists of regex rules scanned against the raw, untokenized
//! text. Each matching critical rule adds a fixed boost to CRITICAL's
//! log-score; each matching high rule adds a smaller boost to HIGH's.
//! Boosts are additive and uncapped, applied before softmax normalization.

use regex::{RegexSet, RegexSetBuilder};
use std::collections::BTreeMap;
use triage_core::{Error, PriorityClass, Result};

/// A single boost rule: diagnostic tag plus the pattern it scans for
#[derive(Debug, Clone, Copy)]
pub struct BoostRule {
    pub tag: &'static str,
    pub pattern: &'static str,
}

/// Patterns for incidents that must page someone regardless of wording
const CRITICAL_RULES: &[BoostRule] = &[
    BoostRule {
        tag: "boil-water-advisory",
        pattern: r"boil[\s-]+water",
    },
    BoostRule {
        tag: "contamination",
        pattern: r"contaminat(ed|ion|ing)?",
    },
    BoostRule {
        tag: "sewage-overflow",
        pattern: r"sewage\s+(overflow|spill|backup|discharge)",
    },
    BoostRule {
        tag: "transmission-main-break",
        pattern: r"transmission\s+main\b.*(break|broke|burst|rupture|fail)",
    },
    BoostRule {
        tag: "critical-facility-outage",
        pattern: r"(hospital|dialysis|nursing\s+home|fire\s+station)\b.*(outage|no\s+water|without\s+water|no\s+service)",
    },
    BoostRule {
        tag: "chlorine-release",
        pattern: r"chlorine\s+(leak|release|gas|spill)",
    },
];

/// Patterns for serious but not page-worthy incidents
const HIGH_RULES: &[BoostRule] = &[
    BoostRule {
        tag: "main-break",
        pattern: r"(water\s+)?main\s+(break|broke|burst)",
    },
    BoostRule {
        tag: "major-leak",
        pattern: r"(major|large|significant|severe)\s+leak",
    },
    BoostRule {
        tag: "widespread-low-pressure",
        pattern: r"(widespread|multiple\s+(streets|blocks|customers)|entire\s+(street|block|neighborhood))\b.*(low|no)\s+pressure",
    },
    BoostRule {
        tag: "pump-station-failure",
        pattern: r"pump\s+station\b.*(fail|down|offline|outage|tripped)",
    },
    BoostRule {
        tag: "backflow",
        pattern: r"backflow",
    },
    BoostRule {
        tag: "valve-failure",
        pattern: r"valve\s+(fail|failure|stuck|broken|seized)",
    },
    BoostRule {
        tag: "road-impact",
        pattern: r"(road|street|lane|intersection)\s+(closed|closure|flooded|washout|collapse|buckling)",
    },
];

/// Compiled domain boost rules with configured magnitudes.
///
/// The magnitudes are ad hoc tuning constants preserved as configuration;
/// there is no derivation behind the defaults of 2.0 and 1.0.
pub struct DomainBoost {
    critical: RegexSet,
    high: RegexSet,
    critical_boost: f64,
    high_boost: f64,
}

impl DomainBoost {
    /// Compile the rule lists with the given boost magnitudes
    pub fn new(critical_boost: f64, high_boost: f64) -> Result<Self> {
        let critical = Self::build_set(CRITICAL_RULES)?;
        let high = Self::build_set(HIGH_RULES)?;
        Ok(Self {
            critical,
            high,
            critical_boost,
            high_boost,
        })
    }

    fn build_set(rules: &[BoostRule]) -> Result<RegexSet> {
        RegexSetBuilder::new(rules.iter().map(|r| r.pattern))
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::config(format!("failed to compile boost rules: {e}")))
    }

    /// Apply boosts to the raw log-scores in place, scanning the untokenized
    /// text case-insensitively. Returns every matched rule tag in rule-list
    /// order, critical rules first; the first entry is the representative tag.
    pub fn apply(
        &self,
        text: &str,
        scores: &mut BTreeMap<PriorityClass, f64>,
    ) -> Vec<&'static str> {
        let mut tags = Vec::new();

        for idx in self.critical.matches(text) {
            if let Some(score) = scores.get_mut(&PriorityClass::Critical) {
                *score += self.critical_boost;
            }
            tags.push(CRITICAL_RULES[idx].tag);
        }

        for idx in self.high.matches(text) {
            if let Some(score) = scores.get_mut(&PriorityClass::High) {
                *score += self.high_boost;
            }
            tags.push(HIGH_RULES[idx].tag);
        }

        tags
    }
}
