//! Fixed rule tables for the heuristic classifier.
//!
//! The tables are plain data so rules can be tested and extended without
//! touching classifier control flow. The same tables back the serving path
//! and any offline labeling tooling; there is exactly one copy.

/// Maps a jurisdiction code to the keyword evidence that selects it.
///
/// A jurisdiction matches when any `any_of` keyword appears, or when every
/// `all_of` keyword appears. Exactly one of the two sets is populated per
/// rule.
pub struct JurisdictionRule {
    /// Territory code emitted into the record (e.g., "EU")
    pub code: &'static str,

    /// Any single keyword selects the jurisdiction
    pub any_of: &'static [&'static str],

    /// All keywords must appear together
    pub all_of: &'static [&'static str],
}

impl JurisdictionRule {
    /// Evaluate this rule against lower-cased text.
    pub fn matches(&self, text: &str) -> bool {
        if !self.any_of.is_empty() && self.any_of.iter().any(|kw| text.contains(kw)) {
            return true;
        }
        !self.all_of.is_empty() && self.all_of.iter().all(|kw| text.contains(kw))
    }
}

pub const JURISDICTION_RULES: &[JurisdictionRule] = &[
    JurisdictionRule {
        code: "EU",
        any_of: &["gdpr", "eprivacy", "eu cookie", "eu users"],
        all_of: &[],
    },
    JurisdictionRule {
        code: "US-CA",
        any_of: &["ccpa", "cpra", "california"],
        all_of: &[],
    },
    JurisdictionRule {
        code: "UK",
        any_of: &[],
        all_of: &["uk", "gdpr"],
    },
    JurisdictionRule {
        code: "SG",
        any_of: &["pdpa", "singapore"],
        all_of: &[],
    },
];

/// A label selected when any of its keywords appears in the text.
pub struct KeywordRule {
    /// Label emitted into the record
    pub label: &'static str,

    /// Keyword evidence
    pub any_of: &'static [&'static str],
}

impl KeywordRule {
    pub fn matches(&self, text: &str) -> bool {
        self.any_of.iter().any(|kw| text.contains(kw))
    }
}

pub const DATA_CATEGORY_RULES: &[KeywordRule] = &[
    KeywordRule {
        label: "cookies",
        any_of: &["cookie"],
    },
    KeywordRule {
        label: "analytics",
        any_of: &["analytics"],
    },
    KeywordRule {
        label: "identifiers",
        any_of: &["identifier", "idfa", "gaid", "uuid"],
    },
];

pub const LAWFUL_BASIS_RULES: &[KeywordRule] = &[
    KeywordRule {
        label: "consent",
        any_of: &["consent"],
    },
    KeywordRule {
        label: "legitimate_interests",
        any_of: &["legitimate interest"],
    },
];

/// Keywords that, together with an EU jurisdiction, force the
/// consent-required flag.
pub const CONSENT_TRIGGER_KEYWORDS: &[&str] = &["non-essential", "analytics", "marketing"];

/// Both must appear for the geo-logic flag to trip on wording alone.
pub const GEO_LOGIC_KEYWORDS: &[&str] = &["geo", "logic"];

/// Literal phrase that trips the geo-logic flag by itself.
pub const EU_USERS_PHRASE: &str = "eu users";

/// A fixed citation emitted for a detected jurisdiction.
///
/// When `requires_any` is non-empty the citation is only emitted if one of
/// those keywords also appears in the text.
pub struct CitationRule {
    pub jurisdiction: &'static str,
    pub law: &'static str,
    pub article: &'static str,
    pub requires_any: &'static [&'static str],
}

pub const CITATION_RULES: &[CitationRule] = &[
    CitationRule {
        jurisdiction: "EU",
        law: "GDPR",
        article: "7(1)",
        requires_any: &[],
    },
    CitationRule {
        jurisdiction: "EU",
        law: "ePrivacy Directive",
        article: "5(3)",
        requires_any: &["eprivacy", "cookie"],
    },
    CitationRule {
        jurisdiction: "US-CA",
        law: "CCPA/CPRA",
        article: "1798.100+",
        requires_any: &[],
    },
    CitationRule {
        jurisdiction: "SG",
        law: "PDPA",
        article: "Consent/Notification",
        requires_any: &[],
    },
];

/// Fixed risk emitted when a jurisdiction is detected.
pub struct RiskRule {
    pub jurisdiction: &'static str,
    pub risk: &'static str,
    pub severity: &'static str,
    pub mitigation: &'static str,
}

pub const RISK_RULES: &[RiskRule] = &[RiskRule {
    jurisdiction: "EU",
    risk: "drop cookies pre-consent in EU",
    severity: "high",
    mitigation: "implement prior opt-in",
}];

/// Ordered implementation steps emitted when any jurisdiction is detected,
/// all at priority 1.
pub const IMPLEMENTATION_STEPS: &[&str] = &[
    "Detect user jurisdiction (IP/residency/self-declare)",
    "Block non-essential cookies until consent where required",
    "Provide granular toggles and store consent timestamp",
];

/// Jurisdiction-specific advisory sentence appended to notes.
pub struct AdvisoryNote {
    pub jurisdiction: &'static str,
    pub text: &'static str,
}

pub const ADVISORY_NOTES: &[AdvisoryNote] = &[
    AdvisoryNote {
        jurisdiction: "EU",
        text: "EU non-essential cookies typically require opt-in consent.",
    },
    AdvisoryNote {
        jurisdiction: "US-CA",
        text: "California requires disclosures and limited use; consent norms differ from EU.",
    },
];

/// Advisory used when no jurisdiction matched at all.
pub const GENERIC_ADVISORY: &str =
    "Apply jurisdiction-specific banner and blocking rules if targeting regulated regions.";

/// Confidence when at least one signal (jurisdiction, category, basis, or
/// consent flag) was found.
pub const CONFIDENCE_MATCHED: f64 = 0.55;

/// Confidence when nothing matched.
pub const CONFIDENCE_UNMATCHED: f64 = 0.30;
