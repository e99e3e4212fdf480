//! Rule tables: the data every rule family runs against
//!
//! [`TableConfig`] is the serializable form read from configuration files.
//! [`RuleTable`] is the validated form: every pattern is compiled exactly once
//! here, so a table that fails to build can never be used to lint.

use crate::error::LintError;
use crate::rules::RuleKind;
use crate::scanner::Pattern;
use serde::{Deserialize, Serialize};

/// Spacing requirement around a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacerConfig {
    /// Pattern to check
    pub pattern: String,

    /// Scope category the match must carry (empty = any typical scope)
    #[serde(default)]
    pub required_scope: String,

    /// Scope category accepted next to the match in place of whitespace
    #[serde(default)]
    pub good_break_scope: String,
}

impl SpacerConfig {
    pub fn new(pattern: &str, required_scope: &str, good_break_scope: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            required_scope: required_scope.to_string(),
            good_break_scope: good_break_scope.to_string(),
        }
    }
}

/// Opening and closing patterns of a bracket pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketPairConfig {
    pub open: String,
    pub close: String,
}

impl BracketPairConfig {
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
        }
    }
}

/// How a closing bracket picks the opener it matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketStrategy {
    /// Nearest open bracket on the same row or in the same column
    #[default]
    Heuristic,
    /// Most recent open bracket
    Strict,
}

impl std::str::FromStr for BracketStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heuristic" => Ok(BracketStrategy::Heuristic),
            "strict" | "lifo" => Ok(BracketStrategy::Strict),
            _ => Err(format!("Unknown bracket strategy: {}", s)),
        }
    }
}

/// Line-count limits above which a rule family is skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub casing: Option<usize>,
    pub spacing: Option<usize>,
    pub bracket_match: Option<usize>,
    pub notation: Option<usize>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            casing: None,
            spacing: Some(2500),
            bracket_match: None,
            notation: None,
        }
    }
}

impl Thresholds {
    /// Maximum line count for a rule family, if it is limited
    pub fn max_lines(&self, kind: RuleKind) -> Option<usize> {
        match kind {
            RuleKind::Casing => self.casing,
            RuleKind::Spacing => self.spacing,
            RuleKind::BracketMatch => self.bracket_match,
            RuleKind::Notation => self.notation,
        }
    }

    pub fn set_max_lines(&mut self, kind: RuleKind, max_lines: Option<usize>) {
        let slot = match kind {
            RuleKind::Casing => &mut self.casing,
            RuleKind::Spacing => &mut self.spacing,
            RuleKind::BracketMatch => &mut self.bracket_match,
            RuleKind::Notation => &mut self.notation,
        };
        *slot = max_lines;
    }
}

/// Serializable rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Keywords and constants with their canonical capitalization
    pub keywords: Vec<String>,

    /// Spacing requirements
    pub spacers: Vec<SpacerConfig>,

    /// Bracket pairs
    pub brackets: Vec<BracketPairConfig>,

    /// Bracket matching strategy
    pub bracket_strategy: BracketStrategy,

    /// Pattern for sigil-prefixed variable names
    pub notation_pattern: String,

    /// Size limits
    pub thresholds: Thresholds,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            keywords: vec![
                "eoi".to_string(),
                "NullObject".to_string(),
                "JSONObject".to_string(),
            ],
            spacers: vec![
                SpacerConfig::new(r"[\+=]", "", "aseOperator"),
                SpacerConfig::new(r"&&|\|\|", "", "aseOperator"),
            ],
            brackets: vec![
                BracketPairConfig::new(r"\(", r"\)"),
                BracketPairConfig::new(r"\[", r"\]"),
                BracketPairConfig::new(r"\{", r"\}"),
            ],
            bracket_strategy: BracketStrategy::default(),
            notation_pattern: r"\$[A-Za-z0-9]+".to_string(),
            thresholds: Thresholds::default(),
        }
    }
}

/// A keyword with its case-insensitive whole-word pattern
#[derive(Debug, Clone)]
pub struct Keyword {
    pub text: String,
    pub pattern: Pattern,
}

/// A compiled spacing requirement
#[derive(Debug, Clone)]
pub struct Spacer {
    pub pattern: Pattern,
    pub required_scope: String,
    pub good_break_scope: String,
}

/// A compiled bracket pair
///
/// `pattern` matches either side in one pass, with the named groups `open`
/// and `close` telling them apart.
#[derive(Debug, Clone)]
pub struct BracketPair {
    pub pattern: Pattern,
}

/// Validated, immutable rule table
#[derive(Debug, Clone)]
pub struct RuleTable {
    pub keywords: Vec<Keyword>,
    pub spacers: Vec<Spacer>,
    pub brackets: Vec<BracketPair>,
    pub bracket_strategy: BracketStrategy,
    pub notation: Pattern,
    pub thresholds: Thresholds,
}

impl RuleTable {
    /// Compile and validate a table
    pub fn new(config: &TableConfig) -> Result<Self, LintError> {
        let keywords = config
            .keywords
            .iter()
            .enumerate()
            .map(|(i, keyword)| {
                if keyword.trim().is_empty() {
                    return Err(LintError::InvalidTable(format!("keyword #{} is empty", i)));
                }
                let source = format!(r"\b({})\b", regex::escape(keyword));
                Ok(Keyword {
                    text: keyword.clone(),
                    pattern: Pattern::case_insensitive(&source, &format!("keyword #{}", i))?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let spacers = config
            .spacers
            .iter()
            .enumerate()
            .map(|(i, spacer)| {
                let origin = format!("spacer #{}", i);
                check_non_empty(&spacer.pattern, &origin)?;
                Ok(Spacer {
                    pattern: Pattern::new(&spacer.pattern, &origin)?,
                    required_scope: spacer.required_scope.clone(),
                    good_break_scope: spacer.good_break_scope.clone(),
                })
            })
            .collect::<Result<Vec<_>, LintError>>()?;

        let brackets = config
            .brackets
            .iter()
            .enumerate()
            .map(|(i, pair)| {
                let origin = format!("bracket pair #{}", i);
                check_non_empty(&pair.open, &origin)?;
                check_non_empty(&pair.close, &origin)?;
                // Compile each side alone first so errors point at the culprit
                Pattern::new(&pair.open, &origin)?;
                Pattern::new(&pair.close, &origin)?;
                let combined = format!("(?P<open>{})|(?P<close>{})", pair.open, pair.close);
                Ok(BracketPair {
                    pattern: Pattern::new(&combined, &origin)?,
                })
            })
            .collect::<Result<Vec<_>, LintError>>()?;

        check_non_empty(&config.notation_pattern, "notation pattern")?;
        let notation = Pattern::new(&config.notation_pattern, "notation pattern")?;

        Ok(Self {
            keywords,
            spacers,
            brackets,
            bracket_strategy: config.bracket_strategy,
            notation,
            thresholds: config.thresholds.clone(),
        })
    }

    /// The built-in ASE table
    pub fn ase() -> Result<Self, LintError> {
        Self::new(&TableConfig::default())
    }

    /// Keyword texts, e.g. for a classifier
    pub fn keyword_texts(&self) -> Vec<&str> {
        self.keywords.iter().map(|k| k.text.as_str()).collect()
    }
}

fn check_non_empty(pattern: &str, origin: &str) -> Result<(), LintError> {
    if pattern.is_empty() {
        Err(LintError::InvalidTable(format!("{} has an empty pattern", origin)))
    } else {
        Ok(())
    }
}
