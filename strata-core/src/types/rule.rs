//! User-authored correlation rules.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    ApiToDb,
    IacToConfig,
    Ignore,
    Generic,
}

impl RuleType {
    /// Relationship label carried by edges this rule type produces.
    pub fn relationship(&self) -> &'static str {
        match self {
            Self::ApiToDb => "api_to_db",
            Self::IacToConfig => "iac_to_config",
            Self::Ignore => "ignored",
            Self::Generic => "user_defined",
        }
    }

    pub fn is_ignore(&self) -> bool {
        matches!(self, Self::Ignore)
    }
}

/// One user rule: an explicit link or an ignore directive.
///
/// `source`/`target` tokens match exactly, by substring, or as a glob when
/// they contain `*`/`?`. Non-ignore rules carry fixed confidence 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationRule {
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl CorrelationRule {
    pub fn confidence(&self) -> f32 {
        if self.rule_type.is_ignore() {
            0.0
        } else {
            1.0
        }
    }
}
