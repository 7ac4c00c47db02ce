use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which text generator produces summaries and answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Deterministic local text. Also the fallback for every external failure.
    #[default]
    Placeholder,
    External,
}

impl LlmProvider {
    /// Maps a configured selector to a provider. Unknown values never fail:
    /// they are logged and treated as `Placeholder`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "placeholder" => LlmProvider::Placeholder,
            "external" => LlmProvider::External,
            _ => {
                warn!("invalid llm provider value {raw:?}, falling back to placeholder");
                LlmProvider::Placeholder
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LlmProvider::Placeholder => "placeholder",
            LlmProvider::External => "external",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!(LlmProvider::parse("placeholder"), LlmProvider::Placeholder);
        assert_eq!(LlmProvider::parse("external"), LlmProvider::External);
        assert_eq!(LlmProvider::parse(" External "), LlmProvider::External);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_placeholder() {
        assert_eq!(LlmProvider::parse("openai"), LlmProvider::Placeholder);
        assert_eq!(LlmProvider::parse(""), LlmProvider::Placeholder);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&LlmProvider::External).unwrap(),
            r#""external""#
        );
        let parsed: LlmProvider = serde_json::from_str(r#""placeholder""#).unwrap();
        assert_eq!(parsed, LlmProvider::Placeholder);
    }

    #[test]
    fn test_as_str_round_trips_through_parse() {
        for provider in [LlmProvider::Placeholder, LlmProvider::External] {
            assert_eq!(LlmProvider::parse(provider.as_str()), provider);
        }
    }
}
