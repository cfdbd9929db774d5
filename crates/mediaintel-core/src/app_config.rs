use serde::{Deserialize, Serialize};

/// Tone selector for the campaign summary prompt.
///
/// Only the opening paragraph of the prompt changes between personas; the
/// data points handed to the model are identical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Internal team member: direct actions, operational wording.
    #[default]
    Professional,
    /// Outside consultant presenting to a client: formal, outcome oriented.
    Consultant,
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Persona::Professional => write!(f, "professional"),
            Persona::Consultant => write!(f, "consultant"),
        }
    }
}

impl std::str::FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional" => Ok(Persona::Professional),
            "consultant" => Ok(Persona::Consultant),
            other => Err(format!(
                "unknown persona '{other}' (expected 'professional' or 'consultant')"
            )),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub llm_timeout_secs: u64,
    pub drop_incomplete_rows: bool,
    pub persona: Persona,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("drop_incomplete_rows", &self.drop_incomplete_rows)
            .field("persona", &self.persona)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_round_trips_through_display_and_from_str() {
        for persona in [Persona::Professional, Persona::Consultant] {
            let parsed: Persona = persona.to_string().parse().unwrap();
            assert_eq!(parsed, persona);
        }
    }

    #[test]
    fn persona_rejects_unknown_value() {
        let err = "pirate".parse::<Persona>().unwrap_err();
        assert!(err.contains("pirate"), "unexpected error: {err}");
    }

    #[test]
    fn persona_serializes_lowercase() {
        let json = serde_json::to_string(&Persona::Consultant).unwrap();
        assert_eq!(json, "\"consultant\"");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig {
            log_level: "info".to_string(),
            gemini_api_key: Some("super-secret".to_string()),
            gemini_model: "gemini-2.0-flash".to_string(),
            gemini_base_url: "http://localhost".to_string(),
            llm_timeout_secs: 30,
            drop_incomplete_rows: true,
            persona: Persona::Professional,
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
