use crate::{
    errors::NoteseekError,
    history::DEFAULT_HISTORY_LIMIT,
    search::{MatchMode, SnippetConfig, SortKey, Weights},
    store::{BackendLocal, KeyValueStore},
    suggest::DEFAULT_SUGGESTION_LIMIT,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub weights: Weights,
    /// `any` or `all`, see [`MatchMode`].
    #[serde(default)]
    pub match_mode: MatchMode,
    #[serde(default)]
    pub snippet: SnippetConfig,
    #[serde(default)]
    pub default_sort: SortKey,
    #[serde(default = "history_limit")]
    pub history_limit: usize,
    #[serde(default = "suggestion_limit")]
    pub suggestion_limit: usize,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: String,
}

fn history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            match_mode: MatchMode::default(),
            snippet: SnippetConfig::default(),
            default_sort: SortKey::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            base_path: String::new(),
        }
    }
}

impl Config {
    fn validate(&self) -> Result<(), NoteseekError> {
        for (name, weight) in self.weights.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(NoteseekError::Config(format!(
                    "weights.{name} must be a non-negative number, got {weight}"
                )));
            }
        }

        // a matched field has to add something or matches could score 0
        for (name, weight) in [
            ("title", self.weights.title),
            ("content", self.weights.content),
            ("tag", self.weights.tag),
        ] {
            if weight <= 0.0 {
                return Err(NoteseekError::Config(format!(
                    "weights.{name} must be greater than 0, got {weight}"
                )));
            }
        }

        if self.snippet.max_snippets == 0 {
            return Err(NoteseekError::Config(
                "snippet.max_snippets must be greater than 0".to_string(),
            ));
        }

        if self.history_limit == 0 {
            return Err(NoteseekError::Config(
                "history_limit must be greater than 0".to_string(),
            ));
        }

        if self.suggestion_limit == 0 {
            return Err(NoteseekError::Config(
                "suggestion_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Load `config.yaml` from `base_path`, writing defaults when missing.
    pub fn load_with(base_path: &str) -> Result<Self, NoteseekError> {
        let store = BackendLocal::new(base_path)?;

        let config_str = match store.get(CONFIG_FILE)? {
            Some(data) => String::from_utf8(data)
                .map_err(|_| NoteseekError::Config("config file is not valid utf8".to_string()))?,
            None => {
                log::info!("Creating new config at {base_path}/{CONFIG_FILE}");
                let defaults = serde_yml::to_string(&Self::default())?;
                store.set(CONFIG_FILE, defaults.as_bytes())?;
                defaults
            }
        };

        let mut config: Self = serde_yml::from_str(&config_str)?;
        config.base_path = base_path.to_string();

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<(), NoteseekError> {
        let store = BackendLocal::new(&self.base_path)?;
        let config_str = serde_yml::to_string(&self)?;
        store.set(CONFIG_FILE, config_str.as_bytes())?;
        Ok(())
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}
