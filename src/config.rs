//! Configuration handling for the demo form

use crate::error::FormError;
use crate::state::{Field, Form, Validation};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "MASINTON_FORM_CONFIG";

/// One input of the configured form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    /// Label shown above the input; defaults to the name
    #[serde(default)]
    pub label: Option<String>,
    /// Mask the value when rendering
    #[serde(default)]
    pub secret: bool,
    /// Starting value
    #[serde(default)]
    pub initial: String,
}

impl FieldConfig {
    pub fn new(name: &str, label: &str, secret: bool) -> Self {
        Self {
            name: name.to_string(),
            label: Some(label.to_string()),
            secret,
            initial: String::new(),
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// A validation rule in its serialized form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    pub pattern: String,
    pub error_message: String,
}

/// Form layout and rules, loaded from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Title shown on the form border
    #[serde(default = "default_title")]
    pub title: String,
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<RuleConfig>>,
}

fn default_title() -> String {
    "Login".to_string()
}

impl Default for FormConfig {
    /// The login form: username and password, both required
    fn default() -> Self {
        let required = |label: &str| {
            vec![RuleConfig {
                pattern: r"\S".to_string(),
                error_message: format!("{label} must not be empty"),
            }]
        };
        Self {
            title: default_title(),
            fields: vec![
                FieldConfig::new("username", "Username", false),
                FieldConfig::new("password", "Password", true),
            ],
            rules: BTreeMap::from([
                ("username".to_string(), required("Username")),
                ("password".to_string(), required("Password")),
            ]),
        }
    }
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("io", "masinton", "masinton-form")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the config file, or the login form if there is none
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: FormConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::info!("Loaded form config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Build the initial form snapshot
    pub fn to_form(&self) -> Form {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), Field::new(f.initial.as_str())))
            .collect()
    }

    /// Compile the configured rules
    pub fn to_validation(&self) -> Result<Validation, FormError> {
        let mut validation = Validation::new();
        for (field, rules) in &self.rules {
            for rule in rules {
                validation.add_rule(field, &rule.pattern, rule.error_message.as_str())?;
            }
        }
        Ok(validation)
    }

    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }
}
