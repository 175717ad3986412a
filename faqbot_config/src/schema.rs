use anyhow::Context;
use faqbot_core::{KnowledgeBase, MatcherConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_DIR_NAME: &str = "faqbot";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const KB_FILE_NAME: &str = "knowledge_base.json";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,
    /// File this config was read from, used to resolve relative paths.
    #[serde(skip)]
    source: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct KnowledgeBaseConfig {
    /// JSON knowledge base file. The built-in catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Where the knowledge base comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeSource {
    BuiltIn,
    File(PathBuf),
}

impl fmt::Display for KnowledgeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltIn => f.write_str("built-in reference catalog"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR_NAME))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::default_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'faqbot init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    /// Load `~/faqbot/config.json`, or defaults when it does not exist.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::default_path()?;

        if !config_path.exists() {
            info!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        config.validate()?;
        config.source = Some(path.to_path_buf());

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let threshold = self.matcher.threshold;
        if !(0.0..1.0).contains(&threshold) {
            anyhow::bail!("matcher.threshold must be in [0, 1), got {threshold}");
        }
        if self.matcher.fallback.trim().is_empty() {
            anyhow::bail!("matcher.fallback must not be empty");
        }
        Ok(())
    }

    /// File the config was loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn knowledge_source(&self) -> KnowledgeSource {
        let Some(path) = &self.knowledge_base.path else {
            return KnowledgeSource::BuiltIn;
        };

        if path.is_relative() {
            if let Some(dir) = self.source.as_deref().and_then(Path::parent) {
                return KnowledgeSource::File(dir.join(path));
            }
        }

        KnowledgeSource::File(path.clone())
    }

    /// Load and validate the configured knowledge base.
    pub fn knowledge_base(&self) -> anyhow::Result<KnowledgeBase> {
        match self.knowledge_source() {
            KnowledgeSource::BuiltIn => Ok(KnowledgeBase::reference()),
            KnowledgeSource::File(path) => {
                let content = std::fs::read_to_string(&path).with_context(|| {
                    format!("Failed to read knowledge base {}", path.display())
                })?;
                let kb: KnowledgeBase = serde_json::from_str(&content)
                    .with_context(|| format!("Invalid knowledge base {}", path.display()))?;
                kb.ensure_not_empty()
                    .with_context(|| format!("Unusable knowledge base {}", path.display()))?;

                info!(
                    "Loaded {} questions in {} categories from {}",
                    kb.question_count(),
                    kb.category_count(),
                    path.display()
                );
                Ok(kb)
            }
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = Self::create_config_in(&config_dir)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!(
            "✅ Knowledge base written to: {}",
            config_dir.join(KB_FILE_NAME).display()
        );
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit {KB_FILE_NAME} to add your own questions and answers");
        println!("   2. Run 'faqbot ask' to start chatting");
        println!();
        println!("🔧 Configuration options:");
        println!("   - matcher.threshold: minimum similarity for an answer (default 0.2)");
        println!("   - matcher.fallback: reply used when nothing matches");
        println!("   - knowledge_base.path: JSON file with categories of questions and answers");
        println!();
        Ok(())
    }

    /// Write `config.json` and a starter knowledge base into `dir`.
    ///
    /// Refuses to overwrite an existing config. An existing knowledge base file is kept.
    pub fn create_config_in(dir: &Path) -> anyhow::Result<PathBuf> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let kb_path = dir.join(KB_FILE_NAME);
        if kb_path.exists() {
            info!("Keeping existing knowledge base at {}", kb_path.display());
        } else {
            let kb = serde_json::to_string_pretty(&KnowledgeBase::reference())?;
            std::fs::write(&kb_path, kb)?;
        }

        let config = Self {
            knowledge_base: KnowledgeBaseConfig {
                path: Some(PathBuf::from(KB_FILE_NAME)),
            },
            ..Self::default()
        };
        std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

        Ok(config_path)
    }
}
