use faqbot_config::{Config, KnowledgeSource};
use faqbot_core::FaqMatcher;
use std::path::PathBuf;
use tracing::info;

use super::load_config;

/// Strategy for displaying configuration information.
///
/// This strategy outputs:
/// - Config file location
/// - Matcher threshold and fallback reply
/// - Knowledge base source and size
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = Option<PathBuf>;

    fn execute(&self, config_path: Self::Input) -> anyhow::Result<()> {
        let config = load_config(config_path.as_deref())?;

        println!("=== faqbot Configuration ===\n");

        println!("Config File:");
        match config.path() {
            Some(path) => println!("  Path: {}", path.display()),
            None => match Config::default_path() {
                Ok(path) => println!("  Path: {} (not created, using defaults)", path.display()),
                Err(e) => println!("  Path: unavailable ({e})"),
            },
        }
        println!();

        println!("Matcher:");
        println!("  Threshold: {}", config.matcher.threshold);
        println!("  Fallback: {}", truncate(&config.matcher.fallback, 60));
        println!();

        println!("Knowledge Base:");
        let source = config.knowledge_source();
        println!("  Source: {source}");

        info!("Loading knowledge base");
        match config.knowledge_base() {
            Ok(kb) => {
                let matcher = FaqMatcher::new(kb, config.matcher.clone());
                let kb = matcher.knowledge_base();
                println!("  Status: Loaded");
                println!("  Categories: {}", kb.category_count());
                println!("  Questions: {}", kb.question_count());
                println!("  Vocabulary: {} terms", matcher.vectorizer().vocabulary_size());
            }
            Err(e) => {
                println!("  Status: Failed to load");
                println!("  Error: {e:#}");
            }
        }
        if let KnowledgeSource::File(path) = &source {
            if !path.exists() {
                println!("  Hint: run 'faqbot init' or fix knowledge_base.path");
            }
        }

        Ok(())
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}
