use std::path::PathBuf;

use super::load_config;

/// Strategy for printing the knowledge base, category by category.
#[derive(Debug, Clone, Copy)]
pub struct ListStrategy;

impl super::CommandStrategy for ListStrategy {
    type Input = Option<PathBuf>;

    fn execute(&self, config_path: Self::Input) -> anyhow::Result<()> {
        let config = load_config(config_path.as_deref())?;
        let knowledge_base = config.knowledge_base()?;

        for (name, entry) in knowledge_base.categories() {
            println!("{name} ({} questions)", entry.len());
            for question in entry.questions() {
                println!("  - {question}");
            }
            println!();
        }

        Ok(())
    }
}
