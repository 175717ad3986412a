//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input type, so
//! dispatch in `main` is resolved at compile time.

use faqbot_config::Config;
use faqbot_core::FaqMatcher;
use std::path::{Path, PathBuf};
use tracing::info;

mod ask;
mod info;
mod init;
mod list;
mod version;

pub use ask::{AskInput, AskStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use list::ListStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust,ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Explicit `--config` path, otherwise `~/faqbot/config.json` or defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load_or_default(),
    }
}

/// Shared setup: config, knowledge base and a fitted matcher.
struct CommonComponents {
    config: Config,
    matcher: FaqMatcher,
}

fn init_common_components(config_path: Option<PathBuf>) -> anyhow::Result<CommonComponents> {
    let config = load_config(config_path.as_deref())?;
    let knowledge_base = config.knowledge_base()?;

    info!(
        "Knowledge base: {} ({} questions)",
        config.knowledge_source(),
        knowledge_base.question_count()
    );

    let matcher = FaqMatcher::new(knowledge_base, config.matcher.clone());
    Ok(CommonComponents { config, matcher })
}
