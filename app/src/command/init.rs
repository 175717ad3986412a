use faqbot_config::Config;

/// Strategy for initializing the configuration.
///
/// Creates `~/faqbot/config.json` and a starter `knowledge_base.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        Config::create_config()
    }
}
