use faqbot_core::{ChatLoop, FaqMatcher, Match, MatchOutcome};
use std::path::PathBuf;
use tracing::info;

use super::init_common_components;

/// Input parameters for the Ask command strategy.
#[derive(Debug, Clone)]
pub struct AskInput {
    /// Optional config file override
    pub config_path: Option<PathBuf>,
    /// Optional single message to answer (non-interactive mode)
    pub message: Option<String>,
    /// Print ranked candidates after the answer
    pub explain: bool,
    /// Number of candidates to print with `explain`
    pub top: usize,
}

/// Strategy for answering questions.
///
/// - Loads configuration and the knowledge base
/// - Fits the matcher once
/// - Answers a single message, or runs the interactive loop
#[derive(Debug, Clone, Copy)]
pub struct AskStrategy;

impl super::CommandStrategy for AskStrategy {
    type Input = AskInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components(input.config_path)?;
        if let Some(path) = common.config.path() {
            info!("Using config {}", path.display());
        }
        let matcher = common.matcher;

        if let Some(msg) = input.message {
            if input.explain {
                let (outcome, ranked) = matcher.explain(&msg, input.top);
                println!("{}", matcher.answer_for(&outcome));
                print_explanation(&matcher, &outcome, &ranked);
            } else {
                println!("{}", matcher.answer(&msg));
            }
        } else {
            let stdin = std::io::stdin();
            let answered = ChatLoop::new(&matcher).run(stdin.lock(), std::io::stdout())?;
            info!("Answered {answered} questions");
        }

        Ok(())
    }
}

fn print_explanation(matcher: &FaqMatcher, outcome: &MatchOutcome<'_>, ranked: &[Match<'_>]) {
    println!();
    match outcome {
        MatchOutcome::Matched(m) => println!(
            "Matched [{}] \"{}\" (score {:.3}, threshold {})",
            m.category,
            m.question,
            m.score,
            matcher.config().threshold
        ),
        MatchOutcome::NoConfidentMatch { best_score } => println!(
            "No confident match (best score {}, threshold {})",
            best_score.map_or_else(|| "n/a".to_string(), |s| format!("{s:.3}")),
            matcher.config().threshold
        ),
    }

    if ranked.is_empty() {
        println!("No question shares a term with the query.");
        return;
    }

    println!("Top candidates:");
    for (position, candidate) in ranked.iter().enumerate() {
        println!(
            "  {}. {:.3}  [{}] {}",
            position + 1,
            candidate.score,
            candidate.category,
            candidate.question
        );
    }
}
