//! Interactive question/answer loop.

use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

pub const TITLE: &str = "E-Commerce Chatbot";
pub const WELCOME: &str = "Welcome to our e-commerce assistant! Ask me anything about our products, orders, or policies.";
pub const HINT: &str = "Type your query and press Enter. Examples: 'What is your return policy?' or 'How do I track my order?'";

/// Anything that turns one question into one answer.
pub trait Responder {
    fn respond(&self, query: &str) -> String;
}

impl<R: Responder + ?Sized> Responder for &R {
    fn respond(&self, query: &str) -> String {
        (**self).respond(query)
    }
}

impl<R: Responder + ?Sized> Responder for std::sync::Arc<R> {
    fn respond(&self, query: &str) -> String {
        (**self).respond(query)
    }
}

/// Prompt, read a line, print the answer, repeat until `exit`, `quit` or EOF.
pub struct ChatLoop<R> {
    responder: R,
    prompt: String,
}

impl<R: Responder> ChatLoop<R> {
    pub fn new(responder: R) -> Self {
        Self {
            responder,
            prompt: "> ".to_string(),
        }
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns the number of questions answered.
    pub fn run<I: BufRead, O: Write>(&self, mut input: I, mut output: O) -> crate::Result<usize> {
        writeln!(output, "{TITLE}")?;
        writeln!(output, "{WELCOME}")?;
        writeln!(output, "{HINT}")?;
        writeln!(output, "Type 'exit' to quit.\n")?;

        let mut answered = 0;
        let mut buf = Vec::new();

        loop {
            write!(output, "{}", self.prompt)?;
            output.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                debug!("Input closed");
                break;
            }

            // Invalid UTF-8 is replaced and later dropped by normalization.
            let line = String::from_utf8_lossy(&buf);
            if matches!(line, std::borrow::Cow::Owned(_)) {
                warn!("Input line was not valid UTF-8, replacing invalid bytes");
            }

            let query = line.trim();
            if query.is_empty() {
                continue;
            }
            if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
                break;
            }

            let response = self.responder.respond(query);
            writeln!(output, "\nChatbot: {response}\n")?;
            answered += 1;
        }

        info!("Chat session ended after {answered} questions");
        Ok(answered)
    }
}
