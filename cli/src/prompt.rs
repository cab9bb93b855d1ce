#![deny(missing_docs)]

//! # Prompting
//!
//! Line-based user input behind an injectable provider, and the retry loop that
//! keeps asking until a value validates.

use oas_paths_core::{AppError, AppResult};
use std::io::{self, BufRead, StdinLock, Write};

/// Source of interactive input.
///
/// Abstracted so commands can be driven by scripted input in tests.
pub trait InputProvider {
    /// Shows `prompt` and returns the next line without its line terminator.
    fn read_line(&mut self, prompt: &str) -> AppResult<String>;
}

/// Provider reading from the process's stdin, prompting on stderr.
pub struct StdinProvider {
    reader: Option<StdinLock<'static>>,
}

impl StdinProvider {
    /// Locks stdin for the lifetime of the provider.
    pub fn open() -> Self {
        Self {
            reader: Some(io::stdin().lock()),
        }
    }

    /// Releases stdin. Further reads fail.
    pub fn close(&mut self) {
        self.reader = None;
    }
}

impl InputProvider for StdinProvider {
    fn read_line(&mut self, prompt: &str) -> AppResult<String> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| AppError::InvalidInput("input stream is closed".to_string()))?;

        let mut stderr = io::stderr();
        write!(stderr, "{}: ", prompt)?;
        stderr.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(AppError::InvalidInput(format!(
                "no input received for '{}'",
                prompt
            )));
        }

        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// States of a single prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState<T> {
    /// Waiting for the next line.
    AwaitingInput,
    /// Accepted; terminal.
    Valid(T),
    /// Rejected with a reason; goes back to `AwaitingInput`.
    Invalid(String),
}

/// Asks for `prompt` until `validate` accepts the (trimmed) answer.
///
/// Only a failing provider (e.g. closed stdin) ends the loop with an error.
pub fn prompt_until_valid<T, P, F>(input: &mut P, prompt: &str, validate: F) -> AppResult<T>
where
    P: InputProvider + ?Sized,
    F: Fn(&str) -> Result<T, String>,
{
    let mut state = PromptState::AwaitingInput;
    loop {
        state = match state {
            PromptState::AwaitingInput => {
                let line = input.read_line(prompt)?;
                match validate(line.trim()) {
                    Ok(value) => PromptState::Valid(value),
                    Err(reason) => PromptState::Invalid(reason),
                }
            }
            PromptState::Invalid(reason) => {
                tracing::debug!(prompt, %reason, "rejected input");
                eprintln!("  {}", reason);
                PromptState::AwaitingInput
            }
            PromptState::Valid(value) => return Ok(value),
        };
    }
}

/// Accepts any non-blank answer.
pub fn non_empty(input: &str) -> Result<String, String> {
    if input.is_empty() {
        Err("a value is required".to_string())
    } else {
        Ok(input.to_string())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Provider replaying canned answers and recording the prompts shown.
    #[derive(Default)]
    pub struct ScriptedInput {
        answers: VecDeque<String>,
        pub prompts: Vec<String>,
    }

    impl ScriptedInput {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                prompts: Vec::new(),
            }
        }
    }

    impl InputProvider for ScriptedInput {
        fn read_line(&mut self, prompt: &str) -> AppResult<String> {
            self.prompts.push(prompt.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| AppError::InvalidInput("script exhausted".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedInput;
    use super::*;
    use oas_paths_core::{validate_method, validate_path, HttpMethod};

    #[test]
    fn test_retries_until_valid() {
        let mut input = ScriptedInput::new(&["fetch", "", "  PATCH  "]);
        let method = prompt_until_valid(&mut input, "Method", validate_method).unwrap();

        assert_eq!(method, HttpMethod::Patch);
        assert_eq!(input.prompts.len(), 3);
    }

    #[test]
    fn test_path_prompt_rejects_colons() {
        let mut input = ScriptedInput::new(&["/users/:id", "users", "/users/{id}"]);
        let path = prompt_until_valid(&mut input, "Path", |s| {
            validate_path(s).map(|_| s.to_string())
        })
        .unwrap();

        assert_eq!(path, "/users/{id}");
        assert_eq!(input.prompts.len(), 3);
    }

    #[test]
    fn test_exhausted_input_is_an_error() {
        let mut input = ScriptedInput::new(&["", ""]);
        let err = prompt_until_valid(&mut input, "Title", non_empty).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_closed_stdin_provider_fails() {
        let mut provider = StdinProvider::open();
        provider.close();
        assert!(provider.read_line("anything").is_err());
    }
}
