use crate::metadata::{
    default_name, ExtensionMetadata, MetadataOverrides, DEFAULT_DESCRIPTION, DEFAULT_VERSION,
};
use inquire::{InquireError, Text};
use miette::Diagnostic;
use std::{
    io::{self, BufRead, IsTerminal, Write},
    path::Path,
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("Prompt was canceled by the user")]
    #[diagnostic(code(mkext::prompt::canceled), help("Nothing was created"))]
    Canceled,

    #[error("Unable to prompt user")]
    #[diagnostic(code(mkext::prompt::inquire))]
    Inquire(#[source] InquireError),

    #[error("Unable to read answer from standard input")]
    #[diagnostic(code(mkext::prompt::io))]
    Io(#[from] io::Error),
}
impl From<InquireError> for PromptError {
    fn from(error: InquireError) -> Self {
        match error {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => Self::Canceled,
            other => Self::Inquire(other),
        }
    }
}

/// A single metadata question.
#[derive(Debug, Clone)]
pub struct Question {
    pub message: &'static str,
    /// What a blank answer resolves to, shown to the user.
    pub default_hint: String,
}

/// Something that can put a question to the user and read back a raw answer.
pub trait Ask {
    fn note(&mut self, text: &str) -> Result<(), PromptError>;
    fn ask(&mut self, question: &Question) -> Result<String, PromptError>;
}

/// Interactive terminal prompts.
pub struct InquireAsk;
impl Ask for InquireAsk {
    fn note(&mut self, text: &str) -> Result<(), PromptError> {
        println!("{}", text);

        Ok(())
    }

    fn ask(&mut self, question: &Question) -> Result<String, PromptError> {
        let answer = Text::new(question.message)
            .with_placeholder(&question.default_hint)
            .with_help_message("Press enter to use the default")
            .prompt()?;

        Ok(answer)
    }
}

/// Line based prompts, used when stdin is not a terminal. EOF reads as a blank answer.
pub struct LineAsk<R, W> {
    reader: R,
    writer: W,
}
impl<R: BufRead, W: Write> LineAsk<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}
impl<R: BufRead, W: Write> Ask for LineAsk<R, W> {
    fn note(&mut self, text: &str) -> Result<(), PromptError> {
        writeln!(self.writer, "{}", text)?;

        Ok(())
    }

    fn ask(&mut self, question: &Question) -> Result<String, PromptError> {
        write!(
            self.writer,
            "{} (default: {}): ",
            question.message, question.default_hint
        )?;
        self.writer.flush()?;

        let mut line = String::new();
        self.reader.read_line(&mut line)?;

        Ok(line.trim().to_string())
    }
}

/// Picks the prompt implementation matching the current standard input.
pub fn stdin_asker() -> Box<dyn Ask> {
    if io::stdin().is_terminal() {
        log::debug!("stdin is a terminal, using interactive prompts");
        Box::new(InquireAsk)
    } else {
        log::debug!("stdin is not a terminal, reading answers line by line");
        Box::new(LineAsk::new(io::stdin().lock(), io::stdout()))
    }
}

/// Collects name, version and description, in that order.
///
/// Fields given in `overrides` are not asked for. With `accept_defaults` set, every remaining
/// field takes its default without prompting.
pub fn collect_metadata(
    target: &Path,
    overrides: &MetadataOverrides,
    asker: &mut dyn Ask,
) -> Result<ExtensionMetadata, PromptError> {
    let questions = [
        (
            overrides.name.as_deref(),
            Question {
                message: "Extension name",
                default_hint: default_name(target),
            },
        ),
        (
            overrides.version.as_deref(),
            Question {
                message: "Version",
                default_hint: DEFAULT_VERSION.to_string(),
            },
        ),
        (
            overrides.description.as_deref(),
            Question {
                message: "Description",
                default_hint: DEFAULT_DESCRIPTION.to_string(),
            },
        ),
    ];

    let must_ask = !overrides.accept_defaults && questions.iter().any(|(given, _)| given.is_none());
    if must_ask {
        asker.note("Enter the extension details (press enter to accept the default)")?;
    }

    let mut answers = Vec::with_capacity(questions.len());
    for (given, question) in &questions {
        let answer = match given {
            Some(value) => value.to_string(),
            None if overrides.accept_defaults => String::new(),
            None => asker.ask(question)?,
        };
        answers.push(answer);
    }

    Ok(ExtensionMetadata::from_answers(
        target,
        &answers[0],
        &answers[1],
        &answers[2],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask_with(input: &str, overrides: &MetadataOverrides) -> (ExtensionMetadata, String) {
        let mut output = Vec::new();
        let metadata = {
            let mut asker = LineAsk::new(Cursor::new(input.to_string()), &mut output);
            collect_metadata(Path::new("build/foo-ext"), overrides, &mut asker).unwrap()
        };

        (metadata, String::from_utf8(output).unwrap())
    }

    #[test]
    fn reads_answers_in_order() {
        let (metadata, output) = ask_with("MyExt\n2.3.1\nTest desc\n", &Default::default());

        assert_eq!(metadata.name, "MyExt");
        assert_eq!(metadata.version, "2.3.1");
        assert_eq!(metadata.description, "Test desc");

        let name_at = output.find("Extension name (default: foo-ext)").unwrap();
        let version_at = output.find("Version (default: 1.0.0)").unwrap();
        let description_at = output
            .find("Description (default: A sample browser extension)")
            .unwrap();
        assert!(name_at < version_at && version_at < description_at);
    }

    #[test]
    fn end_of_input_uses_defaults() {
        let (metadata, _) = ask_with("", &Default::default());

        assert_eq!(metadata.name, "foo-ext");
        assert_eq!(metadata.version, "1.0.0");
        assert_eq!(metadata.description, "A sample browser extension");
    }

    #[test]
    fn overrides_skip_their_questions() {
        let overrides = MetadataOverrides {
            version: Some("0.2.0".into()),
            ..Default::default()
        };
        let (metadata, output) = ask_with("Named\nDescribed\n", &overrides);

        assert_eq!(metadata.name, "Named");
        assert_eq!(metadata.version, "0.2.0");
        assert_eq!(metadata.description, "Described");
        assert!(!output.contains("Version (default"));
    }

    #[test]
    fn accept_defaults_never_prompts() {
        let overrides = MetadataOverrides {
            accept_defaults: true,
            ..Default::default()
        };
        let (metadata, output) = ask_with("ignored\n", &overrides);

        assert_eq!(metadata.name, "foo-ext");
        assert!(output.is_empty());
    }
}
