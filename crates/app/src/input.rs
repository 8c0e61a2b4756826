use thiserror::Error;

use tutor_core::model::{FormulaDraft, FormulaToken, ModuleId, Question, QuestionKind};

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Modules,
    Module(ModuleId),
    Skip,
    Retry,
    Reset,
    Status,
    Quit,
    Answer(String),
    Empty,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command: {0} (try :help)")]
    UnknownCommand(String),
    #[error(":module requires an id")]
    MissingModuleId,
    #[error("invalid module id: {0}")]
    InvalidModuleId(String),
    #[error("option {picked} does not exist (choose 1-{available})")]
    OptionOutOfRange { picked: usize, available: usize },
    #[error("unknown formula token: {0}")]
    UnknownFormulaToken(String),
}

/// Parse a prompt line. Lines starting with `:` are commands; anything else is an answer.
///
/// # Errors
///
/// Returns `InputError` for unknown commands or a bad module id.
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Answer(line.to_string()));
    };

    let mut words = rest.split_whitespace();
    let command = match words.next().unwrap_or_default() {
        "h" | "help" => Command::Help,
        "modules" | "ls" => Command::Modules,
        "m" | "module" => {
            let raw = words.next().ok_or(InputError::MissingModuleId)?;
            let id = raw
                .parse::<ModuleId>()
                .map_err(|_| InputError::InvalidModuleId(raw.to_string()))?;
            Command::Module(id)
        }
        "s" | "skip" => Command::Skip,
        "retry" => Command::Retry,
        "reset" => Command::Reset,
        "status" => Command::Status,
        "q" | "quit" | "exit" => Command::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(command)
}

/// Turn raw answer text into what gets submitted for `question`.
///
/// Multiple choice accepts a 1-based option number; formulas are built from
/// palette tokens, where `<` removes the previous token and `clear` starts over.
///
/// # Errors
///
/// Returns `InputError` for an option number out of range or an unknown formula token.
pub fn resolve_answer(question: &Question, input: &str) -> Result<String, InputError> {
    let input = input.trim();
    match &question.kind {
        QuestionKind::MultipleChoice { options, .. } => match input.parse::<usize>() {
            Ok(picked) => picked
                .checked_sub(1)
                .and_then(|i| options.get(i))
                .cloned()
                .ok_or(InputError::OptionOutOfRange {
                    picked,
                    available: options.len(),
                }),
            Err(_) => Ok(input.to_string()),
        },
        QuestionKind::Formula => {
            let mut draft = FormulaDraft::new();
            for word in input.split_whitespace() {
                match word {
                    "<" => {
                        draft.backspace();
                    }
                    "clear" => draft.clear(),
                    _ => {
                        let token = FormulaToken::parse(word)
                            .ok_or_else(|| InputError::UnknownFormulaToken(word.to_string()))?;
                        draft.push(token);
                    }
                }
            }
            Ok(draft.render())
        }
        QuestionKind::TextInput | QuestionKind::Calculation { .. } => Ok(input.to_string()),
    }
}
