use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::completion::CompletionIndex;
use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;

/// Set to run the shell non-interactively over stdin lines.
pub const SCRIPT_ENV_VAR: &str = "HOME_LEDGER_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV_VAR).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    let mut source = LineSource::open(mode)?;
    tracing::debug!(?mode, "shell started");
    run(&mut context, &mut source)
}

fn run(context: &mut ShellContext, source: &mut LineSource) -> Result<(), CliError> {
    while context.running {
        match source.next_line(context)? {
            Input::Line(line) => {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                match handle_line(context, line) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Input::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Input::Closed => {
                if context.mode == CliMode::Interactive {
                    output::info("Exiting shell.");
                }
                break;
            }
        }
    }
    tracing::debug!(last = ?context.last_command, "shell stopped");
    Ok(())
}

/// Tokenizes one line and runs the command it names.
pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = shell_words::split(line)
        .map_err(|err| CommandError::InvalidArguments(format!("cannot read line: {err}")))?;
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.to_string());

    let control = context.dispatch(&raw.to_lowercase(), raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

enum Input {
    Line(String),
    Interrupted,
    Closed,
}

/// Where command lines come from: a line editor or piped stdin.
enum LineSource {
    Interactive(Box<Editor<LedgerHelper, DefaultHistory>>),
    Script(io::Lines<io::StdinLock<'static>>),
}

impl LineSource {
    fn open(mode: CliMode) -> Result<Self, CliError> {
        match mode {
            CliMode::Script => Ok(LineSource::Script(io::stdin().lock().lines())),
            CliMode::Interactive => {
                let mut editor = Editor::<LedgerHelper, DefaultHistory>::new()?;
                editor.set_helper(Some(LedgerHelper::default()));
                editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
                Ok(LineSource::Interactive(Box::new(editor)))
            }
        }
    }

    fn next_line(&mut self, context: &ShellContext) -> Result<Input, CliError> {
        match self {
            LineSource::Script(lines) => match lines.next() {
                Some(line) => Ok(Input::Line(line?)),
                None => Ok(Input::Closed),
            },
            LineSource::Interactive(editor) => {
                if let Some(helper) = editor.helper_mut() {
                    helper.index = CompletionIndex::from_context(context);
                }
                match editor.readline(&context.prompt()) {
                    Ok(line) => {
                        if !line.trim().is_empty() {
                            editor.add_history_entry(line.trim()).ok();
                        }
                        Ok(Input::Line(line))
                    }
                    Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
                    Err(ReadlineError::Eof) => Ok(Input::Closed),
                    Err(err) => Err(err.into()),
                }
            }
        }
    }
}

#[derive(Default)]
struct LedgerHelper {
    index: CompletionIndex,
}

impl Helper for LedgerHelper {}

impl Completer for LedgerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words, partial) = completion_target(&line[..pos]);
        let candidates = self
            .index
            .candidates(&words, partial)
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for LedgerHelper {
    type Hint = String;
}

impl Highlighter for LedgerHelper {}

impl Validator for LedgerHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        // An open quote continues a multi-word category or comment on the next line.
        if shell_words::split(ctx.input()).is_err() {
            return Ok(ValidationResult::Incomplete);
        }
        Ok(ValidationResult::Valid(None))
    }
}

/// Splits the text before the cursor into finished words and the word being typed.
fn completion_target(prefix: &str) -> (usize, Vec<String>, &str) {
    let start = prefix
        .rfind(char::is_whitespace)
        .map(|idx| idx + 1)
        .unwrap_or(0);
    let head = &prefix[..start];
    let words = shell_words::split(head)
        .unwrap_or_else(|_| head.split_whitespace().map(str::to_string).collect());
    (start, words, &prefix[start..])
}
