//! Lookup from typed words to command handlers, with the argument shape each
//! command expects so the shell can complete it.

use std::collections::BTreeMap;

use strsim::levenshtein;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

const SUGGESTION_DISTANCE: usize = 3;

/// What a positional argument refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// One of a fixed set of sub-actions.
    Action(&'static [&'static str]),
    LedgerKind,
    LoanKind,
    /// A category of the ledger kind named earlier on the line (expense if none).
    Category,
    RecordId,
    LoanId,
    Command,
    Text,
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
    pub aliases: &'static [&'static str],
    pub args: &'static [ArgKind],
}

impl CommandEntry {
    pub fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
            aliases: &[],
            args: &[],
        }
    }

    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn args(mut self, args: &'static [ArgKind]) -> Self {
        self.args = args;
        self
    }

    /// Shape of the argument at `position` (0 is the first word after the name).
    pub fn arg(&self, position: usize) -> ArgKind {
        self.args.get(position).copied().unwrap_or(ArgKind::Text)
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    words: BTreeMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry` under its name and aliases. Words already taken keep their
    /// first owner.
    pub fn register(&mut self, entry: CommandEntry) {
        let index = self.entries.len();
        for word in std::iter::once(entry.name).chain(entry.aliases.iter().copied()) {
            if self.words.contains_key(word) {
                tracing::debug!(word, "command word already registered");
                continue;
            }
            self.words.insert(word, index);
        }
        self.entries.push(entry);
    }

    pub fn resolve(&self, word: &str) -> Option<&CommandEntry> {
        self.words.get(word).map(|index| &self.entries[*index])
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.iter()
    }

    /// Every word that dispatches to a command, aliases included, sorted.
    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.words.keys().copied()
    }

    /// Closest known word to a mistyped one, if any is near enough.
    pub fn closest(&self, input: &str) -> Option<&'static str> {
        let input = input.to_lowercase();
        self.words()
            .map(|word| (levenshtein(word, &input), word))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, word)| word)
    }
}
