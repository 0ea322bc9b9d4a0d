use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{ArgKind, CommandEntry};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help)
            .args(&[ArgKind::Command]),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit).aliases(&["quit"]),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let name = name.to_lowercase();
        return match context.registry.resolve(&name) {
            Some(entry) => {
                output::section(entry.name);
                output::line(format!("  {}", entry.description));
                output::line(format!("  usage: {}", entry.usage));
                if !entry.aliases.is_empty() {
                    output::line(format!("  aliases: {}", entry.aliases.join(", ")));
                }
                Ok(())
            }
            None => Err(CommandError::InvalidArguments(format!(
                "no help for unknown command `{name}`"
            ))),
        };
    }

    output::section("Commands");
    for entry in context.registry.entries() {
        output::line(format!("  {:<10} {}", entry.name, entry.description));
    }
    io::print_info("Type `help <command>` for usage.");
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
