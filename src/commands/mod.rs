//! Built-in prompt commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! argument splitting, and help generation. Anything that is not a command
//! is a question for the form.

mod context;
mod endpoint;
mod help;
mod quit;
mod status;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::FormConfig;
use crate::form::QuestionForm;

/// Session info available to commands during execution.
pub struct SessionInfo<'a> {
    pub config: &'a FormConfig,
    /// Where settings are persisted, or `"ephemeral"`.
    pub settings: &'a str,
    pub form: &'a QuestionForm,
}

/// A state change the prompt needs to apply after a command runs.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// Switch to a new solver endpoint.
    Endpoint(FormConfig),
}

/// What the prompt should do after a command runs.
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Not a command, pass input to the form.
    NotACommand,
    /// Command handled, keep prompting.
    Handled,
    /// Command produced a state change the prompt must apply.
    StateChanged(StateChange),
    /// Exit the prompt.
    Quit,
}

/// A prompt command. Implement this trait to add new commands.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/status"`.
    fn name(&self) -> &str;

    /// Alternative names, e.g. `&["/h", "/?"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    /// Run the command. `args` is whatever followed the name, trimmed.
    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult;
}

/// Holds registered commands.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(help::HelpCommand),
            Arc::new(status::StatusCommand),
            Arc::new(endpoint::EndpointCommand),
            Arc::new(context::ContextCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    /// Register an additional command.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    ///
    /// Bare-word aliases (`quit`, `exit`) only match when nothing follows
    /// them, so a question that merely starts with one still goes through.
    pub async fn dispatch(&self, input: &str, info: &SessionInfo<'_>) -> CommandResult {
        let input = input.trim();
        let (cmd, args) = match input.split_once(char::is_whitespace) {
            Some((cmd, args)) => (cmd, args.trim()),
            None => (input, ""),
        };
        let slash = cmd.starts_with('/');

        for command in &self.commands {
            let hit = cmd == command.name() || command.aliases().contains(&cmd);
            if !hit || (!slash && !args.is_empty()) {
                continue;
            }
            // /help is special: it needs the registry to list all commands
            if command.name() == "/help" {
                print!("{}", self.help_text());
                return CommandResult::Handled;
            }
            return command.execute(args, info).await;
        }

        if slash {
            println!("unknown command: {cmd}");
            println!("type /help for available commands");
            return CommandResult::Handled;
        }

        CommandResult::NotACommand
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out
    }

    /// All registered command names.
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases.
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = Vec::new();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn format_label(name: &str, aliases: &[&str]) -> String {
    if aliases.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, aliases.join(", "))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::LazyLock;

    static CONFIG: LazyLock<FormConfig> = LazyLock::new(FormConfig::default);
    static FORM: LazyLock<QuestionForm> = LazyLock::new(QuestionForm::new);

    pub(crate) fn test_info() -> SessionInfo<'static> {
        SessionInfo {
            config: &CONFIG,
            settings: "ephemeral",
            form: &FORM,
        }
    }

    #[test]
    fn all_builtins_registered() {
        let reg = CommandRegistry::new();
        let names = reg.names();
        for name in ["/help", "/status", "/endpoint", "/context", "/quit"] {
            assert!(names.contains(&name), "missing: {name}");
        }
    }

    #[test]
    fn no_duplicate_triggers() {
        let reg = CommandRegistry::new();
        let triggers = reg.all_triggers();
        let mut seen = Vec::new();
        for t in &triggers {
            assert!(!seen.contains(t), "duplicate trigger: {t}");
            seen.push(t);
        }
    }

    #[test]
    fn help_text_includes_all_commands() {
        let reg = CommandRegistry::new();
        let text = reg.help_text();
        for name in reg.names() {
            assert!(text.contains(name), "help missing: {name}");
        }
        assert!(text.contains("/h"));
        assert!(text.contains("/?"));
    }

    #[tokio::test]
    async fn help_is_handled() {
        let reg = CommandRegistry::new();
        assert_eq!(
            reg.dispatch("/help", &test_info()).await,
            CommandResult::Handled
        );
        assert_eq!(reg.dispatch("/?", &test_info()).await, CommandResult::Handled);
    }

    #[tokio::test]
    async fn unknown_slash_command_is_handled() {
        let reg = CommandRegistry::new();
        assert_eq!(
            reg.dispatch("/foobar", &test_info()).await,
            CommandResult::Handled
        );
    }

    #[tokio::test]
    async fn questions_pass_through() {
        let reg = CommandRegistry::new();
        for input in ["2+2", "what is the derivative of x^2", "quit smoking math"] {
            assert_eq!(
                reg.dispatch(input, &test_info()).await,
                CommandResult::NotACommand,
                "{input}"
            );
        }
    }

    #[tokio::test]
    async fn bare_alias_alone_is_a_command() {
        let reg = CommandRegistry::new();
        assert_eq!(reg.dispatch("  quit ", &test_info()).await, CommandResult::Quit);
    }

    #[tokio::test]
    async fn args_reach_the_command() {
        let reg = CommandRegistry::new();
        let result = reg
            .dispatch("/endpoint   http://solver:9000/ask  ", &test_info())
            .await;
        assert_eq!(
            result,
            CommandResult::StateChanged(StateChange::Endpoint(
                FormConfig::new("http://solver:9000/ask").unwrap()
            ))
        );
    }

    #[tokio::test]
    async fn registered_command_works() {
        struct PingCommand;

        #[async_trait]
        impl Command for PingCommand {
            fn name(&self) -> &str {
                "/ping"
            }
            fn description(&self) -> &str {
                "pong"
            }
            async fn execute(&self, _args: &str, _info: &SessionInfo<'_>) -> CommandResult {
                CommandResult::Handled
            }
        }

        let mut reg = CommandRegistry::new();
        reg.register(Arc::new(PingCommand));
        assert!(reg.names().contains(&"/ping"));
        assert_eq!(
            reg.dispatch("/ping", &test_info()).await,
            CommandResult::Handled
        );
        assert!(reg.help_text().contains("/ping"));
    }

    #[test]
    fn format_label_no_aliases() {
        assert_eq!(format_label("/status", &[]), "/status");
    }

    #[test]
    fn format_label_with_aliases() {
        assert_eq!(format_label("/help", &["/h", "/?"]), "/help (/h, /?)");
    }
}
