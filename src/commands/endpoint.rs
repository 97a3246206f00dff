use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::config::FormConfig;

pub struct EndpointCommand;

#[async_trait]
impl Command for EndpointCommand {
    fn name(&self) -> &str {
        "/endpoint"
    }

    fn description(&self) -> &str {
        "show or switch the solver endpoint (/endpoint URL)"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if args.is_empty() {
            println!("  {}", info.config.endpoint_url);
            return CommandResult::Handled;
        }

        let config = match FormConfig::new(args) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("  ✗ {e:#}");
                return CommandResult::Handled;
            }
        };

        if config == *info.config {
            println!("  already using {}", config.endpoint_url);
            return CommandResult::Handled;
        }

        println!("  ✓ endpoint changed to {}", config.endpoint_url);
        CommandResult::StateChanged(StateChange::Endpoint(config))
    }
}
