use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct StatusCommand;

impl StatusCommand {
    fn lines(info: &SessionInfo) -> Vec<String> {
        vec![
            format!("  endpoint  {}", info.config.endpoint_url),
            format!("  settings  {}", info.settings),
            format!("  asked     {}", info.form.latest_seq()),
            format!("  pending   {}", info.form.in_flight()),
        ]
    }
}

#[async_trait]
impl Command for StatusCommand {
    fn name(&self) -> &str {
        "/status"
    }

    fn description(&self) -> &str {
        "show endpoint and request counts"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        for line in Self::lines(info) {
            println!("{line}");
        }
        CommandResult::Handled
    }
}
