use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

/// Shows the retrieved material the solver sent with the current answer.
pub struct ContextCommand;

#[async_trait]
impl Command for ContextCommand {
    fn name(&self) -> &str {
        "/context"
    }

    fn description(&self) -> &str {
        "show the context the solver used for the last answer"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        match info.form.context() {
            Some(context) => {
                for line in context.lines() {
                    println!("  {line}");
                }
            }
            None => println!("  no context for the current answer"),
        }
        CommandResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_info;
    use crate::config::FormConfig;
    use crate::form::{Completion, QuestionForm};
    use crate::solver::SolverAnswer;

    #[tokio::test]
    async fn handled_without_context() {
        assert_eq!(
            ContextCommand.execute("", &test_info()).await,
            CommandResult::Handled
        );
    }

    #[tokio::test]
    async fn handled_with_context() {
        let mut form = QuestionForm::new();
        form.on_question_change("x+2=4");
        let ticket = form.on_ask().unwrap();
        form.complete(Completion {
            seq: ticket.seq,
            outcome: Ok(SolverAnswer {
                answer: "x = 2".to_string(),
                context: Some("Question: x+2=4\nAnswer: 2".to_string()),
            }),
        });

        let config = FormConfig::default();
        let info = SessionInfo {
            config: &config,
            settings: "ephemeral",
            form: &form,
        };
        assert_eq!(
            ContextCommand.execute("", &info).await,
            CommandResult::Handled
        );
    }
}
