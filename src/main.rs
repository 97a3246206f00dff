use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use math_agent::banner::{BannerInfo, print_banner, print_session_summary};
use math_agent::commands::{CommandRegistry, CommandResult, SessionInfo, StateChange};
use math_agent::config::{ConfigStore, FormConfig};
use math_agent::consts::default_db_path;
use math_agent::events::FormEvent;
use math_agent::form::{Completion, QuestionForm};
use math_agent::render::render_answer;
use math_agent::solver::Solver;
use math_agent::solver::http::HttpSolver;

#[derive(Parser)]
#[command(name = "math-agent", version, about = "Ask a math question, get an answer.")]
struct Cli {
    /// Solver endpoint URL (remembered for later sessions)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// SQLite database for settings (use :memory: for ephemeral)
    #[arg(short, long)]
    db: Option<String>,

    /// Ask a single question and exit (non-interactive)
    #[arg(short, long)]
    ask: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let db = match cli.db {
        Some(db) => db,
        None => {
            let path = default_db_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            path.to_string_lossy().into_owned()
        }
    };

    let store = ConfigStore::open(&db)?;
    let mut config = FormConfig::resolve(cli.endpoint.as_deref(), &store)?;
    if cli.endpoint.is_some() {
        store.save_endpoint(&config)?;
    }
    info!(endpoint = %config.endpoint_url, "using solver");

    let mut solver: Arc<dyn Solver> = Arc::new(HttpSolver::new(&config)?);
    let mut form = QuestionForm::new();

    // Single question mode
    if let Some(question) = cli.ask {
        form.on_question_change(question);
        if form.ask(solver.as_ref()).await.is_none() {
            bail!("nothing to ask: the question is empty");
        }
        println!("{}", form.answer());
        return Ok(());
    }

    let settings = if db == ":memory:" {
        "ephemeral".to_string()
    } else {
        Path::new(&db).display().to_string()
    };

    print_banner(&BannerInfo {
        endpoint: &config.endpoint_url,
        settings: &settings,
    });

    let registry = CommandRegistry::new();
    let mut events = form.subscribe();
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();

    // Async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    prompt()?;
    loop {
        tokio::select! {
            result = lines.next_line() => {
                let line = match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                };

                let info = SessionInfo {
                    config: &config,
                    settings: &settings,
                    form: &form,
                };
                let result = registry.dispatch(&line, &info).await;
                match result {
                    CommandResult::Quit => break,
                    CommandResult::Handled => {}
                    CommandResult::StateChanged(StateChange::Endpoint(next)) => {
                        solver = Arc::new(HttpSolver::new(&next)?);
                        if let Err(e) = store.save_endpoint(&next) {
                            warn!(error = %e, "failed to persist endpoint");
                        }
                        config = next;
                    }
                    CommandResult::NotACommand => {
                        form.on_question_change(line);
                        // Requests run concurrently; the form decides which result sticks.
                        if let Some(ticket) = form.on_ask() {
                            let solver = Arc::clone(&solver);
                            let tx = tx.clone();
                            tokio::spawn(async move {
                                let completion = ticket.send(solver.as_ref()).await;
                                let _ = tx.send(completion);
                            });
                        }
                    }
                }
                prompt()?;
            }
            Some(completion) = rx.recv() => {
                form.complete(completion);
            }
            event = events.recv() => {
                match event {
                    Ok(FormEvent::AnswerChanged { answer, .. }) => {
                        print!("\n{}", render_answer(&answer));
                        prompt()?;
                    }
                    Ok(FormEvent::StaleDiscarded { seq, latest }) => {
                        debug!(seq, latest, "older answer dropped");
                    }
                    Ok(FormEvent::QuestionChanged { .. }) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "renderer fell behind");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    print_session_summary(form.latest_seq());
    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("\nask> ");
    io::stdout().flush()
}
