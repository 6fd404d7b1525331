//! Terminal submission client.
//!
//! Lists the tasks, lets the user pick one and submit a repository link,
//! then prints the server's verdict.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use task_checker::client::{
    submit_current, BoardError, Command, Notice, SubmissionBoard, SubmitClient,
    DEFAULT_SERVER_URL,
};

#[derive(Debug, Parser)]
#[command(name = "task-client", version, about = "Submit task links to a task checker server")]
struct Args {
    /// Base URL of the task checker server
    #[arg(long, env = "TASK_CHECKER_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,
}

const HELP: &str = "\
Commands:
  list            show tasks and recorded submissions
  submit <n>      start a submission for task n
  link <url>      submit a repository link for the open task
  cancel          close the open submission
  help            show this help
  quit            exit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_checker=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let client = SubmitClient::new(&args.server);
    let mut board = SubmissionBoard::new();

    println!("Task Checker ({})", client.endpoint());
    print_board(&board);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::List => print_board(&board),
            Command::Submit(number) => match board.open(number) {
                Ok(task) => println!(
                    "Submit Task {}: {} - enter 'link <url>' or 'cancel'",
                    task.number, task.name
                ),
                Err(e) => println!("{}", e),
            },
            Command::Link(link) => match submit_current(&mut board, &client, &link).await {
                Ok(notice) => print_notice(&notice),
                Err(e @ BoardError::NoTaskSelected) => {
                    println!("{} Use 'submit <n>' first.", e)
                }
                Err(e) => println!("{}", e),
            },
            Command::Cancel => board.close(),
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn print_board(board: &SubmissionBoard) {
    println!("Tasks");
    for row in board.rows() {
        match row.link {
            Some(link) => println!(
                "  Task {}: {:<28} View Submission: {}",
                row.task.number, row.task.name, link
            ),
            None => println!("  Task {}: {:<28} [Submit]", row.task.number, row.task.name),
        }
    }
}

fn print_notice(notice: &Notice) {
    println!("{}", notice.headline());
    match notice {
        Notice::Success(result) => {
            println!("  {}", result.message);
            println!("  AI feedback: {}", result.ai_feedback);
        }
        Notice::Failure(e) => println!("  {}", e),
    }
}
