use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use client_core::{table_rows, DeleteDialog, HttpEmployeeApi, ListController, ListEvent, ListQuery};
use shared::{domain::EmployeeId, protocol::EmployeeDraft};
use tokio::sync::broadcast;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod table;

#[derive(Parser, Debug)]
#[command(name = "employees", about = "Employee list client")]
struct Cli {
    #[arg(long, env = "EMPLOYEE_API_URL", default_value = "http://127.0.0.1:8080")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the employee table.
    List {
        /// Compared as text against `true`/`false`.
        #[arg(long)]
        employed: Option<String>,
        /// A query string such as `?employed=true`.
        #[arg(long, conflicts_with = "employed")]
        query: Option<String>,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        extension: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        title: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date_hired: NaiveDate,
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        currently_employed: bool,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    debug!(server_url = %cli.server_url, "using employee backend");
    let api = HttpEmployeeApi::new(&cli.server_url)?;
    let controller = ListController::new(Arc::new(api));
    let mut events = controller.subscribe();

    match cli.command {
        Command::List { employed, query } => {
            let query = match (employed, query) {
                (Some(employed), _) => ListQuery {
                    employed: Some(employed),
                },
                (None, Some(raw)) => ListQuery::parse(&raw),
                (None, None) => ListQuery::all(),
            };
            controller.load().await;
            check_events(&mut events)?;
            let employees = controller.employees().await;
            print!("{}", table::render(&table_rows(&employees, query.employed_filter())));
        }
        Command::Add {
            name,
            extension,
            email,
            title,
            date_hired,
            currently_employed,
        } => {
            controller
                .create(EmployeeDraft {
                    name,
                    extension,
                    email,
                    title,
                    date_hired,
                    currently_employed,
                })
                .await;
            for event in check_events(&mut events)? {
                if let ListEvent::Appended { employee, employees } = event {
                    println!(
                        "created employee {} ({} employees)",
                        employee.id,
                        employees.len()
                    );
                }
            }
        }
        Command::Delete { id, yes } => {
            let id = EmployeeId::new(id);
            let mut dialog = DeleteDialog::default();
            dialog.request_delete();
            if !yes && !prompt_confirm(&id)? {
                dialog.cancel();
            }
            if dialog.confirm() {
                controller.delete(&id).await;
                check_events(&mut events)?;
                println!("deleted employee {id}");
            }
        }
    }

    Ok(())
}

fn prompt_confirm(id: &EmployeeId) -> Result<bool> {
    print!("Delete Employee {id}? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

/// Drains the controller's broadcast; a failure becomes a non-zero exit.
fn check_events(events: &mut broadcast::Receiver<ListEvent>) -> Result<Vec<ListEvent>> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let ListEvent::Failed { operation, message } = &event {
            bail!("{} failed: {message}", operation.label());
        }
        drained.push(event);
    }
    Ok(drained)
}
