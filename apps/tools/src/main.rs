use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use shared::{domain::hire_date, protocol::EmployeeDraft};
use storage::Storage;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/employees.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    CreateEmployee {
        name: String,
        email: String,
        #[arg(long, default_value = "")]
        extension: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        date_hired: NaiveDate,
        #[arg(long)]
        former: bool,
    },
    ListEmployees,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;

    match cli.command {
        Command::CreateEmployee {
            name,
            email,
            extension,
            title,
            date_hired,
            former,
        } => {
            let employee = storage
                .create_employee(&EmployeeDraft {
                    name,
                    extension,
                    email,
                    title,
                    date_hired,
                    currently_employed: !former,
                })
                .await?;
            println!("created employee_id={}", employee.id);
        }
        Command::ListEmployees => {
            for employee in storage.list_employees().await? {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    employee.id,
                    employee.name,
                    employee.email,
                    hire_date::display(employee.date_hired),
                    employee.currently_employed
                );
            }
            println!("{} employees", storage.count_employees().await?);
        }
    }

    Ok(())
}
