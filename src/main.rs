use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use timedesk::api::{ApiClient, ProjectApi};
use timedesk::config::Config;
use timedesk::credentials::EnvCredentials;
use timedesk::report::{self, DateRange, ReportFilters};

#[derive(Parser)]
#[command(name = "timedesk", about = "Admin client for the timesheet backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List projects for the configured company
    Projects,
    /// Delete a project by SOW id
    DeleteProject { sow_id: String },
    /// Export the daily-hours report as CSV
    ExportReport {
        #[arg(long)]
        out: PathBuf,
        /// Custom range start (YYYY-MM-DD); requires --end
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,
        /// Custom range end (YYYY-MM-DD)
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,
        /// Use last month instead of month-to-date
        #[arg(long, conflicts_with_all = ["start", "end"])]
        last_month: bool,
        /// Restrict to these employee ids
        #[arg(long, value_delimiter = ',')]
        emp_ids: Vec<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let credentials = Arc::new(EnvCredentials::default());
    let api = ApiClient::new(config.base_url.clone(), credentials);

    let cli = Cli::parse();
    match cli.command {
        Command::Projects => {
            let projects = api.list_projects(config.company_id).await?;
            for (idx, proj) in projects.iter().enumerate() {
                println!(
                    "{}. {} [{}] {}",
                    idx + 1,
                    proj.project_name,
                    proj.sow_id,
                    proj.current_status.as_ref()
                );
            }
        }
        Command::DeleteProject { sow_id } => {
            api.delete_project(&sow_id).await?;
            println!("Deleted project {}", sow_id);
        }
        Command::ExportReport {
            out,
            start,
            end,
            last_month,
            emp_ids,
        } => {
            let range = match (start, end, last_month) {
                (Some(start), Some(end), _) => DateRange::Custom { start, end },
                (_, _, true) => DateRange::LastMonth,
                _ => DateRange::MonthToDate,
            };
            let filters = ReportFilters {
                range,
                emp_ids,
                ..ReportFilters::default()
            };
            let today = Local::now().date_naive();
            let rows = api.daily_hours_report(&filters.to_query(today)).await?;
            report::export_daily_hours_csv(&rows, &out)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("Wrote {} rows to {}", rows.len(), out.display());
        }
    }
    Ok(())
}
