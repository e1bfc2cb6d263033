use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};

mod aggregate;
mod config;
mod fetch;
mod model;
mod render;
mod session;
mod state;
mod taxonomy;

use config::Settings;
use model::{Department, Regulation};
use session::DashboardSession;
use state::ViewMode;

#[derive(Parser)]
#[command(name = "course-mix-dashboard")]
#[command(about = "Departmental course distribution dashboard", long_about = None)]
struct Cli {
    /// TOML config overriding the backend URL and the department and
    /// regulation catalogs
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the category taxonomy
    Categories,
    /// Show per-regulation category distributions for a department
    Chart {
        #[arg(long)]
        department: String,
    },
    /// Show the semester/category table for a department and regulation
    Table {
        #[arg(long)]
        department: String,
        #[arg(long)]
        regulation: Option<String>,
    },
    /// Write a markdown report covering both views
    Report {
        #[arg(long)]
        department: String,
        #[arg(long)]
        regulation: Option<String>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export the category table as CSV
    Export {
        #[arg(long)]
        department: String,
        #[arg(long)]
        regulation: Option<String>,
        #[arg(long, default_value = "courses.csv")]
        out: PathBuf,
    },
}

fn resolve_department(settings: &Settings, name: &str) -> anyhow::Result<Department> {
    settings
        .department(name)
        .cloned()
        .with_context(|| format!("unknown department {name:?}; see `categories` or the config"))
}

fn resolve_regulation(settings: &Settings, code: Option<&str>) -> anyhow::Result<Regulation> {
    match code {
        Some(code) => settings
            .regulation(code)
            .cloned()
            .with_context(|| format!("unknown regulation {code:?}")),
        None => Ok(settings.default_regulation().clone()),
    }
}

/// Open a session and drive it through the selection transitions: regulation
/// first (no department yet, so nothing is fetched), then the department,
/// which issues all three fetches for the chosen regulation.
async fn open_session(
    settings: &Settings,
    department: Department,
    regulation: Regulation,
) -> DashboardSession {
    let fetcher = fetch::HttpFetcher::new(settings.base_url.clone());
    let mut session =
        DashboardSession::new(Box::new(fetcher), settings.default_regulation().clone());
    session.select_regulation(regulation).await;
    session.select_department(Some(department)).await;
    session
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let settings = config::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Categories => {
            for (code, label) in taxonomy::labels() {
                println!("{:<4} {label}", code.as_str());
            }
        }
        Commands::Chart { department } => {
            let department = resolve_department(&settings, &department)?;
            let regulation = settings.default_regulation().clone();
            let mut session = open_session(&settings, department.clone(), regulation).await;
            session.set_view_mode(ViewMode::Chart);

            println!("Department Courses Overview: {}", department.name);
            println!();
            print!(
                "{}",
                render::chart_view(
                    &session.state.all_regulations_data,
                    &settings.regulations,
                    &session.state.regulation,
                )
            );
        }
        Commands::Table {
            department,
            regulation,
        } => {
            let department = resolve_department(&settings, &department)?;
            let regulation = resolve_regulation(&settings, regulation.as_deref())?;
            let mut session = open_session(&settings, department.clone(), regulation).await;
            session.set_view_mode(ViewMode::Table);

            println!(
                "Courses for {} under {}",
                department.name, session.state.regulation
            );
            println!();
            print!(
                "{}",
                render::table_view(&session.state.semester_data, &session.state.category_data)
            );
        }
        Commands::Report {
            department,
            regulation,
            out,
        } => {
            let department = resolve_department(&settings, &department)?;
            let regulation = resolve_regulation(&settings, regulation.as_deref())?;
            let session = open_session(&settings, department.clone(), regulation).await;

            let report = render::build_report(
                &department,
                &session.state.regulation,
                &settings.regulations,
                &session.state.all_regulations_data,
                &session.state.semester_data,
                &session.state.category_data,
                Utc::now(),
            );
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export {
            department,
            regulation,
            out,
        } => {
            let department = resolve_department(&settings, &department)?;
            let regulation = resolve_regulation(&settings, regulation.as_deref())?;
            let session = open_session(&settings, department, regulation).await;

            let file = std::fs::File::create(&out)
                .with_context(|| format!("failed to create {}", out.display()))?;
            render::write_table_csv(file, &session.state.category_data)?;
            println!("Category table exported to {}.", out.display());
        }
    }

    Ok(())
}
