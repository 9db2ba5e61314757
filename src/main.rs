mod app;
mod backend;
mod config;
mod display;
mod error;
mod filter;
mod form;
mod logging;
mod mapper;
mod models;
mod session;
mod store;
mod talent;
mod tui;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{builder::BoolishValueParser, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use app::App;
use backend::{Backend, RestBackend};
use display::{format_brl, format_date, truncate};
use filter::{CandidateFilter, CandidateSort, PostingFilter};
use form::{LoginForm, PostingFields, PostingForm};
use logging::LogTarget;
use models::{Posting, PostingStatus, WorkMode};
use session::Route;

#[derive(Parser)]
#[command(name = "vagas", version)]
#[command(about = "Recruiting dashboard - job postings and talent pool")]
struct Cli {
    /// Path to a configuration file
    #[arg(long = "config-file", env = "VAGAS_CONFIG_FILE", value_name = "PATH", global = true)]
    config_file: Option<PathBuf>,

    /// Override the backend project URL
    #[arg(long, value_name = "URL", global = true)]
    backend_url: Option<String>,

    /// Override the log level (trace|debug|info|warn|error)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Toggle JSON logging
    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new(), global = true)]
    log_json: Option<bool>,

    /// Sign-in email
    #[arg(long, env = "VAGAS_EMAIL", global = true)]
    email: Option<String>,

    /// Sign-in password
    #[arg(long, env = "VAGAS_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard
    Dashboard,

    /// List postings
    List {
        /// Filter by status (active, inactive)
        #[arg(short, long)]
        status: Option<PostingStatus>,

        /// Filter by work mode (on-site, remote)
        #[arg(short, long)]
        mode: Option<WorkMode>,

        /// Search title and service
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Show posting details
    Show {
        /// Posting ID
        id: String,
    },

    /// Create a posting
    Create {
        #[command(flatten)]
        fields: PostingArgs,
    },

    /// Edit a posting; only the given fields change
    Edit {
        /// Posting ID
        id: String,

        #[command(flatten)]
        fields: PostingArgs,
    },

    /// Delete a posting
    Delete {
        /// Posting ID
        id: String,
    },

    /// Search the talent pool
    Talent {
        /// Name contains
        #[arg(short, long)]
        name: Option<String>,

        /// Preferred work mode (on-site, remote)
        #[arg(short, long)]
        mode: Option<WorkMode>,

        /// Equipment type or model contains
        #[arg(short, long)]
        equipment: Option<String>,

        /// Maximum distance in km
        #[arg(short = 'd', long)]
        max_distance: Option<f64>,

        /// Sort nearest first
        #[arg(long)]
        nearest: bool,

        /// Search in the context of a posting
        #[arg(short, long)]
        posting: Option<String>,
    },

    /// Invite a candidate to a posting
    Invite {
        /// Posting ID
        posting_id: String,

        /// Candidate ID
        candidate_id: String,
    },
}

#[derive(Args)]
struct PostingArgs {
    #[arg(long)]
    title: Option<String>,

    /// Service category
    #[arg(long)]
    service: Option<String>,

    /// Value in BRL
    #[arg(long)]
    value: Option<String>,

    #[arg(long)]
    availability: Option<String>,

    #[arg(long)]
    requirements: Option<String>,

    /// Service date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Training provided
    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    training: Option<bool>,

    #[arg(long)]
    contact: Option<String>,

    /// Work mode (on-site, remote)
    #[arg(long)]
    mode: Option<WorkMode>,

    /// Status (active, inactive)
    #[arg(long)]
    status: Option<PostingStatus>,

    /// Postal code, on-site only
    #[arg(long)]
    cep: Option<String>,

    /// Accepted radius in km, on-site only
    #[arg(long)]
    radius: Option<String>,

    /// Equipment question; derived from the service when omitted
    #[arg(long)]
    equipment_question: Option<String>,

    /// Custom question (repeatable); replaces the existing list when given
    #[arg(long = "question")]
    questions: Vec<String>,
}

impl PostingArgs {
    fn apply(self, f: &mut PostingFields) {
        if let Some(v) = self.title {
            f.title = v;
        }
        if let Some(v) = self.service {
            f.service = v;
        }
        if let Some(v) = self.value {
            f.value = v;
        }
        if let Some(v) = self.availability {
            f.availability = v;
        }
        if let Some(v) = self.requirements {
            f.requirements = v;
        }
        if let Some(v) = self.date {
            f.service_date = Some(v);
        }
        if let Some(v) = self.training {
            f.training = v;
        }
        if let Some(v) = self.contact {
            f.contact = v;
        }
        if let Some(v) = self.mode {
            f.work_mode = Some(v);
        }
        if let Some(v) = self.status {
            f.status = v;
        }
        if let Some(v) = self.cep {
            f.cep = v;
        }
        if let Some(v) = self.radius {
            f.radius = v;
        }
        if let Some(v) = self.equipment_question {
            f.equipment_question = v;
        }
        if !self.questions.is_empty() {
            f.custom_questions = self.questions;
        }
    }
}

/// Signs in with the given credentials, then resolves and loads `target`.
async fn open<B: Backend>(app: &mut App<B>, credentials: Option<&LoginForm>, target: &str) -> Result<Route> {
    if let Some(form) = credentials {
        app.login(form)
            .await
            .map_err(|errors| anyhow!("Sign-in rejected: {}", errors))?;
    }

    let route = app.navigate(target);
    if route == Route::Login {
        bail!("Not signed in. Pass --email and --password (or set VAGAS_EMAIL and VAGAS_PASSWORD).");
    }
    app.load(&route)
        .await
        .with_context(|| format!("Failed to load {}", route))?;
    Ok(route)
}

fn submit(form: &mut PostingForm) -> Result<models::PostingDraft> {
    form.submit().map_err(|errors| {
        let lines: Vec<String> = errors
            .iter()
            .map(|e| format!("  {}: {}", e.field, e.message))
            .collect();
        anyhow!("Invalid posting:\n{}", lines.join("\n"))
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = config::Overrides {
        backend_url: cli.backend_url.clone(),
        log_level: cli.log_level.clone(),
        log_json: cli.log_json,
    };
    let settings = config::load(cli.config_file.as_deref(), &overrides).context("Failed to load configuration")?;

    let target = match cli.command {
        Commands::Dashboard => LogTarget::File(logging::default_log_path()),
        _ => LogTarget::Stderr,
    };
    logging::init(&settings.logging, target)?;

    let backend = Arc::new(
        RestBackend::new(&settings.backend.url, settings.backend.api_key.clone())
            .context("Failed to build backend client")?,
    );
    let mut app = App::new(
        backend,
        settings.session.login_delay,
        settings.invitations.link_base.clone(),
    );

    let credentials = match (cli.email, cli.password) {
        (Some(email), Some(password)) => Some(LoginForm { email, password }),
        _ => None,
    };

    match cli.command {
        Commands::Dashboard => {
            let prefill = credentials.unwrap_or_default();
            tui::run_dashboard(app, prefill).await?;
        }

        Commands::List { status, mode, search } => {
            open(&mut app, credentials.as_ref(), "/vagas").await?;
            let filter = PostingFilter {
                search: search.unwrap_or_default(),
                status,
                mode: mode.into(),
            };
            let postings = filter.apply(app.postings.list());
            if postings.is_empty() {
                println!("No postings found.");
            } else {
                println!(
                    "{:<38} {:<8} {:<11} {:<30} {:>14} {:<10}",
                    "ID", "STATUS", "MODE", "TITLE", "VALUE", "DATE"
                );
                println!("{}", "-".repeat(116));
                for posting in postings {
                    println!(
                        "{:<38} {:<8} {:<11} {:<30} {:>14} {:<10}",
                        truncate(&posting.id, 36),
                        posting.status,
                        posting.work_mode,
                        truncate(&posting.title, 28),
                        format_brl(posting.value),
                        format_date(posting.service_date)
                    );
                }
            }
        }

        Commands::Show { id } => {
            let route = open(&mut app, credentials.as_ref(), &Route::PostingDetail(id.clone()).path()).await?;
            match app.postings.get(&id) {
                Some(posting) => print_posting(posting),
                None => println!("Posting {} not found (at {}).", id, route),
            }
        }

        Commands::Create { fields } => {
            open(&mut app, credentials.as_ref(), "/vagas").await?;
            let mut form = PostingForm::new();
            fields.apply(form.fields_mut());
            let draft = submit(&mut form)?;
            let posting = app.postings.create(&draft).await.context("Failed to create posting")?;
            println!("Created posting {} ({})", posting.id, posting.title);
        }

        Commands::Edit { id, fields } => {
            open(&mut app, credentials.as_ref(), &Route::PostingDetail(id.clone()).path()).await?;
            let posting = app
                .postings
                .get(&id)
                .ok_or_else(|| anyhow!("Posting {} not found", id))?;
            let mut form = PostingForm::for_posting(posting);
            fields.apply(form.fields_mut());
            let draft = submit(&mut form)?;
            let updated = app
                .postings
                .update(&id, &draft)
                .await
                .context("Failed to update posting")?;
            println!("Updated posting {} ({})", updated.id, updated.title);
        }

        Commands::Delete { id } => {
            open(&mut app, credentials.as_ref(), &Route::PostingDetail(id.clone()).path()).await?;
            if app.postings.get(&id).is_none() {
                println!("Posting {} not found.", id);
            } else {
                app.postings.delete(&id).await.context("Failed to delete posting")?;
                println!("Deleted posting {}.", id);
            }
        }

        Commands::Talent {
            name,
            mode,
            equipment,
            max_distance,
            nearest,
            posting,
        } => {
            let target = Route::TalentPool { posting_id: posting }.path();
            let route = open(&mut app, credentials.as_ref(), &target).await?;
            if let Route::TalentPool { posting_id: Some(id) } = &route {
                match app.postings.get(id) {
                    Some(p) => println!("Talent for posting {} ({})\n", id, p.title),
                    None => println!("Posting {} not found; showing the whole pool.\n", id),
                }
            }

            let filter = CandidateFilter {
                name: name.unwrap_or_default(),
                mode: mode.into(),
                equipment: equipment.unwrap_or_default(),
                max_distance,
            };
            let sort = if nearest { CandidateSort::Nearest } else { CandidateSort::AsListed };
            let candidates = app.talent.filtered(&filter, sort);
            if candidates.is_empty() {
                println!("No candidates found.");
            } else {
                println!(
                    "{:<38} {:<24} {:<24} {:<18} {:>8} {:<11}",
                    "ID", "NAME", "EQUIPMENT", "CITY", "KM", "MODE"
                );
                println!("{}", "-".repeat(128));
                for c in candidates {
                    println!(
                        "{:<38} {:<24} {:<24} {:<18} {:>8.1} {:<11}",
                        truncate(&c.id, 36),
                        truncate(&c.name, 22),
                        truncate(&format!("{} {}", c.equipment_type, c.equipment_model), 22),
                        truncate(&format!("{}/{}", c.city, c.state), 16),
                        c.distance,
                        c.work_mode
                    );
                }
            }
        }

        Commands::Invite {
            posting_id,
            candidate_id,
        } => {
            let target = Route::TalentPool {
                posting_id: Some(posting_id.clone()),
            }
            .path();
            open(&mut app, credentials.as_ref(), &target).await?;
            let invitation = app
                .invite(&posting_id, &candidate_id)
                .await
                .context("Failed to send invitation")?;
            println!("Invitation {} created", invitation.id);
            println!("Link: {}", invitation.link);
        }
    }

    Ok(())
}

fn print_posting(posting: &Posting) {
    println!("Posting {}", posting.id);
    println!("Title: {}", posting.title);
    println!("Service: {}", posting.service);
    println!("Status: {}", posting.status);
    println!("Value: {}", format_brl(posting.value));
    println!("Date: {}", format_date(posting.service_date));
    println!("Mode: {}", posting.work_mode);
    if posting.is_on_site() {
        if let Some(cep) = &posting.cep {
            println!("CEP: {}", cep);
        }
        if let Some(radius) = &posting.radius {
            println!("Radius: {} km", radius);
        }
    }
    println!("Availability: {}", posting.availability);
    println!("Training: {}", if posting.training { "yes" } else { "no" });
    println!("Contact: {}", posting.contact);
    println!("\n--- Requirements ---\n{}", posting.requirements);
    if !posting.equipment_question.is_empty() || !posting.custom_questions.is_empty() {
        println!("\n--- Questions ---");
        if !posting.equipment_question.is_empty() {
            println!("* {}", posting.equipment_question);
        }
        for (i, q) in posting.custom_questions.iter().enumerate() {
            println!("{}. {}", i + 1, q.question);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_talent_filters() {
        let cli = Cli::parse_from([
            "vagas",
            "talent",
            "--mode",
            "remote",
            "--max-distance",
            "0",
            "--nearest",
            "--posting",
            "v1",
        ]);
        match cli.command {
            Commands::Talent {
                mode,
                max_distance,
                nearest,
                posting,
                ..
            } => {
                assert_eq!(mode, Some(WorkMode::Remote));
                assert_eq!(max_distance, Some(0.0));
                assert!(nearest);
                assert_eq!(posting.as_deref(), Some("v1"));
            }
            _ => panic!("expected talent command"),
        }
    }

    #[test]
    fn test_global_options_follow_subcommand() {
        let cli = Cli::parse_from([
            "vagas",
            "list",
            "--status",
            "inactive",
            "--log-json",
            "yes",
            "--backend-url",
            "http://localhost:54321",
        ]);
        assert_eq!(cli.log_json, Some(true));
        assert_eq!(cli.backend_url.as_deref(), Some("http://localhost:54321"));
        assert!(matches!(
            cli.command,
            Commands::List {
                status: Some(PostingStatus::Inactive),
                ..
            }
        ));
    }

    #[test]
    fn test_posting_args_only_touch_given_fields() {
        let cli = Cli::parse_from([
            "vagas",
            "edit",
            "p1",
            "--mode",
            "remote",
            "--question",
            "Has a car?",
        ]);
        let Commands::Edit { fields, .. } = cli.command else {
            panic!("expected edit command");
        };

        let mut current = PostingFields {
            title: "Pintura".to_string(),
            custom_questions: vec!["Old?".to_string()],
            ..Default::default()
        };
        fields.apply(&mut current);

        assert_eq!(current.title, "Pintura");
        assert_eq!(current.work_mode, Some(WorkMode::Remote));
        assert_eq!(current.custom_questions, vec!["Has a car?".to_string()]);
    }

    #[test]
    fn test_create_example_from_cli_args() {
        let cli = Cli::parse_from([
            "vagas",
            "create",
            "--title",
            "X",
            "--service",
            "Pintura",
            "--value",
            "300,50",
            "--availability",
            "Manhã",
            "--requirements",
            "Experiência com pintura predial",
            "--date",
            "2024-11-05",
            "--contact",
            "rh@example.com",
            "--mode",
            "on-site",
        ]);
        let Commands::Create { fields } = cli.command else {
            panic!("expected create command");
        };

        let mut form = PostingForm::new();
        fields.apply(form.fields_mut());
        let err = submit(&mut form).unwrap_err();
        assert!(err.to_string().contains("postal code required"));

        form.back();
        form.fields_mut().cep = "01310-100".to_string();
        form.fields_mut().radius = "15".to_string();
        let draft = submit(&mut form).unwrap();
        assert_eq!(draft.value, Some(300.5));
        assert_eq!(draft.cep, Some(Some("01310-100".to_string())));
    }
}
