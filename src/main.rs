use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use hrm_client::api::{ApiClient, HttpTransport, Resource};
use hrm_client::auth::{FileStore, Session};
use hrm_client::config::Config;
use hrm_client::model::{
    ApplicationDraft, ApplicationType, Area, Attendance, Contract, Employee, EmployeePost,
    Location, Position, Role, Schedule, Training, User,
};
use hrm_client::models::LoginReqDto;
use hrm_client::render::Render;
use hrm_client::screen::{
    Alert, ApplicationsScreen, Confirm, ListScreen, Mount, Mutation, Scope, Submit,
};
use hrm_client::utils::filter::Searchable;

#[derive(Parser)]
#[command(name = "hrm", version, about = "HR administration client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// List a module's records
    List {
        resource: ResourceKind,
        /// Case-insensitive text filter
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one record
    Show { resource: ResourceKind, id: u64 },
    /// Delete one record after confirmation
    Delete {
        resource: ResourceKind,
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List leave and permission applications
    Applications {
        /// Every employee's applications instead of your own
        #[arg(long)]
        all: bool,
        #[arg(long)]
        search: Option<String>,
    },
    /// Approve (or reject) an application
    Approve {
        id: u64,
        #[arg(long)]
        reject: bool,
        #[arg(long)]
        yes: bool,
    },
    /// File a new application
    Apply {
        #[arg(long = "type")]
        type_id: u64,
        #[arg(long)]
        reason: String,
        /// YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,
        /// YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ResourceKind {
    Employees,
    Users,
    Roles,
    Areas,
    Positions,
    Locations,
    Contracts,
    Attendance,
    ApplicationTypes,
    Trainings,
    Schedules,
    EmployeePosts,
}

macro_rules! with_resource {
    ($kind:expr, $r:ident => $body:expr) => {
        match $kind {
            ResourceKind::Employees => { type $r = Employee; $body }
            ResourceKind::Users => { type $r = User; $body }
            ResourceKind::Roles => { type $r = Role; $body }
            ResourceKind::Areas => { type $r = Area; $body }
            ResourceKind::Positions => { type $r = Position; $body }
            ResourceKind::Locations => { type $r = Location; $body }
            ResourceKind::Contracts => { type $r = Contract; $body }
            ResourceKind::Attendance => { type $r = Attendance; $body }
            ResourceKind::ApplicationTypes => { type $r = ApplicationType; $body }
            ResourceKind::Trainings => { type $r = Training; $body }
            ResourceKind::Schedules => { type $r = Schedule; $body }
            ResourceKind::EmployeePosts => { type $r = EmployeePost; $body }
        }
    };
}

/// Reads `s`/`y` from stdin unless `--yes` was given.
struct PromptConfirm {
    assume_yes: bool,
}

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{prompt} [s/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes")
    }
}

struct App {
    session: Session,
    api: ApiClient,
}

fn redirect_to_login() -> ExitCode {
    eprintln!("No hay una sesión activa. Inicia sesión con `hrm login`.");
    ExitCode::from(2)
}

fn report(alert: Option<Alert>) {
    if let Some(alert) = alert {
        eprintln!("{}: {}", alert.title, alert.message);
    }
}

fn print_card(item: &impl Render) {
    println!("{}", item.title());
    for field in item.fields() {
        println!("  {}: {}", field.label, field.value);
    }
}

async fn list<R: Resource + Searchable + Render>(app: &App, search: Option<String>) -> ExitCode {
    let Mount::Ready(screen) = ListScreen::<R>::mount(&app.session, &app.api).await else {
        return redirect_to_login();
    };
    if let Some(alert) = screen.dismiss_alert() {
        report(Some(alert));
        return ExitCode::FAILURE;
    }
    if let Some(search) = search {
        screen.set_search(search);
    }

    let items = screen.visible();
    for item in &items {
        print_card(item);
    }
    println!("{} registro(s)", items.len());
    ExitCode::SUCCESS
}

async fn show<R: Resource + Searchable + Render>(app: &App, id: u64) -> ExitCode {
    let Mount::Ready(screen) = ListScreen::<R>::mount(&app.session, &app.api).await else {
        return redirect_to_login();
    };
    match screen.find(id) {
        Some(item) => {
            print_card(&item);
            ExitCode::SUCCESS
        }
        None => {
            report(screen.dismiss_alert());
            eprintln!("No se encontró el registro {id}");
            ExitCode::FAILURE
        }
    }
}

async fn delete<R: Resource + Searchable + Render>(app: &App, id: u64, yes: bool) -> ExitCode {
    let Mount::Ready(screen) = ListScreen::<R>::mount(&app.session, &app.api).await else {
        return redirect_to_login();
    };
    match screen.delete(id, &PromptConfirm { assume_yes: yes }).await {
        Mutation::Done => {
            println!("Registro eliminado");
            ExitCode::SUCCESS
        }
        Mutation::Cancelled => {
            println!("Operación cancelada");
            ExitCode::SUCCESS
        }
        Mutation::Failed(_) => {
            report(screen.dismiss_alert());
            ExitCode::FAILURE
        }
    }
}

async fn applications_screen(app: &App, scope: Scope) -> Option<ApplicationsScreen> {
    ApplicationsScreen::mount(&app.session, &app.api, scope)
        .await
        .ready()
}

async fn run(cli: Cli, app: App) -> Result<ExitCode> {
    let code = match cli.command {
        Command::Login { email, password } => {
            let credentials = LoginReqDto { email, password };
            match app.session.login(&app.api, &credentials).await {
                Ok(resp) => {
                    let who = resp.username.or(resp.email).unwrap_or_default();
                    println!("Sesión iniciada como {who}");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("No se pudo iniciar sesión: {}", err.user_message());
                    ExitCode::FAILURE
                }
            }
        }
        Command::Logout => {
            app.session.logout().context("failed to clear session")?;
            println!("Sesión cerrada");
            ExitCode::SUCCESS
        }
        Command::List { resource, search } => {
            with_resource!(resource, R => list::<R>(&app, search).await)
        }
        Command::Show { resource, id } => {
            with_resource!(resource, R => show::<R>(&app, id).await)
        }
        Command::Delete { resource, id, yes } => {
            with_resource!(resource, R => delete::<R>(&app, id, yes).await)
        }
        Command::Applications { all, search } => {
            let scope = if all { Scope::All } else { Scope::Mine };
            let Some(screen) = applications_screen(&app, scope).await else {
                return Ok(redirect_to_login());
            };
            report(screen.dismiss_alert());
            if let Some(search) = search {
                screen.set_search(search);
            }
            let rows = screen.rows();
            for row in &rows {
                print_card(row);
            }
            println!("{} solicitud(es)", rows.len());
            ExitCode::SUCCESS
        }
        Command::Approve { id, reject, yes } => {
            let Some(screen) = applications_screen(&app, Scope::All).await else {
                return Ok(redirect_to_login());
            };
            match screen.decide(id, !reject, &PromptConfirm { assume_yes: yes }).await {
                Mutation::Done => {
                    println!("Solicitud {}", if reject { "rechazada" } else { "aprobada" });
                    ExitCode::SUCCESS
                }
                Mutation::Cancelled => ExitCode::SUCCESS,
                Mutation::Failed(_) => {
                    report(screen.dismiss_alert());
                    ExitCode::FAILURE
                }
            }
        }
        Command::Apply {
            type_id,
            reason,
            start,
            end,
        } => {
            let Some(screen) = applications_screen(&app, Scope::Mine).await else {
                return Ok(redirect_to_login());
            };
            let draft = ApplicationDraft {
                application_type_id: Some(type_id),
                reason,
                date_start: Some(start),
                date_end: Some(end),
            };
            match screen.submit(&draft, Local::now().date_naive()).await {
                Submit::Saved => {
                    println!("Solicitud enviada");
                    ExitCode::SUCCESS
                }
                Submit::Invalid(errors) => {
                    for (field, message) in errors.iter() {
                        eprintln!("{field}: {message}");
                    }
                    ExitCode::FAILURE
                }
                Submit::Failed(_) => {
                    report(screen.dismiss_alert());
                    ExitCode::FAILURE
                }
            }
        }
    };
    Ok(code)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "hrm.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    info!(api_url = %config.api_url, "Client starting");

    let store = Arc::new(FileStore::new(&config.token_path));
    let app = App {
        session: Session::new(store, config.token_key.clone()),
        api: ApiClient::new(Arc::new(HttpTransport::new(&config.api_url))),
    };

    run(cli, app).await
}
