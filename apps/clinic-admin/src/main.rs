use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use runtime::paths::resolve_under;
use runtime::{AppConfig, CliArgs};

use clinic_admin::domain::query::{paginate, unassigned_patients};
use clinic_admin::infra::session::SessionStore;
use clinic_admin::model::{
    DashboardStats, Examination, ExaminationQuery, Page, Role, User, UserQuery,
};
use clinic_admin::{ClinicAdmin, ClinicAdminConfig};

const MODULE: &str = "clinic_admin";

/// Clinic Admin - command-line front end for the clinic data-access layer
#[derive(Parser)]
#[command(name = "clinic-admin")]
#[command(about = "Clinic Admin - browse clinic users, examinations and dashboard data")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Remote service base address (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List user accounts
    Users {
        /// Only this role (admin, staff, patient)
        #[arg(long)]
        role: Option<Role>,
        /// Case-insensitive match on name or email
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List examinations
    Exams {
        /// Case-insensitive match on patient name, complaint or address
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show a staff member's patients and their examinations
    Staff { staff_id: String },
    /// Dashboard counters
    Stats {
        /// Count over the user and examination listings instead of the stats endpoint
        #[arg(long)]
        from_lists: bool,
    },
    /// Daily and weekly activity series
    Trends,
    /// Inspect or change the stored session identity
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Check configuration
    Check,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Print the stored identity
    Show,
    /// Forget the stored identity
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);
    if let Some(url) = &cli.base_url {
        config.set_module_value(MODULE, "base_url", serde_json::Value::String(url.clone()));
    }

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::init_logging_from_config(&logging_config, &config.home_path());
    tracing::info!("clinic-admin starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let module_cfg: ClinicAdminConfig = config.module_config(MODULE)?;
    let session = SessionStore::new(resolve_under(&config.home_path(), &module_cfg.session_file));

    match cli.command.unwrap_or(Commands::Stats { from_lists: false }) {
        Commands::Check => check_config(&config, &module_cfg),
        Commands::Session { action } => run_session(&session, action),
        command => {
            let admin = ClinicAdmin::from_config(&module_cfg)?;
            run_query(&admin, &module_cfg, command).await?;
            if admin.is_degraded() {
                eprintln!("note: remote service unavailable, showing local data");
            }
            Ok(())
        }
    }
}

async fn run_query(admin: &ClinicAdmin, cfg: &ClinicAdminConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Users { role, search, page } => {
            let users = admin
                .users_api()
                .list_users(UserQuery { role, search })
                .await?;
            print_page(&paginate(&users, page, cfg.page_size), print_user);
        }
        Commands::Exams { search, page } => {
            let exams = admin
                .examinations_api()
                .list_examinations(ExaminationQuery { search })
                .await?;
            print_page(&paginate(&exams, page, cfg.page_size), print_examination);
        }
        Commands::Staff { staff_id } => show_staff(admin, &staff_id).await?,
        Commands::Stats { from_lists } => {
            let api = admin.dashboard_api();
            let stats = if from_lists {
                api.stats_from_lists().await?
            } else {
                api.stats().await?
            };
            print_stats(&stats);
        }
        Commands::Trends => {
            let api = admin.dashboard_api();
            println!("Examinations per day:");
            for point in api.examination_trends().await? {
                println!("  {:<12} {}", point.label, point.examinations);
            }
            println!("Weekly activity:");
            for point in api.monthly_stats().await? {
                println!(
                    "  {:<8} examinations={} users={}",
                    point.label, point.examinations, point.users
                );
            }
        }
        Commands::Session { .. } | Commands::Check => {}
    }
    Ok(())
}

async fn show_staff(admin: &ClinicAdmin, staff_id: &str) -> Result<()> {
    let staff_api = admin.staff_api();
    let patients = staff_api.staff_patients(staff_id).await?;
    let exams = staff_api.staff_examinations(staff_id).await?;

    println!("Patients of staff {}:", staff_id);
    for a in &patients {
        println!(
            "  {:<34} {}",
            a.patient_id,
            a.patient_name.as_deref().unwrap_or("-")
        );
    }
    println!("Examinations:");
    for e in &exams {
        print_examination(e);
    }

    let all_patients = admin
        .users_api()
        .list_users(UserQuery::role(Role::Patient))
        .await?;
    let assignments = staff_api.list_assignments().await?;
    println!(
        "Unassigned patients: {}",
        unassigned_patients(&all_patients, &assignments).len()
    );
    Ok(())
}

fn run_session(store: &SessionStore, action: SessionAction) -> Result<()> {
    match action {
        SessionAction::Show => match store.load()? {
            Some(s) => println!("{} <{}> role={} id={}", s.name, s.email, s.role, s.id),
            None => println!("not signed in"),
        },
        SessionAction::Clear => {
            store.clear()?;
            println!("session cleared");
        }
    }
    Ok(())
}

fn check_config(config: &AppConfig, module_cfg: &ClinicAdminConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    ClinicAdmin::from_config(module_cfg)?;
    println!("Configuration check passed");
    println!("home_dir: {}", config.home_dir);
    println!("{}", serde_json::to_string_pretty(module_cfg)?);
    Ok(())
}

fn print_page<T>(page: &Page<T>, row: fn(&T)) {
    for item in &page.items {
        row(item);
    }
    println!(
        "page {}/{} ({} total)",
        page.page, page.total_pages, page.total_items
    );
}

fn print_user(u: &User) {
    println!("{:<34} {:<8} {} <{}>", u.id, u.role, u.name, u.email);
}

fn print_examination(e: &Examination) {
    let patient = e.pasien.as_ref().map(|p| p.name.as_str()).unwrap_or("-");
    println!(
        "{:<34} {} skor={:<6} {:<20} {}",
        e.id, e.tanggal, e.skor, patient, e.lama_sakit
    );
}

fn print_stats(s: &DashboardStats) {
    println!("total users:         {}", s.total_users);
    println!("  admins:            {}", s.admin_count);
    println!("  staff:             {}", s.staff_count);
    println!("  patients:          {}", s.patient_count);
    println!("active staff:        {}", s.active_staff);
    println!("total examinations:  {}", s.total_examinations);
    println!("today examinations:  {}", s.today_examinations);
}
