use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;
use taskhub_cli::admin::{self, NewOrganization};
use taskhub_cli::seeder::{self, SeedConfig, UsersPerOrganization};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "taskhub-cli")]
#[command(about = "Taskhub CLI - Administrative tools for Taskhub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an organization together with its first OWNER account
    CreateOrganization {
        /// Organization name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Optional organization description
        #[arg(short = 'd', long)]
        description: Option<String>,

        /// Owner's display name
        #[arg(long)]
        owner_name: Option<String>,

        /// Owner's email address
        #[arg(long)]
        owner_email: Option<String>,

        /// Owner's password (will be prompted securely if not provided)
        #[arg(long)]
        owner_password: Option<String>,
    },
    /// Seed the database with fake organizations, users, projects and tasks
    Seed {
        /// Number of organizations to create
        #[arg(short = 'o', long, default_value = "3")]
        organizations: usize,

        /// Number of managers per organization
        #[arg(long, default_value = "2")]
        managers: usize,

        /// Number of regular members per organization
        #[arg(long, default_value = "10")]
        members: usize,

        /// Number of projects per organization
        #[arg(short = 'p', long, default_value = "4")]
        projects: usize,

        /// Number of tasks per project
        #[arg(short = 't', long, default_value = "20")]
        tasks: usize,
    },
    /// Remove all seeded data (accounts under the seed email domain)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> CliResult {
    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .map_err(|e| format!("Failed to connect to database: {}", e))?;

    match command {
        Commands::CreateOrganization {
            name,
            description,
            owner_name,
            owner_email,
            owner_password,
        } => {
            handle_create_organization(
                &pool,
                name,
                description,
                owner_name,
                owner_email,
                owner_password,
            )
            .await
        }
        Commands::Seed {
            organizations,
            managers,
            members,
            projects,
            tasks,
        } => {
            let config = SeedConfig::new(organizations)
                .with_users(UsersPerOrganization { managers, members })
                .with_projects(projects, tasks);
            let report = seeder::seed_all(&pool, config).await?;
            println!(
                "✅ Created {} organizations, {} users, {} projects, {} tasks",
                report.organizations, report.users, report.projects, report.tasks
            );
            Ok(())
        }
        Commands::ClearSeed => seeder::clear_all(&pool).await,
    }
}

fn prompt(value: Option<String>, label: &str) -> Result<String, dialoguer::Error> {
    match value {
        Some(value) => Ok(value),
        None => Input::new().with_prompt(label).interact_text(),
    }
}

async fn handle_create_organization(
    pool: &PgPool,
    name: Option<String>,
    description: Option<String>,
    owner_name: Option<String>,
    owner_email: Option<String>,
    owner_password: Option<String>,
) -> CliResult {
    let name = prompt(name, "Organization name")?;
    let owner_name = prompt(owner_name, "Owner name")?;
    let owner_email = prompt(owner_email, "Owner email address")?;
    let owner_password = match owner_password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Owner password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    admin::check_owner_fields(&owner_name, &owner_email, &owner_password)?;

    let (organization_id, _) = admin::create_organization_with_owner(
        pool,
        NewOrganization {
            name: &name,
            description: description.as_deref(),
            owner_name: &owner_name,
            owner_email: &owner_email,
            owner_password: &owner_password,
        },
    )
    .await?;

    println!("\n✅ Organization created successfully!");
    println!("   Organization: {} ({})", name, organization_id);
    println!("   Owner: {} <{}>", owner_name, owner_email);
    Ok(())
}
