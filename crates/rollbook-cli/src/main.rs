use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use rollbook_cli::client::RollbookClient;
use rollbook_cli::seeder::{self, SeedConfig};
use rollbook_core::Response;
use rollbook_models::{ClassId, PersonId, SchoolId};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rollbook-cli")]
#[command(about = "Rollbook CLI - Talk to a running Rollbook server", long_about = None)]
struct Cli {
    /// Server address
    #[arg(long, default_value = "127.0.0.1:8090")]
    addr: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a school
    CreateSchool {
        name: String,
    },
    /// Create a person with no role yet
    CreatePerson {
        name: String,
    },
    /// Create a class; the teacher becomes a teacher if not already
    CreateClass {
        name: String,

        /// School the class belongs to
        #[arg(long)]
        school: i64,

        /// Id of the teaching person
        #[arg(long)]
        teacher: i64,
    },
    /// Enroll a person in a class as a student
    AddStudent {
        #[arg(long)]
        student: i64,

        #[arg(long)]
        class: i64,
    },
    /// Show a person and their classes
    Whoami {
        id: i64,
    },
    /// Fill the server with fake schools, teachers, classes and students
    Seed {
        /// Number of schools to create
        #[arg(short = 's', long, default_value = "3")]
        schools: usize,

        /// Number of teachers per school
        #[arg(long, default_value = "4")]
        teachers: usize,

        /// Number of classes per teacher
        #[arg(long, default_value = "2")]
        classes: usize,

        /// Number of students per school
        #[arg(long, default_value = "30")]
        students: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one command; `Ok(false)` means the server answered `status: false`.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut client = RollbookClient::connect(&cli.addr).await?;

    let response = match cli.command {
        Commands::CreateSchool { name } => client.create_school(&name).await?,
        Commands::CreatePerson { name } => client.create_person(&name).await?,
        Commands::CreateClass {
            name,
            school,
            teacher,
        } => {
            client
                .create_class(&name, SchoolId::new(school), PersonId::new(teacher))
                .await?
        }
        Commands::AddStudent { student, class } => {
            client
                .add_student(PersonId::new(student), ClassId::new(class))
                .await?
        }
        Commands::Whoami { id } => client.who_am_i(PersonId::new(id)).await?,
        Commands::Seed {
            schools,
            teachers,
            classes,
            students,
        } => {
            let config = SeedConfig::new(schools)
                .with_teachers(teachers, classes)
                .with_students(students);
            seeder::seed_all(&mut client, config).await?;
            return Ok(true);
        }
    };

    print_response(&response)?;
    Ok(response.status)
}

fn print_response(response: &Response) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
