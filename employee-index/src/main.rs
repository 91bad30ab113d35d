use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

use employee_index::runner::{
    report_count, report_delete, report_facet, report_index, report_search, run_sequence,
    COLLECTION_3545, PRESSNAVE_COLLECTION,
};
use employee_index::{Dependencies, IndexingError, Settings};
use employee_index_shared::DEPARTMENT_FIELD;

#[derive(Parser)]
#[command(name = "employee-index")]
#[command(about = "Index employee records into Solr collections and query them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Solr base URL (overrides SOLR_URL)
    #[arg(long, global = true)]
    solr_url: Option<String>,

    /// Employee CSV file (overrides EMPLOYEE_CSV_PATH)
    #[arg(long, global = true)]
    csv_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full sequence against both collections (default)
    Run,
    /// Index the CSV file into a collection
    Index {
        #[arg(long)]
        collection: String,
        /// Column to leave out of every record
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Count the employees in a collection
    Count {
        #[arg(long)]
        collection: String,
    },
    /// Find employees whose field equals a value
    Search {
        #[arg(long)]
        collection: String,
        #[arg(long)]
        field: String,
        #[arg(long)]
        value: String,
    },
    /// Delete an employee by identifier
    Delete {
        #[arg(long)]
        collection: String,
        #[arg(long)]
        id: String,
    },
    /// Count employees per distinct field value
    Facet {
        #[arg(long)]
        collection: String,
        #[arg(long, default_value = DEPARTMENT_FIELD)]
        field: String,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run(cli: Cli) -> Result<(), IndexingError> {
    let settings = Settings::from_env()?.with_overrides(cli.solr_url, cli.csv_path);
    let deps = Dependencies::new(settings);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let pressnave = deps.employee_index(PRESSNAVE_COLLECTION)?;
            let other = deps.employee_index(COLLECTION_3545)?;
            Dependencies::check_health(&pressnave).await;
            Dependencies::check_health(&other).await;

            run_sequence(&pressnave, &other).await;
        }
        Commands::Index {
            collection,
            exclude,
        } => {
            let index = deps.employee_index(&collection)?;
            report_index(&index, exclude.as_deref()).await;
        }
        Commands::Count { collection } => {
            report_count(&deps.employee_index(&collection)?).await;
        }
        Commands::Search {
            collection,
            field,
            value,
        } => {
            report_search(&deps.employee_index(&collection)?, &field, &value).await;
        }
        Commands::Delete { collection, id } => {
            report_delete(&deps.employee_index(&collection)?, &id).await;
        }
        Commands::Facet { collection, field } => {
            report_facet(&deps.employee_index(&collection)?, &field).await;
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Employee index failed to start");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
