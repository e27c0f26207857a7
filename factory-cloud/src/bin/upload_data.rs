//! upload-data: load cooks and dishes from a JSON file or a spreadsheet

use std::path::PathBuf;

use clap::Parser;
use factory_cloud::loader::{self, MissingCookPolicy};
use factory_cloud::{BoxError, Config, db, logger};

#[derive(Debug, Parser)]
#[command(name = "upload-data", version, about = "Upload cooks and dishes to the factory store")]
struct Args {
    /// JSON file with `cooks` and/or `dishes` arrays, or a workbook
    /// (.xlsx, .xlsm, .xls, .ods) with `cooks` and `dishes` sheets
    #[arg(short, long)]
    file: PathBuf,

    /// How to treat a dish whose default cook cannot be found
    #[arg(long, value_enum, default_value_t = MissingCookPolicy::Unassigned)]
    on_missing_cook: MissingCookPolicy,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenvy::dotenv();
    logger::init_tracing();

    let args = Args::parse();

    // Fail on an unreadable file before touching the database
    let document = loader::read_document(&args.file)?;
    tracing::info!(
        file = %args.file.display(),
        cooks = document.cooks.len(),
        dishes = document.dishes.len(),
        "Upload file parsed"
    );

    let config = Config::from_env()?;
    let pool = db::connect(&config.database_url, config.db_max_connections).await?;

    let report = loader::upload(&pool, &document, args.on_missing_cook).await;
    print!("{report}");

    pool.close().await;
    Ok(())
}
