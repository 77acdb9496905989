use anyhow::Result;

use spendsense::{cli, config::Config, db::Database, logging};

fn main() -> Result<()> {
    logging::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::from_env()?;
    let mut db = Database::open(&config.db_path)?;
    cli::run(&args, &mut db, &config)
}
