//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` and supports the standard SeaORM subcommands
//! (`up`, `down`, `status`, `fresh`, `refresh`, `reset`). Pass `-v` for
//! verbose logs; the CLI installs its own subscriber.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(migration::Migrator).await;
}
