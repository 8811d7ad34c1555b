use colored::*;
use futures::FutureExt;
use sea_orm::DatabaseConnection;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 72;

/// Applies every migration in order, printing one status line each.
///
/// Stops at the first failure and returns it.
pub async fn run_all_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    println!("{}", "Running migrations...".bold());
    let schema_manager = SchemaManager::new(db);

    for migration in <migration::Migrator as MigratorTrait>::migrations() {
        run_migration(&schema_manager, migration).await?;
    }

    println!("{}", "All migrations applied.".green());
    Ok(())
}

async fn run_migration(
    schema_manager: &SchemaManager<'_>,
    migration: Box<dyn MigrationTrait>,
) -> Result<(), DbErr> {
    let label = format!("Applying {}", migration.name().bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(label.len()));
    print!("{label}{dots} ");
    let _ = io::stdout().flush();

    let start = Instant::now();
    let result = std::panic::AssertUnwindSafe(migration.up(schema_manager))
        .catch_unwind()
        .await;

    match result {
        Ok(Ok(())) => {
            let took = format!("({:.2?})", start.elapsed()).dimmed();
            println!("{} {}", "done".green(), took);
            Ok(())
        }
        Ok(Err(e)) => {
            println!("{}", "failed".red());
            Err(e)
        }
        Err(_) => {
            println!("{}", "panicked".red());
            Err(DbErr::Migration(format!(
                "migration {} panicked",
                migration.name()
            )))
        }
    }
}
