use crate::seed::{Seeder, run_seeder};
use crate::seeds::{course::CourseSeeder, enrollment::EnrollmentSeeder, user::UserSeeder};
use migration::{Migrator, MigratorTrait};
use util::config;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    if let Err(e) = common::logger::init_logger(&config::log_level(), None) {
        eprintln!("failed to initialise logger: {e}");
    }

    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            log::error!("cannot open database {}: {e}", config::database_path());
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        log::error!("migrations failed: {e}");
        std::process::exit(1);
    }

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(CourseSeeder), "Course"),
        (Box::new(EnrollmentSeeder), "Enrollment"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
