use valorant_stats_api::config::Config;
use valorant_stats_api::db::PgPlayerStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    let store = PgPlayerStore::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    store
        .init_schema()
        .await
        .expect("Failed to create players table");

    println!("Initialized the database.");
}
