use cafe_api::domain::cafe::TABLE_NAME;
use cafe_api::infra::{Config, StoreBackend};
use cafe_api::storage;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Requires env vars:\n\
           CAFE_API_KEY, and DATABASE_URL unless CAFE_STORE=memory\n\
         Optional:\n\
           CAFE_STORE, DB_MAX_CONNECTIONS, BIND_ADDR\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    // Force-read config (nice error messages if missing)
    let config = Config::from_env()?;

    println!("> Preflight:");
    println!("  BIND_ADDR={}", config.bind_addr);
    match &config.store {
        StoreBackend::Postgres { .. } => {
            println!("  CAFE_STORE=postgres");
            println!("  DB_MAX_CONNECTIONS={}", config.max_connections);
        }
        StoreBackend::Memory => println!("  CAFE_STORE=memory (data is lost on restart)"),
    }

    let store = storage::open(&config).await?;
    store
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("Store is not reachable: {}", e))?;
    println!("  Store is reachable.");

    let cafes = store.count().await?;
    println!("  Table '{}' holds {} cafe(s).", TABLE_NAME, cafes);

    println!("> Preflight OK.");
    Ok(())
}
