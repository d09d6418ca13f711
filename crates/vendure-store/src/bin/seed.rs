//! # Catalog Seeder
//!
//! Installs the default menu into a register database.
//!
//! ## Usage
//! ```bash
//! # Seed ./vendure_dev.db (default)
//! cargo run -p vendure-store --bin seed
//!
//! # Specify database path
//! cargo run -p vendure-store --bin seed -- --db ./data/vendure.db
//!
//! # Overwrite an existing catalog with the default menu
//! cargo run -p vendure-store --bin seed -- --reset
//! ```

use std::env;

use tracing_subscriber::EnvFilter;
use vendure_store::seed::default_catalog;
use vendure_store::{SqliteConfig, SqliteStore, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,vendure=debug,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./vendure_dev.db");
    let mut reset = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--reset" | "-r" => reset = true,
            "--help" | "-h" => {
                println!("Vendure POS Catalog Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./vendure_dev.db)");
                println!("  -r, --reset        Replace an existing catalog with the default menu");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Vendure POS Catalog Seeder");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let backend = SqliteStore::connect(SqliteConfig::new(&db_path)).await?;
    let store = Store::new(backend);

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if reset {
        let menu = default_catalog();
        store.catalog().save(&menu).await?;
        println!("✓ Catalog reset to {} default products", menu.len());
        return Ok(());
    }

    // load() seeds a missing catalog and leaves an existing one alone
    let products = store.catalog().load().await?;
    println!("✓ Catalog has {} products", products.len());
    for product in &products {
        println!("  {:>3}  {:<28} {}", product.id, product.name, product.price().format_with("₱"));
    }

    Ok(())
}
