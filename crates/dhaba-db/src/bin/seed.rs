//! # Seed Data Generator
//!
//! Populates the database with a realistic dhaba menu for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p dhaba-db --bin seed
//!
//! # Specify database path
//! cargo run -p dhaba-db --bin seed -- --db ./data/dhaba.db
//! ```

use std::env;

use dhaba_core::MenuItem;
use dhaba_db::{Database, DbConfig};
use uuid::Uuid;

/// Menu by category: (category, [(name, price in paise)]).
const MENU: &[(&str, &[(&str, i64)])] = &[
    (
        "Starters",
        &[
            ("Paneer Tikka", 18000),
            ("Veg Pakora", 9000),
            ("Chilli Paneer", 19000),
            ("Gobi Manchurian", 16000),
            ("Papad Masala", 4000),
        ],
    ),
    (
        "Main Courses",
        &[
            ("Masala Dosa", 9000),
            ("Veg Thali", 21000),
            ("Dal Tadka", 14000),
            ("Paneer Butter Masala", 22000),
            ("Veg Biryani", 19000),
            ("Chole Bhature", 13000),
            ("Aloo Gobi", 15000),
        ],
    ),
    (
        "Breads",
        &[
            ("Butter Naan", 4000),
            ("Garlic Naan", 5000),
            ("Tandoori Roti", 2500),
            ("Laccha Paratha", 4500),
        ],
    ),
    (
        "Beverages",
        &[
            ("Masala Chai", 1500),
            ("Filter Coffee", 3000),
            ("Sweet Lassi", 6000),
            ("Fresh Lime Soda", 5000),
            ("Buttermilk", 3500),
        ],
    ),
    (
        "Desserts",
        &[
            ("Gulab Jamun", 7000),
            ("Gajar Halwa", 9000),
            ("Kulfi", 8000),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./dhaba_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Dhaba POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./dhaba_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Dhaba POS Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.menu_items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} menu items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding menu...");

    let mut seeded = 0;
    for (category, items) in MENU {
        for (name, price_paise) in *items {
            let item = MenuItem {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                price_paise: *price_paise,
                category: category.to_string(),
            };

            if let Err(e) = db.menu_items().insert(&item).await {
                eprintln!("Failed to insert {}: {}", item.name, e);
                continue;
            }
            seeded += 1;
        }
    }

    println!("✓ Seeded {} menu items", seeded);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
