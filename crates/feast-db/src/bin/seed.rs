//! # Seed Data Generator
//!
//! Populates the database with a development menu.
//!
//! ## Usage
//! ```bash
//! # Seed ./feast_dev.db
//! cargo run -p feast-db --bin seed
//!
//! # Specify database path
//! cargo run -p feast-db --bin seed -- --db ./data/feast.db
//! ```
//!
//! Every category gets a handful of items. One dessert is seeded as
//! unavailable so the "sold out" path can be tried in the UI.

use chrono::{Duration, Utc};
use std::env;

use feast_core::{Category, FoodItem};
use feast_db::{Database, DbConfig};
use uuid::Uuid;

/// (category, name, description, price in cents)
const MENU: &[(Category, &str, &str, i64)] = &[
    (Category::Starters, "Peri-Peri Chicken Livers", "Pan-fried with garlic bread", 6500),
    (Category::Starters, "Calamari Strips", "Lightly dusted, lemon aioli", 7200),
    (Category::Starters, "Chicken Wings", "Six wings, sticky BBQ glaze", 6900),
    (Category::Mains, "Boerewors and Pap", "With tomato and onion relish", 9500),
    (Category::Mains, "Bunny Chow", "Quarter loaf, mutton curry", 11000),
    (Category::Mains, "Grilled Hake", "Served with chips and salad", 12500),
    (Category::Mains, "Beef Sosaties", "Apricot-glazed skewers", 13500),
    (Category::Desserts, "Malva Pudding", "Warm, with custard", 5500),
    (Category::Desserts, "Milk Tart", "Cinnamon-dusted slice", 4500),
    (Category::Desserts, "Koeksisters", "Two syrup-soaked plaits", 3500),
    (Category::Beverages, "Rooibos Iced Tea", "Homemade, lightly sweetened", 3000),
    (Category::Beverages, "Fresh Orange Juice", "Freshly squeezed", 3500),
    (Category::Beverages, "Cream Soda Float", "With vanilla ice cream", 4000),
    (Category::Alcohol, "Craft Lager", "340ml local brew", 4500),
    (Category::Alcohol, "Chenin Blanc", "Glass, Stellenbosch", 6500),
    (Category::Burgers, "Classic Beef Burger", "200g patty, house sauce", 8900),
    (Category::Burgers, "Chicken Burger", "Flame-grilled fillet", 8200),
    (Category::Burgers, "Veggie Burger", "Chickpea patty, avo", 7900),
];

const UNAVAILABLE: &str = "Koeksisters";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./feast_dev.db");

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
                println!("Feast Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./feast_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Feast Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.food_items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} menu items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = Utc::now();
    let mut generated = 0;

    for (index, (category, name, description, price_cents)) in MENU.iter().enumerate() {
        // Stagger timestamps so "newest first" has a stable order
        let created_at = start - Duration::minutes(index as i64);

        let item = FoodItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price_cents: *price_cents,
            category: *category,
            image_url: None,
            available: *name != UNAVAILABLE,
            created_at,
            updated_at: created_at,
        };

        if let Err(e) = db.food_items().insert(&item).await {
            eprintln!("Failed to insert {}: {}", item.name, e);
            continue;
        }

        generated += 1;
    }

    println!();
    println!("✓ Seeded {} menu items", generated);
    for category in Category::ALL {
        let count = MENU.iter().filter(|(c, ..)| *c == category).count();
        println!("  {:<10} {}", category.as_str(), count);
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
