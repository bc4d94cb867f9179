pub mod models;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use std::path::Path;

use crate::state::DbPool;

const MIGRATIONS: &[(&str, &str)] = &[(
    "001_initial",
    include_str!("../../migrations/001_initial.sql"),
)];

/// Sample menu inserted by [`seed_dishes`] when the catalog is empty:
/// (name, description, price, category, image_url, ingredients, preparation, allergens).
const SAMPLE_DISHES: &[(
    &str,
    &str,
    f64,
    &str,
    &str,
    &str,
    &str,
    &str,
)] = &[
    (
        "Steak Frites",
        "Classic juicy steak served with crispy golden fries and a side of béarnaise sauce.",
        25.99,
        "meat",
        "https://images.unsplash.com/photo-1546964124-6cce460f09ef?auto=format&fit=crop&w=500&q=60",
        "Beef sirloin, potatoes, butter, salt, pepper, béarnaise sauce (eggs, butter, vinegar, tarragon)",
        "Steak grilled to perfection, potatoes double-fried for extra crispiness.",
        "Eggs, Dairy (butter in béarnaise)",
    ),
    (
        "Grilled Salmon",
        "Healthy and delicious grilled salmon fillet seasoned with lemon and herbs, served with asparagus.",
        22.50,
        "fish",
        "https://images.unsplash.com/photo-1519708227418-c8fd9a32b7a2?auto=format&fit=crop&w=500&q=60",
        "Salmon fillet, lemon, dill, olive oil, asparagus, salt, pepper",
        "Salmon grilled over medium heat until flaky, asparagus blanched and lightly grilled.",
        "Fish",
    ),
    (
        "Spaghetti Carbonara",
        "A classic Roman pasta dish with eggs, Pecorino Romano cheese, guanciale, and black pepper.",
        18.00,
        "meat",
        "https://images.unsplash.com/photo-1588013273468-31508b24234d?auto=format&fit=crop&w=500&q=60",
        "Spaghetti, eggs, Pecorino Romano cheese, guanciale (cured pork cheek), black pepper",
        "Pasta cooked al dente, mixed with a creamy sauce of eggs and cheese, and crispy guanciale.",
        "Eggs, Dairy (cheese), Gluten (pasta)",
    ),
    (
        "Seafood Paella",
        "Traditional Spanish rice dish loaded with shrimp, mussels, clams, and calamari, simmered in a saffron-infused broth.",
        28.75,
        "fish",
        "https://images.unsplash.com/photo-1511910849014-75953593a230?auto=format&fit=crop&w=500&q=60",
        "Bomba rice, shrimp, mussels, clams, calamari, saffron, tomatoes, bell peppers, peas, garlic, olive oil",
        "Rice and seafood simmered slowly in a large paella pan with broth and seasonings.",
        "Shellfish (shrimp, mussels, clams), Fish (calamari)",
    ),
];

pub fn create_pool(db_path: &Path) -> anyhow::Result<DbPool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let manager = SqliteConnectionManager::file(db_path);
    let pool = Pool::builder().max_size(8).build(manager)?;

    // Configure SQLite for performance
    let conn = pool.get()?;
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        ",
    )?;

    Ok(pool)
}

pub fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    let conn = pool.get()?;

    // Create migrations tracking table
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    for (name, sql) in MIGRATIONS {
        let already_applied: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM schema_version WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;

        if !already_applied {
            tracing::info!("Applying migration: {}", name);
            conn.execute_batch(sql)?;
            conn.execute(
                "INSERT INTO schema_version (name) VALUES (?1)",
                params![name],
            )?;
        }
    }

    tracing::info!("Database migrations complete");
    Ok(())
}

/// Insert the sample menu, but only into an empty catalog. Re-running is a
/// no-op once any dish exists, seeded or not.
pub fn seed_dishes(pool: &DbPool) -> anyhow::Result<()> {
    let conn = pool.get()?;

    let count: i64 = conn.query_row("SELECT COUNT(*) FROM dishes", [], |row| row.get(0))?;
    if count > 0 {
        tracing::debug!("Dish catalog already has {} rows, seeding skipped", count);
        return Ok(());
    }

    let mut stmt = conn.prepare(
        "INSERT INTO dishes (name, description, price, category, image_url, ingredients, preparation, allergens)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    for (name, description, price, category, image_url, ingredients, preparation, allergens) in
        SAMPLE_DISHES
    {
        stmt.execute(params![
            name,
            description,
            price,
            category,
            image_url,
            ingredients,
            preparation,
            allergens
        ])?;
    }

    tracing::info!("Seeded {} sample dishes", SAMPLE_DISHES.len());
    Ok(())
}
