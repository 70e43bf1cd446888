//! Table setup and fixture data for a drink store
//!
//! `CoffeeHouse` only reads. Creating, dropping and filling the two tables
//! is the job of whoever owns the store (tests, the `schema` CLI command).
//! Each function here opens and closes its own connection.

use sqlx::{AnyConnection, Connection};
use tracing::{debug, info};

use crate::error::Result;
use crate::house::{release, CoffeeHouse};

const SQLITE_SCHEMA: &str = include_str!("sqlite.sql");
const POSTGRES_SCHEMA: &str = include_str!("postgres.sql");

/// Categories of the demo menu as (id, name)
pub const DEMO_CATEGORIES: &[(i64, &str)] = &[(1, "HOT_TEA"), (2, "COFFEE"), (3, "CHOCOLATE")];

/// Products of the demo menu as (name, category id, price), in insertion order
pub const DEMO_PRODUCTS: &[(&str, i64, i64)] = &[
    ("Espresso", 2, 790),
    ("Jasmine", 1, 590),
    ("Cappuccino", 2, 1450),
    ("Americano", 2, 1290),
    ("Earl Grey", 1, 590),
    ("Caffe Latte", 2, 1450),
    ("Classic hot chocolate", 3, 1390),
];

/// Create `products` and `categories` if they do not exist yet
pub async fn create(house: &CoffeeHouse) -> Result<()> {
    let mut conn = house.connect().await?;
    let outcome = create_tables(&mut conn).await;
    release(conn, outcome).await?;
    info!("schema created");
    Ok(())
}

/// Drop both tables if present
pub async fn drop(house: &CoffeeHouse) -> Result<()> {
    let mut conn = house.connect().await?;
    let outcome = drop_tables(&mut conn).await;
    release(conn, outcome).await?;
    info!("schema dropped");
    Ok(())
}

/// Insert the demo menu (three categories, seven products)
pub async fn seed_demo_menu(house: &CoffeeHouse) -> Result<()> {
    let mut conn = house.connect().await?;
    let outcome = seed(&mut conn).await;
    release(conn, outcome).await?;
    info!(
        categories = DEMO_CATEGORIES.len(),
        products = DEMO_PRODUCTS.len(),
        "demo menu seeded"
    );
    Ok(())
}

pub async fn insert_category(house: &CoffeeHouse, id: i64, name: &str) -> Result<()> {
    let mut conn = house.connect().await?;
    let outcome = insert_category_row(&mut conn, id, name).await;
    release(conn, outcome).await
}

pub async fn insert_product(
    house: &CoffeeHouse,
    name: &str,
    category_id: i64,
    price: i64,
) -> Result<()> {
    let mut conn = house.connect().await?;
    let outcome = insert_product_row(&mut conn, name, category_id, price).await;
    release(conn, outcome).await
}

async fn create_tables(conn: &mut AnyConnection) -> Result<()> {
    let ddl = match conn.backend_name() {
        "PostgreSQL" => POSTGRES_SCHEMA,
        _ => SQLITE_SCHEMA,
    };
    debug!(backend = conn.backend_name(), "creating tables");
    sqlx::raw_sql(ddl).execute(&mut *conn).await?;
    Ok(())
}

async fn drop_tables(conn: &mut AnyConnection) -> Result<()> {
    sqlx::query("DROP TABLE IF EXISTS products")
        .execute(&mut *conn)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS categories")
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn seed(conn: &mut AnyConnection) -> Result<()> {
    let mut tx = conn.begin().await?;
    for (name, category_id, price) in DEMO_PRODUCTS {
        insert_product_row(&mut tx, name, *category_id, *price).await?;
    }
    for (id, name) in DEMO_CATEGORIES {
        insert_category_row(&mut tx, *id, name).await?;
    }
    tx.commit().await?;
    Ok(())
}

async fn insert_category_row(conn: &mut AnyConnection, id: i64, name: &str) -> Result<()> {
    sqlx::query("INSERT INTO categories (drink_category_id, drink_category_name) VALUES ($1, $2)")
        .bind(id)
        .bind(name)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn insert_product_row(
    conn: &mut AnyConnection,
    name: &str,
    category_id: i64,
    price: i64,
) -> Result<()> {
    sqlx::query("INSERT INTO products (drink_name, drink_category_id, price) VALUES ($1, $2, $3)")
        .bind(name)
        .bind(category_id)
        .bind(price)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
