//! Catalog Store
//! Mission: Persist the product collection with SQLite

use crate::catalog::models::{Product, ProductDraft};
use anyhow::{Context, Result};
use parking_lot::Mutex; // Faster than std::sync::Mutex
use rusqlite::{params, Connection};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Sentinel category treated as "no filter".
pub const ALL_CATEGORIES: &str = "All";

const SCHEMA_SQL: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;

CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    category TEXT NOT NULL,
    image TEXT NOT NULL,
    price REAL
) WITHOUT ROWID;

CREATE INDEX IF NOT EXISTS idx_products_category ON products(category);
"#;

/// Catalog operation failures, mapped to responses at the API boundary.
#[derive(Debug)]
pub enum CatalogError {
    /// Missing required fields or wrong body shape; the message names
    /// the offending fields to aid legitimate callers.
    Validation(String),
    /// No product with the given id.
    NotFound,
    /// The persistent store failed; full detail stays server-side.
    Store(anyhow::Error),
}

impl CatalogError {
    pub fn missing_fields(index: Option<usize>, fields: &[&str]) -> Self {
        let message = match index {
            Some(i) => format!(
                "Product at index {} is missing required fields: {}",
                i,
                fields.join(", ")
            ),
            None => format!("Product is missing required fields: {}", fields.join(", ")),
        };
        CatalogError::Validation(message)
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        CatalogError::Store(err.into())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        CatalogError::Store(err)
    }
}

/// SQLite-backed product collection.
///
/// The handle is created once at startup and injected everywhere it is
/// needed; there is no implicit global. A failed open is fatal to
/// process start.
pub struct CatalogStore {
    conn: Arc<Mutex<Connection>>,
}

impl CatalogStore {
    /// Open (or create) the catalog database and apply the schema.
    pub fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open catalog database at {}", db_path))?;

        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to apply catalog schema")?;

        info!("📦 Catalog store ready at {}", db_path);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Full collection in store order. No ordering guarantee.
    pub fn list_all(&self) -> Result<Vec<Product>, CatalogError> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT id, name, description, category, image, price FROM products")?;

        let products = stmt
            .query_map([], row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    /// Exact-match category filter; the `"All"` sentinel returns the
    /// whole collection. An empty result is not an error.
    pub fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        if category == ALL_CATEGORIES {
            return self.list_all();
        }

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, name, description, category, image, price FROM products
             WHERE category = ?1",
        )?;

        let products = stmt
            .query_map(params![category], row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    /// Case-insensitive substring search over name, description, and
    /// category. A product matching several fields appears once.
    ///
    /// Filtering happens in Rust rather than via SQL LIKE so `%`/`_`
    /// in queries stay literal, and the empty string matches every
    /// product (it is a substring of everything).
    pub fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let needle = query.to_lowercase();
        let products = self
            .list_all()?
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .collect();

        Ok(products)
    }

    /// Insert one product and return its store-assigned id.
    pub fn insert_one(&self, draft: &ProductDraft) -> Result<String, CatalogError> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(CatalogError::missing_fields(None, &missing));
        }

        let id = Uuid::new_v4().to_string();
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO products (id, name, description, category, image, price)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                draft.name,
                draft.description,
                draft.category,
                draft.image,
                draft.price,
            ],
        )?;

        debug!("Inserted product {} ({})", draft.name, id);

        Ok(id)
    }

    /// Insert a batch of products, all-or-nothing.
    ///
    /// Every element is validated before anything is written; a single
    /// invalid element rejects the whole batch. The writes share one
    /// transaction so a mid-batch store failure leaves nothing behind.
    pub fn insert_many(&self, drafts: &[ProductDraft]) -> Result<usize, CatalogError> {
        for (index, draft) in drafts.iter().enumerate() {
            let missing = draft.missing_fields();
            if !missing.is_empty() {
                return Err(CatalogError::missing_fields(Some(index), &missing));
            }
        }

        let mut conn = self.conn.lock();
        let tx = conn.transaction().map_err(CatalogError::from)?;
        for draft in drafts {
            tx.execute(
                "INSERT INTO products (id, name, description, category, image, price)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    Uuid::new_v4().to_string(),
                    draft.name,
                    draft.description,
                    draft.category,
                    draft.image,
                    draft.price,
                ],
            )?;
        }
        tx.commit().map_err(CatalogError::from)?;

        debug!("Inserted batch of {} products", drafts.len());

        Ok(drafts.len())
    }

    /// Full-document replace of every field except the id. No upsert.
    pub fn update_by_id(&self, id: &str, draft: &ProductDraft) -> Result<(), CatalogError> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(CatalogError::missing_fields(None, &missing));
        }

        let conn = self.conn.lock();
        let rows = conn.execute(
            "UPDATE products SET name = ?2, description = ?3, category = ?4, image = ?5, price = ?6
             WHERE id = ?1",
            params![
                id,
                draft.name,
                draft.description,
                draft.category,
                draft.image,
                draft.price,
            ],
        )?;

        if rows == 0 {
            return Err(CatalogError::NotFound);
        }
        Ok(())
    }

    pub fn delete_by_id(&self, id: &str) -> Result<(), CatalogError> {
        let conn = self.conn.lock();
        let rows = conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;

        if rows == 0 {
            return Err(CatalogError::NotFound);
        }

        debug!("Deleted product {}", id);
        Ok(())
    }

    /// Seed the original demo catalog when the collection is empty.
    pub fn seed_sample_products(&self) -> Result<(), CatalogError> {
        let count: i64 = {
            let conn = self.conn.lock();
            conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?
        };

        if count == 0 {
            let inserted = self.insert_many(&sample_products())?;
            info!("🌱 Seeded {} sample products", inserted);
        }

        Ok(())
    }
}

fn row_to_product(row: &rusqlite::Row) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        image: row.get(4)?,
        price: row.get(5)?,
    })
}

fn sample_products() -> Vec<ProductDraft> {
    let entries = [
        (
            "Smartphone",
            "Latest model smartphone with advanced features",
            "Electronics",
            699.99,
        ),
        (
            "Laptop",
            "High-performance laptop for work and gaming",
            "Electronics",
            1299.99,
        ),
        ("T-Shirt", "Comfortable cotton t-shirt", "Clothing", 19.99),
        ("Jeans", "Stylish denim jeans", "Clothing", 49.99),
        ("Novel", "Bestselling fiction novel", "Books", 14.99),
        ("Cookbook", "Delicious recipes for home cooking", "Books", 24.99),
    ];

    entries
        .iter()
        .map(|(name, description, category, price)| ProductDraft {
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            image: format!("https://via.placeholder.com/300x200?text={}", name),
            price: Some(*price),
        })
        .collect()
}
