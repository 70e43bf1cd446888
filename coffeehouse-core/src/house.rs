//! Category lookups against the products/categories store
//!
//! Every call opens its own connection and closes it before returning,
//! whether the query succeeded or not. Nothing is cached between calls.

use std::fmt;

use sqlx::any::install_default_drivers;
use sqlx::{AnyConnection, Connection, Row};
use tracing::{debug, warn};
use url::Url;

use crate::config::StoreConfig;
use crate::drink::{unique_by_price, Drink};
use crate::error::{CoffeeError, Result};

const DRINKS_BY_CATEGORY: &str = r#"
    SELECT drink_name, drink_category_name, price
    FROM products
    JOIN categories ON products.drink_category_id = categories.drink_category_id
    WHERE drink_category_name = $1
"#;

/// Read-only view over a drink store
#[derive(Clone)]
pub struct CoffeeHouse {
    url: String,
}

impl CoffeeHouse {
    /// Build a handle for the store at `database_url`.
    ///
    /// Credentials are merged into network URLs (`postgres://...`) when
    /// non-empty. SQLite URLs take no credentials and they are ignored.
    /// No connection is made here.
    pub fn new(database_url: &str, user: &str, password: &str) -> Result<Self> {
        install_default_drivers();

        Ok(Self {
            url: with_credentials(database_url, user, password)?,
        })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Self::new(&config.database_url, &config.user, &config.password)
    }

    /// Unique drinks in `category`, cheapest first.
    ///
    /// The category name must match exactly. Products pointing at a
    /// category id with no row are left out. An unknown or empty category
    /// yields an empty list, not an error.
    ///
    /// Equally priced drinks keep the order the store returned them in. On
    /// SQLite that is insertion order; other backends make no promise.
    ///
    /// The schema allows NULL names and prices. A single such row in the
    /// category fails the whole call with [`CoffeeError::Database`].
    #[tracing::instrument(skip(self))]
    pub async fn list_drinks_by_category(&self, category: &str) -> Result<Vec<Drink>> {
        let mut conn = self.connect().await?;
        let fetched = fetch_category(&mut conn, category).await;
        let drinks = release(conn, fetched).await?;

        let fetched_rows = drinks.len();
        let unique = unique_by_price(drinks);
        debug!(fetched_rows, unique = unique.len(), "resolved category");
        Ok(unique)
    }

    pub(crate) async fn connect(&self) -> Result<AnyConnection> {
        debug!(url = %redact(&self.url), "opening connection");
        Ok(AnyConnection::connect(&self.url).await?)
    }
}

impl fmt::Debug for CoffeeHouse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoffeeHouse")
            .field("url", &redact(&self.url))
            .finish()
    }
}

async fn fetch_category(conn: &mut AnyConnection, category: &str) -> Result<Vec<Drink>> {
    let rows = sqlx::query(DRINKS_BY_CATEGORY)
        .bind(category)
        .fetch_all(&mut *conn)
        .await?;

    rows.iter()
        .map(|row| {
            Ok(Drink {
                name: row.try_get("drink_name")?,
                category: row.try_get("drink_category_name")?,
                price: row.try_get("price")?,
            })
        })
        .collect()
}

/// Close `conn` and hand back `outcome`.
///
/// A close failure only surfaces when the work itself succeeded; otherwise
/// the work error wins and the close failure is logged.
pub(crate) async fn release<T>(conn: AnyConnection, outcome: Result<T>) -> Result<T> {
    let closed = conn.close().await;
    debug!(ok = closed.is_ok(), "connection released");

    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(err)) => Err(err.into()),
        (Err(err), closed) => {
            if let Err(close_err) = closed {
                warn!(error = %close_err, "failed to close connection after query error");
            }
            Err(err)
        }
    }
}

fn with_credentials(database_url: &str, user: &str, password: &str) -> Result<String> {
    if database_url.starts_with("sqlite:") {
        if !user.is_empty() || !password.is_empty() {
            debug!("sqlite store takes no credentials, ignoring user/password");
        }
        return Ok(database_url.to_owned());
    }

    let mut url = Url::parse(database_url)
        .map_err(|e| CoffeeError::invalid_url(database_url, e.to_string()))?;

    if !user.is_empty() {
        url.set_username(user)
            .map_err(|()| CoffeeError::invalid_url(database_url, "URL cannot carry a username"))?;
    }
    if !password.is_empty() {
        url.set_password(Some(password))
            .map_err(|()| CoffeeError::invalid_url(database_url, "URL cannot carry a password"))?;
    }

    Ok(url.into())
}

fn redact(database_url: &str) -> String {
    match Url::parse(database_url) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("***"));
            url.into()
        }
        _ => database_url.to_owned(),
    }
}
