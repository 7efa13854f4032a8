//! Runtime configuration sourced from environment variables.
//!
//! | Variable                | Default                   |
//! |-------------------------|---------------------------|
//! | `LEDGER_ADDR`           | `127.0.0.1:3000`          |
//! | `LEDGER_STORAGE`        | `sqlite` (or `file`)      |
//! | `DATABASE_URL`          | `sqlite:ledger.db`        |
//! | `LEDGER_DATA_DIR`       | `~/Documents/Daily Ledger`|
//! | `LEDGER_STATIC_DIR`     | `static`                  |
//! | `LEDGER_CORS_ORIGIN`    | `http://localhost:8080`   |
//! | `LEDGER_ADMIN_PASSWORD` | `admin`                   |

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Which storage backend to start against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageChoice {
    Sqlite,
    File,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub storage: StorageChoice,
    pub database_url: String,
    /// Overrides the default file-store directory when set
    pub data_dir: Option<PathBuf>,
    pub static_dir: PathBuf,
    pub cors_origin: String,
    /// Password given to the bootstrap admin account on a fresh install
    pub admin_password: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let addr = match std::env::var("LEDGER_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid LEDGER_ADDR: {}", raw))?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let storage = match std::env::var("LEDGER_STORAGE").as_deref() {
            Err(_) | Ok("sqlite") => StorageChoice::Sqlite,
            Ok("file") | Ok("csv") => StorageChoice::File,
            Ok(other) => bail!("Unknown LEDGER_STORAGE value: {}", other),
        };

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:ledger.db".to_string());

        let data_dir = std::env::var("LEDGER_DATA_DIR").ok().map(PathBuf::from);

        let static_dir = std::env::var("LEDGER_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let cors_origin = std::env::var("LEDGER_CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let admin_password =
            std::env::var("LEDGER_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());

        Ok(Self {
            addr,
            storage,
            database_url,
            data_dir,
            static_dir,
            cors_origin,
            admin_password,
        })
    }
}
