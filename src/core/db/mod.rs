mod bin;
mod token;

use std::path::Path;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

pub use bin::{Bin, BinRepository, BinStats, BinUpdate, FULL_LEVEL, HALF_LEVEL, NewBin};
pub use token::NotifyTokenRepository;

/// Client for the bin monitoring store.
///
/// Constructed once at startup and passed to whatever needs it; there is no
/// ambient global instance.
#[derive(Debug, Clone)]
pub struct BinDb {
    pool: SqlitePool,
}

impl BinDb {
    pub async fn new<P: AsRef<Path>>(db_file: P) -> anyhow::Result<Self> {
        let connect_opts = SqliteConnectOptions::new()
            .filename(db_file.as_ref())
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_opts)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub(super) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
