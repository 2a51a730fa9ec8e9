use std::future::Future;

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use super::BinDb;

/// Fill level at or above which a bin counts as full.
pub const FULL_LEVEL: i64 = 80;
/// Fill level at or above which a bin counts as half full.
pub const HALF_LEVEL: i64 = 50;

#[derive(Debug, Clone)]
pub struct Bin {
    pub id: String,
    pub location: String,
    pub bin_type: String,
    pub capacity: i64,
    pub fill_level: i64,
    pub last_updated: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewBin {
    pub location: String,
    pub bin_type: String,
    pub capacity: i64,
    pub fill_level: i64,
}

impl Default for NewBin {
    fn default() -> Self {
        Self {
            location: String::new(),
            bin_type: "General".to_string(),
            capacity: 100,
            fill_level: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BinUpdate {
    pub location: Option<String>,
    pub bin_type: Option<String>,
    pub capacity: Option<i64>,
    pub fill_level: Option<i64>,
}

/// Fleet-wide fill statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BinStats {
    pub total: u64,
    pub full: u64,
    pub half: u64,
    pub empty: u64,
}

pub trait BinRepository {
    fn add_bin(&self, bin: NewBin) -> impl Future<Output = anyhow::Result<Bin>>;
    fn get_bin(&self, id: &str) -> impl Future<Output = anyhow::Result<Option<Bin>>>;
    fn get_bins(&self) -> impl Future<Output = anyhow::Result<Vec<Bin>>>;
    fn update_bin(&self, id: &str, update: &BinUpdate) -> impl Future<Output = anyhow::Result<Bin>>;
    fn delete_bin(&self, id: &str) -> impl Future<Output = anyhow::Result<()>>;
    /// Overwrite only the fill level, stamping `last_updated`.
    fn update_fill_level(&self, id: &str, fill_level: u8)
    -> impl Future<Output = anyhow::Result<()>>;
    fn bin_statistics(&self) -> impl Future<Output = anyhow::Result<BinStats>>;
}

#[derive(sqlx::FromRow)]
struct BinRow {
    id: String,
    location: String,
    bin_type: String,
    capacity: i64,
    fill_level: i64,
    last_updated: String,
}

impl TryFrom<BinRow> for Bin {
    type Error = anyhow::Error;

    fn try_from(row: BinRow) -> Result<Self, Self::Error> {
        let last_updated = OffsetDateTime::parse(&row.last_updated, &Rfc3339)?;
        Ok(Bin {
            id: row.id,
            location: row.location,
            bin_type: row.bin_type,
            capacity: row.capacity,
            fill_level: row.fill_level,
            last_updated,
        })
    }
}

fn now_rfc3339() -> anyhow::Result<String> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}

const SELECT_BIN: &str =
    "SELECT id, location, bin_type, capacity, fill_level, last_updated FROM bins";

impl BinRepository for BinDb {
    async fn add_bin(&self, bin: NewBin) -> anyhow::Result<Bin> {
        let id = Uuid::new_v4().to_string();
        let last_updated = now_rfc3339()?;

        sqlx::query(
            "INSERT INTO bins (id, location, bin_type, capacity, fill_level, last_updated)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&bin.location)
        .bind(&bin.bin_type)
        .bind(bin.capacity)
        .bind(bin.fill_level)
        .bind(&last_updated)
        .execute(self.pool())
        .await?;

        Ok(Bin {
            id,
            location: bin.location,
            bin_type: bin.bin_type,
            capacity: bin.capacity,
            fill_level: bin.fill_level,
            last_updated: OffsetDateTime::parse(&last_updated, &Rfc3339)?,
        })
    }

    async fn get_bin(&self, id: &str) -> anyhow::Result<Option<Bin>> {
        let row = sqlx::query_as::<_, BinRow>(&format!("{} WHERE id = ?", SELECT_BIN))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.map(Bin::try_from).transpose()
    }

    async fn get_bins(&self) -> anyhow::Result<Vec<Bin>> {
        let rows = sqlx::query_as::<_, BinRow>(&format!("{} ORDER BY location", SELECT_BIN))
            .fetch_all(self.pool())
            .await?;
        rows.into_iter().map(Bin::try_from).collect()
    }

    async fn update_bin(&self, id: &str, update: &BinUpdate) -> anyhow::Result<Bin> {
        let current = self
            .get_bin(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Bin not found: {}", id))?;

        let location = update.location.clone().unwrap_or(current.location);
        let bin_type = update.bin_type.clone().unwrap_or(current.bin_type);
        let capacity = update.capacity.unwrap_or(current.capacity);
        let fill_level = update.fill_level.unwrap_or(current.fill_level);
        let last_updated = now_rfc3339()?;

        sqlx::query(
            "UPDATE bins
             SET location = ?, bin_type = ?, capacity = ?, fill_level = ?, last_updated = ?
             WHERE id = ?",
        )
        .bind(&location)
        .bind(&bin_type)
        .bind(capacity)
        .bind(fill_level)
        .bind(&last_updated)
        .bind(id)
        .execute(self.pool())
        .await?;

        Ok(Bin {
            id: current.id,
            location,
            bin_type,
            capacity,
            fill_level,
            last_updated: OffsetDateTime::parse(&last_updated, &Rfc3339)?,
        })
    }

    async fn delete_bin(&self, id: &str) -> anyhow::Result<()> {
        let result = sqlx::query("DELETE FROM bins WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            anyhow::bail!("Bin not found: {}", id);
        }
        Ok(())
    }

    async fn update_fill_level(&self, id: &str, fill_level: u8) -> anyhow::Result<()> {
        let last_updated = now_rfc3339()?;
        let result = sqlx::query("UPDATE bins SET fill_level = ?, last_updated = ? WHERE id = ?")
            .bind(fill_level as i64)
            .bind(&last_updated)
            .bind(id)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            anyhow::bail!("Bin not found: {}", id);
        }
        Ok(())
    }

    async fn bin_statistics(&self) -> anyhow::Result<BinStats> {
        let bins = self.get_bins().await?;
        let mut stats = BinStats {
            total: bins.len() as u64,
            full: 0,
            half: 0,
            empty: 0,
        };
        for bin in &bins {
            if bin.fill_level >= FULL_LEVEL {
                stats.full += 1;
            } else if bin.fill_level >= HALF_LEVEL {
                stats.half += 1;
            } else {
                stats.empty += 1;
            }
        }
        Ok(stats)
    }
}
