use crate::SiteDb;
use crate::error::DatabaseError;

/// Ordered schema steps. Each file only uses `IF NOT EXISTS`, so re-running on
/// every open is safe.
const MIGRATIONS: &[(&str, &str)] = &[("001_issues", include_str!("../migrations/001_issues.sql"))];

impl SiteDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        for (name, sql) in MIGRATIONS {
            self.conn
                .execute_batch(sql)
                .await
                .map_err(|e| DatabaseError::Migration(format!("{name}: {e}")))?;
            tracing::debug!(migration = name, "applied");
        }
        Ok(())
    }
}
