//! Issue documents: list, create with store-minted id/timestamp, delete.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use site_core::entities::{Issue, IssueDraft};
use site_core::ids::PREFIX_ISSUE;

use crate::SiteDb;
use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_opt_string, parse_datetime, parse_enum, to_storage_precision,
};

const SELECT_COLS: &str = "id, description, status, logger_name, timestamp, image_url";

fn row_to_issue(row: &libsql::Row) -> Result<Issue, DatabaseError> {
    Ok(Issue {
        id: row.get(0)?,
        description: row.get(1)?,
        status: parse_enum(&row.get::<String>(2)?)?,
        logger_name: row.get(3)?,
        timestamp: parse_datetime(&row.get::<String>(4)?)?,
        image_url: get_opt_string(row, 5)?,
    })
}

/// Durable document storage for issue records.
#[async_trait]
pub trait IssueDocuments: Send + Sync {
    /// Every stored issue, in insertion order.
    async fn list_all(&self) -> Result<Vec<Issue>, DatabaseError>;

    /// Store a new issue. The store assigns the id, and the timestamp is
    /// `submitted_at` clamped to be no earlier than the newest stored record.
    async fn create(
        &self,
        draft: &IssueDraft,
        image_url: Option<&str>,
        submitted_at: DateTime<Utc>,
    ) -> Result<Issue, DatabaseError>;

    /// Remove an issue. Returns `false` if no issue had that id.
    async fn delete(&self, id: &str) -> Result<bool, DatabaseError>;
}

impl SiteDb {
    async fn latest_timestamp(&self) -> Result<Option<DateTime<Utc>>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT timestamp FROM issues ORDER BY seq DESC LIMIT 1", ())
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(parse_datetime(&row.get::<String>(0)?)?)),
            None => Ok(None),
        }
    }

    /// Look up one issue by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no issue has that id.
    pub async fn get_issue(&self, id: &str) -> Result<Issue, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM issues WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_issue(&row)
    }
}

#[async_trait]
impl IssueDocuments for SiteDb {
    async fn list_all(&self) -> Result<Vec<Issue>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM issues ORDER BY seq"), ())
            .await?;
        let mut issues = Vec::new();
        while let Some(row) = rows.next().await? {
            issues.push(row_to_issue(&row)?);
        }
        tracing::debug!(count = issues.len(), "listed issues");
        Ok(issues)
    }

    async fn create(
        &self,
        draft: &IssueDraft,
        image_url: Option<&str>,
        submitted_at: DateTime<Utc>,
    ) -> Result<Issue, DatabaseError> {
        draft
            .validate()
            .map_err(|e| DatabaseError::InvalidState(e.to_string()))?;
        let image_url = image_url.filter(|url| !url.is_empty());

        let mut timestamp = to_storage_precision(submitted_at);
        if let Some(latest) = self.latest_timestamp().await?
            && latest > timestamp
        {
            tracing::debug!(%latest, submitted = %timestamp, "clamping issue timestamp");
            timestamp = latest;
        }

        let id = self.generate_id(PREFIX_ISSUE).await?;
        self.conn()
            .execute(
                "INSERT INTO issues (id, description, status, logger_name, timestamp, image_url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    draft.description.as_str(),
                    draft.status.as_str(),
                    draft.logger_name.as_str(),
                    format_datetime(timestamp),
                    image_url
                ],
            )
            .await?;

        Ok(Issue {
            id,
            description: draft.description.clone(),
            status: draft.status,
            logger_name: draft.logger_name.clone(),
            timestamp,
            image_url: image_url.map(String::from),
        })
    }

    async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        let affected = self
            .conn()
            .execute("DELETE FROM issues WHERE id = ?1", [id])
            .await?;
        Ok(affected > 0)
    }
}
