//! Page queries: batched lookup plus the small write path.

use anyhow::{Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use super::db::{SiteDb, BATCH_CHUNK};
use super::types::PageRecord;
use super::PageStore;

fn row_to_page(row: &SqliteRow) -> Result<PageRecord> {
    let parameters_json: Option<String> = row.get("parameters_json");
    let parameters = parameters_json
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(serde_json::from_str::<Vec<String>>)
        .transpose()
        .context("decode page parameters")?
        .unwrap_or_default();
    let live: i64 = row.get("live");
    Ok(PageRecord {
        identifier: row.get("identifier"),
        content: row.get("content"),
        live: live != 0,
        language: row.get("language"),
        ending: row.get("ending"),
        parameters,
    })
}

impl PageStore for SiteDb {
    async fn find_pages(&self, identifiers: &[String]) -> Result<Vec<PageRecord>> {
        let mut out = Vec::new();
        for chunk in identifiers.chunks(BATCH_CHUNK) {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
                "SELECT identifier, content, live, language, ending, parameters_json \
                 FROM pages WHERE identifier IN (",
            );
            let mut sep = qb.separated(", ");
            for id in chunk {
                sep.push_bind(id.as_str());
            }
            sep.push_unseparated(") ORDER BY id ASC");
            let rows = qb
                .build()
                .fetch_all(&self.pool)
                .await
                .context("query pages")?;
            for row in &rows {
                out.push(row_to_page(row)?);
            }
        }
        Ok(out)
    }
}

impl SiteDb {
    /// Insert a page row. Returns its row id.
    pub async fn insert_page(&self, page: &PageRecord) -> Result<i64> {
        let parameters_json = serde_json::to_string(&page.parameters)?;
        let row_id = sqlx::query(
            r#"
            INSERT INTO pages (identifier, content, live, language, ending, parameters_json)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&page.identifier)
        .bind(&page.content)
        .bind(i64::from(page.live))
        .bind(&page.language)
        .bind(&page.ending)
        .bind(parameters_json)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        Ok(row_id)
    }

    /// Remove every row with `identifier`. Returns the number removed.
    pub async fn remove_page(&self, identifier: &str) -> Result<u64> {
        let res = sqlx::query("DELETE FROM pages WHERE identifier = ?1")
            .bind(identifier)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    /// All pages ordered by identifier.
    pub async fn list_pages(&self) -> Result<Vec<PageRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT identifier, content, live, language, ending, parameters_json
            FROM pages
            ORDER BY identifier ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_page).collect()
    }
}
