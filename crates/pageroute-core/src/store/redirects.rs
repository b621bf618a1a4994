//! Redirect queries.

use anyhow::{Context, Result};
use sqlx::{QueryBuilder, Row, Sqlite};

use super::db::{SiteDb, BATCH_CHUNK};
use super::types::{RedirectRecord, RedirectShape, DEFAULT_REDIRECT_CODE};
use super::RedirectStore;

fn code_or_default(code: i64) -> u16 {
    match u16::try_from(code) {
        Ok(0) | Err(_) => DEFAULT_REDIRECT_CODE,
        Ok(c) => c,
    }
}

impl RedirectStore for SiteDb {
    async fn find_redirect(
        &self,
        shape: RedirectShape,
        fragments: &[String],
    ) -> Result<Option<RedirectRecord>> {
        let shape_filter = match shape {
            RedirectShape::Exact => "",
            RedirectShape::SuffixWildcard => " AND old_pattern LIKE '%*'",
            RedirectShape::PrefixWildcard => " AND old_pattern LIKE '*%'",
        };

        let mut hits: Vec<RedirectRecord> = Vec::new();
        for chunk in fragments.chunks(BATCH_CHUNK) {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
                "SELECT old_pattern, new_target, http_code FROM redirects WHERE old_pattern IN (",
            );
            let mut sep = qb.separated(", ");
            for f in chunk {
                sep.push_bind(f.as_str());
            }
            sep.push_unseparated(")");
            qb.push(shape_filter);
            let rows = qb
                .build()
                .fetch_all(&self.pool)
                .await
                .with_context(|| format!("query {} redirects", shape.as_str()))?;
            hits.extend(rows.iter().map(|row| RedirectRecord {
                old_pattern: row.get("old_pattern"),
                new_target: row.get("new_target"),
                http_code: code_or_default(row.get("http_code")),
            }));
        }

        // Fragment order decides, not row order.
        Ok(fragments
            .iter()
            .find_map(|f| hits.iter().position(|h| &h.old_pattern == f))
            .map(|i| hits.swap_remove(i)))
    }
}

impl SiteDb {
    /// Insert or replace the redirect for `old_pattern`.
    pub async fn insert_redirect(&self, redirect: &RedirectRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO redirects (old_pattern, new_target, http_code)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(old_pattern) DO UPDATE SET
                new_target = excluded.new_target,
                http_code = excluded.http_code
            "#,
        )
        .bind(&redirect.old_pattern)
        .bind(&redirect.new_target)
        .bind(i64::from(redirect.http_code))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_redirects(&self) -> Result<Vec<RedirectRecord>> {
        let rows = sqlx::query(
            "SELECT old_pattern, new_target, http_code FROM redirects ORDER BY old_pattern ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|row| RedirectRecord {
                old_pattern: row.get("old_pattern"),
                new_target: row.get("new_target"),
                http_code: code_or_default(row.get("http_code")),
            })
            .collect())
    }
}
