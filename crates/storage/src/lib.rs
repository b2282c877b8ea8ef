use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;
use uuid::Uuid;

use shared::{
    domain::{hire_date, EmployeeId},
    protocol::{EmployeeDraft, EmployeeRecord},
};

const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to an in-memory url opens its own empty database.
        let pool_options = if database_url.starts_with(MEMORY_DATABASE_URL) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(connect_options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// All employees in insertion order.
    pub async fn list_employees(&self) -> Result<Vec<EmployeeRecord>> {
        let rows = sqlx::query(
            "SELECT id, name, extension, email, title, date_hired, currently_employed
             FROM employees ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list employees")?;
        rows.iter().map(employee_from_row).collect()
    }

    pub async fn get_employee(&self, id: &EmployeeId) -> Result<Option<EmployeeRecord>> {
        let row = sqlx::query(
            "SELECT id, name, extension, email, title, date_hired, currently_employed
             FROM employees WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("failed to load employee {id}"))?;
        row.as_ref().map(employee_from_row).transpose()
    }

    pub async fn create_employee(&self, draft: &EmployeeDraft) -> Result<EmployeeRecord> {
        let id = EmployeeId::new(Uuid::new_v4().simple().to_string());
        sqlx::query(
            "INSERT INTO employees (id, name, extension, email, title, date_hired, currently_employed)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.as_str())
        .bind(&draft.name)
        .bind(&draft.extension)
        .bind(&draft.email)
        .bind(&draft.title)
        .bind(hire_date::to_wire(draft.date_hired))
        .bind(draft.currently_employed)
        .execute(&self.pool)
        .await
        .context("failed to insert employee")?;
        debug!(employee_id = %id, "employee stored");
        Ok(draft.clone().into_record(id))
    }

    /// Returns false when no employee had that id.
    pub async fn delete_employee(&self, id: &EmployeeId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete employee {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_employees(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await
            .context("failed to count employees")?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

fn employee_from_row(row: &SqliteRow) -> Result<EmployeeRecord> {
    let date_hired: String = row.try_get("date_hired")?;
    Ok(EmployeeRecord {
        id: EmployeeId::new(row.try_get::<String, _>("id")?),
        name: row.try_get("name")?,
        extension: row.try_get("extension")?,
        email: row.try_get("email")?,
        title: row.try_get("title")?,
        date_hired: hire_date::parse(&date_hired),
        currently_employed: row.try_get("currently_employed")?,
    })
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with(MEMORY_DATABASE_URL) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
