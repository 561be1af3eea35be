//! Typed queries over the asset_administration_shell table.

use crate::error::AppError;
use crate::model::{AssetAdministrationShell, ShellForm};
use crate::store::SHELL_TABLE;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

const SHELL_COLUMNS: &str =
    "pk_aas, aas_id, id_short, asset_kind, global_asset_id, version, revision, description, creation_date";

pub struct ShellService;

impl ShellService {
    /// All shells, oldest first.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<AssetAdministrationShell>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY pk_aas",
            SHELL_COLUMNS, SHELL_TABLE
        );
        let rows = sqlx::query_as::<_, AssetAdministrationShell>(&sql)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Look up one shell by its decoded `aas_id`.
    pub async fn find_by_aas_id(
        conn: &mut SqliteConnection,
        aas_id: &str,
    ) -> Result<Option<AssetAdministrationShell>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE aas_id = ?",
            SHELL_COLUMNS, SHELL_TABLE
        );
        let row = sqlx::query_as::<_, AssetAdministrationShell>(&sql)
            .bind(aas_id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    /// Look up one shell by its `id_short`.
    pub async fn find_by_id_short(
        conn: &mut SqliteConnection,
        id_short: &str,
    ) -> Result<Option<AssetAdministrationShell>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id_short = ?",
            SHELL_COLUMNS, SHELL_TABLE
        );
        let row = sqlx::query_as::<_, AssetAdministrationShell>(&sql)
            .bind(id_short)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    /// A shell other than `exclude_aas_id` that already holds `id_short`, if any.
    pub async fn find_id_short_conflict(
        conn: &mut SqliteConnection,
        id_short: &str,
        exclude_aas_id: &str,
    ) -> Result<Option<AssetAdministrationShell>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id_short = ? AND aas_id != ?",
            SHELL_COLUMNS, SHELL_TABLE
        );
        let row = sqlx::query_as::<_, AssetAdministrationShell>(&sql)
            .bind(id_short)
            .bind(exclude_aas_id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    /// A shell other than `exclude_aas_id` that already holds `aas_id`, if any.
    pub async fn find_aas_id_conflict(
        conn: &mut SqliteConnection,
        aas_id: &str,
        exclude_aas_id: &str,
    ) -> Result<Option<AssetAdministrationShell>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE aas_id = ? AND aas_id != ?",
            SHELL_COLUMNS, SHELL_TABLE
        );
        let row = sqlx::query_as::<_, AssetAdministrationShell>(&sql)
            .bind(aas_id)
            .bind(exclude_aas_id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    /// Insert a new shell. The store assigns `pk_aas`; `creation_date` is now.
    pub async fn insert(
        conn: &mut SqliteConnection,
        form: &ShellForm,
    ) -> Result<AssetAdministrationShell, AppError> {
        let sql = format!(
            "INSERT INTO {} (aas_id, id_short, asset_kind, global_asset_id, version, revision, description, creation_date) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
            SHELL_TABLE, SHELL_COLUMNS
        );
        let row = sqlx::query_as::<_, AssetAdministrationShell>(&sql)
            .bind(&form.aas_id)
            .bind(&form.id_short)
            .bind(form.asset_kind)
            .bind(&form.global_asset_id)
            .bind(&form.version)
            .bind(&form.revision)
            .bind(&form.description)
            .bind(Utc::now())
            .fetch_one(&mut *conn)
            .await?;
        Ok(row)
    }

    /// Rewrite the shell currently identified by `current_aas_id`. `pk_aas`
    /// and `creation_date` are never touched. Returns None if no row matched.
    pub async fn update(
        conn: &mut SqliteConnection,
        current_aas_id: &str,
        new_aas_id: &str,
        form: &ShellForm,
    ) -> Result<Option<AssetAdministrationShell>, AppError> {
        let sql = format!(
            "UPDATE {} SET aas_id = ?, id_short = ?, asset_kind = ?, global_asset_id = ?, version = ?, revision = ?, description = ? \
             WHERE aas_id = ? RETURNING {}",
            SHELL_TABLE, SHELL_COLUMNS
        );
        let row = sqlx::query_as::<_, AssetAdministrationShell>(&sql)
            .bind(new_aas_id)
            .bind(&form.id_short)
            .bind(form.asset_kind)
            .bind(&form.global_asset_id)
            .bind(&form.version)
            .bind(&form.revision)
            .bind(&form.description)
            .bind(current_aas_id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    /// Delete by `aas_id`. Returns the number of rows removed (0 or 1).
    pub async fn delete_by_aas_id(
        conn: &mut SqliteConnection,
        aas_id: &str,
    ) -> Result<u64, AppError> {
        let sql = format!("DELETE FROM {} WHERE aas_id = ?", SHELL_TABLE);
        let done = sqlx::query(&sql).bind(aas_id).execute(&mut *conn).await?;
        Ok(done.rows_affected())
    }
}
