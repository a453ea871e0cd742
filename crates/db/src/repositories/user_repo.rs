//! Repository for the `users` table.

use hemolink_core::blood::BloodGroup;
use hemolink_core::roles::{Role, UserStatus};
use hemolink_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{RegisterUser, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, avatar_url, blood_group, district, upazila, \
                       role, status, created_at, updated_at";

/// Provides registry operations for users.
pub struct UserRepo;

impl UserRepo {
    /// First-registration upsert keyed by email.
    ///
    /// Inserts with the table defaults (`role = donor`, `status = active`).
    /// If the email is already registered the existing row is returned
    /// untouched — repeat registrations never reset role or status.
    pub async fn register(pool: &PgPool, input: &RegisterUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, name, avatar_url, blood_group, district, upazila)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (email) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.avatar_url)
            .bind(input.blood_group)
            .bind(&input.district)
            .bind(&input.upazila)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(user) => Ok(user),
            // Conflict path: the email already exists, fetch that row.
            None => {
                let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
                sqlx::query_as::<_, User>(&query)
                    .bind(&input.email)
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (the external identity key).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List users, optionally filtered by account status (`None` = all).
    pub async fn list_by_status(
        pool: &PgPool,
        status: Option<UserStatus>,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE ($1::user_status IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Merge caller-owned profile fields. Only non-`None` fields are
    /// applied; email, role, and status are not reachable from here.
    ///
    /// Returns `None` if no row with the given email exists.
    pub async fn update_profile(
        pool: &PgPool,
        email: &str,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                avatar_url = COALESCE($3, avatar_url),
                blood_group = COALESCE($4, blood_group),
                district = COALESCE($5, district),
                upazila = COALESCE($6, upazila)
             WHERE email = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(&input.name)
            .bind(&input.avatar_url)
            .bind(input.blood_group)
            .bind(&input.district)
            .bind(&input.upazila)
            .fetch_optional(pool)
            .await
    }

    /// Set a user's role. Returns the number of rows updated (0 when the
    /// id does not exist). Authorization happens in the handler before
    /// this call.
    pub async fn set_role(pool: &PgPool, id: DbId, role: Role) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(id)
            .bind(role)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Set a user's account status (block/unblock). Same contract as
    /// [`UserRepo::set_role`].
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: UserStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Donor search: active donors matching all three required filters.
    pub async fn search_donors(
        pool: &PgPool,
        blood_group: BloodGroup,
        district: &str,
        upazila: &str,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE role = 'donor' AND status = 'active'
               AND blood_group = $1 AND district = $2 AND upazila = $3
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(blood_group)
            .bind(district)
            .bind(upazila)
            .fetch_all(pool)
            .await
    }
}
