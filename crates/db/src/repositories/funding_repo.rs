//! Repository for the `fundings` table.

use sqlx::PgPool;

use crate::models::funding::{CreateFunding, Funding};

/// Column list for fundings queries.
const COLUMNS: &str = "id, name, email, amount, transaction_id, created_at";

/// Write-once inserts and read-only listing for funding records.
pub struct FundingRepo;

impl FundingRepo {
    /// Record a captured payment. The unique index on `transaction_id`
    /// rejects duplicate captures.
    pub async fn create(pool: &PgPool, input: &CreateFunding) -> Result<Funding, sqlx::Error> {
        let query = format!(
            "INSERT INTO fundings (name, email, amount, transaction_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Funding>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.amount)
            .bind(&input.transaction_id)
            .fetch_one(pool)
            .await
    }

    /// All funding records, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Funding>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fundings ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Funding>(&query).fetch_all(pool).await
    }
}
