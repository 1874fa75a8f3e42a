use deadpool_postgres::Pool;
use crate::error::Result;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username VARCHAR(50) UNIQUE NOT NULL,
        password VARCHAR(255) NOT NULL,
        firstname VARCHAR(50),
        lastname VARCHAR(50)
    )
"#;

const CREATE_NOTES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS notes (
        id SERIAL PRIMARY KEY,
        user_id INT REFERENCES users(id) ON DELETE CASCADE,
        title VARCHAR(255) NOT NULL,
        note TEXT NOT NULL,
        created_at DATE DEFAULT CURRENT_DATE
    )
"#;

const ADD_DAY_INDEX_COLUMN: &str = r#"
    ALTER TABLE notes ADD COLUMN IF NOT EXISTS day_diff_from_epoch INT
"#;

// Rows written before the column existed.
const BACKFILL_DAY_INDEX: &str = r#"
    UPDATE notes
    SET day_diff_from_epoch = (created_at - DATE '1970-01-01')
    WHERE day_diff_from_epoch IS NULL AND created_at IS NOT NULL
"#;

/// Creates and migrates the schema inside a single transaction.
///
/// The transaction rolls back when dropped uncommitted, so a failed backfill leaves
/// no partial column updates behind.
pub async fn migrate(pool: &Pool) -> Result<()> {
    let mut client = pool.get().await?;
    let transaction = client.transaction().await?;

    transaction.batch_execute(CREATE_USERS_TABLE).await?;
    transaction.batch_execute(CREATE_NOTES_TABLE).await?;
    transaction.batch_execute(ADD_DAY_INDEX_COLUMN).await?;
    let backfilled = transaction.execute(BACKFILL_DAY_INDEX, &[]).await?;

    transaction.commit().await?;

    tracing::info!("✅ Schema ready ({} notes backfilled)", backfilled);
    Ok(())
}
