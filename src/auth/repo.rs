use sqlx::PgPool;

use crate::auth::repo_types::User;

impl User {
    /// Create a new user. A duplicate phone or email surfaces as the
    /// database's unique_violation, mapped to Conflict by the caller.
    pub async fn create(
        db: &PgPool,
        name: Option<&str>,
        phone: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, phone, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, phone, email, password_hash, otp, created_at
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, phone, email, password_hash, otp, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_phone(db: &PgPool, phone: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, phone, email, password_hash, otp, created_at
            FROM users
            WHERE phone = $1
            "#,
        )
        .bind(phone)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, phone, email, password_hash, otp, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Store a freshly generated OTP on the user row.
    pub async fn set_otp(db: &PgPool, id: i64, code: &str) -> Result<(), sqlx::Error> {
        sqlx::query(r#"UPDATE users SET otp = $2 WHERE id = $1"#)
            .bind(id)
            .bind(code)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Compare and clear the stored OTP in one statement. Returns true when
    /// the supplied code matched; the conditional clear enforces single use
    /// even under concurrent validation attempts.
    pub async fn take_otp(db: &PgPool, id: i64, code: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(r#"UPDATE users SET otp = NULL WHERE id = $1 AND otp = $2"#)
            .bind(id)
            .bind(code)
            .execute(db)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
