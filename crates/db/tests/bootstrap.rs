use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    timeclock_db::health_check(&pool).await.unwrap();

    // Verify all tables exist and are queryable.
    let tables = [
        "users",
        "user_sessions",
        "work_logs",
        "work_log_corrections",
        "password_reset_tokens",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 >= 0, "{table} should be queryable");
    }
}

/// The role CHECK constraint rejects unknown roles.
#[sqlx::test(migrations = "./migrations")]
async fn test_role_check_constraint(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO users (email, password_hash, role) VALUES ('x@test.com', 'h', 'superuser')",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "unknown role must violate ck_users_role");
}
