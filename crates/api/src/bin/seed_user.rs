//! Out-of-band user seeding tool.
//!
//! Users are never created through the HTTP API; this binary is the
//! seeding step:
//!
//! ```text
//! DATABASE_URL=... seed-user <email> <password> [role]
//! ```
//!
//! `role` defaults to `employee`.

use std::process::ExitCode;

use timeclock_api::auth::password::{hash_password, validate_password_strength};
use timeclock_core::roles::{validate_role, ROLE_EMPLOYEE};
use timeclock_db::models::user::CreateUser;
use timeclock_db::repositories::UserRepo;

/// Minimum password length for seeded accounts.
const MIN_PASSWORD_LENGTH: usize = 8;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (email, password, role) = match args.as_slice() {
        [email, password] => (email.clone(), password.clone(), ROLE_EMPLOYEE.to_string()),
        [email, password, role] => (email.clone(), password.clone(), role.clone()),
        _ => {
            eprintln!("usage: seed-user <email> <password> [role]");
            return ExitCode::FAILURE;
        }
    };

    if let Err(msg) = validate_role(&role) {
        eprintln!("error: {msg}");
        return ExitCode::FAILURE;
    }
    if let Err(msg) = validate_password_strength(&password, MIN_PASSWORD_LENGTH) {
        eprintln!("error: {msg}");
        return ExitCode::FAILURE;
    }

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = timeclock_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    timeclock_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let password_hash = hash_password(&password).expect("Password hashing failed");

    let input = CreateUser {
        email,
        password_hash,
        role,
    };
    match UserRepo::create(&pool, &input).await {
        Ok(user) => {
            println!("Created user {} ({}, {})", user.id, user.email, user.role);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: user creation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
