//! Registration and login against the users table.
//!
//! Email uniqueness is checked up front for a friendly 409, and the UNIQUE
//! constraint on `users.email` backstops the race where two registrations
//! with the same address interleave.

use rusqlite::params;

use crate::auth::passwords;
use crate::auth::tokens::TokenService;
use crate::db::models::{PublicUser, User};
use crate::error::{AppError, AppResult};
use crate::state::DbPool;

/// Outcome of a successful registration.
#[derive(Debug)]
pub struct Registered {
    pub user_id: i64,
    pub name: String,
    pub email: String,
}

/// Outcome of a successful login.
#[derive(Debug)]
pub struct LoggedIn {
    pub token: String,
    pub user: PublicUser,
}

pub fn register(pool: &DbPool, name: &str, email: &str, password: &str) -> AppResult<Registered> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Name, email, and password are required.".into(),
        ));
    }

    let conn = pool.get()?;

    let taken: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM users WHERE email = ?1",
        params![email],
        |row| row.get(0),
    )?;
    if taken {
        return Err(AppError::Conflict("Email already exists.".into()));
    }

    let hashed = passwords::hash_password(password)?;
    conn.execute(
        "INSERT INTO users (name, email, password) VALUES (?1, ?2, ?3)",
        params![name, email, hashed],
    )
    .map_err(|e| match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            AppError::Conflict("Email already exists (constraint violation).".into())
        }
        _ => AppError::from(e),
    })?;

    let user_id = conn.last_insert_rowid();
    tracing::info!(user_id, email, "registered user");

    Ok(Registered {
        user_id,
        name: name.to_string(),
        email: email.to_string(),
    })
}

pub fn login(
    pool: &DbPool,
    tokens: &TokenService,
    email: &str,
    password: &str,
) -> AppResult<LoggedIn> {
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required.".into(),
        ));
    }

    let conn = pool.get()?;

    let user = conn
        .query_row(
            "SELECT id, name, email, password FROM users WHERE email = ?1",
            params![email],
            User::from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => AppError::NotFound("User not found.".into()),
            _ => AppError::from(e),
        })?;

    if !passwords::verify_password(password, &user.password) {
        return Err(AppError::Unauthorized("Invalid credentials.".into()));
    }

    let token = tokens.issue(user.id, &user.email, &user.name)?;
    tracing::info!(user_id = user.id, "login ok");

    Ok(LoggedIn {
        token,
        user: user.public(),
    })
}
