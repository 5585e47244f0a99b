//! User profile repository.
//!
//! Stores the email and birth date captured at registration; validation
//! against the registration date happens in the service layer.

use crate::model::profile::UserProfile;
use crate::model::task::UserId;
use crate::repo::{date_to_db, ensure_schema_ready, read_date, read_uuid, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub trait ProfileRepository {
    fn create_profile(&self, profile: &UserProfile) -> RepoResult<UserId>;
    fn get_profile(&self, id: UserId) -> RepoResult<Option<UserProfile>>;
    fn find_profile_by_email(&self, email: &str) -> RepoResult<Option<UserProfile>>;
}

pub struct SqliteProfileRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfileRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProfileRepository for SqliteProfileRepository<'_> {
    fn create_profile(&self, profile: &UserProfile) -> RepoResult<UserId> {
        self.conn.execute(
            "INSERT INTO users (id, email, birth_date) VALUES (?1, ?2, ?3);",
            params![
                profile.id.to_string(),
                profile.email.as_str(),
                date_to_db(profile.birth_date),
            ],
        )?;
        Ok(profile.id)
    }

    fn get_profile(&self, id: UserId) -> RepoResult<Option<UserProfile>> {
        self.conn
            .query_row(
                "SELECT id, email, birth_date FROM users WHERE id = ?1;",
                [id.to_string()],
                |row| Ok(parse_profile_row(row)),
            )
            .optional()?
            .transpose()
    }

    fn find_profile_by_email(&self, email: &str) -> RepoResult<Option<UserProfile>> {
        self.conn
            .query_row(
                "SELECT id, email, birth_date FROM users WHERE email = ?1;",
                [email],
                |row| Ok(parse_profile_row(row)),
            )
            .optional()?
            .transpose()
    }
}

fn parse_profile_row(row: &Row<'_>) -> RepoResult<UserProfile> {
    Ok(UserProfile {
        id: read_uuid(row, "id", "users")?,
        email: row.get("email")?,
        birth_date: read_date(row, "birth_date", "users")?,
    })
}
