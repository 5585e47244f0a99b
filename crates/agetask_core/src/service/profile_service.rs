//! Profile and age use-case service.
//!
//! # Responsibility
//! - Register the profile (email + birth date) of an authenticated user.
//! - Serve the age counter and birthday notice for a stored profile.
//!
//! # Invariants
//! - Emails are stored normalized (trimmed, lowercase) and unique.
//! - "now"/"today" are always supplied by the caller.

use crate::age::{age_snapshot, birthday_notice, AgeSnapshot, BirthdayNotice};
use crate::model::profile::{normalize_email, ProfileValidationError, UserProfile};
use crate::model::task::UserId;
use crate::repo::profile_repo::ProfileRepository;
use crate::repo::RepoError;
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ProfileServiceError {
    Validation(ProfileValidationError),
    EmailTaken,
    ProfileNotFound(UserId),
    Repo(RepoError),
}

impl Display for ProfileServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::EmailTaken => write!(f, "email is already registered"),
            Self::ProfileNotFound(id) => write!(f, "profile not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProfileServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProfileValidationError> for ProfileServiceError {
    fn from(value: ProfileValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ProfileServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ProfileNotFound(id) => Self::ProfileNotFound(id),
            RepoError::ProfileValidation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

pub struct ProfileService<P: ProfileRepository> {
    repo: P,
}

impl<P: ProfileRepository> ProfileService<P> {
    pub fn new(repo: P) -> Self {
        Self { repo }
    }

    /// Stores the profile of user `user_id` registered on `today`.
    pub fn register(
        &self,
        user_id: UserId,
        email: &str,
        birth_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<UserProfile, ProfileServiceError> {
        let profile = UserProfile::new(user_id, normalize_email(email), birth_date);
        profile.validate(today)?;

        if self
            .repo
            .find_profile_by_email(profile.email.as_str())?
            .is_some()
        {
            return Err(ProfileServiceError::EmailTaken);
        }

        self.repo.create_profile(&profile)?;
        info!("event=profile_register module=service status=ok user_id={user_id}");
        Ok(profile)
    }

    pub fn get_profile(&self, user_id: UserId) -> Result<UserProfile, ProfileServiceError> {
        self.repo
            .get_profile(user_id)?
            .ok_or(ProfileServiceError::ProfileNotFound(user_id))
    }

    /// Age counter of `user_id` observed at `now`.
    pub fn age(
        &self,
        user_id: UserId,
        now: NaiveDateTime,
    ) -> Result<AgeSnapshot, ProfileServiceError> {
        let profile = self.get_profile(user_id)?;
        Ok(age_snapshot(profile.birth_date, now))
    }

    pub fn birthday_notice(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<BirthdayNotice, ProfileServiceError> {
        let profile = self.get_profile(user_id)?;
        Ok(birthday_notice(profile.birth_date, today))
    }
}
