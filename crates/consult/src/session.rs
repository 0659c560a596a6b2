//! Single-slot session holding the registered user.

use crate::types::UserProfile;
use std::sync::{Mutex, PoisonError};
use zodiac_core::{AppError, AppResult};

/// At most one registered profile; the last `register` wins.
///
/// Access goes through one mutex so readers never see a half-replaced
/// profile. A poisoned lock is recovered since the slot is plain data.
#[derive(Debug, Default)]
pub struct SessionState {
    slot: Mutex<Option<UserProfile>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `profile`, returning the one it replaced.
    pub fn register(&self, profile: UserProfile) -> Option<UserProfile> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.replace(profile)
    }

    /// A copy of the current profile.
    pub fn current(&self) -> AppResult<UserProfile> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(AppError::NoUserRegistered)
    }

    pub fn is_registered(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn clear(&self) -> Option<UserProfile> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}
