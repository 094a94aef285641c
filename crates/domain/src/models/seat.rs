//! Seat pool domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Hard cap on the seat pool size per operator.
pub const MAX_SEATS: usize = 50;

/// Error type for seat operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeatError {
    #[error("Seat pool limit of {MAX_SEATS} exceeded")]
    LimitExceeded,

    #[error("Requested seat count must be greater than zero")]
    InvalidCount,

    #[error("Seat is already allocated")]
    AlreadyAllocated,
}

/// One seat in an operator's pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub seat_number: i32,
    pub is_allocated: bool,
    /// Member the seat is allocated to, when allocated.
    pub allocated_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl SeatRecord {
    /// Marks the seat as allocated to a member. Allocating a seat that is
    /// already taken is rejected.
    pub fn allot(&mut self, member_id: Uuid) -> Result<(), SeatError> {
        if self.is_allocated {
            return Err(SeatError::AlreadyAllocated);
        }
        self.is_allocated = true;
        self.allocated_to = Some(member_id);
        Ok(())
    }
}

/// Computes the seat numbers for a pool expansion: numbering continues from
/// the current pool size, and the combined pool may not exceed [`MAX_SEATS`].
pub fn plan_expansion(existing: usize, requested: usize) -> Result<Vec<i32>, SeatError> {
    if requested == 0 {
        return Err(SeatError::InvalidCount);
    }
    if existing + requested > MAX_SEATS {
        return Err(SeatError::LimitExceeded);
    }
    Ok((existing + 1..=existing + requested)
        .map(|n| n as i32)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(allocated: bool) -> SeatRecord {
        SeatRecord {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            seat_number: 1,
            is_allocated: allocated,
            allocated_to: allocated.then(Uuid::new_v4),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_allot_free_seat() {
        let mut s = seat(false);
        let member = Uuid::new_v4();
        s.allot(member).unwrap();
        assert!(s.is_allocated);
        assert_eq!(s.allocated_to, Some(member));
    }

    #[test]
    fn test_allot_taken_seat_rejected() {
        let mut s = seat(true);
        let before = s.allocated_to;
        assert_eq!(s.allot(Uuid::new_v4()), Err(SeatError::AlreadyAllocated));
        assert_eq!(s.allocated_to, before);
    }

    #[test]
    fn test_expansion_numbers_continue() {
        assert_eq!(plan_expansion(0, 3).unwrap(), vec![1, 2, 3]);
        assert_eq!(plan_expansion(3, 2).unwrap(), vec![4, 5]);
    }

    #[test]
    fn test_expansion_respects_cap() {
        assert_eq!(plan_expansion(48, 3), Err(SeatError::LimitExceeded));
        assert_eq!(plan_expansion(0, 51), Err(SeatError::LimitExceeded));
        assert!(plan_expansion(0, 50).is_ok());
    }

    #[test]
    fn test_expansion_rejects_zero() {
        assert_eq!(plan_expansion(5, 0), Err(SeatError::InvalidCount));
    }
}
