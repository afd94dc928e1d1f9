use sea_orm::ConnectionTrait;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    entity::{
        course_booking::{self, BookingStatus},
        credit_purchase,
    },
    error::AppResult,
    repositories,
};

/// Remaining and used credit of one user, derived from the ledgers and never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CreditBalance {
    pub credit_remain: i64,
    pub credit_usage: i64,
}

impl CreditBalance {
    /// `remain = Σ purchased_credits − #active bookings`, `usage = #active bookings`.
    pub fn from_ledger(
        purchases: &[credit_purchase::Model],
        bookings: &[course_booking::Model],
    ) -> Self {
        let purchased: i64 = purchases
            .iter()
            .map(|p| i64::from(p.purchased_credits))
            .sum();
        let used = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Active)
            .count() as i64;
        Self {
            credit_remain: purchased - used,
            credit_usage: used,
        }
    }

    pub fn can_book(&self) -> bool {
        self.credit_remain >= 1
    }
}

/// Reads both ledgers for `user_id` through `db`. Called inside the booking
/// transaction so that the figure is consistent with the insert that follows.
pub async fn load_balance<C: ConnectionTrait>(db: &C, user_id: Uuid) -> AppResult<CreditBalance> {
    let purchases = repositories::credit_purchase::find_by_user_id(db, user_id).await?;
    let bookings = repositories::course_booking::find_by_user_id(db, user_id).await?;
    Ok(CreditBalance::from_ledger(&purchases, &bookings))
}
