use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    entity::course_booking::{self, BookingStatus},
    error::{AppError, AppResult},
    repositories,
    services::ledger::{self, CreditBalance},
};

/// Books `course_id` for `user_id`, spending one credit.
///
/// The user row and then the course row are locked for the duration of the
/// transaction, so the duplicate, credit and capacity checks and the insert
/// act on one consistent view. The partial unique index on active bookings
/// backs the duplicate check should two inserts still race.
pub async fn book_course<C: TransactionTrait>(
    db: &C,
    user_id: Uuid,
    course_id: Uuid,
) -> AppResult<course_booking::Model> {
    let txn = db.begin().await?;

    repositories::user::find_by_id_for_update(&txn, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))?;
    let course = repositories::course::find_by_id_for_update(&txn, course_id)
        .await?
        .ok_or_else(|| AppError::not_found("course not found"))?;

    if repositories::course_booking::find_active(&txn, user_id, course_id)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("course already booked"));
    }

    let balance = ledger::load_balance(&txn, user_id).await?;
    if !balance.can_book() {
        return Err(AppError::InsufficientCredit);
    }

    let taken = repositories::course_booking::count_active_by_course(&txn, course_id).await?;
    let capacity = u64::try_from(course.max_participants).unwrap_or(0);
    if taken >= capacity {
        return Err(AppError::CapacityExceeded);
    }

    let booking = repositories::course_booking::save_active(&txn, user_id, course_id).await?;
    txn.commit().await?;

    info!(
        "user {} booked course {} ({} of {} seats taken)",
        user_id,
        course_id,
        taken + 1,
        capacity
    );
    Ok(booking)
}

/// Cancels the active booking of `user_id` on `course_id`. The row is kept
/// with status `cancelled`, which returns the credit and the seat.
pub async fn cancel_booking<C: TransactionTrait>(
    db: &C,
    user_id: Uuid,
    course_id: Uuid,
) -> AppResult<()> {
    let txn = db.begin().await?;

    let booking = repositories::course_booking::find_active(&txn, user_id, course_id)
        .await?
        .ok_or_else(|| AppError::not_found("no active booking for this course"))?;
    repositories::course_booking::mark_cancelled(&txn, booking).await?;

    txn.commit().await?;
    info!("user {} cancelled booking on course {}", user_id, course_id);
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct BookedCourse {
    pub course_id: Uuid,
    pub name: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub meeting_url: String,
    pub coach_name: Option<String>,
    pub status: BookingStatus,
    pub booking_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseOverview {
    #[serde(flatten)]
    pub balance: CreditBalance,
    pub course_booking: Vec<BookedCourse>,
}

/// Credit balance plus the courses the user currently holds a seat in.
pub async fn user_course_overview<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> AppResult<CourseOverview> {
    let purchases = repositories::credit_purchase::find_by_user_id(db, user_id).await?;
    let bookings = repositories::course_booking::find_by_user_id(db, user_id).await?;
    let balance = CreditBalance::from_ledger(&purchases, &bookings);

    let active: Vec<_> = bookings
        .into_iter()
        .filter(|b| b.status == BookingStatus::Active)
        .collect();
    let courses =
        repositories::course::find_by_ids(db, active.iter().map(|b| b.course_id).collect())
            .await?;
    let coaches =
        repositories::coach::find_by_ids(db, courses.iter().map(|c| c.coach_id).collect()).await?;
    let users =
        repositories::user::find_by_ids(db, coaches.iter().map(|c| c.user_id).collect()).await?;

    let course_booking = active
        .into_iter()
        .filter_map(|booking| {
            let course = courses.iter().find(|c| c.id == booking.course_id)?;
            let coach_name = coaches
                .iter()
                .find(|c| c.id == course.coach_id)
                .and_then(|coach| users.iter().find(|u| u.id == coach.user_id))
                .map(|u| u.name.clone());
            Some(BookedCourse {
                course_id: course.id,
                name: course.name.clone(),
                start_at: course.start_at,
                end_at: course.end_at,
                meeting_url: course.meeting_url.clone(),
                coach_name,
                status: booking.status,
                booking_at: booking.booking_at,
            })
        })
        .collect();

    Ok(CourseOverview {
        balance,
        course_booking,
    })
}
