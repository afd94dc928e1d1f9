use chrono::{Datelike, Utc};
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    entity::{coach, user::{self, Role}},
    error::{AppError, AppResult},
    repositories::{self, coach::NewCoach},
    utils::validate::{check, max_len, FieldKind},
};

/// Profile fields a coach supplies on promotion and may later edit.
#[derive(Debug, Clone)]
pub struct CoachProfile {
    pub experience_years: i64,
    pub description: String,
    pub profile_image_url: Option<String>,
}

impl CoachProfile {
    fn validate(&self) -> AppResult<i32> {
        check("experience_years", FieldKind::NonNegativeInteger(self.experience_years))?;
        check("description", FieldKind::NonEmptyString(&self.description))?;
        if let Some(url) = &self.profile_image_url {
            check("profile_image_url", FieldKind::SecureUrl(url))?;
            max_len("profile_image_url", url, 2048)?;
        }
        i32::try_from(self.experience_years)
            .map_err(|_| AppError::validation("invalid field: experience_years"))
    }
}

/// Turns a `USER` into a `COACH`. The role change and the coach row are
/// written in one transaction; a failure of either leaves both untouched.
pub async fn promote_to_coach<C: TransactionTrait>(
    db: &C,
    user_id: Uuid,
    profile: CoachProfile,
) -> AppResult<(user::Model, coach::Model)> {
    let experience_years = profile.validate()?;

    let txn = db.begin().await?;
    let user = repositories::user::find_by_id_for_update(&txn, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))?;
    if user.role == Role::Coach {
        return Err(AppError::conflict("user is already a coach"));
    }

    let user = repositories::user::update_role(&txn, user, Role::Coach).await?;
    let coach = repositories::coach::save(
        &txn,
        NewCoach {
            user_id,
            experience_years,
            description: profile.description.trim(),
            profile_image_url: profile.profile_image_url.as_deref().map(str::trim),
        },
    )
    .await?;
    txn.commit().await?;

    info!("user {} promoted to coach {}", user_id, coach.id);
    Ok((user, coach))
}

pub async fn update_coach_profile<C: ConnectionTrait>(
    db: &C,
    coach: coach::Model,
    profile: CoachProfile,
) -> AppResult<coach::Model> {
    let experience_years = profile.validate()?;
    let updated = repositories::coach::update_profile(
        db,
        coach,
        experience_years,
        profile.description.trim(),
        profile.profile_image_url.as_deref().map(str::trim),
    )
    .await?;
    Ok(updated)
}

#[derive(Debug, Clone, Serialize)]
pub struct CoachSummary {
    pub id: Uuid,
    pub name: String,
    pub experience_years: i32,
    pub description: String,
    pub profile_image_url: Option<String>,
}

pub const MAX_PAGE_SIZE: i64 = 100;

/// Page numbers start at 1; `per` is at most [`MAX_PAGE_SIZE`].
pub async fn list_coaches<C: ConnectionTrait>(
    db: &C,
    per: i64,
    page: i64,
) -> AppResult<Vec<CoachSummary>> {
    check("per", FieldKind::PositiveInteger(per))?;
    check("page", FieldKind::PositiveInteger(page))?;
    if per > MAX_PAGE_SIZE {
        return Err(AppError::validation(format!(
            "field per exceeds {MAX_PAGE_SIZE}"
        )));
    }
    // The store receives LIMIT and OFFSET as i64.
    if (page - 1).checked_mul(per).is_none() {
        return Err(AppError::validation("invalid field: page"));
    }
    let rows = repositories::coach::page_with_user(db, per as u64, (page - 1) as u64).await?;
    Ok(rows
        .into_iter()
        .filter_map(|(coach, user)| {
            user.map(|user| CoachSummary {
                id: coach.id,
                name: user.name,
                experience_years: coach.experience_years,
                description: coach.description,
                profile_image_url: coach.profile_image_url,
            })
        })
        .collect())
}

pub async fn coach_detail<C: ConnectionTrait>(
    db: &C,
    coach_id: Uuid,
) -> AppResult<(user::Model, coach::Model)> {
    match repositories::coach::find_with_user(db, coach_id).await? {
        Some((coach, Some(user))) => Ok((user, coach)),
        _ => Err(AppError::not_found("coach not found")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Revenue {
    pub participants: u64,
    pub revenue: i64,
    pub course_count: u64,
}

/// Accepts lower case English month names, `january` to `december`.
pub fn parse_month(month: &str) -> AppResult<u32> {
    const MONTHS: [&str; 12] = [
        "january", "february", "march", "april", "may", "june", "july", "august",
        "september", "october", "november", "december",
    ];
    MONTHS
        .iter()
        .position(|m| *m == month.trim())
        .map(|i| i as u32 + 1)
        .ok_or_else(|| AppError::validation("invalid field: month"))
}

/// Revenue of the coach's courses starting in `month` of `year`: active
/// participants times the average price of one credit across all purchases,
/// rounded down.
pub async fn coach_revenue<C: ConnectionTrait>(
    db: &C,
    coach_id: Uuid,
    year: i32,
    month: u32,
) -> AppResult<Revenue> {
    let courses: Vec<_> = repositories::course::find_by_coach_id(db, coach_id)
        .await?
        .into_iter()
        .filter(|c| c.start_at.year() == year && c.start_at.month() == month)
        .collect();
    let course_count = courses.len() as u64;
    let participants = repositories::course_booking::find_active_by_course_ids(
        db,
        courses.iter().map(|c| c.id).collect(),
    )
    .await?
    .len() as u64;

    let purchases = repositories::credit_purchase::find_all(db).await?;
    let total_credits: i64 = purchases.iter().map(|p| i64::from(p.purchased_credits)).sum();
    let total_price: i64 = purchases.iter().map(|p| i64::from(p.price_paid)).sum();
    let revenue = if total_credits > 0 {
        participants as i64 * total_price / total_credits
    } else {
        0
    };

    Ok(Revenue {
        participants,
        revenue,
        course_count,
    })
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names() {
        assert_eq!(parse_month("january").unwrap(), 1);
        assert_eq!(parse_month("december").unwrap(), 12);
        assert!(parse_month("January").is_err());
        assert!(parse_month("13").is_err());
    }

    #[test]
    fn profile_validation() {
        let mut profile = CoachProfile {
            experience_years: 5,
            description: "strength and conditioning".into(),
            profile_image_url: Some("https://example.com/me.png".into()),
        };
        assert_eq!(profile.validate().unwrap(), 5);

        profile.profile_image_url = None;
        assert!(profile.validate().is_ok());

        profile.profile_image_url = Some("http://example.com/me.png".into());
        assert!(matches!(profile.validate(), Err(AppError::Validation(_))));

        profile.profile_image_url = None;
        profile.experience_years = -1;
        assert!(profile.validate().is_err());

        profile.experience_years = 2;
        profile.description = " ".into();
        assert!(profile.validate().is_err());
    }
}
