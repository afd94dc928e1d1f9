use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    entity::{credit_package, skill},
    error::{AppError, AppResult},
    repositories,
    utils::validate::{check, max_len, FieldKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    CreditPackage,
    Skill,
}

impl CatalogKind {
    fn label(self) -> &'static str {
        match self {
            Self::CreditPackage => "credit package",
            Self::Skill => "skill",
        }
    }
}

#[derive(Debug, Clone)]
pub enum NewCatalogItem {
    CreditPackage {
        name: String,
        credit_amount: i64,
        price: i64,
    },
    Skill {
        name: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CatalogItem {
    CreditPackage(credit_package::Model),
    Skill(skill::Model),
}

fn column_int(field: &str, value: i64) -> AppResult<i32> {
    i32::try_from(value).map_err(|_| AppError::validation(format!("invalid field: {field}")))
}

/// Adds a credit package or a skill. Names are unique within their kind.
pub async fn create_catalog_item<C: ConnectionTrait>(
    db: &C,
    item: NewCatalogItem,
) -> AppResult<CatalogItem> {
    match item {
        NewCatalogItem::CreditPackage {
            name,
            credit_amount,
            price,
        } => {
            check("name", FieldKind::NonEmptyString(&name))?;
            max_len("name", name.trim(), 50)?;
            check("credit_amount", FieldKind::PositiveInteger(credit_amount))?;
            check("price", FieldKind::NonNegativeInteger(price))?;
            let credit_amount = column_int("credit_amount", credit_amount)?;
            let price = column_int("price", price)?;
            let name = name.trim();

            if repositories::credit_package::exist_by_name(db, name).await? {
                return Err(AppError::conflict("credit package name already exists"));
            }
            let package =
                repositories::credit_package::save(db, name, credit_amount, price).await?;
            info!("credit package {} created: {}", package.id, package.name);
            Ok(CatalogItem::CreditPackage(package))
        }
        NewCatalogItem::Skill { name } => {
            check("name", FieldKind::NonEmptyString(&name))?;
            max_len("name", name.trim(), 50)?;
            let name = name.trim();

            if repositories::skill::exist_by_name(db, name).await? {
                return Err(AppError::conflict("skill name already exists"));
            }
            let skill = repositories::skill::save(db, name).await?;
            info!("skill {} created: {}", skill.id, skill.name);
            Ok(CatalogItem::Skill(skill))
        }
    }
}

/// Removes a catalog entry. Purchases keep their snapshot of a deleted
/// package; a skill still used by a course cannot be removed.
pub async fn delete_catalog_item<C: ConnectionTrait>(
    db: &C,
    kind: CatalogKind,
    id: Uuid,
) -> AppResult<()> {
    let deleted = match kind {
        CatalogKind::CreditPackage => repositories::credit_package::delete_by_id(db, id).await?,
        CatalogKind::Skill => {
            if repositories::skill::find_by_id(db, id).await?.is_none() {
                return Err(AppError::not_found("skill not found"));
            }
            if repositories::course::count_by_skill_id(db, id).await? > 0 {
                return Err(AppError::conflict("skill is still used by courses"));
            }
            repositories::skill::delete_by_id(db, id).await?
        }
    };
    if deleted == 0 {
        return Err(AppError::not_found(format!("{} not found", kind.label())));
    }
    info!("{} {} deleted", kind.label(), id);
    Ok(())
}
