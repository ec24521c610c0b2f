//! Database models for users.

use diesel::prelude::*;
use gertonargent_core::users::User;
use gertonargent_core::Result;
use rust_decimal::Decimal;

use crate::utils::{parse_decimal, parse_timestamp};

/// Database model for users
#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub monthly_budget: Option<String>,
    pub fcm_token: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<UserDB> for User {
    type Error = gertonargent_core::Error;

    fn try_from(db: UserDB) -> Result<Self> {
        let monthly_budget = match db.monthly_budget.as_deref() {
            Some(raw) => parse_decimal(raw)?,
            None => Decimal::ZERO,
        };
        Ok(User {
            id: db.id,
            monthly_budget,
            fcm_token: db.fcm_token,
            created_at: parse_timestamp(&db.created_at)?,
            updated_at: parse_timestamp(&db.updated_at)?,
        })
    }
}
