use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;

use gertonargent_core::users::{User, UserRepositoryTrait};
use gertonargent_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;
use crate::utils::format_timestamp;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

fn load_user(conn: &mut SqliteConnection, user_id: &str) -> Result<User> {
    users::table
        .find(user_id)
        .select(UserDB::as_select())
        .first::<UserDB>(conn)
        .into_core()?
        .try_into()
}

/// Inserts a blank record for `user_id` unless one exists.
fn ensure_user(conn: &mut SqliteConnection, user_id: &str, now: &str) -> Result<()> {
    diesel::insert_into(users::table)
        .values(&UserDB {
            id: user_id.to_string(),
            monthly_budget: None,
            fcm_token: None,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        })
        .on_conflict(users::id)
        .do_nothing()
        .execute(conn)
        .into_core()?;
    Ok(())
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?
            .map(User::try_from)
            .transpose()
    }

    fn list_users_page(&self, after: Option<&str>, limit: i64) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = users::table.select(UserDB::as_select()).into_boxed();
        if let Some(cursor) = after {
            query = query.filter(users::id.gt(cursor.to_string()));
        }
        query
            .order(users::id.asc())
            .limit(limit)
            .load::<UserDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn upsert_fcm_token(&self, user_id: String, fcm_token: String) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = format_timestamp(Utc::now());
                ensure_user(conn, &user_id, &now)?;
                diesel::update(users::table.find(user_id.as_str()))
                    .set((
                        users::fcm_token.eq(Some(fcm_token)),
                        users::updated_at.eq(&now),
                    ))
                    .execute(conn)
                    .into_core()?;
                load_user(conn, &user_id)
            })
            .await
    }

    async fn upsert_monthly_budget(
        &self,
        user_id: String,
        monthly_budget: Decimal,
    ) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = format_timestamp(Utc::now());
                ensure_user(conn, &user_id, &now)?;
                diesel::update(users::table.find(user_id.as_str()))
                    .set((
                        users::monthly_budget.eq(Some(monthly_budget.to_string())),
                        users::updated_at.eq(&now),
                    ))
                    .execute(conn)
                    .into_core()?;
                load_user(conn, &user_id)
            })
            .await
    }
}
