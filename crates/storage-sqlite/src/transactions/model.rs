//! Database models for transactions.

use diesel::prelude::*;
use gertonargent_core::transactions::{NewTransaction, Transaction, TransactionType};
use gertonargent_core::Result;

use crate::utils::{format_timestamp, parse_decimal, parse_timestamp};

/// Database model for transactions
#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub transaction_type: String,
    pub amount: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub transaction_date: String,
    pub created_at: String,
}

impl From<NewTransaction> for TransactionDB {
    fn from(domain: NewTransaction) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            transaction_type: domain.transaction_type.as_str().to_string(),
            amount: domain.amount.to_string(),
            category: domain.category,
            description: domain.description,
            transaction_date: format_timestamp(domain.date),
            created_at: format_timestamp(domain.created_at),
        }
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = gertonargent_core::Error;

    fn try_from(db: TransactionDB) -> Result<Self> {
        Ok(Transaction {
            transaction_type: db.transaction_type.parse::<TransactionType>()?,
            amount: parse_decimal(&db.amount)?,
            date: parse_timestamp(&db.transaction_date)?,
            created_at: parse_timestamp(&db.created_at)?,
            id: db.id,
            user_id: db.user_id,
            category: db.category,
            description: db.description,
        })
    }
}
