use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::{crud::Resource, session::Role, AppResult};

pub struct Users;

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub booking_count: i64,
    pub review_count: i64,
}

impl Resource for Users {
    type Row = User;
    const TABLE: &'static str = "users";
    const SELECT: &'static str = "SELECT t.id, t.name, t.email, t.phone, t.role, t.is_active, t.created_at, \
        (SELECT COUNT(*) FROM bookings b WHERE b.user_id = t.id) AS booking_count, \
        (SELECT COUNT(*) FROM reviews r WHERE r.user_id = t.id) AS review_count \
        FROM users t";
    const ORDER_BY: &'static str = "t.created_at DESC, t.id DESC";
}

pub async fn find_active_by_email(db_pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    let sql = format!("{} WHERE t.email = ? COLLATE NOCASE AND t.is_active = 1", Users::SELECT);
    Ok(sqlx::query_as::<_, User>(&sql).bind(email).fetch_optional(db_pool).await?)
}
