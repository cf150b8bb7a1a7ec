use axum::{extract::{Path, State}, Json};
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::{crud::{self, Resource}, session::{Caller, Gate}, AppError, AppResult};

use super::UserRef;

pub struct Reviews;

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub booking_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
    pub is_approved: bool,
    pub created_at: NaiveDateTime,
    #[sqlx(json)]
    pub user: UserRef,
}

impl Resource for Reviews {
    type Row = Review;
    const TABLE: &'static str = "reviews";
    const SELECT: &'static str = "SELECT t.id, t.booking_id, t.rating, t.comment, t.is_approved, t.created_at, \
        json_object('id', u.id, 'name', u.name, 'email', u.email) AS user \
        FROM reviews t JOIN users u ON u.id = t.user_id";
    const ORDER_BY: &'static str = "t.created_at DESC, t.id DESC";
}

/// Marks a review approved. Approving twice is not an error.
pub async fn approve(
    caller: Caller,
    State(db_pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> AppResult<Json<Review>> {
    Gate::Staff.check(&caller, true)?;

    let result = sqlx::query("UPDATE reviews SET is_approved = 1 WHERE id = ?")
        .bind(id)
        .execute(&db_pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(review_id = id, approved_by = ?caller.user_id, "review approved");
    crud::fetch_by_id::<Reviews>(&db_pool, id).await.map(Json)
}
