use serde::Serialize;
use sqlx::FromRow;

use crate::crud::{Creatable, Resource, Updatable};

pub struct BookingStatuses;

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatus {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub booking_count: i64,
}

crate::changeset! {
    pub struct CreateBookingStatus {
        name: String,
        color: Option<String>,
    }
}

crate::changeset! {
    pub struct UpdateBookingStatus {
        name: Option<String>,
        color: Option<String>,
    }
}

impl Resource for BookingStatuses {
    type Row = BookingStatus;
    const TABLE: &'static str = "booking_statuses";
    const SELECT: &'static str = "SELECT t.id, t.name, t.color, \
        (SELECT COUNT(*) FROM bookings b WHERE b.status_id = t.id) AS booking_count \
        FROM booking_statuses t";
    const ORDER_BY: &'static str = "t.name ASC";
}

impl Creatable for BookingStatuses {
    type Create = CreateBookingStatus;
}

impl Updatable for BookingStatuses {
    type Update = UpdateBookingStatus;
}
