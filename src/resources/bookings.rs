use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::crud::Resource;

use super::{NamedRef, UserRef};

pub struct Bookings;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookedRoom {
    pub id: i64,
    pub number: String,
    pub hotel: NamedRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusRef {
    pub id: i64,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
    pub created_at: NaiveDateTime,
    #[sqlx(json)]
    pub user: UserRef,
    #[sqlx(json)]
    pub room: BookedRoom,
    #[sqlx(json)]
    pub status: StatusRef,
}

impl Resource for Bookings {
    type Row = Booking;
    const TABLE: &'static str = "bookings";
    const SELECT: &'static str = "SELECT t.id, t.check_in, t.check_out, t.total_price, t.created_at, \
        json_object('id', u.id, 'name', u.name, 'email', u.email) AS user, \
        json_object('id', r.id, 'number', r.number, 'hotel', json_object('id', h.id, 'name', h.name)) AS room, \
        json_object('id', s.id, 'name', s.name, 'color', s.color) AS status \
        FROM bookings t \
        JOIN users u ON u.id = t.user_id \
        JOIN rooms r ON r.id = t.room_id \
        JOIN hotels h ON h.id = r.hotel_id \
        JOIN booking_statuses s ON s.id = t.status_id";
    const ORDER_BY: &'static str = "t.created_at DESC, t.id DESC";
}
