use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::crud::Resource;

use super::NamedRef;

pub struct Rooms;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeRef {
    pub id: i64,
    pub name: String,
    pub max_guests: i64,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub number: String,
    pub price_per_night: f64,
    pub is_available: bool,
    #[sqlx(json)]
    pub hotel: NamedRef,
    #[sqlx(json)]
    pub room_type: RoomTypeRef,
}

impl Resource for Rooms {
    type Row = Room;
    const TABLE: &'static str = "rooms";
    const SELECT: &'static str = "SELECT t.id, t.number, t.price_per_night, t.is_available, \
        json_object('id', h.id, 'name', h.name) AS hotel, \
        json_object('id', rt.id, 'name', rt.name, 'maxGuests', rt.max_guests) AS room_type \
        FROM rooms t \
        JOIN hotels h ON h.id = t.hotel_id \
        JOIN room_types rt ON rt.id = t.room_type_id";
    const ORDER_BY: &'static str = "h.name ASC, CAST(t.number AS INTEGER) ASC, t.number ASC";
    const LIST_FILTER: Option<&'static str> = Some("t.is_available = 1 AND h.is_active = 1");
}
