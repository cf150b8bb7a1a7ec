use serde::Serialize;
use sqlx::FromRow;

use crate::crud::{Creatable, Patch, Resource, Updatable};

pub struct RoomTypes;

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub max_guests: i64,
    pub room_count: i64,
}

crate::changeset! {
    pub struct CreateRoomType {
        name: String,
        description: Option<String>,
        max_guests: Option<i64>,
    }
}

crate::changeset! {
    pub struct UpdateRoomType {
        name: Option<String>,
        #[serde(default)]
        description: Patch<String>,
        max_guests: Option<i64>,
    }
}

impl Resource for RoomTypes {
    type Row = RoomType;
    const TABLE: &'static str = "room_types";
    const SELECT: &'static str = "SELECT t.id, t.name, t.description, t.max_guests, \
        (SELECT COUNT(*) FROM rooms r WHERE r.room_type_id = t.id) AS room_count \
        FROM room_types t";
    const ORDER_BY: &'static str = "t.name ASC";
}

impl Creatable for RoomTypes {
    type Create = CreateRoomType;
}

impl Updatable for RoomTypes {
    type Update = UpdateRoomType;
}
