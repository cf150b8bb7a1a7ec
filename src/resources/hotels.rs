use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::crud::Resource;

use super::{CountryRef, NamedRef};

pub struct Hotels;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub postal_code: Option<String>,
    pub city: NamedRef,
    pub country: CountryRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelImage {
    pub id: i64,
    pub url: String,
    pub alt: Option<String>,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub stars: Option<i64>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    #[sqlx(json)]
    pub address: Address,
    #[sqlx(json)]
    pub images: Vec<HotelImage>,
    pub room_count: i64,
}

impl Resource for Hotels {
    type Row = Hotel;
    const TABLE: &'static str = "hotels";
    const SELECT: &'static str = "SELECT t.id, t.name, t.description, t.stars, t.is_active, t.created_at, \
        json_object('street', a.street, 'postalCode', a.postal_code, \
            'city', json_object('id', c.id, 'name', c.name), \
            'country', json_object('id', co.id, 'name', co.name, 'code', co.code)) AS address, \
        (SELECT json_group_array(json_object('id', i.id, 'url', i.url, 'alt', i.alt)) \
            FROM hotel_images i WHERE i.hotel_id = t.id) AS images, \
        (SELECT COUNT(*) FROM rooms r WHERE r.hotel_id = t.id) AS room_count \
        FROM hotels t \
        JOIN addresses a ON a.id = t.address_id \
        JOIN cities c ON c.id = a.city_id \
        JOIN countries co ON co.id = c.country_id";
    const ORDER_BY: &'static str = "t.name ASC";
    const LIST_FILTER: Option<&'static str> = Some("t.is_active = 1");
}
