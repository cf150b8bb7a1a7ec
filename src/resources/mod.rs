//! Resource descriptions mounted through [`crate::crud::Crud`].
//!
//! Related rows are included as nested JSON built by SQLite's `json_object`,
//! so every list is a single query.

use serde::{Deserialize, Serialize};

pub mod amenities;
pub mod booking_statuses;
pub mod bookings;
pub mod cities;
pub mod countries;
pub mod discounts;
pub mod hotels;
pub mod payment_methods;
pub mod reviews;
pub mod room_types;
pub mod rooms;
pub mod users;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CountryRef {
    pub id: i64,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}
