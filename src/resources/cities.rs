use serde::Serialize;
use sqlx::FromRow;

use crate::crud::{Creatable, Resource};

use super::CountryRef;

pub struct Cities;

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: i64,
    pub name: String,
    pub country_id: i64,
    #[sqlx(json)]
    pub country: CountryRef,
}

crate::changeset! {
    pub struct CreateCity {
        name: String,
        country_id: i64,
    }
}

impl Resource for Cities {
    type Row = City;
    const TABLE: &'static str = "cities";
    const SELECT: &'static str = "SELECT t.id, t.name, t.country_id, \
        json_object('id', co.id, 'name', co.name, 'code', co.code) AS country \
        FROM cities t JOIN countries co ON co.id = t.country_id";
    const ORDER_BY: &'static str = "t.name ASC";
}

impl Creatable for Cities {
    type Create = CreateCity;
}
