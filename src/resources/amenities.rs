use serde::Serialize;
use sqlx::FromRow;

use crate::crud::{Creatable, Patch, Resource, Updatable};

pub struct Amenities;

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

crate::changeset! {
    pub struct CreateAmenity {
        name: String,
        description: Option<String>,
        icon: Option<String>,
    }
}

crate::changeset! {
    pub struct UpdateAmenity {
        name: Option<String>,
        #[serde(default)]
        description: Patch<String>,
        #[serde(default)]
        icon: Patch<String>,
    }
}

impl Resource for Amenities {
    type Row = Amenity;
    const TABLE: &'static str = "amenities";
    const SELECT: &'static str = "SELECT t.id, t.name, t.description, t.icon FROM amenities t";
    const ORDER_BY: &'static str = "t.name ASC";
}

impl Creatable for Amenities {
    type Create = CreateAmenity;
}

impl Updatable for Amenities {
    type Update = UpdateAmenity;
}
