use serde::Serialize;
use sqlx::FromRow;

use crate::crud::{Creatable, Patch, Resource, Updatable};

pub struct Discounts;

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub percentage: f64,
    pub is_active: bool,
}

crate::changeset! {
    pub struct CreateDiscount {
        name: String,
        description: Option<String>,
        percentage: f64,
        is_active: Option<bool>,
    }
}

crate::changeset! {
    pub struct UpdateDiscount {
        name: Option<String>,
        #[serde(default)]
        description: Patch<String>,
        percentage: Option<f64>,
        is_active: Option<bool>,
    }
}

impl Resource for Discounts {
    type Row = Discount;
    const TABLE: &'static str = "discounts";
    const SELECT: &'static str = "SELECT t.id, t.name, t.description, t.percentage, t.is_active FROM discounts t";
    const ORDER_BY: &'static str = "t.name ASC";
}

impl Creatable for Discounts {
    type Create = CreateDiscount;
}

impl Updatable for Discounts {
    type Update = UpdateDiscount;
}
