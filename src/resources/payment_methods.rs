use serde::Serialize;
use sqlx::FromRow;

use crate::crud::{Creatable, Patch, Resource, Updatable};

pub struct PaymentMethods;

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

crate::changeset! {
    pub struct CreatePaymentMethod {
        name: String,
        description: Option<String>,
        is_active: Option<bool>,
    }
}

crate::changeset! {
    pub struct UpdatePaymentMethod {
        name: Option<String>,
        #[serde(default)]
        description: Patch<String>,
        is_active: Option<bool>,
    }
}

impl Resource for PaymentMethods {
    type Row = PaymentMethod;
    const TABLE: &'static str = "payment_methods";
    const SELECT: &'static str = "SELECT t.id, t.name, t.description, t.is_active FROM payment_methods t";
    const ORDER_BY: &'static str = "t.name ASC";
}

impl Creatable for PaymentMethods {
    type Create = CreatePaymentMethod;
}

impl Updatable for PaymentMethods {
    type Update = UpdatePaymentMethod;
}
