use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::crud::{Changeset, Creatable, Field, Resource};

pub struct Countries;

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub city_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateCountry {
    pub name: String,
    pub code: String,
}

impl Changeset for CreateCountry {
    /// Codes are stored uppercase whatever the caller sent.
    fn into_fields(self) -> Vec<(&'static str, Field)> {
        vec![
            ("name", Field::Text(self.name)),
            ("code", Field::Text(self.code.to_uppercase())),
        ]
    }
}

impl Resource for Countries {
    type Row = Country;
    const TABLE: &'static str = "countries";
    const SELECT: &'static str = "SELECT t.id, t.name, t.code, \
        (SELECT COUNT(*) FROM cities c WHERE c.country_id = t.id) AS city_count \
        FROM countries t";
    const ORDER_BY: &'static str = "t.name ASC";
}

impl Creatable for Countries {
    type Create = CreateCountry;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_codes_are_uppercased() {
        let body = CreateCountry { name: "United States".into(), code: "us".into() };
        assert_eq!(body.into_fields()[1], ("code", Field::Text("US".into())));
    }
}
