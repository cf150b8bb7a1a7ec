//! One generic set of list / create / update / delete handlers.
//!
//! A resource describes its table, how to select a row together with its
//! includes, and which fields a client may write. [`Crud`] then mounts the
//! handlers it needs under a collection path, all behind a single [`Gate`].

use std::marker::PhantomData;

use axum::{
    extract::{FromRequest, Path, State},
    http::StatusCode,
    routing::MethodRouter,
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::json;
use sqlx::{sqlite::SqliteRow, FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::{session::{Caller, Gate}, AppError, AppResult, AppState};

pub trait Resource: Send + Sync + 'static {
    type Row: Serialize + for<'r> FromRow<'r, SqliteRow> + Send + Unpin;

    const TABLE: &'static str;

    /// `SELECT ... FROM <TABLE> t ...` without WHERE or ORDER BY.
    const SELECT: &'static str;

    const ORDER_BY: &'static str;

    /// Extra condition applied to listings only.
    const LIST_FILTER: Option<&'static str> = None;
}

pub trait Creatable: Resource {
    type Create: Changeset;
}

pub trait Updatable: Resource {
    type Update: Changeset;
}

/// A bound value for one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(String),
    Int(i64),
    Real(f64),
    Bool(bool),
    Null,
}

pub trait IntoField {
    fn into_field(self) -> Option<Field>;
}

impl IntoField for String {
    fn into_field(self) -> Option<Field> {
        Some(Field::Text(self))
    }
}

impl IntoField for i64 {
    fn into_field(self) -> Option<Field> {
        Some(Field::Int(self))
    }
}

impl IntoField for f64 {
    fn into_field(self) -> Option<Field> {
        Some(Field::Real(self))
    }
}

impl IntoField for bool {
    fn into_field(self) -> Option<Field> {
        Some(Field::Bool(self))
    }
}

/// Absent fields are left alone: column default on insert, old value on update.
impl<T: IntoField> IntoField for Option<T> {
    fn into_field(self) -> Option<Field> {
        self.and_then(IntoField::into_field)
    }
}

/// A nullable column in an update body.
///
/// An absent key keeps the stored value, an explicit `null` clears it.
/// Fields of this type need `#[serde(default)]` so that absence deserializes.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Keep,
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}

impl<T: IntoField> IntoField for Patch<T> {
    fn into_field(self) -> Option<Field> {
        match self {
            Patch::Keep => None,
            Patch::Clear => Some(Field::Null),
            Patch::Set(value) => value.into_field(),
        }
    }
}

/// The writable columns of a request body, in declaration order.
pub trait Changeset: DeserializeOwned + Send + 'static {
    fn into_fields(self) -> Vec<(&'static str, Field)>;
}

/// Declares a request body whose field names double as column names.
#[macro_export]
macro_rules! changeset {
    ($(#[$meta:meta])* pub struct $name:ident { $($(#[$field_meta:meta])* $field:ident : $ty:ty),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $($(#[$field_meta])* pub $field: $ty,)*
        }

        impl $crate::crud::Changeset for $name {
            fn into_fields(self) -> Vec<(&'static str, $crate::crud::Field)> {
                let mut fields = Vec::new();
                $(
                    if let Some(value) = $crate::crud::IntoField::into_field(self.$field) {
                        fields.push((stringify!($field), value));
                    }
                )*
                fields
            }
        }
    };
}

/// JSON body whose rejection is reported as an [`AppError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Payload<T>(pub T);

fn push_field(qb: &mut QueryBuilder<'_, Sqlite>, field: Field) {
    match field {
        Field::Text(v) => qb.push_bind(v),
        Field::Int(v) => qb.push_bind(v),
        Field::Real(v) => qb.push_bind(v),
        Field::Bool(v) => qb.push_bind(v),
        Field::Null => qb.push("NULL"),
    };
}

pub async fn fetch_by_id<R: Resource>(db_pool: &SqlitePool, id: i64) -> AppResult<R::Row> {
    let sql = format!("{} WHERE t.id = ?", R::SELECT);
    Ok(sqlx::query_as::<_, R::Row>(&sql).bind(id).fetch_one(db_pool).await?)
}

pub async fn fetch_all<R: Resource>(db_pool: &SqlitePool) -> AppResult<Vec<R::Row>> {
    let sql = match R::LIST_FILTER {
        Some(filter) => format!("{} WHERE {} ORDER BY {}", R::SELECT, filter, R::ORDER_BY),
        None => format!("{} ORDER BY {}", R::SELECT, R::ORDER_BY),
    };
    Ok(sqlx::query_as::<_, R::Row>(&sql).fetch_all(db_pool).await?)
}

pub async fn insert<R: Creatable>(db_pool: &SqlitePool, body: R::Create) -> AppResult<R::Row> {
    let fields = body.into_fields();

    let mut qb = QueryBuilder::<Sqlite>::new(format!("INSERT INTO {} ", R::TABLE));
    if fields.is_empty() {
        qb.push("DEFAULT VALUES");
    } else {
        let columns = fields.iter().map(|(column, _)| *column).collect::<Vec<_>>().join(", ");
        qb.push(format!("({columns}) VALUES ("));
        for (i, (_, value)) in fields.into_iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            push_field(&mut qb, value);
        }
        qb.push(")");
    }
    qb.push(" RETURNING id");

    let id: i64 = qb.build_query_scalar().fetch_one(db_pool).await?;
    tracing::info!(table = R::TABLE, id, "created");
    fetch_by_id::<R>(db_pool, id).await
}

pub async fn update<R: Updatable>(db_pool: &SqlitePool, id: i64, body: R::Update) -> AppResult<R::Row> {
    let fields = body.into_fields();

    // Nothing to write still has to answer 404 for a missing row, which the re-read does.
    if !fields.is_empty() {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", R::TABLE));
        for (i, (column, value)) in fields.into_iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(column).push(" = ");
            push_field(&mut qb, value);
        }
        qb.push(" WHERE id = ").push_bind(id);

        if qb.build().execute(db_pool).await?.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        tracing::info!(table = R::TABLE, id, "updated");
    }

    fetch_by_id::<R>(db_pool, id).await
}

pub async fn delete<R: Resource>(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
    let result = sqlx::query(&sql).bind(id).execute(db_pool).await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!(table = R::TABLE, id, "deleted");
    Ok(())
}

/// Route builder for one resource.
///
/// ```ignore
/// Crud::<Amenities>::new("/api/admin/amenities", Gate::Staff)
///     .list()
///     .create()
///     .update()
///     .delete()
///     .into_router()
/// ```
pub struct Crud<R> {
    path: &'static str,
    gate: Gate,
    collection: Option<MethodRouter<AppState>>,
    item: Option<MethodRouter<AppState>>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Crud<R> {
    pub fn new(path: &'static str, gate: Gate) -> Self {
        Crud { path, gate, collection: None, item: None, _resource: PhantomData }
    }

    pub fn list(mut self) -> Self {
        let gate = self.gate;
        let handler = move |caller: Caller, State(db_pool): State<SqlitePool>| async move {
            gate.check(&caller, false)?;
            fetch_all::<R>(&db_pool).await.map(Json)
        };
        self.collection = Some(self.collection.take().unwrap_or_else(MethodRouter::new).get(handler));
        self
    }

    pub fn delete(mut self) -> Self {
        let gate = self.gate;
        let handler = move |caller: Caller, State(db_pool): State<SqlitePool>, Path(id): Path<i64>| async move {
            gate.check(&caller, true)?;
            delete::<R>(&db_pool, id).await?;
            AppResult::Ok(Json(json!({ "success": true })))
        };
        self.item = Some(self.item.take().unwrap_or_else(MethodRouter::new).delete(handler));
        self
    }

    pub fn into_router(self) -> Router<AppState> {
        let mut router = Router::new();
        if let Some(collection) = self.collection {
            router = router.route(self.path, collection);
        }
        if let Some(item) = self.item {
            router = router.route(&format!("{}/{{id}}", self.path), item);
        }
        router
    }
}

impl<R: Creatable> Crud<R> {
    pub fn create(mut self) -> Self {
        let gate = self.gate;
        let handler = move |caller: Caller,
                            State(db_pool): State<SqlitePool>,
                            body: Result<Payload<R::Create>, AppError>| async move {
            gate.check(&caller, true)?;
            let Payload(body) = body?;
            let row = insert::<R>(&db_pool, body).await?;
            AppResult::Ok((StatusCode::CREATED, Json(row)))
        };
        self.collection = Some(self.collection.take().unwrap_or_else(MethodRouter::new).post(handler));
        self
    }
}

impl<R: Updatable> Crud<R> {
    pub fn update(mut self) -> Self {
        let gate = self.gate;
        let handler = move |caller: Caller,
                            State(db_pool): State<SqlitePool>,
                            Path(id): Path<i64>,
                            body: Result<Payload<R::Update>, AppError>| async move {
            gate.check(&caller, true)?;
            let Payload(body) = body?;
            update::<R>(&db_pool, id, body).await.map(Json)
        };
        self.item = Some(self.item.take().unwrap_or_else(MethodRouter::new).put(handler));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    changeset! {
        pub struct Sample {
            name: String,
            max_guests: Option<i64>,
            is_active: Option<bool>,
            #[serde(default)]
            description: Patch<String>,
        }
    }

    #[test]
    fn absent_fields_are_skipped() {
        let body: Sample = serde_json::from_value(json!({ "name": "Suite", "isActive": false })).unwrap();
        assert_eq!(
            body.into_fields(),
            vec![("name", Field::Text("Suite".into())), ("is_active", Field::Bool(false))]
        );
    }

    #[test]
    fn body_keys_are_camel_case() {
        let body: Sample = serde_json::from_value(json!({ "name": "Suite", "maxGuests": 4 })).unwrap();
        assert_eq!(body.into_fields()[1], ("max_guests", Field::Int(4)));
    }

    #[test]
    fn explicit_null_clears_a_nullable_field() {
        let body: Sample = serde_json::from_value(json!({ "name": "Suite", "description": null })).unwrap();
        assert_eq!(body.into_fields()[1], ("description", Field::Null));

        let body: Sample = serde_json::from_value(json!({ "name": "Suite" })).unwrap();
        assert_eq!(body.into_fields().len(), 1);

        let body: Sample = serde_json::from_value(json!({ "name": "Suite", "description": "Sea view" })).unwrap();
        assert_eq!(body.into_fields()[1], ("description", Field::Text("Sea view".into())));
    }

    #[test]
    fn required_fields_are_enforced_by_the_type() {
        assert!(serde_json::from_value::<Sample>(json!({ "maxGuests": 4 })).is_err());
    }
}
