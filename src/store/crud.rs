//! Pass-through CRUD wrappers that take filters built with [`crate::filter`].

use bson::oid::ObjectId;
use bson::{Bson, Document};
use mongodb::Client;
use mongodb::options::FindOptions;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::DbError;
use crate::filter::{Expression, f, is_in};

/// Inserts `records` and returns their ids in insertion order.
///
/// # Errors
/// Returns the driver error if the insert fails.
pub async fn insert_many<T>(
    client: &Client,
    db: &str,
    col: &str,
    records: &[T],
) -> Result<Vec<Bson>, DbError>
where
    T: Serialize + Send + Sync,
{
    let res = client.database(db).collection::<T>(col).insert_many(records).await?;
    let mut ids: Vec<(usize, Bson)> = res.inserted_ids.into_iter().collect();
    ids.sort_by_key(|(i, _)| *i);
    log::debug!("inserted {} documents into {db}.{col}", ids.len());
    Ok(ids.into_iter().map(|(_, id)| id).collect())
}

/// # Errors
/// Returns the driver error if the insert fails.
pub async fn insert_one<T>(client: &Client, db: &str, col: &str, record: &T) -> Result<Bson, DbError>
where
    T: Serialize + Send + Sync,
{
    let res = client.database(db).collection::<T>(col).insert_one(record).await?;
    Ok(res.inserted_id)
}

/// Runs `filter` and decodes every match into `out`.
///
/// # Errors
/// Returns the driver error if the query or decoding fails.
pub async fn find<T>(
    client: &Client,
    db: &str,
    col: &str,
    filter: &Expression,
    out: &mut Vec<T>,
    options: Option<FindOptions>,
) -> Result<(), DbError>
where
    T: DeserializeOwned + Send + Sync,
{
    let mut cursor =
        client.database(db).collection::<T>(col).find(filter.to_document()).with_options(options).await?;
    while cursor.advance().await? {
        out.push(cursor.deserialize_current()?);
    }
    log::debug!("find on {db}.{col} with {filter} returned {} documents", out.len());
    Ok(())
}

/// Applies `update` to the first match and returns the document as it was
/// before the update.
///
/// # Errors
/// Returns the driver error if the operation fails.
pub async fn find_one_and_update<T>(
    client: &Client,
    db: &str,
    col: &str,
    filter: &Expression,
    update: Document,
) -> Result<Option<T>, DbError>
where
    T: DeserializeOwned + Send + Sync,
{
    let found = client
        .database(db)
        .collection::<T>(col)
        .find_one_and_update(filter.to_document(), update)
        .await?;
    Ok(found)
}

/// Deletes every document whose `_id` is in `ids`; returns the deleted count.
///
/// # Errors
/// Returns the driver error if the delete fails.
pub async fn delete_by_ids<I>(client: &Client, db: &str, col: &str, ids: I) -> Result<u64, DbError>
where
    I: IntoIterator<Item = ObjectId>,
{
    let filter = f("_id", [is_in(ids)]);
    let res = client.database(db).collection::<Document>(col).delete_many(filter.to_document()).await?;
    log::debug!("deleted {} documents from {db}.{col}", res.deleted_count);
    Ok(res.deleted_count)
}

/// Parses hex ids first; nothing is deleted if any of them is malformed.
///
/// # Errors
/// Returns `InvalidObjectId` for a malformed id, or the driver error.
pub async fn delete_by_hex_ids<S: AsRef<str>>(
    client: &Client,
    db: &str,
    col: &str,
    ids: &[S],
) -> Result<u64, DbError> {
    let parsed = parse_hex_ids(ids)?;
    delete_by_ids(client, db, col, parsed).await
}

/// # Errors
/// Returns `InvalidObjectId` naming the first id that does not parse.
pub fn parse_hex_ids<S: AsRef<str>>(ids: &[S]) -> Result<Vec<ObjectId>, DbError> {
    ids.iter()
        .map(|s| {
            ObjectId::parse_str(s.as_ref())
                .map_err(|e| DbError::InvalidObjectId(format!("{}: {e}", s.as_ref())))
        })
        .collect()
}
