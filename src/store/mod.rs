//! Collaborators that carry built filters to the database.
//!
//! The connection manager is generic over a [`Connector`]; the MongoDB
//! connector, CRUD wrappers and the [`Store`] façade need the `mongodb` feature.

pub mod conn;
#[cfg(feature = "mongodb")]
pub mod crud;
#[cfg(feature = "mongodb")]
pub mod mongo;

pub use conn::{ConnectionManager, Connector, run};

#[cfg(feature = "mongodb")]
pub use facade::Store;

#[cfg(feature = "mongodb")]
mod facade {
    use bson::oid::ObjectId;
    use bson::{Bson, Document};
    use mongodb::options::FindOptions;
    use serde::Serialize;
    use serde::de::DeserializeOwned;

    use super::conn::ConnectionManager;
    use super::crud;
    use super::mongo::MongoConnector;
    use crate::config::ConnectionSettings;
    use crate::errors::DbError;
    use crate::filter::Expression;

    /// Explicitly constructed database handle. Create one at startup and pass
    /// it by reference; the connection is opened on first use.
    pub struct Store {
        manager: ConnectionManager<MongoConnector>,
    }

    impl Store {
        #[must_use]
        pub fn new(settings: ConnectionSettings) -> Self {
            Self { manager: ConnectionManager::new(MongoConnector::new(settings)) }
        }

        pub fn manager(&self) -> &ConnectionManager<MongoConnector> {
            &self.manager
        }

        /// Opens the connection if needed; fails if it could not be established.
        pub async fn ping(&self) -> Result<(), DbError> {
            self.manager.acquire().await.map(|_| ())
        }

        pub async fn insert_many<T>(&self, db: &str, col: &str, records: &[T]) -> Result<Vec<Bson>, DbError>
        where
            T: Serialize + Send + Sync,
        {
            self.manager.run(|c| async move { crud::insert_many(&c, db, col, records).await }).await
        }

        pub async fn find<T>(
            &self,
            db: &str,
            col: &str,
            filter: &Expression,
            out: &mut Vec<T>,
            options: Option<FindOptions>,
        ) -> Result<(), DbError>
        where
            T: DeserializeOwned + Send + Sync,
        {
            self.manager
                .run(|c| async move { crud::find(&c, db, col, filter, out, options).await })
                .await
        }

        pub async fn find_one_and_update<T>(
            &self,
            db: &str,
            col: &str,
            filter: &Expression,
            update: Document,
        ) -> Result<Option<T>, DbError>
        where
            T: DeserializeOwned + Send + Sync,
        {
            self.manager
                .run(|c| async move { crud::find_one_and_update(&c, db, col, filter, update).await })
                .await
        }

        pub async fn delete_by_ids(&self, db: &str, col: &str, ids: Vec<ObjectId>) -> Result<u64, DbError> {
            self.manager.run(|c| async move { crud::delete_by_ids(&c, db, col, ids).await }).await
        }

        pub async fn delete_by_hex_ids<S: AsRef<str> + Sync>(
            &self,
            db: &str,
            col: &str,
            ids: &[S],
        ) -> Result<u64, DbError> {
            self.manager.run(|c| async move { crud::delete_by_hex_ids(&c, db, col, ids).await }).await
        }
    }
}
