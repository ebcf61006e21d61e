use std::future::Future;
use std::time::Instant;
use tokio::sync::OnceCell;

use crate::errors::DbError;

/// Establishes the underlying connection for a [`ConnectionManager`].
pub trait Connector: Send + Sync {
    type Handle: Clone + Send + Sync + 'static;

    fn connect(&self) -> impl Future<Output = Result<Self::Handle, DbError>> + Send;
}

/// Owns the single connection of a process.
///
/// The first `acquire` runs the connector; callers arriving while it runs
/// wait for it and share its outcome. A failed attempt is kept and returned
/// to every later caller, there is no retry.
pub struct ConnectionManager<C: Connector> {
    connector: C,
    slot: OnceCell<Result<C::Handle, String>>,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C) -> Self {
        Self { connector, slot: OnceCell::new() }
    }

    /// # Errors
    /// Returns `DbError::Connection` if the single connect attempt failed.
    pub async fn acquire(&self) -> Result<C::Handle, DbError> {
        let slot = self
            .slot
            .get_or_init(|| async {
                let start = Instant::now();
                let outcome = self.connector.connect().await.map_err(|e| e.to_string());
                crate::dev6!(
                    "{{\"bench\":\"conn\",\"op\":\"connect\",\"ok\":{},\"duration_ms\":{}}}",
                    outcome.is_ok(),
                    start.elapsed().as_millis()
                );
                match &outcome {
                    Ok(_) => log::info!("connection established"),
                    Err(e) => log::error!("connection failed: {e}"),
                }
                outcome
            })
            .await;
        match slot {
            Ok(handle) => Ok(handle.clone()),
            Err(msg) => Err(DbError::Connection(msg.clone())),
        }
    }

    /// Acquires the handle and hands it to `op`.
    ///
    /// # Errors
    /// Returns the connection error, or whatever `op` returns.
    pub async fn run<T, F, Fut>(&self, op: F) -> Result<T, DbError>
    where
        F: FnOnce(C::Handle) -> Fut,
        Fut: Future<Output = Result<T, DbError>>,
    {
        let handle = self.acquire().await?;
        run(handle, op).await
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.slot.initialized()
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }
}

/// Runs `op` against an already acquired handle.
///
/// # Errors
/// Returns whatever `op` returns.
pub async fn run<H, T, F, Fut>(handle: H, op: F) -> Result<T, DbError>
where
    F: FnOnce(H) -> Fut,
    Fut: Future<Output = Result<T, DbError>>,
{
    let start = Instant::now();
    let result = op(handle).await;
    crate::dev6!(
        "{{\"bench\":\"conn\",\"op\":\"run\",\"ok\":{},\"duration_ms\":{}}}",
        result.is_ok(),
        start.elapsed().as_millis()
    );
    result
}
