use diesel::SqliteConnection;
use log::{debug, error};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use moneybook_core::errors::{DatabaseError, Error, Result};

/// Capacity of the job queue in front of the writer.
const WRITER_QUEUE_CAPACITY: usize = 1024;

// A write job runs against the writer's connection inside an open transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

fn writer_unavailable(reason: &str) -> Error {
    Error::Database(DatabaseError::Internal(format!(
        "writer actor unavailable: {}",
        reason
    )))
}

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside `BEGIN IMMEDIATE`; it commits when the job returns
    /// `Ok` and rolls back when it returns `Err`. Jobs run one at a time in
    /// submission order.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        let erased: ErasedJob =
            Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>));
        self.tx
            .send((erased, ret_tx))
            .await
            .map_err(|_| writer_unavailable("job channel closed"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_unavailable("reply dropped"))??;
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| writer_unavailable("unexpected result type"))
    }
}

/// Spawns a background Tokio task that acts as the single writer to the database.
///
/// The actor owns one connection from the pool for its whole lifetime and
/// processes jobs serially, so write transactions never interleave.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(WRITER_QUEUE_CAPACITY);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                // Dropping the receiver makes every pending and future exec fail.
                error!("Writer actor could not acquire a connection: {}", e);
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            if let Err(e) = &result {
                debug!("Write job rolled back: {}", e);
            }
            // The requester may have gone away; nothing to do then.
            let _ = reply_tx.send(result);
        }
        debug!("Writer actor stopped");
    });

    WriteHandle { tx }
}
