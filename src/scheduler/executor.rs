//! Background executor driving a [`JobScheduler`].

use super::{JobHandler, JobScheduler, SchedulerError, SchedulerResult};
use mockable::Clock;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Handle to a running scheduler executor.
///
/// Dropping the handle leaves the executor running; call
/// [`SchedulerHandle::shutdown`] to stop it.
#[derive(Debug)]
pub struct SchedulerHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stops the executor and waits for it to exit.
    ///
    /// A firing in progress completes before the executor stops.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Executor`] if the executor task panicked.
    pub async fn shutdown(self) -> SchedulerResult<()> {
        self.token.cancel();
        self.task.await?;
        Ok(())
    }
}

impl<P, C> JobScheduler<P, C>
where
    P: Clone + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Spawns the executor on the current Tokio runtime.
    ///
    /// The executor wakes every [`JobScheduler::tick_interval`] and fires
    /// whatever is due. It is started once per scheduler; a second call
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::AlreadyStarted`] if an executor was already
    /// spawned for this scheduler.
    pub fn start<H>(self: &Arc<Self>, handler: Arc<H>) -> SchedulerResult<SchedulerHandle>
    where
        H: JobHandler<P> + 'static,
    {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(SchedulerError::AlreadyStarted);
        }

        let token = CancellationToken::new();
        let scheduler = Arc::clone(self);
        let stop = token.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(scheduler.tick_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(tick = ?scheduler.tick_interval(), "scheduler executor started");
            loop {
                tokio::select! {
                    () = stop.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(err) = scheduler.run_pending(&handler).await {
                            error!(error = %err, "scheduler tick failed");
                        }
                    }
                }
            }
            info!("scheduler executor stopped");
        });

        Ok(SchedulerHandle { token, task })
    }
}
