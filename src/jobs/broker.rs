use crate::jobs::models::Job;
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnqueueError {
    #[error("the job queue is full")]
    Full,
    #[error("the job queue is closed")]
    Closed,
}

impl<T> From<TrySendError<T>> for EnqueueError {
    fn from(err: TrySendError<T>) -> Self {
        match err {
            TrySendError::Full(_) => EnqueueError::Full,
            TrySendError::Closed(_) => EnqueueError::Closed,
        }
    }
}

/// Producer side of the deferred-job queue. Enqueueing never waits, so it is
/// safe to call from a request handler.
#[derive(Clone, Debug)]
pub struct JobBroker {
    sender: mpsc::Sender<Job>,
}

impl JobBroker {
    pub fn enqueue(&self, job: Job) -> Result<(), EnqueueError> {
        let kind = job.kind();
        self.sender.try_send(job)?;
        tracing::debug!(job = kind, pending = self.pending(), "Enqueued a job.");
        Ok(())
    }

    pub fn pending(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }

    /// A handle that does not keep the queue open.
    pub fn downgrade(&self) -> WeakJobBroker {
        WeakJobBroker {
            sender: self.sender.downgrade(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct WeakJobBroker {
    sender: mpsc::WeakSender<Job>,
}

impl WeakJobBroker {
    pub fn enqueue(&self, job: Job) -> Result<(), EnqueueError> {
        match self.sender.upgrade() {
            Some(sender) => JobBroker { sender }.enqueue(job),
            None => Err(EnqueueError::Closed),
        }
    }
}

/// Consumer side; each job is handed out exactly once.
#[derive(Debug)]
pub struct JobConsumer {
    receiver: mpsc::Receiver<Job>,
}

impl JobConsumer {
    /// Waits for the next job; `None` once every broker is gone and the
    /// queue is drained.
    pub async fn consume_job(&mut self) -> Option<Job> {
        self.receiver.recv().await
    }

    #[cfg(test)]
    pub fn try_consume_job(&mut self) -> Option<Job> {
        self.receiver.try_recv().ok()
    }
}

pub fn channel(capacity: usize) -> (JobBroker, JobConsumer) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (JobBroker { sender }, JobConsumer { receiver })
}
