use tokio::sync::{
    mpsc::{Receiver, Sender},
    oneshot,
};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::engine::core::build::{BatchBuilder, BuildSummary, OffsetCommit};
use crate::engine::core::kv::KvSink;
use crate::engine::core::parse::RawRecord;
use crate::engine::errors::{BuildError, SinkError};
use crate::shared::config::CONFIG;

/// One window of records for the worker, with an optional completion
/// channel for the caller that wants the outcome.
pub struct BuildRequest {
    pub records: Vec<RawRecord>,
    pub completion: Option<oneshot::Sender<Result<BuildSummary, BuildError>>>,
}

/// Sequential build loop of one partition. Batches are processed in arrival
/// order; the watermark is committed only after the sink accepted the batch,
/// and the sink is closed when the request channel closes.
pub struct BuildWorker<S: KvSink, C: OffsetCommit> {
    builder: BatchBuilder<S>,
    committer: C,
}

impl<S, C> BuildWorker<S, C>
where
    S: KvSink + 'static,
    C: OffsetCommit + 'static,
{
    pub fn new(builder: BatchBuilder<S>, committer: C) -> Self {
        Self { builder, committer }
    }

    /// Start the worker task. Dropping the sender shuts the worker down.
    pub fn spawn(self) -> (Sender<BuildRequest>, JoinHandle<Result<(), SinkError>>) {
        let (tx, rx) = tokio::sync::mpsc::channel(CONFIG.engine.build_queue_depth);
        let handle = tokio::spawn(self.run(rx));
        (tx, handle)
    }

    pub async fn run(mut self, mut rx: Receiver<BuildRequest>) -> Result<(), SinkError> {
        let partition = self.builder.partition();
        info!(target: "sliceforge::build", partition, "Build worker started");

        while let Some(request) = rx.recv().await {
            let outcome = self.process(request.records).await;
            if outcome.is_err() {
                error!(
                    target: "sliceforge::build",
                    partition,
                    "Batch lost, upstream must re-deliver from the last committed offset"
                );
            }
            // Always notify, even on error
            if let Some(completion) = request.completion {
                let _ = completion.send(outcome);
            }
        }

        info!(
            target: "sliceforge::build",
            partition,
            "Request channel closed, closing sink"
        );
        self.builder.finish().await
    }

    async fn process(&mut self, records: Vec<RawRecord>) -> Result<BuildSummary, BuildError> {
        let summary = self.builder.build(&records).await?;

        if let Some(watermark) = summary.watermark {
            self.committer
                .commit(self.builder.partition(), watermark)
                .await?;
            debug!(
                target: "sliceforge::build",
                partition = self.builder.partition(),
                watermark,
                "Watermark committed after sink write"
            );
        }

        Ok(summary)
    }
}
