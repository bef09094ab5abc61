//! Renders on worker threads.
//!
//! [`BackgroundRenderer`] runs each full render (layout, export, atomic write)
//! on its own named thread and reports a [`RenderOutcome`] over a channel, so
//! a foreground loop stays responsive. Two renders never write the same
//! output file at once: a second submission for a target that is still being
//! rendered fails with [`PedigreeError::RenderInFlight`]. Jobs are not
//! cancellable; each runs to completion or to an error.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, PoisonError,
        mpsc::{self, Receiver, RecvTimeoutError, Sender},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, error, info};

use crate::{Document, PedigreeBuilder, PedigreeError};

/// The result of one background render.
#[derive(Debug)]
pub struct RenderOutcome {
    output: PathBuf,
    result: Result<(), PedigreeError>,
}

impl RenderOutcome {
    /// The output path as it was submitted.
    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn result(&self) -> &Result<(), PedigreeError> {
        &self.result
    }

    pub fn into_result(self) -> Result<PathBuf, PedigreeError> {
        self.result.map(|()| self.output)
    }
}

type InFlight = Arc<Mutex<HashSet<PathBuf>>>;

/// How long `recv` waits before checking that some worker is still alive.
const LIVENESS_CHECK: Duration = Duration::from_millis(200);

/// Releases an output target when the render that claimed it ends.
struct TargetClaim {
    in_flight: InFlight,
    key: PathBuf,
}

impl Drop for TargetClaim {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Sends a worker's outcome when the worker ends, even if its job panics.
///
/// A job that unwinds before setting `result` is reported as an export error.
struct OutcomeReporter {
    sender: Sender<RenderOutcome>,
    output: PathBuf,
    claim: Option<TargetClaim>,
    result: Option<Result<(), PedigreeError>>,
}

impl Drop for OutcomeReporter {
    fn drop(&mut self) {
        // Free the target before reporting, so a receiver may resubmit it
        drop(self.claim.take());
        let result = self.result.take().unwrap_or_else(|| {
            error!(output:? = self.output; "Render thread panicked");
            Err(PedigreeError::Export("render thread panicked".into()))
        });
        // The receiver may be gone; nothing is waiting for this outcome then
        let _ = self.sender.send(RenderOutcome {
            output: self.output.clone(),
            result,
        });
    }
}

/// Runs renders off the calling thread.
///
/// # Examples
///
/// ```rust,no_run
/// use pedigree::{Document, PedigreeBuilder, record::FamilyRecord, render::BackgroundRenderer};
///
/// let mut renderer = BackgroundRenderer::new(PedigreeBuilder::default());
/// let document = Document::new(None, FamilyRecord::new("文达"));
///
/// renderer.submit(document, "tree.svg").expect("target is free");
/// for outcome in renderer.wait_all() {
///     println!("{}: {:?}", outcome.output().display(), outcome.result());
/// }
/// ```
pub struct BackgroundRenderer {
    builder: Arc<PedigreeBuilder>,
    in_flight: InFlight,
    sender: Sender<RenderOutcome>,
    receiver: Receiver<RenderOutcome>,
    handles: Vec<JoinHandle<()>>,
    pending: usize,
    submitted: usize,
}

impl BackgroundRenderer {
    pub fn new(builder: PedigreeBuilder) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            builder: Arc::new(builder),
            in_flight: Arc::default(),
            sender,
            receiver,
            handles: Vec::new(),
            pending: 0,
            submitted: 0,
        }
    }

    /// Starts rendering `document` to `output` on a new thread.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::RenderInFlight`] if `output` is still being
    /// rendered, or an I/O error if the thread cannot be spawned.
    pub fn submit(
        &mut self,
        document: Document,
        output: impl Into<PathBuf>,
    ) -> Result<(), PedigreeError> {
        let output = output.into();
        let key = target_key(&output);

        {
            let mut in_flight = self
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if !in_flight.insert(key.clone()) {
                return Err(PedigreeError::RenderInFlight(output));
            }
        }
        let claim = TargetClaim {
            in_flight: Arc::clone(&self.in_flight),
            key,
        };

        let builder = Arc::clone(&self.builder);
        self.spawn_job(output, claim, move |output| {
            builder.render_to_file(&document, output)
        })
    }

    /// Runs `job` on a named worker that reports its outcome for `output`.
    fn spawn_job<F>(
        &mut self,
        output: PathBuf,
        claim: TargetClaim,
        job: F,
    ) -> Result<(), PedigreeError>
    where
        F: FnOnce(&Path) -> Result<(), PedigreeError> + Send + 'static,
    {
        self.submitted += 1;
        let name = format!("pedigree-render-{}", self.submitted);
        let sender = self.sender.clone();
        let job_output = output.clone();

        let handle = thread::Builder::new().name(name.clone()).spawn(move || {
            let mut reporter = OutcomeReporter {
                sender,
                output: job_output,
                claim: Some(claim),
                result: None,
            };
            let result = job(&reporter.output);
            if let Err(err) = &result {
                error!(output:? = reporter.output, err:% = err; "Background render failed");
            }
            reporter.result = Some(result);
        })?;

        info!(thread = name, output:? = output; "Render submitted");
        self.handles.push(handle);
        self.pending += 1;
        Ok(())
    }

    /// Number of targets currently being rendered.
    pub fn in_flight(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of outcomes not yet received.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Blocks until the next render finishes.
    ///
    /// Returns `None` when nothing is pending, or when every worker has exited
    /// and no outcome is left to receive.
    pub fn recv(&mut self) -> Option<RenderOutcome> {
        while self.pending > 0 {
            match self.receiver.recv_timeout(LIVENESS_CHECK) {
                Ok(outcome) => return Some(self.received(outcome)),
                Err(RecvTimeoutError::Timeout) if self.workers_running() => {}
                Err(_) => {
                    // Workers send before they finish, so a late outcome is already queued
                    if let Ok(outcome) = self.receiver.try_recv() {
                        return Some(self.received(outcome));
                    }
                    error!(lost = self.pending; "Render threads exited without reporting");
                    self.pending = 0;
                }
            }
        }
        None
    }

    /// Returns a finished render without blocking.
    pub fn try_recv(&mut self) -> Option<RenderOutcome> {
        let outcome = self.receiver.try_recv().ok()?;
        Some(self.received(outcome))
    }

    fn received(&mut self, outcome: RenderOutcome) -> RenderOutcome {
        self.pending = self.pending.saturating_sub(1);
        debug!(output:? = outcome.output, pending = self.pending; "Render finished");
        outcome
    }

    fn workers_running(&self) -> bool {
        self.handles.iter().any(|handle| !handle.is_finished())
    }

    /// Waits for every pending render, in completion order.
    pub fn wait_all(&mut self) -> Vec<RenderOutcome> {
        let mut outcomes = Vec::with_capacity(self.pending);
        while let Some(outcome) = self.recv() {
            outcomes.push(outcome);
        }
        self.join_finished();
        outcomes
    }

    fn join_finished(&mut self) {
        let (finished, running): (Vec<_>, Vec<_>) =
            self.handles.drain(..).partition(|handle| handle.is_finished());
        self.handles = running;
        for handle in finished {
            if handle.join().is_err() {
                error!("Render thread panicked");
            }
        }
    }
}

impl Drop for BackgroundRenderer {
    fn drop(&mut self) {
        // Renders are not cancellable; let them finish writing
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Identifies an output target independent of how its path was spelled.
fn target_key(output: &Path) -> PathBuf {
    std::path::absolute(output).unwrap_or_else(|_| output.to_path_buf())
}
