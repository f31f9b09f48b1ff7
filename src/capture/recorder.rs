use std::rc::Rc;

use crate::capture::clock::Clock;
use crate::capture::session::{Artifact, CaptureOpts, CaptureSession, TickOutcome};
use crate::capture::surface::DisplaySurface;
use crate::encode::sink::StreamEncoder;
use crate::foundation::error::{ErrorKind, GardenError, GardenResult};

/// Lifecycle notifications for a recording. Notifications only; results flow through `Result`s.
pub trait CaptureObserver {
    /// Sampling began.
    fn on_start(&mut self) {}
    /// The artifact is ready.
    fn on_finish(&mut self, _artifact: &Artifact) {}
    /// The recording failed.
    fn on_error(&mut self, _kind: ErrorKind) {}
}

/// Observer that reports lifecycle events through `tracing`.
#[derive(Debug, Default)]
pub struct LogObserver;

impl CaptureObserver for LogObserver {
    fn on_start(&mut self) {
        tracing::info!("recording");
    }

    fn on_finish(&mut self, artifact: &Artifact) {
        tracing::info!(file = %artifact.file_name, bytes = artifact.bytes.len(), "recording ready");
    }

    fn on_error(&mut self, kind: ErrorKind) {
        tracing::warn!(?kind, "recording failed");
    }
}

/// Owns at most one live [`CaptureSession`] and drives it at the configured rate.
pub struct Recorder {
    active: Option<CaptureSession>,
    clock: Rc<dyn Clock>,
    observer: Option<Box<dyn CaptureObserver>>,
}

impl Recorder {
    /// Recorder using `clock` for pacing and session timing.
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            active: None,
            clock,
            observer: None,
        }
    }

    /// Attach a lifecycle observer.
    pub fn with_observer(mut self, observer: Box<dyn CaptureObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Whether a session is currently live.
    pub fn is_busy(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|s| !s.state().is_terminal())
    }

    /// Start a new session. Fails with [`GardenError::CaptureBusy`] while one is live.
    pub fn begin(
        &mut self,
        opts: CaptureOpts,
        encoder: Box<dyn StreamEncoder>,
    ) -> GardenResult<()> {
        if self.is_busy() {
            return Err(GardenError::capture_busy("a recording is already in progress"));
        }
        self.active = None;

        let started = CaptureSession::new(opts, encoder, self.clock.clone()).and_then(|mut s| {
            s.start()?;
            Ok(s)
        });
        match started {
            Ok(session) => {
                self.active = Some(session);
                self.notify(|o| o.on_start());
                Ok(())
            }
            Err(e) => {
                let kind = e.kind();
                self.notify(|o| o.on_error(kind));
                Err(e)
            }
        }
    }

    /// Sample `surface` until the duration elapses, then finalize the artifact.
    pub fn run(&mut self, surface: &mut dyn DisplaySurface) -> GardenResult<Artifact> {
        let result = self.drive(surface);
        if let Some(mut session) = self.active.take() {
            session.cancel();
        }
        match &result {
            Ok(artifact) => self.notify(|o| o.on_finish(artifact)),
            Err(e) => {
                let kind = e.kind();
                self.notify(|o| o.on_error(kind));
            }
        }
        result
    }

    /// `begin` followed by `run`.
    pub fn record(
        &mut self,
        opts: CaptureOpts,
        encoder: Box<dyn StreamEncoder>,
        surface: &mut dyn DisplaySurface,
    ) -> GardenResult<Artifact> {
        self.begin(opts, encoder)?;
        self.run(surface)
    }

    /// Cancel the live session, if any. Safe to repeat.
    pub fn abort(&mut self) {
        if let Some(mut session) = self.active.take() {
            session.cancel();
        }
    }

    fn drive(&mut self, surface: &mut dyn DisplaySurface) -> GardenResult<Artifact> {
        let session = self
            .active
            .as_mut()
            .ok_or_else(|| GardenError::validation("run called without an active recording"))?;
        let duration = session.opts().duration;

        loop {
            let due = session.next_due().min(duration);
            let elapsed = session.elapsed();
            if elapsed < due {
                self.clock.sleep(due - elapsed);
            }
            match session.tick(surface)? {
                TickOutcome::Captured(_) | TickOutcome::Skipped => {}
                TickOutcome::Draining => return session.finish(),
            }
        }
    }

    fn notify(&mut self, f: impl FnOnce(&mut dyn CaptureObserver)) {
        if let Some(o) = self.observer.as_deref_mut() {
            f(o);
        }
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/recorder.rs"]
mod tests;
