//! Staggered reveal of a composition onto a sink.
//!
//! A [`Stage`] owns one sink and at most one in-flight run. Starting a new run
//! drops the old composer (cancelling everything it had not yet emitted) and
//! clears the sink, so two runs never interleave on the same surface.
//!
//! [`Stage::reveal_next`] is cancel-safe: the next primitive is only peeked
//! while the delay elapses, so dropping the future mid-sleep leaves it queued
//! for the next call.

use mondrian_core::composer::{compose, Composer, Emission};
use mondrian_core::error::MondrianError;
use mondrian_core::primitive::Primitive;
use mondrian_core::{ComposerConfig, Palette, Region, Xorshift64};
use std::iter::Peekable;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::Sink;

#[derive(Debug)]
struct Run {
    seed: u64,
    composer: Peekable<Composer<Xorshift64>>,
}

/// Host for composition runs over a single sink.
#[derive(Debug)]
pub struct Stage<S> {
    sink: S,
    palette: Palette,
    config: ComposerConfig,
    run: Option<Run>,
    last_seed: Option<u64>,
}

impl<S: Sink> Stage<S> {
    pub fn new(sink: S, palette: Palette, config: ComposerConfig) -> Self {
        Self {
            sink,
            palette,
            config,
            run: None,
            last_seed: None,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// True while the current run still has primitives to reveal.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Seed of the current run, or of the last one if it has completed.
    pub fn current_seed(&self) -> Option<u64> {
        self.last_seed
    }

    /// Clears the sink and begins a run over `region` with a fresh entropy seed.
    ///
    /// Returns the seed so the run can be replayed with [`Stage::start_seeded`].
    pub fn start(&mut self, region: Region) -> Result<u64, MondrianError> {
        self.start_seeded(region, Xorshift64::entropy_seed())
    }

    /// Clears the sink and begins a reproducible run over `region`.
    ///
    /// An invalid region or config is rejected before anything is cleared, so
    /// the in-flight run and the surface are left as they were.
    pub fn start_seeded(&mut self, region: Region, seed: u64) -> Result<u64, MondrianError> {
        let composer = compose(
            region,
            Xorshift64::new(seed),
            self.palette.clone(),
            self.config,
        )?;
        if let Some(old) = self.run.take() {
            debug!(seed = old.seed, "cancelled in-flight run");
        }
        self.sink.clear();
        info!(seed, width = region.width, height = region.height, "run started");
        self.run = Some(Run {
            seed,
            composer: composer.peekable(),
        });
        self.last_seed = Some(seed);
        Ok(seed)
    }

    /// Adds the next primitive to the sink without waiting.
    ///
    /// Returns `None` once the run is finished or if nothing is running.
    pub fn advance(&mut self) -> Option<Primitive> {
        let run = self.run.as_mut()?;
        match run.composer.next() {
            Some(Emission { primitive, .. }) => {
                self.sink.add(primitive);
                Some(primitive)
            }
            None => {
                info!(seed = run.seed, "run finished");
                self.run = None;
                None
            }
        }
    }

    /// Waits out the next primitive's delay, then adds it to the sink.
    pub async fn reveal_next(&mut self) -> Option<Primitive> {
        let delay = match self.run.as_mut()?.composer.peek().map(|e| e.delay) {
            Some(delay) => delay,
            None => return self.advance(),
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.advance()
    }

    /// Reveals the rest of the run with its delays; returns how many were added.
    pub async fn play(&mut self) -> usize {
        let mut count = 0;
        while self.reveal_next().await.is_some() {
            count += 1;
        }
        count
    }

    /// Adds the rest of the run immediately; returns how many were added.
    pub fn finish(&mut self) -> usize {
        std::iter::from_fn(|| self.advance()).count()
    }

    /// Drops the in-flight run. The sink keeps what was already revealed.
    pub fn cancel(&mut self) {
        if let Some(run) = self.run.take() {
            debug!(seed = run.seed, "run cancelled");
        }
    }

    /// Snapshots the sink and persists the bytes, returning the file path.
    pub fn save(&self) -> Result<PathBuf, MondrianError> {
        let bytes = self.sink.snapshot()?;
        self.sink.persist(&bytes)
    }
}
