use std::{
    panic::{self, AssertUnwindSafe},
    sync::mpsc,
    thread,
};

use anyhow::Context;

use crate::{
    assets::decode::{DecodedImage, decode_image},
    foundation::error::{MemeError, MemeResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifies one image load. Only the most recent ticket can still change the scene.
pub struct LoadTicket(u64);

impl LoadTicket {
    /// Generation number of this load.
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub(crate) struct LoadOutcome {
    pub(crate) ticket: LoadTicket,
    pub(crate) result: MemeResult<DecodedImage>,
}

/// Decodes images on worker threads and hands results back to the owning thread.
///
/// Each load bumps a generation counter. Completions from older generations are dropped in
/// [`ImageLoader::accept`], so a slow decode can never overwrite a newer image.
#[derive(Debug)]
pub(crate) struct ImageLoader {
    latest: u64,
    settled: u64,
    tx: mpsc::Sender<LoadOutcome>,
    rx: mpsc::Receiver<LoadOutcome>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            latest: 0,
            settled: 0,
            tx,
            rx,
        }
    }
}

impl ImageLoader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Start decoding `bytes` on a worker thread.
    pub(crate) fn start(&mut self, bytes: Vec<u8>) -> MemeResult<LoadTicket> {
        let ticket = LoadTicket(self.latest + 1);
        let tx = self.tx.clone();
        thread::Builder::new()
            .name(format!("memeforge-decode-{}", ticket.0))
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| decode_image(&bytes)))
                    .unwrap_or_else(|_| Err(MemeError::decode("decoder panicked")));
                // The editor may already be gone; nothing to report to.
                let _ = tx.send(LoadOutcome { ticket, result });
            })
            .context("spawn image decode thread")?;
        self.latest = ticket.0;
        tracing::debug!(generation = ticket.0, "image load started");
        Ok(ticket)
    }

    /// True while the latest load has not been accepted yet.
    pub(crate) fn is_loading(&self) -> bool {
        self.settled < self.latest
    }

    /// Next finished outcome, without blocking.
    pub(crate) fn try_next(&self) -> Option<LoadOutcome> {
        self.rx.try_recv().ok()
    }

    /// Block until the latest load finishes and return its accepted result.
    ///
    /// Stale outcomes received on the way are discarded. Returns `None` when nothing is in
    /// flight.
    pub(crate) fn wait_latest(&mut self) -> Option<MemeResult<DecodedImage>> {
        while self.is_loading() {
            // `self.tx` keeps the channel open, so `recv` only fails if that invariant breaks.
            let outcome = self.rx.recv().ok()?;
            if let Some(result) = self.accept(outcome) {
                return Some(result);
            }
        }
        None
    }

    /// Keep `outcome` only if it belongs to the latest load.
    pub(crate) fn accept(&mut self, outcome: LoadOutcome) -> Option<MemeResult<DecodedImage>> {
        if outcome.ticket.0 != self.latest {
            tracing::debug!(
                generation = outcome.ticket.0,
                latest = self.latest,
                "dropping stale image load"
            );
            return None;
        }
        self.settled = outcome.ticket.0;
        Some(outcome.result)
    }
}
