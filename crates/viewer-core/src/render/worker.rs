use std::collections::VecDeque;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use super::{DocumentRenderer, DocumentSummary, RenderError, RenderedPage};
use crate::lease::ObjectUrls;
use crate::types::DocumentFormat;

/// Bumped every time a new file is opened. Events carry the generation of the
/// request that produced them so late results for a replaced file can be
/// told apart.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderRequest {
    Open {
        generation: Generation,
        url: String,
        format: DocumentFormat,
    },
    Page {
        generation: Generation,
        page_number: usize,
        width: u16,
    },
}

impl RenderRequest {
    pub fn generation(&self) -> Generation {
        match self {
            RenderRequest::Open { generation, .. } | RenderRequest::Page { generation, .. } => {
                *generation
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    DocumentLoaded {
        generation: Generation,
        summary: DocumentSummary,
    },
    DocumentFailed {
        generation: Generation,
        error: RenderError,
    },
    PageLoaded {
        generation: Generation,
        page: RenderedPage,
    },
    PageFailed {
        generation: Generation,
        page_number: usize,
        error: RenderError,
    },
}

impl RenderEvent {
    pub fn generation(&self) -> Generation {
        match self {
            RenderEvent::DocumentLoaded { generation, .. }
            | RenderEvent::DocumentFailed { generation, .. }
            | RenderEvent::PageLoaded { generation, .. }
            | RenderEvent::PageFailed { generation, .. } => *generation,
        }
    }
}

struct Session {
    renderer: Box<dyn DocumentRenderer>,
    urls: ObjectUrls,
    open_generation: Option<Generation>,
}

impl Session {
    fn new(renderer: Box<dyn DocumentRenderer>, urls: ObjectUrls) -> Self {
        Self {
            renderer,
            urls,
            open_generation: None,
        }
    }

    /// Handles a batch of queued requests. Anything older than the newest
    /// `Open` in the batch is skipped.
    fn handle_batch(&mut self, batch: Vec<RenderRequest>, mut emit: impl FnMut(RenderEvent)) {
        let newest_open = batch
            .iter()
            .filter(|req| matches!(req, RenderRequest::Open { .. }))
            .map(RenderRequest::generation)
            .max();
        for request in batch {
            if newest_open.is_some_and(|newest| request.generation() < newest) {
                debug!("skipping stale render request {:?}", request);
                continue;
            }
            if let Some(event) = self.handle(request) {
                emit(event);
            }
        }
    }

    fn handle(&mut self, request: RenderRequest) -> Option<RenderEvent> {
        match request {
            RenderRequest::Open {
                generation,
                url,
                format,
            } => {
                self.open_generation = Some(generation);
                let Some(bytes) = self.urls.resolve(&url) else {
                    self.renderer.close();
                    return Some(RenderEvent::DocumentFailed {
                        generation,
                        error: RenderError::Released(url),
                    });
                };
                Some(match self.renderer.open(&bytes, format) {
                    Ok(summary) => RenderEvent::DocumentLoaded {
                        generation,
                        summary,
                    },
                    Err(error) => {
                        warn!("failed to open {}: {}", url, error);
                        RenderEvent::DocumentFailed { generation, error }
                    }
                })
            }
            RenderRequest::Page {
                generation,
                page_number,
                width,
            } => {
                if self.open_generation != Some(generation) {
                    debug!(
                        "dropping page {} request for generation {}",
                        page_number, generation
                    );
                    return None;
                }
                Some(match self.renderer.render_page(page_number, width) {
                    Ok(lines) => RenderEvent::PageLoaded {
                        generation,
                        page: RenderedPage {
                            page_number,
                            width,
                            lines,
                        },
                    },
                    Err(error) => {
                        warn!("failed to render page {}: {}", page_number, error);
                        RenderEvent::PageFailed {
                            generation,
                            page_number,
                            error,
                        }
                    }
                })
            }
        }
    }
}

enum Mode {
    Threaded {
        requests: Option<Sender<RenderRequest>>,
        events: Receiver<RenderEvent>,
        handle: Option<JoinHandle<()>>,
    },
    Inline {
        session: Box<Session>,
        events: VecDeque<RenderEvent>,
    },
}

/// Front end of the renderer. Requests go in, events come back out through
/// [`RenderWorker::poll`], either from a background thread or, for tests,
/// handled synchronously.
pub struct RenderWorker {
    mode: Mode,
}

impl RenderWorker {
    pub fn spawn(renderer: Box<dyn DocumentRenderer>, urls: ObjectUrls) -> io::Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<RenderRequest>();
        let (event_tx, event_rx) = mpsc::channel::<RenderEvent>();
        let handle = thread::Builder::new()
            .name("betterread-render".into())
            .spawn(move || {
                let mut session = Session::new(renderer, urls);
                while let Ok(first) = request_rx.recv() {
                    let mut batch = vec![first];
                    batch.extend(request_rx.try_iter());
                    let mut disconnected = false;
                    session.handle_batch(batch, |event| {
                        if event_tx.send(event).is_err() {
                            disconnected = true;
                        }
                    });
                    if disconnected {
                        break;
                    }
                }
                session.renderer.close();
                debug!("render worker stopped");
            })?;
        Ok(Self {
            mode: Mode::Threaded {
                requests: Some(request_tx),
                events: event_rx,
                handle: Some(handle),
            },
        })
    }

    pub fn inline(renderer: Box<dyn DocumentRenderer>, urls: ObjectUrls) -> Self {
        Self {
            mode: Mode::Inline {
                session: Box::new(Session::new(renderer, urls)),
                events: VecDeque::new(),
            },
        }
    }

    pub fn request(&mut self, request: RenderRequest) {
        match &mut self.mode {
            Mode::Threaded { requests, .. } => {
                let sent = requests
                    .as_ref()
                    .map(|tx| tx.send(request).is_ok())
                    .unwrap_or(false);
                if !sent {
                    warn!("render worker is gone; request dropped");
                }
            }
            Mode::Inline { session, events } => {
                session.handle_batch(vec![request], |event| events.push_back(event));
            }
        }
    }

    /// Events produced since the last poll, in order.
    pub fn poll(&mut self) -> Vec<RenderEvent> {
        match &mut self.mode {
            Mode::Threaded { events, .. } => events.try_iter().collect(),
            Mode::Inline { events, .. } => events.drain(..).collect(),
        }
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        if let Mode::Threaded {
            requests, handle, ..
        } = &mut self.mode
        {
            requests.take();
            if let Some(handle) = handle.take() {
                if handle.join().is_err() {
                    warn!("render worker panicked");
                }
            }
        }
    }
}
