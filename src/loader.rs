//! Background mesh loading and sampling.
//!
//! [`MeshLoader`] owns a worker thread that loads a mesh, centers it, and
//! samples its surface, so none of that runs on the frame loop. Every request
//! gets a generation number; only the result for the newest request is ever
//! handed back, so a slow earlier load can never replace a later one.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use log::{debug, info, warn};
use parking_lot::Mutex;
use rand::thread_rng;
use thiserror::Error;

use crate::math::vec3::Axis;
use crate::mesh::{LoadError, Mesh};
use crate::sampler::{PointCloud, SampleError};

/// Where a mesh comes from.
#[derive(Clone, Debug)]
pub enum MeshSource {
    Obj(PathBuf),
    InMemory(Mesh),
}

impl MeshSource {
    pub fn load(self) -> Result<Mesh, LoadError> {
        match self {
            MeshSource::Obj(path) => Mesh::from_obj(path),
            MeshSource::InMemory(mesh) => Ok(mesh),
        }
    }
}

impl std::fmt::Display for MeshSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshSource::Obj(path) => write!(f, "{}", path.display()),
            MeshSource::InMemory(mesh) => {
                write!(f, "in-memory mesh ({} triangles)", mesh.triangle_count())
            }
        }
    }
}

/// Either stage of the load pipeline can fail.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("load failed: {0}")]
    Load(#[from] LoadError),
    #[error("sampling failed: {0}")]
    Sample(#[from] SampleError),
}

/// Result of the newest load request.
#[derive(Debug)]
pub struct Loaded {
    pub generation: u64,
    pub result: Result<PointCloud, LoadFailure>,
}

enum LoadCommand {
    Load {
        generation: u64,
        source: MeshSource,
        count: usize,
        axis: Axis,
    },
    Stop,
}

pub struct MeshLoader {
    tx_cmd: Sender<LoadCommand>,
    rx_result: Receiver<Loaded>,
    latest: Arc<AtomicU64>,
    last_error: Arc<Mutex<Option<String>>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl MeshLoader {
    pub fn new() -> Self {
        let (tx_cmd, rx_cmd) = channel::unbounded::<LoadCommand>();
        let (tx_result, rx_result) = channel::unbounded::<Loaded>();
        let latest = Arc::new(AtomicU64::new(0));
        let last_error = Arc::new(Mutex::new(None));

        let latest_clone = Arc::clone(&latest);
        let last_error_clone = Arc::clone(&last_error);
        let thread_handle = thread::spawn(move || {
            load_thread(rx_cmd, tx_result, latest_clone, last_error_clone);
        });

        Self {
            tx_cmd,
            rx_result,
            latest,
            last_error,
            thread_handle: Some(thread_handle),
        }
    }

    /// Queues a load and returns its generation. Any earlier request that has
    /// not been collected yet is superseded.
    pub fn request(&self, source: MeshSource, count: usize, axis: Axis) -> u64 {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("load #{generation} requested: {source}");
        let _ = self.tx_cmd.send(LoadCommand::Load {
            generation,
            source,
            count,
            axis,
        });
        generation
    }

    /// Generation of the most recent request (0 before any request).
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Returns the newest request's result if it has arrived; results from
    /// superseded requests are discarded.
    pub fn poll(&self) -> Option<Loaded> {
        let latest = self.latest_generation();
        let mut newest = None;
        for loaded in self.rx_result.try_iter() {
            if loaded.generation == latest {
                newest = Some(loaded);
            } else {
                debug!(
                    "discarding stale load #{} (latest is #{latest})",
                    loaded.generation
                );
            }
        }
        newest
    }

    /// Blocks until the newest request's result arrives.
    pub fn wait(&self) -> Option<Loaded> {
        loop {
            let loaded = self.rx_result.recv().ok()?;
            if loaded.generation == self.latest_generation() {
                return Some(loaded);
            }
            debug!("discarding stale load #{}", loaded.generation);
        }
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }
}

impl Default for MeshLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MeshLoader {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(LoadCommand::Stop);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

fn load_thread(
    rx_cmd: Receiver<LoadCommand>,
    tx_result: Sender<Loaded>,
    latest: Arc<AtomicU64>,
    last_error: Arc<Mutex<Option<String>>>,
) {
    let mut rng = thread_rng();

    loop {
        let cmd = match rx_cmd.recv() {
            Ok(c) => c,
            Err(_) => return,
        };

        match cmd {
            LoadCommand::Load {
                generation,
                source,
                count,
                axis,
            } => {
                // A newer request is already queued; skip the work entirely.
                if generation < latest.load(Ordering::SeqCst) {
                    debug!("skipping superseded load #{generation}");
                    continue;
                }

                let label = source.to_string();
                let result = source
                    .load()
                    .map_err(LoadFailure::from)
                    .and_then(|mesh| {
                        PointCloud::from_mesh(mesh, count, axis, &mut rng).map_err(LoadFailure::from)
                    });

                match &result {
                    Ok(cloud) => {
                        info!("load #{generation} done: {label}, {} points", cloud.points().len())
                    }
                    Err(e) => warn!("load #{generation} failed: {label}: {e}"),
                }
                record_outcome(generation, &result, &latest, &last_error);

                if tx_result.send(Loaded { generation, result }).is_err() {
                    return;
                }
            }
            LoadCommand::Stop => return,
        }
    }
}

/// Updates `last_error` for the newest request only; a superseded outcome
/// would never reach `poll`.
fn record_outcome(
    generation: u64,
    result: &Result<PointCloud, LoadFailure>,
    latest: &AtomicU64,
    last_error: &Mutex<Option<String>>,
) {
    if generation != latest.load(Ordering::SeqCst) {
        return;
    }
    *last_error.lock() = result.as_ref().err().map(ToString::to_string);
}
