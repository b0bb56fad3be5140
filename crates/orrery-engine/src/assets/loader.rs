//! One-shot batch of asynchronous mesh loads.
//!
//! Requests run independently. Each resolved asset is parsed, its mesh
//! sub-nodes appended to the shared buffer in discovery order, and once every
//! expected name has resolved the completion callback fires exactly once with
//! the whole buffer. A failed request contributes nothing but still counts.

use std::collections::BTreeSet;
use crate::assets::obj::{parse_obj, MeshData};
use crate::error::AssetError;

type CompletionFn = Box<dyn FnOnce(Vec<MeshData>)>;

pub struct LoadBatch {
    pending: BTreeSet<String>,
    meshes: Vec<MeshData>,
    failures: usize,
    on_complete: Option<CompletionFn>,
    fired: bool,
}

impl LoadBatch {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pending: names.into_iter().map(Into::into).collect(),
            meshes: Vec::new(),
            failures: 0,
            on_complete: None,
            fired: false,
        }
    }

    /// Register the completion callback. Fires immediately if the batch
    /// already finished.
    pub fn on_complete(&mut self, callback: impl FnOnce(Vec<MeshData>) + 'static) {
        self.on_complete = Some(Box::new(callback));
        self.try_fire();
    }

    /// Feed the fetched OBJ text (or the fetch error) for `name`.
    pub fn resolve_text(&mut self, name: &str, text: Result<String, AssetError>) -> bool {
        let parsed = text.and_then(|body| parse_obj(name, &body));
        self.resolve(name, parsed.map(|asset| asset.into_meshes()))
    }

    /// Mark `name` resolved. Returns false for names that were not pending.
    pub fn resolve(&mut self, name: &str, result: Result<Vec<MeshData>, AssetError>) -> bool {
        if !self.pending.remove(name) {
            log::warn!("Ignoring load result for unexpected asset '{name}'");
            return false;
        }
        match result {
            Ok(meshes) => {
                log::info!("Loaded {name}: {} mesh(es)", meshes.len());
                self.meshes.extend(meshes);
            }
            Err(e) => {
                log::error!("Failed to load {name}: {e}");
                self.failures += 1;
            }
        }
        self.try_fire();
        true
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Meshes collected so far.
    pub fn meshes(&self) -> &[MeshData] {
        &self.meshes
    }

    fn try_fire(&mut self) {
        if self.fired || !self.is_complete() {
            return;
        }
        if let Some(callback) = self.on_complete.take() {
            self.fired = true;
            callback(std::mem::take(&mut self.meshes));
        }
    }
}
