//! Browser-side asset fetching. Each mesh request runs as its own task and
//! reports into a shared [`LoadBatch`]; the batch fires the completion
//! callback after the last one resolves.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;
use orrery_engine::{AssetError, AssetManifest, LoadBatch, MeshData};

/// GET `url` and return the body as text.
pub async fn fetch_text(url: &str) -> Result<String, AssetError> {
    let fail = |reason: String| AssetError::Fetch { url: url.to_string(), reason };

    let window = web_sys::window().ok_or_else(|| fail("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| fail(format!("{e:?}")))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| fail("not a Response".into()))?;
    if !response.ok() {
        return Err(fail(format!("HTTP {}", response.status())));
    }
    let text = response.text().map_err(|e| fail(format!("{e:?}")))?;
    let text = JsFuture::from(text).await.map_err(|e| fail(format!("{e:?}")))?;
    text.as_string().ok_or_else(|| fail("body is not text".into()))
}

/// Request every mesh in the manifest concurrently.
pub fn load_meshes(manifest: &AssetManifest, on_complete: impl FnOnce(Vec<MeshData>) + 'static) {
    let requests = manifest.mesh_requests();
    let batch = Rc::new(RefCell::new(LoadBatch::new(
        requests.iter().map(|(name, _)| name.clone()),
    )));
    batch.borrow_mut().on_complete(on_complete);

    for (name, url) in requests {
        let batch = batch.clone();
        wasm_bindgen_futures::spawn_local(async move {
            log::debug!("Fetching {name} from {url}");
            let text = fetch_text(&url).await;
            batch.borrow_mut().resolve_text(&name, text);
        });
    }
}
