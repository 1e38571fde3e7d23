use fx_core::FxError;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn fetch_error(url: &str, reason: impl Into<String>) -> FxError {
    FxError::AssetFetch {
        url: url.to_string(),
        reason: reason.into(),
    }
}

/// Fetch the raw bytes behind `url`.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, FxError> {
    let window = web::window().ok_or_else(|| fetch_error(url, "no window"))?;

    let opts = web::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web::RequestMode::Cors);
    let request = web::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| fetch_error(url, format!("{:?}", e)))?;

    let resp = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| fetch_error(url, format!("{:?}", e)))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|_| fetch_error(url, "fetch did not return a Response"))?;
    if !resp.ok() {
        return Err(fetch_error(url, format!("HTTP {}", resp.status())));
    }

    let buf = resp
        .array_buffer()
        .map_err(|e| fetch_error(url, format!("{:?}", e)))?;
    let buf = JsFuture::from(buf)
        .await
        .map_err(|e| fetch_error(url, format!("{:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buf).to_vec();
    log::info!("[asset] fetched {} ({} bytes)", url, bytes.len());
    Ok(bytes)
}
