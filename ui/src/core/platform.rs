//! Platform glue: image handles, page reload and wall-clock stamps.

use time::OffsetDateTime;

/// Milliseconds since the Unix epoch, used to bust caches on chart image requests.
pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Turn downloaded image bytes into a URL an `<img>` can display.
#[cfg(target_arch = "wasm32")]
pub fn image_handle(bytes: &[u8], mime: &str) -> Result<String, String> {
    use web_sys::{Blob, BlobPropertyBag, Url};

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let opts = BlobPropertyBag::new();
    opts.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
        .map_err(|_| "Failed to create blob".to_string())?;
    Url::create_object_url_with_blob(&blob).map_err(|_| "Unable to create object URL".to_string())
}

/// Turn downloaded image bytes into a URL an `<img>` can display.
#[cfg(not(target_arch = "wasm32"))]
pub fn image_handle(bytes: &[u8], mime: &str) -> Result<String, String> {
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    if bytes.is_empty() {
        return Err("empty image body".into());
    }
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Free a handle produced by [`image_handle`] once it is no longer displayed.
pub fn release_image_handle(handle: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if handle.starts_with("blob:") {
            web_sys::Url::revoke_object_url(handle).ok();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = handle;
    }
}

/// Full page reload. Returns `false` where no page exists to reload.
pub fn reload_page() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .map(|win| win.location().reload().is_ok())
            .unwrap_or(false)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}
