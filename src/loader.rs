// Streaming typeface download.

use crate::font::{Font, FontError, LoadProgress};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    #[error("no window available")]
    NoWindow,
    #[error("request failed: {0}")]
    Request(String),
    #[error("server answered {status} for {url}")]
    Status { status: u16, url: String },
    #[error("reading body failed: {0}")]
    Body(String),
    #[error("font body is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error(transparent)]
    Parse(#[from] FontError),
}

fn js_err(v: JsValue) -> String {
    v.as_string().unwrap_or_else(|| format!("{:?}", v))
}

/// Fetch and parse the typeface at `url`, reporting progress per chunk.
pub async fn load_font(
    url: &str,
    mut on_progress: impl FnMut(LoadProgress),
) -> Result<Font, FontLoadError> {
    let window = web::window().ok_or(FontLoadError::NoWindow)?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| FontLoadError::Request(js_err(e)))?
        .dyn_into()
        .map_err(|e| FontLoadError::Request(js_err(e)))?;
    if !resp.ok() {
        return Err(FontLoadError::Status {
            status: resp.status(),
            url: url.to_string(),
        });
    }
    let total = resp
        .headers()
        .get("content-length")
        .ok()
        .flatten()
        .and_then(|v| v.parse::<u64>().ok());

    let bytes = match resp.body() {
        Some(stream) => read_stream(&stream, total, &mut on_progress).await?,
        None => {
            let text = JsFuture::from(resp.text().map_err(|e| FontLoadError::Body(js_err(e)))?)
                .await
                .map_err(|e| FontLoadError::Body(js_err(e)))?;
            let text = text.as_string().unwrap_or_default();
            on_progress(LoadProgress {
                loaded: text.len() as u64,
                total,
            });
            text.into_bytes()
        }
    };
    let json = String::from_utf8(bytes)?;
    let font = Font::parse(&json)?;
    log::info!(
        "[font] loaded {} ({} glyphs)",
        font.family_name,
        font.glyph_count()
    );
    Ok(font)
}

async fn read_stream(
    stream: &web::ReadableStream,
    total: Option<u64>,
    on_progress: &mut impl FnMut(LoadProgress),
) -> Result<Vec<u8>, FontLoadError> {
    let reader: web::ReadableStreamDefaultReader = stream.get_reader().unchecked_into();
    let mut bytes = Vec::with_capacity(total.unwrap_or(0) as usize);
    loop {
        let chunk = JsFuture::from(reader.read())
            .await
            .map_err(|e| FontLoadError::Body(js_err(e)))?;
        let done = js_sys::Reflect::get(&chunk, &JsValue::from_str("done"))
            .map_err(|e| FontLoadError::Body(js_err(e)))?
            .as_bool()
            .unwrap_or(true);
        if done {
            break;
        }
        let value = js_sys::Reflect::get(&chunk, &JsValue::from_str("value"))
            .map_err(|e| FontLoadError::Body(js_err(e)))?;
        bytes.extend(js_sys::Uint8Array::new(&value).to_vec());
        on_progress(LoadProgress {
            loaded: bytes.len() as u64,
            total,
        });
    }
    Ok(bytes)
}
