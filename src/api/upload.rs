//! Object Storage Upload
//!
//! Profile pictures and task assets go to a Firebase Storage bucket. The
//! returned download URL is what gets stored on the user or task.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResult};

const STORAGE_HOST: &str = "https://firebasestorage.googleapis.com/v0/b";
const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";

/// A file picked from an `<input type="file">`
#[derive(Debug, Clone, PartialEq)]
pub struct PickedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartMetadata<'a> {
    name: &'a str,
    content_type: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMetadata {
    name: String,
    #[serde(default)]
    download_tokens: Option<String>,
}

fn encode_object(object: &str) -> String {
    utf8_percent_encode(object, NON_ALPHANUMERIC).to_string()
}

/// Public URL for an uploaded object
pub fn download_url(bucket: &str, object: &str, token: Option<&str>) -> String {
    let base = format!("{STORAGE_HOST}/{bucket}/o/{}?alt=media", encode_object(object));
    match token {
        Some(token) => format!("{base}&token={token}"),
        None => base,
    }
}

fn checked(response: reqwest::Response, object: &str) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(object = %object, status = status.as_u16(), "Upload rejected");
        return Err(ApiError::Upload(format!("storage responded with {status}")));
    }
    Ok(response)
}

/// Timestamp-prefixed so repeated uploads of the same file don't collide
pub fn object_name(file_name: &str, now_millis: i64) -> String {
    format!("{now_millis}{file_name}")
}

#[derive(Clone)]
pub struct ObjectStorage {
    bucket: String,
    http: reqwest::Client,
}

impl ObjectStorage {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Resumable upload: a `start` request opens a session, then the bytes
    /// are sent in one `upload, finalize` request. Returns the download URL.
    pub async fn upload(&self, file: PickedFile) -> ApiResult<String> {
        let object = object_name(&file.name, chrono::Utc::now().timestamp_millis());
        let start_url = format!("{STORAGE_HOST}/{}/o?name={}", self.bucket, encode_object(&object));
        tracing::debug!(object = %object, size = file.bytes.len(), "Starting upload");

        let started = self
            .http
            .post(start_url)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", file.bytes.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", file.content_type.as_str())
            .json(&StartMetadata {
                name: &object,
                content_type: &file.content_type,
            })
            .send()
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?;
        let upload_url = checked(started, &object)?
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ApiError::Upload("storage did not return an upload URL".into()))?;

        let finished = self
            .http
            .post(upload_url)
            .header("X-Goog-Upload-Command", "upload, finalize")
            .header("X-Goog-Upload-Offset", "0")
            .body(file.bytes)
            .send()
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?;
        let metadata: ObjectMetadata = checked(finished, &object)?
            .json()
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?;

        tracing::info!(object = %metadata.name, "Upload finished");
        Ok(download_url(&self.bucket, &metadata.name, metadata.download_tokens.as_deref()))
    }

    /// Upload several files, stopping at the first failure
    pub async fn upload_all(&self, files: Vec<PickedFile>) -> ApiResult<Vec<String>> {
        let mut urls = Vec::with_capacity(files.len());
        for file in files {
            urls.push(self.upload(file).await?);
        }
        Ok(urls)
    }
}

/// Read a browser `File` into memory
pub async fn read_file(file: &web_sys::File) -> ApiResult<PickedFile> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::Upload(format!("could not read {}: {e:?}", file.name())))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Ok(PickedFile {
        name: file.name(),
        content_type,
        bytes,
    })
}

/// Every file selected in an input
pub async fn read_files(list: Option<web_sys::FileList>) -> ApiResult<Vec<PickedFile>> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    let mut files = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(file) = list.get(i) {
            files.push(read_file(&file).await?);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_url_escapes_object_path() {
        assert_eq!(
            download_url("demo.appspot.com", "1700000000000my photo.png", Some("tok-1")),
            "https://firebasestorage.googleapis.com/v0/b/demo.appspot.com/o/1700000000000my%20photo%2Epng?alt=media&token=tok-1"
        );
        assert_eq!(
            download_url("demo.appspot.com", "a/b", None),
            "https://firebasestorage.googleapis.com/v0/b/demo.appspot.com/o/a%2Fb?alt=media"
        );
    }

    #[test]
    fn test_object_name_is_timestamp_prefixed() {
        assert_eq!(object_name("report.pdf", 1_700_000_000_123), "1700000000123report.pdf");
    }
}
