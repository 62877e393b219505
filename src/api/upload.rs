use crate::error::ClientResult;
use crate::pipeline::{ApiRequest, RequestPipeline};
use crate::transport::UploadFile;
use serde::Deserialize;
use tracing::info;

pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
struct UploadResult {
    url: String,
}

pub struct UploadApi<'a> {
    pipeline: &'a RequestPipeline,
}

impl<'a> UploadApi<'a> {
    pub fn new(pipeline: &'a RequestPipeline) -> Self {
        Self { pipeline }
    }

    /// 파일 하나 업로드 후 URL 반환
    pub async fn upload(&self, file: &UploadFile) -> ClientResult<String> {
        info!(
            "{:<12} --> 파일 업로드: {} ({} bytes)",
            "Upload",
            file.file_name,
            file.bytes.len()
        );
        let request = ApiRequest::post("/upload").multipart(UPLOAD_FIELD, file.clone());
        let result: UploadResult = self.pipeline.execute_as(request).await?;
        Ok(result.url)
    }

    /// 순서대로 한 파일씩 업로드
    pub async fn upload_all(&self, files: &[UploadFile]) -> ClientResult<Vec<String>> {
        let mut urls = Vec::with_capacity(files.len());
        for file in files {
            urls.push(self.upload(file).await?);
        }
        Ok(urls)
    }
}
