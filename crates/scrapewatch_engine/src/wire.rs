//! Serde DTOs for the status endpoint's JSON payload.
//!
//! The record arrays and the count map default to empty so sparse payloads
//! parse, but a snapshot missing its core fields is rejected wholesale; the
//! core never sees a half-valid snapshot.

use std::collections::BTreeMap;

use serde::Deserialize;

use scrapewatch_core::{DownloadStatus, FileRecord, PageRecord, StatusSnapshot};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusDto {
    running: bool,
    #[serde(default)]
    is_paused: bool,
    #[serde(default)]
    session_id: Option<String>,
    pages_scraped: u64,
    #[serde(default)]
    max_pages: u64,
    #[serde(default)]
    queue_size: u64,
    #[serde(default)]
    new_page_records: Vec<PageRecordDto>,
    #[serde(default)]
    new_file_records: Vec<FileRecordDto>,
    #[serde(default)]
    file_type_counts: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageRecordDto {
    id: String,
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    depth: u32,
    #[serde(default)]
    scraped_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileRecordDto {
    file_name: String,
    #[serde(default)]
    extension: String,
    #[serde(default)]
    size_bytes: u64,
    download_status: DownloadStatusDto,
    #[serde(default)]
    page_url: String,
    downloaded_at: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DownloadStatusDto {
    Success,
    Failed,
}

impl From<StatusDto> for StatusSnapshot {
    fn from(dto: StatusDto) -> Self {
        Self {
            running: dto.running,
            paused: dto.is_paused,
            session_id: dto.session_id,
            pages_scraped: dto.pages_scraped,
            max_pages: dto.max_pages,
            queue_size: dto.queue_size,
            new_pages: dto.new_page_records.into_iter().map(Into::into).collect(),
            new_files: dto.new_file_records.into_iter().map(Into::into).collect(),
            file_type_counts: dto.file_type_counts,
        }
    }
}

impl From<PageRecordDto> for PageRecord {
    fn from(dto: PageRecordDto) -> Self {
        Self {
            id: dto.id,
            url: dto.url,
            title: dto.title,
            depth: dto.depth,
            scraped_at: dto.scraped_at,
        }
    }
}

impl From<FileRecordDto> for FileRecord {
    fn from(dto: FileRecordDto) -> Self {
        Self {
            file_name: dto.file_name,
            extension: dto.extension,
            size_bytes: dto.size_bytes,
            status: match dto.download_status {
                DownloadStatusDto::Success => DownloadStatus::Success,
                DownloadStatusDto::Failed => DownloadStatus::Failed,
            },
            page_url: dto.page_url,
            downloaded_at: dto.downloaded_at,
        }
    }
}
