use std::collections::HashSet;

use crate::record::{FileRecord, PageRecord};

/// Appends `incoming` pages to `existing`, skipping any record whose id is
/// already present. First-seen order is preserved and the operation is
/// idempotent, so overlapping snapshot windows are safe to merge repeatedly.
pub fn merge_pages(existing: &mut Vec<PageRecord>, incoming: Vec<PageRecord>) {
    let mut seen: HashSet<String> = existing.iter().map(|page| page.id.clone()).collect();
    for page in incoming {
        if seen.insert(page.id.clone()) {
            existing.push(page);
        }
    }
}

/// File-record counterpart of [`merge_pages`]. Files carry no server id, so
/// the `(file_name, downloaded_at)` pair is the identity key.
pub fn merge_files(existing: &mut Vec<FileRecord>, incoming: Vec<FileRecord>) {
    let mut seen: HashSet<(String, String)> = existing
        .iter()
        .map(|file| (file.file_name.clone(), file.downloaded_at.clone()))
        .collect();
    for file in incoming {
        if seen.insert((file.file_name.clone(), file.downloaded_at.clone())) {
            existing.push(file);
        }
    }
}
