//! Upload boundary: raw files in, classified [`Document`]s out.
//!
//! Oversized files are dropped individually with a user-visible notice; the
//! rest of the batch is still accepted.

use tracing::info;

use crate::config::Settings;
use crate::media::MediaStore;
use crate::model::{Document, Stage};
use crate::store::notify::{Notice, Notifier};

/// A file handed over by the picker, not yet a document.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Ingest a batch of files.
///
/// Each file is checked against the upload size cap, its bytes are stored in
/// the media store, and a [`Document`] is created carrying the media handle,
/// an extension-derived kind, a fresh id and timestamp, and (when uploading
/// into a stage lane) the given label.
pub fn ingest(
    files: Vec<IncomingFile>,
    media: &MediaStore,
    settings: &Settings,
    label: Option<Stage>,
    notifier: &mut dyn Notifier,
) -> Vec<Document> {
    let mut documents = Vec::new();

    for file in files {
        if file.bytes.len() as u64 > settings.max_upload_bytes {
            notifier.notify(Notice::error(format!(
                "{} exceeds the {} MB upload limit",
                file.name,
                settings.max_upload_bytes / (1024 * 1024)
            )));
            continue;
        }

        let handle = match media.put(&file.bytes) {
            Ok(key) => key,
            Err(e) => {
                notifier.notify(Notice::error(format!("Could not store {}: {e}", file.name)));
                continue;
            }
        };

        let document = Document::new(file.name, handle, label);
        info!(id = %document.id, name = %document.name, kind = document.kind.as_str(), "document ingested");
        documents.push(document);
    }

    documents
}
