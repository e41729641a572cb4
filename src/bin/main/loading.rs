use std::{io, sync::mpsc::Sender, thread};

use log::debug;
use speedread_core::{
    content::{PagePreviewSource, TextExtractor},
    error::ExtractionError,
    session::{LoadTicket, PreviewDelivery, SessionId},
};
use speedread_host::{extract::DocumentExtractor, preview::PlainTextPreview};

pub(super) enum LoadMessage {
    Extracted {
        ticket: LoadTicket,
        result: Result<String, ExtractionError>,
    },
    Preview(PreviewDelivery),
    PreviewUnavailable {
        session: SessionId,
        reason: ExtractionError,
    },
}

/// Extract text, then lay out the preview, off the UI thread.
///
/// Messages carry the ticket's session so late results can be told apart
/// from the current document.
pub(super) fn spawn_load(
    bytes: Vec<u8>,
    ticket: LoadTicket,
    tx: Sender<LoadMessage>,
) -> io::Result<()> {
    thread::Builder::new()
        .name("speedread-load".into())
        .spawn(move || {
            let session = ticket.session();
            let result = DocumentExtractor::new().extract(&bytes);
            debug!("load: extracted {} ok={}", session, result.is_ok());
            let extracted = result.is_ok();

            if tx.send(LoadMessage::Extracted { ticket, result }).is_err() || !extracted {
                return;
            }

            let message = match PlainTextPreview::default().pages(&bytes) {
                Ok(pages) => LoadMessage::Preview(PreviewDelivery { session, pages }),
                Err(reason) => LoadMessage::PreviewUnavailable { session, reason },
            };
            let _ = tx.send(message);
        })?;
    Ok(())
}
