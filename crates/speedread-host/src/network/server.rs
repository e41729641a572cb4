use std::io::{self, Read};

use log::{debug, info, warn};
use speedread_core::content::TextExtractor;
use thiserror::Error;
use tiny_http::{Header, Request, Response, Server};

use super::{HttpReply, MAX_UPLOAD_BYTES, UploadError, handle_request};

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("could not listen on {addr}: {message}")]
    Bind { addr: String, message: String },
}

/// Blocking upload server; each request is handled to completion in turn.
pub struct UploadServer {
    server: Server,
}

impl UploadServer {
    pub fn bind(addr: &str) -> Result<Self, ServeError> {
        let server = Server::http(addr).map_err(|err| ServeError::Bind {
            addr: addr.to_owned(),
            message: err.to_string(),
        })?;
        Ok(Self { server })
    }

    /// Serve until the listener shuts down.
    pub fn run(&self, extractor: &dyn TextExtractor) {
        for request in self.server.incoming_requests() {
            self.respond(request, extractor);
        }
    }

    fn respond(&self, mut request: Request, extractor: &dyn TextExtractor) {
        let method = request.method().to_string();
        let url = request.url().to_owned();
        let content_type = request
            .headers()
            .iter()
            .find(|header| header.field.equiv("Content-Type"))
            .map(|header| header.value.as_str().to_owned());

        let declared = request.body_length();
        let reply = match read_limited(request.as_reader(), declared, MAX_UPLOAD_BYTES) {
            Ok(body) => handle_request(&method, &url, content_type.as_deref(), &body, extractor),
            Err(err) => {
                warn!("http: {} {} body rejected: {}", method, url, err);
                err.into()
            }
        };
        debug!("http: {} {} -> {}", method, url, reply.status);

        if let Err(err) = request.respond(into_response(reply)) {
            warn!("http: reply to {} {} failed: {}", method, url, err);
        }
    }
}

pub fn serve(addr: &str, extractor: &dyn TextExtractor) -> Result<(), ServeError> {
    let server = UploadServer::bind(addr)?;
    info!("http: listening addr={}", addr);
    server.run(extractor);
    Ok(())
}

/// Read at most `limit` bytes of body.
///
/// A declared length over the limit is refused before reading; bodies of
/// unknown length are cut off one byte past the limit and refused.
fn read_limited(
    reader: impl Read,
    declared: Option<usize>,
    limit: usize,
) -> Result<Vec<u8>, UploadError> {
    if declared.is_some_and(|len| len > limit) {
        return Err(UploadError::TooLarge { limit });
    }

    let mut body = Vec::new();
    reader
        .take(limit as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|err: io::Error| UploadError::Malformed(err.to_string()))?;

    if body.len() > limit {
        return Err(UploadError::TooLarge { limit });
    }
    Ok(body)
}

fn into_response(reply: HttpReply) -> Response<io::Cursor<Vec<u8>>> {
    let response = Response::from_string(reply.body).with_status_code(reply.status);
    match Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
