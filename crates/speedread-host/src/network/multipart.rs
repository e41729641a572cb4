//! Minimal `multipart/form-data` reader for single-file uploads.

use super::UploadError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormPart<'a> {
    pub name: Option<String>,
    pub filename: Option<String>,
    pub content: &'a [u8],
}

/// `boundary` parameter of a `multipart/form-data` content type.
pub fn boundary(content_type: &str) -> Option<&str> {
    let (mime, params) = content_type.split_once(';')?;
    if !mime.trim().eq_ignore_ascii_case("multipart/form-data") {
        return None;
    }

    params.split(';').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("boundary") {
            return None;
        }
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then_some(value)
    })
}

pub fn parse<'a>(body: &'a [u8], boundary: &str) -> Result<Vec<FormPart<'a>>, UploadError> {
    let delimiter = format!("--{boundary}");
    let closing = format!("\r\n--{boundary}");
    let malformed = |what: &str| UploadError::Malformed(what.to_owned());

    let mut cursor = find(body, delimiter.as_bytes(), 0)
        .ok_or_else(|| malformed("missing opening boundary"))?
        + delimiter.len();
    let mut parts = Vec::new();

    loop {
        let rest = &body[cursor..];
        if rest.starts_with(b"--") {
            break;
        }
        if rest.starts_with(b"\r\n") {
            cursor += 2;
        }

        let header_end = find(body, b"\r\n\r\n", cursor)
            .ok_or_else(|| malformed("unterminated part headers"))?;
        let headers = String::from_utf8_lossy(&body[cursor..header_end]);
        let content_start = header_end + 4;
        let content_end = find(body, closing.as_bytes(), content_start)
            .ok_or_else(|| malformed("missing closing boundary"))?;

        let (name, filename) = disposition(&headers);
        parts.push(FormPart {
            name,
            filename,
            content: &body[content_start..content_end],
        });

        cursor = content_end + closing.len();
    }

    Ok(parts)
}

/// Part named `pdf`, else the first part carrying a filename.
pub fn upload_part<'p, 'a>(parts: &'p [FormPart<'a>]) -> Option<&'p FormPart<'a>> {
    parts
        .iter()
        .find(|part| part.name.as_deref() == Some("pdf"))
        .or_else(|| parts.iter().find(|part| part.filename.is_some()))
}

fn disposition(headers: &str) -> (Option<String>, Option<String>) {
    let Some(line) = headers.lines().find(|line| {
        line.split_once(':')
            .is_some_and(|(key, _)| key.trim().eq_ignore_ascii_case("content-disposition"))
    }) else {
        return (None, None);
    };

    let mut name = None;
    let mut filename = None;
    for param in line.split(';').skip(1) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').to_owned();
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => name = Some(value),
            "filename" => filename = Some(value),
            _ => {}
        }
    }
    (name, filename)
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: &str = "----speedread7MA4YWxk";

    fn body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, filename, content) in parts {
            out.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let mut disposition = format!("Content-Disposition: form-data; name=\"{name}\"");
            if let Some(filename) = filename {
                disposition.push_str(&format!("; filename=\"{filename}\""));
            }
            out.extend_from_slice(disposition.as_bytes());
            out.extend_from_slice(b"\r\nContent-Type: application/octet-stream\r\n\r\n");
            out.extend_from_slice(content);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        out
    }

    #[test]
    fn boundary_from_content_type() {
        assert_eq!(
            boundary("multipart/form-data; boundary=abc123"),
            Some("abc123")
        );
        assert_eq!(
            boundary("Multipart/Form-Data; charset=utf-8; boundary=\"quoted\""),
            Some("quoted")
        );
        assert_eq!(boundary("application/pdf"), None);
        assert_eq!(boundary("multipart/form-data"), None);
    }

    #[test]
    fn parses_fields_and_binary_content() {
        let raw = body(&[
            ("title", None, b"notes"),
            ("pdf", Some("doc.pdf"), b"%PDF-1.4\r\n\x00\xff binary"),
        ]);
        let parts = parse(&raw, BOUNDARY).unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].name.as_deref(), Some("title"));
        assert_eq!(parts[0].content, b"notes");
        assert_eq!(parts[1].filename.as_deref(), Some("doc.pdf"));
        assert_eq!(parts[1].content, b"%PDF-1.4\r\n\x00\xff binary");
    }

    #[test]
    fn pdf_field_wins_over_other_files() {
        let raw = body(&[
            ("attachment", Some("a.txt"), b"first"),
            ("pdf", Some("b.pdf"), b"second"),
        ]);
        let parts = parse(&raw, BOUNDARY).unwrap();
        assert_eq!(upload_part(&parts).unwrap().content, b"second");
    }

    #[test]
    fn first_file_part_is_the_fallback() {
        let raw = body(&[
            ("title", None, b"notes"),
            ("document", Some("a.txt"), b"words here"),
        ]);
        let parts = parse(&raw, BOUNDARY).unwrap();
        assert_eq!(upload_part(&parts).unwrap().content, b"words here");

        let raw = body(&[("title", None, b"notes")]);
        let parts = parse(&raw, BOUNDARY).unwrap();
        assert!(upload_part(&parts).is_none());
    }

    #[test]
    fn truncated_body_is_malformed() {
        let mut raw = body(&[("pdf", Some("doc.pdf"), b"content")]);
        raw.truncate(raw.len() - 30);
        assert!(matches!(
            parse(&raw, BOUNDARY),
            Err(UploadError::Malformed(_))
        ));
        assert!(matches!(
            parse(b"no boundaries at all", BOUNDARY),
            Err(UploadError::Malformed(_))
        ));
    }
}
