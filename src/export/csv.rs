//! Streaming CSV responses
//!
//! [`CsvLines`] encodes one row per `next()` call so a response body can be
//! produced while the client reads it, without materializing the file.

use crate::{Error, Result, types::ErrorResponse};
use axum::{
    Json,
    body::{Body, Bytes},
    http::{
        HeaderValue, StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use ::csv::{Terminator, WriterBuilder};
use futures::stream;

/// Content type of CSV downloads
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Encode a single row as one CRLF-terminated CSV line
///
/// A row without fields is a bare line terminator.
pub fn encode_row<R>(row: R) -> Result<Bytes>
where
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut fields = row.into_iter().peekable();
    if fields.peek().is_none() {
        return Ok(Bytes::from_static(b"\r\n"));
    }

    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(fields)?;
    let line = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    Ok(Bytes::from(line))
}

/// Lazy row-to-line adapter; single pass, one line per row
#[derive(Debug)]
pub struct CsvLines<I> {
    rows: I,
}

impl<I> CsvLines<I>
where
    I: Iterator,
{
    pub fn new<T>(rows: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl<I, R> Iterator for CsvLines<I>
where
    I: Iterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    type Item = Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        let line = encode_row(row);
        if let Err(e) = &line {
            // Headers are already out; the client sees a truncated body
            tracing::error!("Failed to encode CSV row: {}", e);
        }
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

/// `Content-Disposition` value marking `filename` as an attachment
pub fn attachment_disposition(filename: &str) -> Result<HeaderValue> {
    Ok(HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        filename
    ))?)
}

/// Build a streamed CSV download of `rows` named `filename`
pub fn csv_response<T, R>(filename: &str, rows: T) -> Result<Response>
where
    T: IntoIterator<Item = R>,
    T::IntoIter: Send + 'static,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let disposition = attachment_disposition(filename)?;
    let body = Body::from_stream(stream::iter(CsvLines::new(rows)));

    tracing::debug!("Streaming CSV download {}", filename);
    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static(CSV_CONTENT_TYPE)),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// A CSV attachment usable directly as a handler return value
#[derive(Debug)]
pub struct CsvDownload<T> {
    pub filename: String,
    pub rows: T,
}

impl<T> CsvDownload<T> {
    pub fn new(filename: impl Into<String>, rows: T) -> Self {
        Self {
            filename: filename.into(),
            rows,
        }
    }
}

impl<T, R> IntoResponse for CsvDownload<T>
where
    T: IntoIterator<Item = R>,
    T::IntoIter: Send + 'static,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    fn into_response(self) -> Response {
        match csv_response(&self.filename, self.rows) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Failed to build CSV response: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(e.to_string())),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_encode_row_minimal_quoting() {
        let line = encode_row(["plain", "with,comma", "say \"hi\"", "two\nlines"]).unwrap();
        assert_eq!(
            &line[..],
            b"plain,\"with,comma\",\"say \"\"hi\"\"\",\"two\nlines\"\r\n"
        );

        assert_eq!(&encode_row(Vec::<&str>::new()).unwrap()[..], b"\r\n");
        assert_eq!(&encode_row([""]).unwrap()[..], b"\"\"\r\n");
        assert_eq!(&encode_row(["a", ""]).unwrap()[..], b"a,\r\n");
    }

    #[test]
    fn test_csv_lines_one_line_per_row() {
        let rows = vec![vec!["a", "b"], vec!["c"], vec!["d", "e", "f"]];
        let lines: Vec<Bytes> = CsvLines::new(rows).map(|l| l.unwrap()).collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(&lines[1][..], b"c\r\n");
        assert_eq!(&lines[2][..], b"d,e,f\r\n");
    }

    #[tokio::test]
    async fn test_csv_response_body_and_headers() {
        let rows = vec![vec!["a", "b"], vec!["c,d", "e"]];
        let response = csv_response("report.csv", rows).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/csv");
        assert_eq!(
            response.headers()[CONTENT_DISPOSITION],
            "attachment; filename=\"report.csv\""
        );
        assert_eq!(body_string(response).await, "a,b\r\n\"c,d\",e\r\n");
    }

    #[tokio::test]
    async fn test_csv_response_empty_rows() {
        let rows: Vec<Vec<String>> = Vec::new();
        let response = csv_response("empty.csv", rows).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_csv_response_is_lazy() {
        let encoded = Arc::new(AtomicUsize::new(0));
        let counter = encoded.clone();
        let rows = (0..3).map(move |i| {
            counter.fetch_add(1, Ordering::SeqCst);
            vec![i.to_string()]
        });

        let response = csv_response("lazy.csv", rows).unwrap();
        assert_eq!(encoded.load(Ordering::SeqCst), 0);

        assert_eq!(body_string(response).await, "0\r\n1\r\n2\r\n");
        assert_eq!(encoded.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_csv_response_rejects_bad_filename() {
        let rows = vec![vec!["a"]];
        let result = csv_response("bad\nname.csv", rows);
        assert!(matches!(result, Err(Error::Header(_))));
    }

    #[tokio::test]
    async fn test_csv_download_into_response() {
        let download = CsvDownload::new("x.csv", vec![vec!["1", "2"]]);
        let response = download.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "1,2\r\n");

        let broken = CsvDownload::new("x\n.csv", vec![vec!["1"]]);
        assert_eq!(
            broken.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
