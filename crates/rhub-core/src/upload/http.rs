//! Blocking libcurl requests used by the upload steps.
//!
//! Every function here returns [`AttemptError`] so callers can decide whether
//! a failure is retried (PUT) or surfaced immediately (control-plane calls).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use curl::easy::{Easy, Form, List, ReadError};

use crate::config::HttpConfig;
use crate::retry::AttemptError;

pub const USER_AGENT: &str = concat!("rhub/", env!("CARGO_PKG_VERSION"));

/// Status and raw body of a 2xx response.
#[derive(Debug)]
pub(crate) struct Response {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Strips the query string and fragment so presigned signatures never reach logs or errors.
pub fn redact_query(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut u) => {
            u.set_query(None);
            u.set_fragment(None);
            u.to_string()
        }
        Err(_) => raw.split(['?', '#']).next().unwrap_or_default().to_string(),
    }
}

fn header_list(headers: &[&str]) -> Result<List, curl::Error> {
    let mut list = List::new();
    for h in headers {
        list.append(h)?;
    }
    // Empty `Expect:` stops libcurl from waiting on `100 Continue` for larger bodies.
    list.append("Expect:")?;
    Ok(list)
}

fn new_easy(url: &str, http: &HttpConfig) -> Result<Easy, curl::Error> {
    let mut easy = Easy::new();
    easy.url(url)?;
    easy.useragent(USER_AGENT)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(http.connect_timeout())?;
    Ok(easy)
}

/// Runs the transfer, collecting the response body, and turns non-2xx into an error.
fn finish(easy: &mut Easy) -> Result<Response, AttemptError> {
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    into_response(easy.response_code()?, body)
}

fn into_response(status: u32, body: Vec<u8>) -> Result<Response, AttemptError> {
    if !(200..300).contains(&status) {
        return Err(AttemptError::Http {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    Ok(Response { status, body })
}

/// POST a JSON document.
pub(crate) fn post_json(
    url: &str,
    json: &[u8],
    http: &HttpConfig,
) -> Result<Response, AttemptError> {
    let mut easy = new_easy(url, http)?;
    easy.timeout(http.request_timeout())?;
    easy.http_headers(header_list(&["Content-Type: application/json"])?)?;
    easy.post(true)?;
    easy.post_fields_copy(json)?;
    finish(&mut easy)
}

/// POST a multipart form.
pub(crate) fn post_form(
    url: &str,
    form: Form,
    http: &HttpConfig,
) -> Result<Response, AttemptError> {
    let mut easy = new_easy(url, http)?;
    easy.timeout(http.request_timeout())?;
    easy.http_headers(header_list(&[])?)?;
    easy.httppost(form)?;
    finish(&mut easy)
}

/// PUT the file at `path` as the raw request body, streaming it from disk.
///
/// The file is opened here and closed when this attempt returns.
pub(crate) fn put_file(
    url: &str,
    path: &Path,
    http: &HttpConfig,
) -> Result<Response, AttemptError> {
    let mut file = File::open(path).map_err(AttemptError::Io)?;
    let len = file.metadata().map_err(AttemptError::Io)?.len();

    let mut easy = new_easy(url, http)?;
    easy.http_headers(header_list(&["Content-Type: application/octet-stream"])?)?;
    easy.upload(true)?;
    easy.in_filesize(len)?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(http.low_speed_time())?;

    let mut body = Vec::new();
    let mut read_failure = None;
    let performed = {
        let mut transfer = easy.transfer();
        transfer.read_function(|buf| match file.read(buf) {
            Ok(n) => Ok(n),
            Err(e) => {
                read_failure = Some(e);
                Err(ReadError::Abort)
            }
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()
    };
    if let Some(e) = read_failure {
        return Err(AttemptError::Io(e));
    }
    performed?;
    into_response(easy.response_code()?, body)
}
