//! Blocking static file server.

use std::fs;
use std::net::{TcpListener, TcpStream};
use std::path::{Component, Path, PathBuf};

use crate::error::{EasypackError, Result};

use super::http::{read_request, write_response, HttpRequest, HttpResponse};
use super::{ServeOptions, StaticServer};

/// Serves a directory over HTTP on `127.0.0.1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpStaticServer;

impl HttpStaticServer {
    pub fn new() -> Self {
        Self
    }

    /// Accept connections until `limit` requests were handled (forever when `None`).
    pub fn serve(&self, listener: &TcpListener, root: &Path, limit: Option<usize>) -> Result<()> {
        let mut handled = 0;
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(e) = handle_connection(stream, root) {
                        tracing::debug!(error = %e, "connection failed");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "accept failed"),
            }
            handled += 1;
            if limit.is_some_and(|limit| handled >= limit) {
                break;
            }
        }
        Ok(())
    }
}

impl StaticServer for HttpStaticServer {
    fn start(&self, options: &ServeOptions) -> Result<()> {
        if !options.dist.is_dir() {
            return Err(EasypackError::ConfigValidationError {
                message: format!("{} is not a directory", options.dist.display()),
            });
        }

        let port = options.port_or_default();
        let listener = TcpListener::bind(("127.0.0.1", port))?;
        tracing::info!(
            dist = %options.dist.display(),
            url = %format!("http://127.0.0.1:{}", port),
            "serving static files"
        );
        self.serve(&listener, &options.dist, None)
    }
}

fn handle_connection(mut stream: TcpStream, root: &Path) -> std::io::Result<()> {
    let (response, head_only) = match read_request(&mut stream) {
        None => return Ok(()),
        Some(Err(message)) => (HttpResponse::text(400, &message), false),
        Some(Ok(request)) => (respond(root, &request), request.method == "HEAD"),
    };
    write_response(&mut stream, &response, head_only)
}

/// Build the response for one request against `root`.
pub fn respond(root: &Path, request: &HttpRequest) -> HttpResponse {
    if request.method != "GET" && request.method != "HEAD" {
        let mut response = HttpResponse::text(405, "Method Not Allowed");
        response
            .headers
            .push(("Allow".to_string(), "GET, HEAD".to_string()));
        return response;
    }

    let Some(relative) = request_path(&request.path) else {
        return HttpResponse::text(400, "Bad Request");
    };

    let mut file = root.join(relative);
    if file.is_dir() {
        file = file.join("index.html");
    }

    match fs::read(&file) {
        Ok(body) => {
            tracing::debug!(path = %file.display(), bytes = body.len(), "served");
            HttpResponse {
                status: 200,
                headers: vec![("Content-Type".to_string(), content_type(&file).to_string())],
                body,
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            HttpResponse::text(404, "Not Found")
        }
        Err(e) => {
            tracing::warn!(path = %file.display(), error = %e, "read failed");
            HttpResponse::text(500, "Internal Server Error")
        }
    }
}

/// Decoded, root-relative path of a request target. `None` if it escapes the root.
pub fn request_path(target: &str) -> Option<PathBuf> {
    let path = target.split(['?', '#']).next().unwrap_or("");
    let decoded = percent_decode(path)?;

    let mut relative = PathBuf::new();
    for component in Path::new(&decoded).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir | Component::Prefix(_) => return None,
        }
    }
    Some(relative)
}

fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = input.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Content type for a file, by extension.
pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "application/javascript; charset=utf-8",
        Some("json") | Some("map") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use tempfile::TempDir;

    fn get(path: &str) -> HttpRequest {
        HttpRequest {
            method: "GET".to_string(),
            path: path.to_string(),
            headers: Vec::new(),
        }
    }

    fn site() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.html"), "<h1>home</h1>").unwrap();
        fs::create_dir(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs/index.html"), "docs").unwrap();
        fs::write(temp.path().join("app bundle.js"), "console.log(1)").unwrap();
        temp
    }

    #[test]
    fn root_serves_index() {
        let temp = site();
        let response = respond(temp.path(), &get("/"));
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"<h1>home</h1>");
        assert_eq!(response.headers[0].1, "text/html; charset=utf-8");
    }

    #[test]
    fn directory_serves_its_index() {
        let temp = site();
        let response = respond(temp.path(), &get("/docs"));
        assert_eq!(response.body, b"docs");
    }

    #[test]
    fn percent_encoded_names_resolve() {
        let temp = site();
        let response = respond(temp.path(), &get("/app%20bundle.js?v=3"));
        assert_eq!(response.status, 200);
        assert!(response.headers[0].1.starts_with("application/javascript"));
    }

    #[test]
    fn missing_file_is_404() {
        let temp = site();
        assert_eq!(respond(temp.path(), &get("/nope.css")).status, 404);
    }

    #[test]
    fn parent_components_are_rejected() {
        let temp = site();
        assert_eq!(respond(temp.path(), &get("/../secret")).status, 400);
        assert_eq!(respond(temp.path(), &get("/%2e%2e/secret")).status, 400);
        assert_eq!(request_path("/a/../b"), None);
    }

    #[test]
    fn bad_escape_is_rejected() {
        assert_eq!(request_path("/%zz"), None);
        assert_eq!(request_path("/%4"), None);
    }

    #[test]
    fn only_get_and_head_allowed() {
        let temp = site();
        let mut request = get("/");
        request.method = "POST".to_string();
        let response = respond(temp.path(), &request);
        assert_eq!(response.status, 405);
        assert!(response.headers.iter().any(|(n, v)| n == "Allow" && v == "GET, HEAD"));
    }

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type(Path::new("a.CSS")), "text/css; charset=utf-8");
        assert_eq!(content_type(Path::new("a.woff2")), "font/woff2");
        assert_eq!(content_type(Path::new("LICENSE")), "application/octet-stream");
    }

    #[test]
    fn serves_over_tcp() {
        let temp = site();
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let addr = listener.local_addr().unwrap();
        let root = temp.path().to_path_buf();

        let handle = std::thread::spawn(move || {
            HttpStaticServer::new().serve(&listener, &root, Some(1)).unwrap();
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client
            .write_all(b"GET /index.html HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .unwrap();
        let mut response = String::new();
        client.read_to_string(&mut response).unwrap();
        handle.join().unwrap();

        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.ends_with("<h1>home</h1>"));
    }

    #[test]
    fn start_rejects_missing_dist() {
        let temp = TempDir::new().unwrap();
        let options = ServeOptions::new(temp.path().join("missing"), Some(0));
        let err = HttpStaticServer::new().start(&options).unwrap_err();
        assert!(matches!(err, EasypackError::ConfigValidationError { .. }));
    }
}
