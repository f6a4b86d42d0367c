//! Request routing.
//!
//! | Method | Path            | Response                                  |
//! |--------|-----------------|-------------------------------------------|
//! | any    | `/`             | 200, no header block                      |
//! | any    | `/user-agent`   | 200 `text/plain`, the `User-Agent` value  |
//! | any    | `/echo/{text}`  | 200 `text/plain`, `{text}`, gzip if asked |
//! | GET    | `/files/{name}` | 200 file bytes, or 404/500                |
//! | POST   | `/files/{name}` | 201 echoed bytes, or 404/500              |
//! | any    | anything else   | 404, no header block                      |

use crate::config::Config;
use crate::files::FileStore;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};

#[derive(Debug, Clone, Default)]
pub struct Router {
    files: FileStore,
}

impl Router {
    pub fn new(files: FileStore) -> Self {
        Self { files }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(FileStore::new(cfg.directory.clone()))
    }

    pub fn files(&self) -> &FileStore {
        &self.files
    }

    /// Produces the response for `req`, carrying the client's close decision.
    pub async fn handle(&self, req: &Request) -> Response {
        let response = self.route(req).await;

        tracing::debug!(
            method = %req.method,
            path = %req.path,
            status = response.status.as_u16(),
            "Request handled"
        );

        response.close(!req.keep_alive())
    }

    async fn route(&self, req: &Request) -> Response {
        match req.segments().as_slice() {
            ["", ""] => Response::empty(StatusCode::Ok),
            ["", "user-agent"] => Response::ok(req.user_agent()),
            ["", "echo", text] => Response::ok(*text).encoded(req.header("Accept-Encoding")),
            ["", "files", name] if req.method == Method::POST => {
                self.files.put_response(name, req.body.clone()).await
            }
            ["", "files", name] => self.files.get_response(name).await,
            _ => {
                tracing::debug!(path = %req.path, "No route");
                Response::not_found()
            }
        }
    }
}
