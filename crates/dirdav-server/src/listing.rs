//! HTML directory listings for plain `GET` requests.

use crate::response;
use dav_server::body::Body;
use dav_server::davpath::DavPath;
use dav_server::fs::{DavFileSystem, FsResult, ReadDirMeta};
use dirdav_index::{
    breadcrumbs, render_breadcrumbs, render_page, sort_entries, DirectoryEntry, ROOT_FOLDER,
};
use futures::StreamExt;
use hyper::header::{HeaderValue, LOCATION};
use hyper::{Response, StatusCode};
use log::{debug, error, trace, warn};
use std::sync::Arc;

/// Result of offering a request to [`DirectoryListing`].
pub enum ListingOutcome {
    /// The listing produced the final response.
    Handled(Response<Body>),
    /// Not a directory (or not readable); let the WebDAV handler answer.
    NotHandled,
}

impl ListingOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, ListingOutcome::Handled(_))
    }
}

/// Serves generated index pages for directories.
#[derive(Clone)]
pub struct DirectoryListing {
    fs: Arc<dyn DavFileSystem + Send + Sync>,
    show_hidden: bool,
}

impl DirectoryListing {
    /// Create a listing over `fs`.
    pub fn new(fs: Arc<dyn DavFileSystem + Send + Sync>, show_hidden: bool) -> Self {
        Self { fs, show_hidden }
    }

    /// Handle a `GET` for `request_path` (the percent-encoded URI path).
    ///
    /// Files and paths that cannot be opened are left to the WebDAV handler.
    /// Directories are only rendered at their canonical path: a missing
    /// trailing slash, `.` and `..` segments, and doubled slashes are all
    /// answered with a redirect.
    pub async fn handle(&self, request_path: &str) -> ListingOutcome {
        let path = match DavPath::new(request_path) {
            Ok(path) => path,
            Err(e) => {
                trace!("listing: undecodable path {:?}: {:?}", request_path, e);
                return ListingOutcome::NotHandled;
            }
        };

        let meta = match self.fs.metadata(&path).await {
            Ok(meta) => meta,
            Err(e) => {
                trace!("listing: cannot open {:?}: {:?}", request_path, e);
                return ListingOutcome::NotHandled;
            }
        };
        if !meta.is_dir() {
            return ListingOutcome::NotHandled;
        }

        let canonical = canonical_dir_path(request_path);
        if canonical != request_path {
            return redirect(canonical);
        }

        let mut entries = match self.read_entries(&path).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Error reading directory {}: {:?}", request_path, e);
                return ListingOutcome::Handled(response::plain(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error reading directory",
                ));
            }
        };
        sort_entries(&mut entries);

        let crumbs = breadcrumbs(request_path);
        let folder_name = crumbs
            .last()
            .map(|crumb| crumb.label.as_str())
            .unwrap_or(ROOT_FOLDER);
        let page = render_page(
            folder_name,
            render_breadcrumbs(&crumbs),
            &entries,
            self.show_hidden,
        );

        debug!("listing: {} ({} entries)", request_path, entries.len());
        ListingOutcome::Handled(response::html(page))
    }

    async fn read_entries(&self, path: &DavPath) -> FsResult<Vec<DirectoryEntry>> {
        let mut stream = self.fs.read_dir(path, ReadDirMeta::Data).await?;
        let mut entries = Vec::new();

        while let Some(item) = stream.next().await {
            let dirent = item?;
            let name = String::from_utf8_lossy(&dirent.name()).into_owned();
            match dirent.metadata().await {
                Ok(meta) if meta.is_dir() => {
                    entries.push(DirectoryEntry::dir(name, meta.modified().ok()));
                }
                Ok(meta) => {
                    entries.push(DirectoryEntry::file(name, meta.len(), meta.modified().ok()));
                }
                Err(e) => warn!("Skipping {:?} in listing: {:?}", name, e),
            }
        }

        Ok(entries)
    }
}

/// Resolve dot segments and empty segments in a percent-encoded path and
/// append the trailing slash of a directory. `..` never climbs above `/`.
fn canonical_dir_path(request_path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in request_path.split('/') {
        match segment.to_ascii_lowercase().replace("%2e", ".").as_str() {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    let mut path = String::from("/");
    for segment in segments {
        path.push_str(segment);
        path.push('/');
    }
    path
}

fn redirect(location: String) -> ListingOutcome {
    match HeaderValue::from_str(&location) {
        Ok(value) => {
            let mut res = response::empty(StatusCode::FOUND);
            res.headers_mut().insert(LOCATION, value);
            ListingOutcome::Handled(res)
        }
        Err(_) => {
            warn!("listing: cannot redirect to {:?}", location);
            ListingOutcome::NotHandled
        }
    }
}
