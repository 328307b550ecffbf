//! # dirdav-index
//!
//! HTML directory index rendering for `dirdav`.
//!
//! This crate provides:
//! - Human-readable byte sizes ([`format_size`])
//! - Canonical entry ordering, directories first ([`sort_entries`])
//! - Breadcrumb navigation derived from a request path ([`breadcrumbs`])
//! - The full listing page ([`render_page`])
//!
//! Everything here is pure: callers read the directory through their own I/O
//! layer and hand the entries over.
//!
//! ## Example
//!
//! ```ignore
//! use dirdav_index::{breadcrumbs, render_breadcrumbs, render_page, sort_entries, DirectoryEntry};
//!
//! let mut entries = vec![
//!     DirectoryEntry::file("a.txt", 512, None),
//!     DirectoryEntry::dir("docs", None),
//! ];
//! sort_entries(&mut entries);
//!
//! let nav = render_breadcrumbs(&breadcrumbs("/"));
//! let html = render_page("/", nav, &entries, false);
//! assert!(html.contains("512 B"));
//! ```

mod breadcrumb;
mod entry;
mod page;
mod size;

pub use breadcrumb::{breadcrumbs, render_breadcrumbs, Breadcrumb};
pub use entry::{sort_entries, DirectoryEntry};
pub use page::{render_page, ROOT_FOLDER, TIMESTAMP_FORMAT};
pub use size::format_size;

// Re-export so callers can hold breadcrumb markup without depending on maud
pub use maud::Markup;
