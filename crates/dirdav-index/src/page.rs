//! Full listing page.

use crate::entry::DirectoryEntry;
use crate::size::format_size;
use chrono::{DateTime, Local};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::time::SystemTime;

/// Folder name used for the served root. The root page has no "Up" row.
pub const ROOT_FOLDER: &str = "/";

/// `chrono` format of the Modified column (24-hour, local time).
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

const STYLE: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; color: #333; background: #fff; }
a { color: #006ed3; text-decoration: none; }
a:hover { color: #319cff; }
header { padding: 24px 0 12px; background: #f2f2f2; border-bottom: 1px solid #e5e5e5; }
.wrapper { max-width: 1100px; margin: 0 auto; padding: 0 24px; }
.breadcrumbs { font-size: 12px; text-transform: uppercase; color: #999; }
h1 { margin: 4px 0 0; font-size: 20px; font-weight: normal; word-break: break-all; }
table { width: 100%; border-collapse: collapse; margin-top: 12px; }
th, td { padding: 8px 4px; text-align: left; white-space: nowrap; }
th { font-size: 13px; color: #666; border-bottom: 1px solid #e5e5e5; }
tr.file:hover { background: #f8f8f8; }
td a { display: inline-flex; align-items: center; gap: 8px; }
.size { text-align: right; padding-right: 24px; }
.icon { vertical-align: middle; }
@media (max-width: 600px) { .hideable { display: none; } }
"#;

const ICON_UP: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="icon icon-tabler icon-tabler-corner-left-up" width="24" height="24" viewBox="0 0 24 24" stroke-width="2" stroke="currentColor" fill="none" stroke-linecap="round" stroke-linejoin="round"><path stroke="none" d="M0 0h24v24H0z" fill="none"></path><path d="M18 18h-6a3 3 0 0 1 -3 -3v-10l-4 4m8 0l-4 -4"></path></svg>"#;

const ICON_FOLDER: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" class="icon icon-tabler icon-tabler-folder-filled" width="24" height="24" viewBox="0 0 24 24" stroke-width="2" stroke="currentColor" fill="none" stroke-linecap="round" stroke-linejoin="round"><path stroke="none" d="M0 0h24v24H0z" fill="none"></path><path d="M9 3a1 1 0 0 1 .608 .206l.1 .087l2.706 2.707h6.586a3 3 0 0 1 2.995 2.824l.005 .176v8a3 3 0 0 1 -2.824 2.995l-.176 .005h-14a3 3 0 0 1 -2.995 -2.824l-.005 -.176v-11a3 3 0 0 1 2.824 -2.995l.176 -.005h4z" stroke-width="0" fill="#ffb900"></path></svg>"##;

const ICON_FILE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="icon icon-tabler icon-tabler-file" width="24" height="24" viewBox="0 0 24 24" stroke-width="2" stroke="currentColor" fill="none" stroke-linecap="round" stroke-linejoin="round"><path stroke="none" d="M0 0h24v24H0z" fill="none"></path><path d="M14 3v4a1 1 0 0 0 1 1h4"></path><path d="M17 21h-10a2 2 0 0 1 -2 -2v-14a2 2 0 0 1 2 -2h7l5 5v11a2 2 0 0 1 -2 2z"></path></svg>"#;

/// Render the complete HTML listing for one directory.
///
/// # Arguments
///
/// * `folder_name` - Page title; [`ROOT_FOLDER`] suppresses the "Up" row
/// * `nav` - Header markup, usually from [`crate::render_breadcrumbs`]
/// * `entries` - Children in display order (see [`crate::sort_entries`])
/// * `show_hidden` - Whether dotfiles are listed
///
/// Entry names are escaped as text and percent-encoded in links, so any
/// filename produces well-formed markup.
pub fn render_page(
    folder_name: &str,
    nav: Markup,
    entries: &[DirectoryEntry],
    show_hidden: bool,
) -> String {
    let visible = entries.iter().filter(|e| show_hidden || !e.is_hidden());

    let page = html! {
        (DOCTYPE)
        html {
            head {
                title { (folder_name) }
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                style { (PreEscaped(STYLE)) }
            }
            body {
                (nav)
                div.wrapper {
                    main {
                        div.meta {}
                        div.listing {
                            table aria-describedby="summary" {
                                thead {
                                    tr {
                                        th {}
                                        th { "Name" }
                                        th.size { "Size" }
                                        th."timestamp"."hideable" { "Modified" }
                                        th.hideable {}
                                    }
                                }
                                tbody {
                                    @if folder_name != ROOT_FOLDER {
                                        tr {
                                            td {}
                                            td {
                                                a href="../" {
                                                    (PreEscaped(ICON_UP))
                                                    span."go-up" { "Up" }
                                                }
                                            }
                                        }
                                    }
                                    @for entry in visible {
                                        (entry_row(entry))
                                    }
                                }
                            }
                        }
                    }
                }
            }
            footer {}
        }
    };
    page.into_string()
}

fn entry_row(entry: &DirectoryEntry) -> Markup {
    let mut href = urlencoding::encode(&entry.name).into_owned();
    let mut label = entry.name.clone();
    if entry.is_dir {
        href.push('/');
        label.push('/');
    }
    let icon = if entry.is_dir { ICON_FOLDER } else { ICON_FILE };

    html! {
        tr.file {
            td {}
            td {
                a href=(href) {
                    (PreEscaped(icon))
                    span.name { (label) }
                }
            }
            @if entry.is_dir {
                td { "—" }
            } @else {
                td.size { (format_size(entry.size)) }
            }
            td."timestamp"."hideable" { (entry.modified.map(format_timestamp).unwrap_or_default()) }
            td.hideable {}
        }
    }
}

fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(TIMESTAMP_FORMAT).to_string()
}
