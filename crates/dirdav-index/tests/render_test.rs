use dirdav_index::{
    breadcrumbs, render_breadcrumbs, render_page, sort_entries, DirectoryEntry, ROOT_FOLDER,
};
use std::time::SystemTime;

#[test]
fn root_listing_orders_docs_before_file() {
    let now = Some(SystemTime::now());
    let mut entries = vec![
        DirectoryEntry::file("a.txt", 512, now),
        DirectoryEntry::dir("docs", now),
    ];
    sort_entries(&mut entries);

    let html = render_page(
        ROOT_FOLDER,
        render_breadcrumbs(&breadcrumbs("/")),
        &entries,
        false,
    );

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(!html.contains("go-up"));

    let docs = html.find(r#"href="docs/""#).unwrap();
    let file = html.find(r#"href="a.txt""#).unwrap();
    assert!(docs < file);
    assert!(html.contains(r#"<td class="size">512 B</td>"#));
    assert!(html.contains("<td>—</td>"));
}

#[test]
fn nested_listing_carries_breadcrumbs_and_up_row() {
    let entries = vec![DirectoryEntry::file("notes.md", 2048, None)];

    let html = render_page(
        "guides",
        render_breadcrumbs(&breadcrumbs("/docs/guides/")),
        &entries,
        false,
    );

    assert!(html.contains("<title>guides</title>"));
    assert!(html.contains(r#"<a href="/docs">docs</a> / <a href="/docs/guides">guides</a>"#));
    assert!(html.contains(r#"<a href="../">"#));
    assert!(html.contains("2.00 KiB"));
}

#[test]
fn header_row_has_all_columns() {
    let html = render_page(ROOT_FOLDER, render_breadcrumbs(&[]), &[], false);
    assert!(html.contains(
        r#"<tr><th></th><th>Name</th><th class="size">Size</th><th class="timestamp hideable">Modified</th><th class="hideable"></th></tr>"#
    ));
}
