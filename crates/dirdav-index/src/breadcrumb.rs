use maud::{html, Markup};

/// One clickable step of the current path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Segment text shown to the user.
    pub label: String,
    /// Absolute link target, still percent-encoded as it arrived.
    pub href: String,
}

/// Split a request path into breadcrumbs, ordered root to leaf.
///
/// Empty segments are skipped, so `/`, `""` and `//` all produce no
/// breadcrumbs; the root link is rendered separately by [`render_breadcrumbs`].
pub fn breadcrumbs(request_path: &str) -> Vec<Breadcrumb> {
    let mut href = String::new();
    request_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            href.push('/');
            href.push_str(segment);
            let label = urlencoding::decode(segment)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| segment.to_string());
            Breadcrumb {
                label,
                href: href.clone(),
            }
        })
        .collect()
}

/// Render the page header: a fixed root link followed by the breadcrumbs.
pub fn render_breadcrumbs(crumbs: &[Breadcrumb]) -> Markup {
    html! {
        header {
            div.wrapper {
                div.breadcrumbs { "Folder Path" }
                h1 {
                    a href="/" { "/" }
                    @for (i, crumb) in crumbs.iter().enumerate() {
                        @if i > 0 { " / " }
                        a href=(crumb.href) { (crumb.label) }
                    }
                }
            }
        }
    }
}
