//! Navigation shell shared by every page.

use super::escape;
use crate::domain::Page;

/// Site header. The current page is a plain label, every other page a link.
pub fn header(current: Page) -> String {
    let items: String = Page::ALL
        .into_iter()
        .map(|page| nav_item(page, page == current))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<header class="finova-header">
<div class="inner">
<a href="/" class="brand"><img src="/static/finova-logo.svg" alt="FINOVA Logo" width="24" height="24"> FINOVA</a>
<nav>
{items}
</nav>
</div>
</header>"#
    )
}

fn nav_item(page: Page, is_current: bool) -> String {
    let label = escape(page.label());
    if is_current {
        format!(r#"<span class="finova-nav-current">{label}</span>"#)
    } else {
        format!(
            r#"<a href="{}" class="finova-nav-link">{label}</a>"#,
            page.path()
        )
    }
}
