//! Server-side HTML rendering.
//!
//! Markup is assembled from plain strings. Anything that came from a
//! visitor goes through [`escape`] first.

pub mod credit;
pub mod home;
pub mod nav;
pub mod team;
pub mod tender;

use crate::domain::{Page, Percentage};

const STYLES: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #1f2937; }
.finova-header { background: #fff; border-bottom: 1px solid #e5e7eb; }
.finova-header .inner, main { max-width: 72rem; margin: 0 auto; padding: 1rem; }
.finova-header .inner { display: flex; align-items: center; justify-content: space-between; }
.brand { font-size: 1.5rem; font-weight: 700; color: #0D3B66; text-decoration: none; }
nav { display: flex; gap: 2rem; }
.finova-nav-link { color: #0D3B66; text-decoration: none; }
.finova-nav-current { color: #1FAA59; font-weight: 500; }
.card { background: #fff; border-radius: 1rem; box-shadow: 0 4px 12px rgba(0,0,0,.08); padding: 2rem; margin-bottom: 2rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(18rem, 1fr)); gap: 2rem; }
.muted { color: #9ca3af; text-align: center; padding: 2rem 0; }
.spinner { width: 3rem; height: 3rem; margin: 0 auto 1rem; border-radius: 50%; border-bottom: 2px solid #2563eb; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
.bar { width: 100%; background: #e5e7eb; border-radius: 9999px; height: .5rem; }
.bar > div { background: #7c3aed; height: .5rem; border-radius: 9999px; }
.badge { display: inline-block; padding: .25rem .75rem; border-radius: 9999px; font-size: .875rem; }
.risk-low { background: #dcfce7; color: #166534; }
.risk-medium { background: #fef9c3; color: #854d0e; }
.risk-high { background: #fee2e2; color: #991b1b; }
button { width: 100%; padding: .75rem 1.5rem; border: 0; border-radius: .5rem; color: #fff; font-weight: 600; background: #0D3B66; cursor: pointer; }
button:disabled { background: #9ca3af; cursor: not-allowed; }
label { display: block; font-size: .875rem; margin: 1rem 0 .5rem; }
input, select { width: 100%; padding: .75rem; border: 1px solid #d1d5db; border-radius: .5rem; box-sizing: border-box; }
"#;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Full HTML document: head, navigation shell, then `body`.
///
/// `refresh_secs` adds a meta refresh, used while an analysis is running.
pub fn document(page: Page, refresh_secs: Option<u32>, body: &str) -> String {
    let refresh = refresh_secs
        .map(|secs| format!(r#"<meta http-equiv="refresh" content="{secs}">"#))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}<title>{title}</title>
<style>{STYLES}</style>
</head>
<body>
{header}
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(page.title()),
        header = nav::header(page),
    )
}

/// Integer with `,` thousands separators, e.g. `4,500`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Labelled percentage with a proportional bar.
pub fn percent_bar(label: &str, value: Percentage) -> String {
    format!(
        r#"<div class="factor">
<div style="display:flex;justify-content:space-between;font-size:.875rem"><span>{label}</span><span>{value}</span></div>
<div class="bar"><div style="width: {width}%"></div></div>
</div>
"#,
        label = escape(label),
        width = value.value(),
    )
}

/// Submit button; `disabled` is set whenever submission is not allowed.
pub fn submit_button(label: &str, enabled: bool, formaction: Option<&str>) -> String {
    let disabled = if enabled { "" } else { " disabled" };
    let action = formaction
        .map(|url| format!(r#" formaction="{}""#, escape(url)))
        .unwrap_or_default();
    format!(
        r#"<button type="submit"{action}{disabled}>{}</button>"#,
        escape(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(450), "450");
        assert_eq!(format_thousands(4500), "4,500");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(-3000), "-3,000");
    }

    #[test]
    fn bar_width_matches_percentage() {
        let html = percent_bar("Presencia Digital", Percentage::clamped(87));
        assert!(html.contains("87%</span>"));
        assert!(html.contains("width: 87%"));

        let clamped = percent_bar("Reputación Comercial", Percentage::clamped(103));
        assert!(clamped.contains("width: 100%"));
    }

    #[test]
    fn submit_button_disabled_flag() {
        assert!(submit_button("Analizar con IA", false, None).contains(" disabled"));
        assert!(!submit_button("Analizar con IA", true, None).contains("disabled"));
        assert!(submit_button("Go", true, Some("/x?a=1&b=2"))
            .contains(r#"formaction="/x?a=1&amp;b=2""#));
    }

    #[test]
    fn document_includes_refresh_only_when_asked() {
        assert!(document(Page::Reto1, Some(1), "")
            .contains(r#"http-equiv="refresh" content="1""#));
        assert!(!document(Page::Reto1, None, "").contains("http-equiv"));
    }
}
