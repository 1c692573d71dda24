//! Small DOM and rendering utilities shared by the pages.

use js_sys::Reflect;
use pulldown_cmark::{html, CowStr, Event, Parser, Tag};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;
use yew::prelude::*;

/// Shows a transient notification at the bottom of the screen.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Hex MD5 digest, used to tell whether a document changed since it was saved.
pub fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

/// Publishes unsaved-changes state as `window.app_dirty` for the host page.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        );
    }
}

/// Dismissible error line shown above a page.
pub fn alert_banner(alert: Option<&str>, on_dismiss: Callback<MouseEvent>) -> Html {
    match alert {
        Some(message) => html! {
            <div class="alert-banner" role="alert">
                <span class="material-icons">{"error_outline"}</span>
                <span class="alert-text">{ message.to_string() }</span>
                <button class="alert-close" title="Dismiss" onclick={on_dismiss}>{"✕"}</button>
            </div>
        },
        None => html! {},
    }
}

pub fn icon_button(icon_name: &str, label: &str, on_click: Callback<MouseEvent>, disabled: bool) -> Html {
    html! {
        <button class="icon-btn" title={label.to_string()} onclick={on_click} {disabled}>
            <span class="material-icons">{ icon_name.to_string() }</span>
            <span class="icon-label">{ label.to_string() }</span>
        </button>
    }
}

/// Markdown to HTML with raw HTML blocks dropped and link or image targets
/// limited to web, mail and relative URLs.
pub fn markdown_to_html(input: &str) -> String {
    let parser = Parser::new(input)
        .filter(|event| !matches!(event, Event::Html(_) | Event::InlineHtml(_)))
        .map(|event| match event {
            Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
                link_type,
                dest_url: safe_url(dest_url),
                title,
                id,
            }),
            Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
                link_type,
                dest_url: safe_url(dest_url),
                title,
                id,
            }),
            other => other,
        });
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

/// Keeps `http`, `https`, `mailto` and scheme-less URLs; anything else
/// becomes an inert `#`.
fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let scheme = url
        .split_once(':')
        .map(|(scheme, _)| scheme)
        .filter(|scheme| !scheme.contains(['/', '?', '#']));
    match scheme {
        None => url,
        Some(scheme)
            if ["http", "https", "mailto"]
                .iter()
                .any(|allowed| scheme.trim().eq_ignore_ascii_case(allowed)) =>
        {
            url
        }
        Some(_) => CowStr::Borrowed("#"),
    }
}

pub fn markdown_view(input: &str) -> Html {
    if input.trim().is_empty() {
        return html! {};
    }
    Html::from_html_unchecked(AttrValue::from(markdown_to_html(input)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn md5_is_stable_hex() {
        assert_eq!(compute_md5(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_ne!(compute_md5("[]"), compute_md5("[{}]"));
    }

    #[test]
    fn markdown_drops_raw_html() {
        let out = markdown_to_html("**Week** notes <script>alert(1)</script>");
        assert!(out.contains("<strong>Week</strong>"));
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn markdown_neutralises_script_links() {
        let out = markdown_to_html("[click](javascript:alert(document.cookie))");
        assert!(!out.contains("javascript:"));
        assert!(out.contains(r##"<a href="#">click</a>"##));

        let out = markdown_to_html("![x](JavaScript:alert(1)) [d](data:text/html,hi)");
        assert!(!out.to_lowercase().contains("javascript:"));
        assert!(!out.contains("data:"));
    }

    #[test]
    fn markdown_keeps_web_and_relative_links() {
        let out = markdown_to_html(
            "[a](https://example.org/x) [b](mailto:t@example.org) [c](/guide?a=b:c) [d](notes.md)",
        );
        assert!(out.contains(r#"href="https://example.org/x""#));
        assert!(out.contains(r#"href="mailto:t@example.org""#));
        assert!(out.contains(r#"href="/guide?a=b:c""#));
        assert!(out.contains(r#"href="notes.md""#));
    }
}
