// Accessibility helpers

/// Get CSS for visible focus indicators and screen reader utilities
///
/// Returns critical accessibility CSS that should be injected early in the
/// page load. Includes focus ring styles and the screen reader helper class.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus{outline:3px solid #FFD700;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Announce a page change to assistive technology.
///
/// Updates the text content of the #page-announcer live region if present,
/// matching the "Now on page: {title}" phrasing screen-reader users hear.
pub fn announce_page(title: &str) {
    if let Some(node) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id("page-announcer"))
    {
        node.set_text_content(Some(&format!("Now on page: {title}")));
    }
}
