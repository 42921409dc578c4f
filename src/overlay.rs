//! DOM presentation layer: the tag overlay sink, the profile overlay and
//! the loading surface. All state decisions happen elsewhere; this module
//! only pushes to the page.

use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::records::ProfileRecord;
use crate::core::{CursorMode, OverlaySink};
use crate::dom;

/// `OverlaySink` backed by the page. Owns clones of the handles it writes.
pub struct DomSink {
    document: web::Document,
    canvas: web::HtmlCanvasElement,
}

impl DomSink {
    pub fn new(document: web::Document, canvas: web::HtmlCanvasElement) -> Self {
        Self { document, canvas }
    }
}

impl OverlaySink for DomSink {
    fn show_overlay(&mut self, title: &str, tags: &[String], badge: Option<u64>) {
        dom::set_text(&self.document, "item-title", title);
        if let Some(list) = self.document.get_element_by_id("item-tags") {
            list.set_inner_html("");
            for tag in tags {
                if let Ok(li) = self.document.create_element("li") {
                    li.set_text_content(Some(tag));
                    _ = list.append_child(&li);
                }
            }
        }
        if let Some(el) = self.document.get_element_by_id("item-badge") {
            match badge {
                Some(stars) => {
                    el.set_text_content(Some(&format!("\u{2605} {stars}")));
                    _ = el.class_list().remove_1("hidden");
                }
                None => {
                    _ = el.class_list().add_1("hidden");
                }
            }
        }
        if let Some(el) = self.document.get_element_by_id("item-overlay") {
            let cl = el.class_list();
            _ = cl.remove_1("hidden");
            _ = cl.add_1("visible");
        }
    }

    fn hide_overlay(&mut self) {
        if let Some(el) = self.document.get_element_by_id("item-overlay") {
            let cl = el.class_list();
            _ = cl.remove_1("visible");
            _ = cl.add_1("hidden");
        }
    }

    fn set_cursor(&mut self, mode: CursorMode) {
        let css = match mode {
            CursorMode::Default => "default",
            CursorMode::Grab => "grab",
            CursorMode::Grabbing => "grabbing",
            CursorMode::Pointer => "pointer",
        };
        _ = self.canvas.style().set_property("cursor", css);
    }
}

pub fn show_profile(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("profile-overlay") {
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        _ = cl.add_1("visible");
    }
}

pub fn hide_profile(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("profile-overlay") {
        let cl = el.class_list();
        _ = cl.remove_1("visible");
        _ = cl.add_1("hidden");
    }
}

/// Fill the profile overlay from a fetched record.
pub fn set_profile(document: &web::Document, profile: &ProfileRecord) {
    if let Some(el) = document.get_element_by_id("avatar") {
        if let Ok(img) = el.dyn_into::<web::HtmlImageElement>() {
            img.set_src(&profile.avatar_url);
        }
    }
    dom::set_text(document, "username", profile.display_name());
    dom::set_text(document, "bio", profile.bio_text());
    dom::set_text(document, "repos", &profile.public_repos.to_string());
    if let Some(el) = document.get_element_by_id("github-link") {
        if let Ok(link) = el.dyn_into::<web::HtmlAnchorElement>() {
            link.set_href(&profile.html_url);
        }
    }
}

pub fn hide_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("loading") {
        _ = el.class_list().add_1("hidden");
    }
}

/// Replace the loading indicator's text with an inline error. The scene
/// keeps running; this is the only user-visible failure surface.
pub fn show_load_error(document: &web::Document, message: &str) {
    if let Ok(Some(el)) = document.query_selector("#loading p") {
        el.set_text_content(Some(message));
    }
}
