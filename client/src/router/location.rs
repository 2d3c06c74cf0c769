//! Access to the visible URL.
//!
//! The router only reads the path and fragment and rewrites the URL with a
//! non-navigating history replace, so consumed tokens are not reachable via
//! the back button.

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

use std::cell::RefCell;
use std::rc::Rc;

pub trait Location {
    fn path(&self) -> String;
    /// Fragment without the leading `#`; empty when there is none.
    fn fragment(&self) -> String;
    /// Replace the current history entry with `path` (no fragment).
    fn replace(&self, path: &str);
}

/// `window.location` + `window.history`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocation;

impl Location for BrowserLocation {
    fn path(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_owned())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            "/".to_owned()
        }
    }

    fn fragment(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            let hash = web_sys::window()
                .and_then(|w| w.location().hash().ok())
                .unwrap_or_default();
            hash.strip_prefix('#').unwrap_or(&hash).to_owned()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            String::new()
        }
    }

    fn replace(&self, path: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
                return;
            };
            if let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path)) {
                leptos::logging::warn!("history replace failed: {e:?}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
        }
    }
}

#[derive(Debug, Default)]
struct MemoryUrl {
    path: String,
    fragment: String,
    replacements: Vec<String>,
}

/// In-memory URL for tests and server rendering. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct MemoryLocation {
    inner: Rc<RefCell<MemoryUrl>>,
}

impl MemoryLocation {
    pub fn new(path: &str, fragment: &str) -> Self {
        let location = Self::default();
        location.navigate(path, fragment);
        location
    }

    /// Simulate a navigation (for example a link click or reload).
    pub fn navigate(&self, path: &str, fragment: &str) {
        let mut url = self.inner.borrow_mut();
        url.path = path.to_owned();
        url.fragment = fragment.strip_prefix('#').unwrap_or(fragment).to_owned();
    }

    /// Paths passed to `replace`, in order.
    pub fn replacements(&self) -> Vec<String> {
        self.inner.borrow().replacements.clone()
    }
}

impl Location for MemoryLocation {
    fn path(&self) -> String {
        self.inner.borrow().path.clone()
    }

    fn fragment(&self) -> String {
        self.inner.borrow().fragment.clone()
    }

    fn replace(&self, path: &str) {
        let mut url = self.inner.borrow_mut();
        url.path = path.to_owned();
        url.fragment.clear();
        url.replacements.push(path.to_owned());
    }
}
