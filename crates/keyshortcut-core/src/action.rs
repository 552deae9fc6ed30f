// Keyshortcut Actions
// Callables bound to shortcuts, carrying an optional display name for diagnostics

use std::fmt;
use std::sync::Arc;

use crate::KeyEvent;

type ActionFn = dyn Fn(&KeyEvent) + Send + Sync;

/// A callable invoked with the triggering key event.
///
/// Cloning is cheap: clones share the same callable. The display name is
/// only used for diagnostic labels.
#[derive(Clone)]
pub struct ShortcutAction {
    callback: Arc<ActionFn>,
    name: Option<String>,
}

impl ShortcutAction {
    /// Wrap a callable.
    ///
    /// When `callback` is a named function item its name becomes the
    /// display name. Closures have no name.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&KeyEvent) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
            name: callable_name(std::any::type_name::<F>()),
        }
    }

    /// Wrap a callable with an explicit display name
    pub fn named<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&KeyEvent) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
            name: Some(name.into()),
        }
    }

    /// Wrap a callable without any display name
    pub fn anonymous<F>(callback: F) -> Self
    where
        F: Fn(&KeyEvent) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
            name: None,
        }
    }

    /// Replace the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The display name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Invoke the callable
    pub fn call(&self, event: &KeyEvent) {
        (self.callback)(event)
    }

    /// True when both actions share the same callable
    pub fn ptr_eq(&self, other: &ShortcutAction) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutAction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Smart pointers whose callable is named by their type argument
const POINTER_WRAPPERS: &[&str] = &["alloc::boxed::Box<"];

/// Derive a display name from a callable's type name.
///
/// Function items render as their path (`my_app::keys::save_file`) and
/// yield their last segment. References and boxes are looked through.
/// Closures, fn pointers and trait objects yield `None`.
fn callable_name(type_name: &str) -> Option<String> {
    let mut path = type_name.trim();
    loop {
        let current = path.trim_start_matches('&');
        path = current;
        let inner = POINTER_WRAPPERS
            .iter()
            .find_map(|wrapper| current.strip_prefix(wrapper)?.strip_suffix('>'));
        match inner {
            Some(inner) => path = inner.trim(),
            None => break,
        }
    }
    if path.starts_with("fn(") || path.starts_with("dyn ") || path.contains("{{closure}}") {
        return None;
    }
    let path = path.split('<').next().unwrap_or(path);
    let last = path.rsplit("::").next().unwrap_or(path);
    if last.is_empty() || last.starts_with('{') {
        return None;
    }
    Some(last.to_string())
}
