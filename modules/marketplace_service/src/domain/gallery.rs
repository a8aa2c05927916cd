//! Keyboard navigation for an image gallery lightbox
//!
//! The navigator only listens for keys while open. The listener is a guard
//! taken from a [`ListenerRegistry`] and released on close or drop.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Navigation keys the gallery reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Previous,
    Next,
    Escape,
}

impl Key {
    /// Map a DOM key name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::Previous),
            "ArrowRight" => Some(Key::Next),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Tracks attached keyboard listeners
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    active: Arc<AtomicUsize>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self) -> ListenerGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        ListenerGuard {
            active: self.active.clone(),
        }
    }

    /// Number of listeners currently attached
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// Detaches its listener when dropped
#[derive(Debug)]
pub struct ListenerGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct GalleryNavigator {
    len: usize,
    selected_index: Option<usize>,
    listener: Option<ListenerGuard>,
    registry: ListenerRegistry,
}

impl GalleryNavigator {
    pub fn new(len: usize, registry: ListenerRegistry) -> Self {
        Self {
            len,
            selected_index: None,
            listener: None,
            registry,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn is_open(&self) -> bool {
        self.listener.is_some()
    }

    /// Open at `index`, clamped to the last image. An empty gallery stays closed.
    pub fn open(&mut self, index: usize) {
        if self.len == 0 {
            return;
        }
        self.selected_index = Some(index.min(self.len - 1));
        if self.listener.is_none() {
            self.listener = Some(self.registry.attach());
        }
    }

    pub fn close(&mut self) {
        self.selected_index = None;
        self.listener = None;
    }

    /// Apply a key press. Ignored while closed.
    pub fn handle_key(&mut self, key: Key) {
        let Some(current) = self.selected_index.filter(|_| self.is_open()) else {
            return;
        };
        match key {
            Key::Previous => self.selected_index = Some(current.saturating_sub(1)),
            Key::Next => self.selected_index = Some((current + 1).min(self.len - 1)),
            Key::Escape => self.close(),
        }
    }
}
