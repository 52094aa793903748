//! Loading `.rst` pages by URL.
//!
//! The engine only ever asks for a page body as text. [`DefaultFetcher`] handles the real
//! upstream (HTTP) as well as local checkouts of the documentation (`file://` URLs or plain
//! paths); [`MemoryFetcher`] serves pages from memory.

use crate::error::{ParseError, Result};
use std::collections::HashMap;
use std::fs;

/// Source of page bodies.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP for `http(s)://`, the filesystem for everything else.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFetcher;

impl Fetch for DefaultFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        if url.starts_with("http://") || url.starts_with("https://") {
            let response = ureq::get(url).call().map_err(|e| ParseError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
            return response.into_string().map_err(|e| ParseError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            });
        }
        let path = url.strip_prefix("file://").unwrap_or(url);
        fs::read_to_string(path).map_err(|e| ParseError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Pages held in memory, keyed by full URL.
#[derive(Debug, Default, Clone)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.pages.insert(url.into(), body.into());
    }

    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(url, body);
        self
    }
}

impl Fetch for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.pages.get(url).cloned().ok_or_else(|| ParseError::Fetch {
            url: url.to_string(),
            reason: "no such page".to_string(),
        })
    }
}
