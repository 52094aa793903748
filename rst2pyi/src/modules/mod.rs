//! Per-module generators, run in a fixed order.
//!
//! Each generator opens its module, walks the page declaration by declaration and ends with
//! `write`. The literal marker strings are copied from the upstream pages; when a page
//! changes, the generator fails and has to be updated to match.

pub mod array;
pub mod btree;
pub mod collections;
pub mod errno;
pub mod framebuf;
pub mod gc;
pub mod heapq;
pub mod network;
pub mod uctypes;

use crate::error::Result;
use crate::parser::Rst2Pyi;

pub type Generator = fn(&mut Rst2Pyi) -> Result<()>;

/// Every generator, in run order.
pub const GENERATORS: &[(&str, Generator)] = &[
    ("array", array::generate),
    ("btree", btree::generate),
    ("collections", collections::generate),
    ("errno", errno::generate),
    ("framebuf", framebuf::generate),
    ("gc", gc::generate),
    ("heapq", heapq::generate),
    ("network", network::generate),
    ("uctypes", uctypes::generate),
];

pub fn find(name: &str) -> Option<Generator> {
    GENERATORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, generator)| *generator)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    GENERATORS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use tempfile::TempDir;

    macro_rules! page {
        ($file:literal) => {
            ($file, include_str!(concat!("../../tests/fixtures/", $file)))
        };
    }

    const PAGES: &[(&str, &str)] = &[
        page!("array.rst"),
        page!("btree.rst"),
        page!("collections.rst"),
        page!("errno.rst"),
        page!("framebuf.rst"),
        page!("gc.rst"),
        page!("heapq.rst"),
        page!("network.rst"),
        page!("network.WLAN.rst"),
        page!("network.WLANWiPy.rst"),
        page!("network.CC3K.rst"),
        page!("network.WIZNET5K.rst"),
        page!("uctypes.rst"),
    ];

    #[test]
    fn every_generator_consumes_its_page() {
        let dir = TempDir::new().unwrap();
        let mut fetcher = MemoryFetcher::new();
        for (file, body) in PAGES {
            fetcher.insert(format!("mem://docs/{}", file), *body);
        }
        let mut shed = Rst2Pyi::new(dir.path())
            .with_base_url("mem://docs")
            .with_fetcher(Box::new(fetcher));

        for (name, generate) in GENERATORS {
            generate(&mut shed).unwrap();
            assert!(dir.path().join(format!("{}.pyi", name)).is_file());
        }
        assert_eq!(shed.name(), None);
        assert!(shed.cursor().is_empty());
    }

    #[test]
    fn registry_is_unique_and_searchable() {
        let all: Vec<&str> = names().collect();
        let mut unique = all.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), all.len());
        assert!(find("gc").is_some());
        assert!(find("machine").is_none());
    }
}
