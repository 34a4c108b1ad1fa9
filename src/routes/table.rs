//! Append-only record of every route bound by a [`CrudRouter`](super::CrudRouter).

use crate::methods::Verb;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    #[serde(rename = "method")]
    pub verb: Verb,
    pub path: String,
}

#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub(crate) fn push(&mut self, verb: Verb, path: String) {
        self.entries.push(RouteEntry { verb, path });
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, verb: Verb, path: &str) -> bool {
        self.entries.iter().any(|e| e.verb == verb && e.path == path)
    }

    /// Entries whose path starts with `prefix`.
    pub fn under<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a RouteEntry> + 'a {
        self.entries.iter().filter(move |e| e.path.starts_with(prefix))
    }
}
