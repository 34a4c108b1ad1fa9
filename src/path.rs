//! Route paths: literal and id-parameter segments, rendered in axum syntax.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// An ordered, immutable list of segments. Appending returns a new path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoutePath {
    segments: Vec<Segment>,
}

impl RoutePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_literals<S: AsRef<str>>(parts: &[S]) -> Self {
        let segments = parts
            .iter()
            .map(|p| p.as_ref().trim_matches('/'))
            .filter(|p| !p.is_empty())
            .map(|p| Segment::Literal(p.to_string()))
            .collect();
        RoutePath { segments }
    }

    pub fn literal(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Literal(name.to_string()));
        RoutePath { segments }
    }

    pub fn param(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Param(name.to_string()));
        RoutePath { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(p) => Some(p.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params().any(|p| p == name)
    }

    /// `/planet/:planetID`; the empty path renders as `/`.
    pub fn render(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for s in &self.segments {
            out.push('/');
            match s {
                Segment::Literal(l) => out.push_str(l),
                Segment::Param(p) => {
                    out.push(':');
                    out.push_str(p);
                }
            }
        }
        out
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Collection path and id path for one resource under a base path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePaths {
    pub path: RoutePath,
    pub id_path: RoutePath,
    /// Parameter name actually used in `id_path`.
    pub id_param: String,
}

pub struct PathBuilder;

impl PathBuilder {
    /// `base + segment` and `base + segment + :id_param`.
    ///
    /// A param name already bound in `base` (e.g. a model nested under itself) gets a
    /// numeric suffix so every parameter in a path stays distinct.
    pub fn build(base: &RoutePath, segment: &str, id_param: &str) -> ResourcePaths {
        let path = base.literal(segment);
        let id_param = unique_param(base, id_param);
        let id_path = path.param(&id_param);
        ResourcePaths { path, id_path, id_param }
    }
}

fn unique_param(base: &RoutePath, wanted: &str) -> String {
    if !base.has_param(wanted) {
        return wanted.to_string();
    }
    (2..)
        .map(|n| format!("{}{}", wanted, n))
        .find(|candidate| !base.has_param(candidate))
        .unwrap_or_else(|| wanted.to_string())
}
