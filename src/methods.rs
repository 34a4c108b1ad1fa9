//! Operation kinds per relation, their HTTP verbs and path shapes, and active-set selection.

use axum::routing::MethodFilter;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Put => MethodFilter::PUT,
            Verb::Delete => MethodFilter::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        })
    }
}

/// Which of a controller's two paths a route binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Collection,
    Item,
}

pub trait MethodKind: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every kind, in registration order.
    const ALL: &'static [Self];
    /// Active set when the caller selects nothing.
    const DEFAULT: &'static [Self];

    fn verb(self) -> Verb;

    fn shape(self) -> Shape;
}

/// Operations on a plain resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseMethod {
    Read,
    ReadAll,
    Create,
    Update,
    Delete,
}

/// Operations on a to-many owned relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChildrenMethod {
    Read,
    ReadAll,
    Create,
    Update,
    Delete,
}

/// Operations on a to-many relation through a pivot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SiblingsMethod {
    Read,
    ReadAll,
    Create,
    Update,
    Delete,
}

/// Operations on a to-one relation. Create and delete do not apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParentMethod {
    Read,
    Update,
}

// Read, ReadAll, Create, Update, Delete share verb and shape across the to-many kinds.
const fn crud_route(index: u8) -> (Verb, Shape) {
    match index {
        0 => (Verb::Get, Shape::Item),
        1 => (Verb::Get, Shape::Collection),
        2 => (Verb::Post, Shape::Collection),
        3 => (Verb::Put, Shape::Item),
        _ => (Verb::Delete, Shape::Item),
    }
}

impl MethodKind for BaseMethod {
    const ALL: &'static [Self] = &[
        BaseMethod::Read,
        BaseMethod::ReadAll,
        BaseMethod::Create,
        BaseMethod::Update,
        BaseMethod::Delete,
    ];
    const DEFAULT: &'static [Self] = Self::ALL;

    fn verb(self) -> Verb {
        crud_route(self as u8).0
    }

    fn shape(self) -> Shape {
        crud_route(self as u8).1
    }
}

impl MethodKind for ChildrenMethod {
    const ALL: &'static [Self] = &[
        ChildrenMethod::Read,
        ChildrenMethod::ReadAll,
        ChildrenMethod::Create,
        ChildrenMethod::Update,
        ChildrenMethod::Delete,
    ];
    const DEFAULT: &'static [Self] = Self::ALL;

    fn verb(self) -> Verb {
        crud_route(self as u8).0
    }

    fn shape(self) -> Shape {
        crud_route(self as u8).1
    }
}

impl MethodKind for SiblingsMethod {
    const ALL: &'static [Self] = &[
        SiblingsMethod::Read,
        SiblingsMethod::ReadAll,
        SiblingsMethod::Create,
        SiblingsMethod::Update,
        SiblingsMethod::Delete,
    ];
    const DEFAULT: &'static [Self] = Self::ALL;

    fn verb(self) -> Verb {
        crud_route(self as u8).0
    }

    fn shape(self) -> Shape {
        crud_route(self as u8).1
    }
}

impl MethodKind for ParentMethod {
    const ALL: &'static [Self] = &[ParentMethod::Read, ParentMethod::Update];
    const DEFAULT: &'static [Self] = Self::ALL;

    fn verb(self) -> Verb {
        match self {
            ParentMethod::Read => Verb::Get,
            ParentMethod::Update => Verb::Put,
        }
    }

    /// The parent is reached without an id of its own.
    fn shape(self) -> Shape {
        Shape::Collection
    }
}

/// Caller's choice of active methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Methods<K> {
    /// The relation's default set.
    All,
    /// Only these.
    Only(Vec<K>),
    /// The default set minus these.
    Except(Vec<K>),
}

impl<K> Default for Methods<K> {
    fn default() -> Self {
        Methods::All
    }
}

impl<K: MethodKind> Methods<K> {
    pub fn only(kinds: impl IntoIterator<Item = K>) -> Self {
        Methods::Only(kinds.into_iter().collect())
    }

    pub fn except(kinds: impl IntoIterator<Item = K>) -> Self {
        Methods::Except(kinds.into_iter().collect())
    }

    /// Active set in registration order, each kind at most once.
    pub fn resolve(&self) -> Vec<K> {
        match self {
            Methods::All => K::DEFAULT.to_vec(),
            Methods::Only(kinds) => K::ALL.iter().copied().filter(|k| kinds.contains(k)).collect(),
            Methods::Except(kinds) => K::DEFAULT
                .iter()
                .copied()
                .filter(|k| !kinds.contains(k))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_is_the_full_set() {
        assert_eq!(Methods::<BaseMethod>::default().resolve().len(), 5);
        assert_eq!(
            Methods::<ParentMethod>::All.resolve(),
            vec![ParentMethod::Read, ParentMethod::Update]
        );
    }

    #[test]
    fn only_dedupes_and_keeps_registration_order() {
        let picked = Methods::only([BaseMethod::Delete, BaseMethod::Create, BaseMethod::Delete]).resolve();
        assert_eq!(picked, vec![BaseMethod::Create, BaseMethod::Delete]);
    }

    #[test]
    fn except_removes_from_default() {
        let picked = Methods::except([ChildrenMethod::Delete]).resolve();
        assert_eq!(picked.len(), 4);
        assert!(!picked.contains(&ChildrenMethod::Delete));
    }

    #[test]
    fn verbs_and_shapes() {
        assert_eq!(BaseMethod::ReadAll.verb(), Verb::Get);
        assert_eq!(BaseMethod::ReadAll.shape(), Shape::Collection);
        assert_eq!(SiblingsMethod::Create.verb(), Verb::Post);
        assert_eq!(ChildrenMethod::Update.verb(), Verb::Put);
        assert_eq!(ChildrenMethod::Delete.shape(), Shape::Item);
        assert_eq!(ParentMethod::Update.verb(), Verb::Put);
        assert_eq!(ParentMethod::Update.shape(), Shape::Collection);
    }
}
