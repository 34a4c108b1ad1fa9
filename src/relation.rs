//! Relationship descriptors: how a related set is reached from a model instance.

use crate::model::{Model, Pivot};
use std::marker::PhantomData;

/// `C` records owned by a `P`, linked by a foreign key column on `C`.
pub struct Children<P, C> {
    foreign_key: &'static str,
    _marker: PhantomData<fn() -> (P, C)>,
}

impl<P: Model, C: Model> Children<P, C> {
    pub fn new(foreign_key: &'static str) -> Self {
        Children {
            foreign_key,
            _marker: PhantomData,
        }
    }

    pub fn foreign_key(&self) -> &'static str {
        self.foreign_key
    }
}

/// The single `P` a `C` belongs to, through the foreign key column on `C`.
pub struct Parent<C, P> {
    foreign_key: &'static str,
    _marker: PhantomData<fn() -> (C, P)>,
}

impl<C: Model, P: Model> Parent<C, P> {
    pub fn new(foreign_key: &'static str) -> Self {
        Parent {
            foreign_key,
            _marker: PhantomData,
        }
    }

    pub fn foreign_key(&self) -> &'static str {
        self.foreign_key
    }
}

/// Which end of the pivot the controller's own model sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PivotSide {
    Left,
    Right,
}

/// Which sibling `DELETE .../:siblingID` removes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SiblingDelete {
    /// The first attached sibling, whatever id the path names. Kept for compatibility
    /// with existing clients; a warning is logged whenever it differs from the path id.
    #[default]
    FirstAttached,
    /// The sibling named by the path id; 404 when it is not attached.
    ById,
}

/// `S` records associated with a `B` through pivot records `T`.
pub struct Siblings<B: Model, S: Model, T> {
    side: PivotSide,
    base_key: &'static str,
    sibling_key: &'static str,
    link: fn(&B::Id, &S::Id) -> T,
    on_delete: SiblingDelete,
}

impl<B: Model, S: Model, T: Pivot> Siblings<B, S, T> {
    /// Base model is the pivot's left side.
    pub fn left() -> Self
    where
        T: Pivot<Left = B, Right = S>,
    {
        Siblings {
            side: PivotSide::Left,
            base_key: T::LEFT_KEY,
            sibling_key: T::RIGHT_KEY,
            link: |base, sibling| T::link(base, sibling),
            on_delete: SiblingDelete::default(),
        }
    }

    /// Base model is the pivot's right side.
    pub fn right() -> Self
    where
        T: Pivot<Left = S, Right = B>,
    {
        Siblings {
            side: PivotSide::Right,
            base_key: T::RIGHT_KEY,
            sibling_key: T::LEFT_KEY,
            link: |base, sibling| T::link(sibling, base),
            on_delete: SiblingDelete::default(),
        }
    }

    pub fn on_delete(mut self, policy: SiblingDelete) -> Self {
        self.on_delete = policy;
        self
    }

    pub fn side(&self) -> PivotSide {
        self.side
    }

    /// Pivot column holding the base record's id.
    pub fn base_key(&self) -> &'static str {
        self.base_key
    }

    /// Pivot column holding the sibling's id.
    pub fn sibling_key(&self) -> &'static str {
        self.sibling_key
    }

    pub fn delete_policy(&self) -> SiblingDelete {
        self.on_delete
    }

    /// Join record for `base` and `sibling`, arguments ordered for this side.
    pub fn link(&self, base: &B::Id, sibling: &S::Id) -> T {
        (self.link)(base, sibling)
    }
}
