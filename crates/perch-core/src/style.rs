#![forbid(unsafe_code)]

//! CSS-like style declarations with cascading merge.
//!
//! [`StyleDecls`] is the unit the host merges onto a node: an ordered list of
//! `property: value` pairs. Merging follows CSS cascade order, so a later
//! declaration of the same property replaces the earlier value while keeping
//! its original position.

use std::fmt;

/// An ordered set of style declarations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleDecls {
    decls: Vec<(String, String)>,
}

impl StyleDecls {
    /// Create an empty declaration set.
    pub const fn new() -> Self {
        Self { decls: Vec::new() }
    }

    /// Builder form of [`StyleDecls::set`].
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Set a property, replacing an existing value in place.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.decls.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.decls.push((property, value)),
        }
    }

    /// Look up a property value.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.decls
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a property, returning its previous value.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let idx = self.decls.iter().position(|(p, _)| p == property)?;
        Some(self.decls.remove(idx).1)
    }

    /// Cascade `other` on top of `self`.
    pub fn merge(&mut self, other: &StyleDecls) {
        for (p, v) in &other.decls {
            self.set(p.clone(), v.clone());
        }
    }

    /// Return a new set with `other` cascaded on top of `self`.
    #[must_use]
    pub fn merged(&self, other: &StyleDecls) -> Self {
        let mut out = self.clone();
        out.merge(other);
        out
    }

    /// Iterate declarations in cascade order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.decls.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Whether no declarations are present.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

impl fmt::Display for StyleDecls {
    /// Formats as an inline style attribute: `a: 1; b: 2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (p, v)) in self.decls.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{p}: {v}")?;
        }
        Ok(())
    }
}

impl<P: Into<String>, V: Into<String>> FromIterator<(P, V)> for StyleDecls {
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (p, v) in iter {
            out.set(p, v);
        }
        out
    }
}

/// Format a pixel length the way inline styles expect it (`220px`).
pub fn px(value: f64) -> String {
    format!("{value}px")
}
