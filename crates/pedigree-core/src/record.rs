//! The family record input contract.
//!
//! A [`FamilyRecord`] is the plain nested shape that both the outline parser
//! and JSON documents produce: a name, ordered children, and (on the root
//! only) the list of generation names indexed by depth.

use serde::{Deserialize, Deserializer, Serialize};

/// One family member together with all of their descendants.
///
/// The order of `children` is significant: it is the left-to-right order of
/// the rendered diagram.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FamilyRecord {
    pub name: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<FamilyRecord>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub generations: Vec<String>,
}

/// Reads an explicit `null` list as an empty one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl FamilyRecord {
    /// Creates a leaf record with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            generations: Vec::new(),
        }
    }

    /// Appends a child record, returning the modified record.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pedigree_core::record::FamilyRecord;
    /// let root = FamilyRecord::new("文达")
    ///     .with_child(FamilyRecord::new("明圣"))
    ///     .with_child(FamilyRecord::new("明德"));
    /// assert_eq!(root.children.len(), 2);
    /// assert_eq!(root.count_members(), 3);
    /// ```
    pub fn with_child(mut self, child: FamilyRecord) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the generation names, returning the modified record.
    pub fn with_generations<I, S>(mut self, generations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generations = generations.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if this record has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Counts this record and all of its descendants.
    pub fn count_members(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(record) = stack.pop() {
            count += 1;
            stack.extend(record.children.iter());
        }
        count
    }

    /// Returns the number of generations (levels) below and including this record.
    ///
    /// A lone record counts as one generation.
    pub fn generation_count(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((record, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(record.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }
}
