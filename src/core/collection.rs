use crate::domain::model::StudentReference;
use crate::utils::error::{RefError, Result};
use crate::utils::validation::Validate;
use std::fmt;
use std::ops::Index;

/// Fields a collection can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Stipend,
}

impl SortKey {
    /// `"name"` and `"stipend"`; anything else is not a sort key.
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "name" => Some(SortKey::Name),
            "stipend" => Some(SortKey::Stipend),
            _ => None,
        }
    }
}

/// Ordered, owned set of valid references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCollection {
    items: Vec<StudentReference>,
}

impl ReferenceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `reference` after validating it. A rejected reference leaves the
    /// collection untouched.
    pub fn add(&mut self, reference: StudentReference) -> Result<()> {
        reference.validate()?;
        self.items.push(reference);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudentReference> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Result<&StudentReference> {
        self.items.get(index).ok_or(RefError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// References with a stipend strictly above `threshold`, in stored order.
    pub fn filter_by_stipend(
        &self,
        threshold: f64,
    ) -> impl Iterator<Item = &StudentReference> + '_ {
        self.items
            .iter()
            .filter(move |r| r.stipend().is_some_and(|s| s > threshold))
    }

    /// Stable in-place sort by `"name"` or `"stipend"`. Unknown fields are ignored.
    pub fn sort_by(&mut self, field: &str) {
        match SortKey::parse(field) {
            Some(key) => self.sort_by_key(key),
            None => tracing::debug!("Ignoring unknown sort field '{}'", field),
        }
    }

    pub fn sort_by_key(&mut self, key: SortKey) {
        match key {
            SortKey::Name => self.items.sort_by(|a, b| a.full_name().cmp(&b.full_name())),
            SortKey::Stipend => self.items.sort_by(|a, b| {
                let a = a.stipend().unwrap_or_default();
                let b = b.stipend().unwrap_or_default();
                a.total_cmp(&b)
            }),
        }
    }
}

impl Index<usize> for ReferenceCollection {
    type Output = StudentReference;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a ReferenceCollection {
    type Item = &'a StudentReference;
    type IntoIter = std::slice::Iter<'a, StudentReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for ReferenceCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, reference) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", reference)?;
        }
        Ok(())
    }
}
