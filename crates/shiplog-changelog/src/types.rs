//! Categorized change model

use serde::{Deserialize, Serialize};
use shiplog_core::{Category, RawChange};

use crate::normalize::{capitalize, stripped_title};

/// A raw change annotated with its category and display title.
///
/// Created in one pass from [`RawChange`]; after creation only the
/// refinement pass may touch it, and only to move an `Other` entry into a
/// more specific category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizedChange {
    /// The underlying change record
    pub change: RawChange,
    /// Assigned category (exactly one; defaults to `Other`)
    pub category: Category,
    /// Display title: prefix-stripped, capitalized, PR reference removed
    pub clean_title: String,
}

impl CategorizedChange {
    /// Annotate a raw change with a category and derive its display title.
    ///
    /// Fix entries keep a leading "Fix" so the line reads as a verb phrase
    /// ("Fix null pointer on empty cart"); other conventional prefixes are
    /// stripped outright.
    pub fn new(change: RawChange, category: Category) -> Self {
        let stripped = stripped_title(&change.title);
        let clean_title = if category == Category::Fixes
            && !stripped.to_lowercase().starts_with("fix")
        {
            format!("Fix {}", stripped)
        } else {
            capitalize(&stripped)
        };
        Self {
            change,
            category,
            clean_title,
        }
    }
}
