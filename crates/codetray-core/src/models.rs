use serde::{Deserialize, Serialize};
use std::fmt;

/// A labeled text fragment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub label: String,
    pub body: String,
}

impl Snippet {
    pub fn new(label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Html,
    Js,
    Css,
    Custom,
}

impl Category {
    /// Categories in tab order.
    pub const ALL: [Category; 4] = [Category::Html, Category::Js, Category::Css, Category::Custom];

    pub fn title(self) -> &'static str {
        match self {
            Category::Html => "HTML",
            Category::Js => "JS",
            Category::Css => "CSS",
            Category::Custom => "Custom",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
