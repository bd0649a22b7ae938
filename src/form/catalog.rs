use std::fmt;
use std::sync::Arc;

use crate::domain::Scalar;

pub type ItemFormatter = Arc<dyn Fn(&Scalar) -> String + Send + Sync>;

/// Candidate pool offered by a chooser for a list control.
#[derive(Clone)]
pub struct Catalog {
    title: String,
    items: Vec<Scalar>,
    allow_duplicates: bool,
    display: Option<ItemFormatter>,
    subtitle: Option<ItemFormatter>,
}

/// One row of a chooser, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub label: String,
    pub subtitle: Option<String>,
    pub chosen: bool,
}

impl Catalog {
    pub fn new<I, S>(title: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        Self {
            title: title.into(),
            items: items.into_iter().map(Into::into).collect(),
            allow_duplicates: false,
            display: None,
            subtitle: None,
        }
    }

    pub fn with_allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    pub fn with_display<F>(mut self, format: F) -> Self
    where
        F: Fn(&Scalar) -> String + Send + Sync + 'static,
    {
        self.display = Some(Arc::new(format));
        self
    }

    pub fn with_subtitle<F>(mut self, format: F) -> Self
    where
        F: Fn(&Scalar) -> String + Send + Sync + 'static,
    {
        self.subtitle = Some(Arc::new(format));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[Scalar] {
        &self.items
    }

    pub fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    pub fn label(&self, item: &Scalar) -> String {
        match &self.display {
            Some(format) => format(item),
            None => item.to_string(),
        }
    }

    pub fn subtitle(&self, item: &Scalar) -> Option<String> {
        self.subtitle.as_ref().map(|format| format(item))
    }

    /// Whether `item` may be appended to a list currently holding `current`.
    pub fn admits(&self, current: &[Scalar], item: &Scalar) -> bool {
        self.allow_duplicates || !current.contains(item)
    }

    pub fn entries(&self, current: &[Scalar]) -> Vec<CatalogEntry> {
        self.items
            .iter()
            .map(|item| CatalogEntry {
                label: self.label(item),
                subtitle: self.subtitle(item),
                chosen: current.contains(item),
            })
            .collect()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("title", &self.title)
            .field("items", &self.items)
            .field("allow_duplicates", &self.allow_duplicates)
            .finish_non_exhaustive()
    }
}
