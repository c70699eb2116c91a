//! In-memory filtering and page windowing of an item snapshot.

use serde::{Deserialize, Serialize};

use crate::{Item, ItemStatus};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Constraints combined with logical AND. `None` (or an empty string) means
/// no constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFilter {
    /// Case-insensitive substring of the item name.
    pub search: Option<String>,
    pub group: Option<String>,
    pub status: Option<ItemStatus>,
    pub category: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ItemFilter {
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(search) = active(&self.search)
            && !item.name.to_lowercase().contains(&search.to_lowercase())
        {
            return false;
        }
        if let Some(group) = active(&self.group)
            && item.group_name.as_deref() != Some(group)
        {
            return false;
        }
        if let Some(status) = self.status
            && item.status() != status
        {
            return false;
        }
        if let Some(category) = active(&self.category)
            && item.category.as_deref() != Some(category)
        {
            return false;
        }
        true
    }
}

/// Keep the items matching `filter`, preserving order.
pub fn filter_items<'a, I>(items: I, filter: &ItemFilter) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items.into_iter().filter(|item| filter.matches(item)).collect()
}

/// One window of a sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice `[(page - 1) * page_size, page * page_size)` out of `items`.
///
/// `page_size` is clamped to at least 1. Pages outside `1..=total_pages`
/// yield an empty window instead of an error.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let window = if page == 0 || page > total_pages {
        Vec::new()
    } else {
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(total_items);
        items[start..end].to_vec()
    };

    Page {
        items: window,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Immutable view state of the item list: filter plus page position.
///
/// Every change to the filter produces a new query positioned on page 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuery {
    filter: ItemFilter,
    page: usize,
    page_size: usize,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            filter: ItemFilter::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ItemQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &ItemFilter {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn with_filter(self, filter: ItemFilter) -> Self {
        Self {
            filter,
            page: 1,
            ..self
        }
    }

    #[must_use]
    pub fn with_search(self, search: Option<String>) -> Self {
        let filter = ItemFilter {
            search,
            ..self.filter.clone()
        };
        self.with_filter(filter)
    }

    #[must_use]
    pub fn with_group(self, group: Option<String>) -> Self {
        let filter = ItemFilter {
            group,
            ..self.filter.clone()
        };
        self.with_filter(filter)
    }

    #[must_use]
    pub fn with_status(self, status: Option<ItemStatus>) -> Self {
        let filter = ItemFilter {
            status,
            ..self.filter.clone()
        };
        self.with_filter(filter)
    }

    #[must_use]
    pub fn with_category(self, category: Option<String>) -> Self {
        let filter = ItemFilter {
            category,
            ..self.filter.clone()
        };
        self.with_filter(filter)
    }

    #[must_use]
    pub fn with_page(self, page: usize) -> Self {
        Self { page, ..self }
    }

    #[must_use]
    pub fn with_page_size(self, page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            ..self
        }
    }

    /// Filter `items` and cut the current page.
    pub fn apply<'a>(&self, items: &'a [Item]) -> Page<&'a Item> {
        let filtered = filter_items(items, &self.filter);
        paginate(&filtered, self.page, self.page_size)
    }
}
