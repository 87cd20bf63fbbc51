use crate::form::Form;
use crate::model::{Item, Priority, SortOrder};
use crate::persist::{ITEMS_KEY, KvStore, StoreError};
use chrono::Utc;

pub const PAGE_SIZE: usize = 10;

/// The single active filter/sort mode of the list view. Priority and name
/// search are filters (name search also sorts); date is a sort over the
/// whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterMode {
    Priority(Priority),
    NameSearch(String),
    DateSort(SortOrder),
}

/// One page of the derived view, plus the totals the caller needs to render
/// pagination controls.
#[derive(Debug)]
pub struct Page<'a> {
    pub items: Vec<&'a Item>,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Owns the item collection and is its sole mutator. Every mutation writes
/// the full collection snapshot back to the injected store before returning.
#[derive(Debug)]
pub struct ItemList<S> {
    items: Vec<Item>,
    store: S,
}

impl<S: KvStore> ItemList<S> {
    /// Hydrate from the `"items"` key; an absent key is an empty collection.
    pub fn load(store: S) -> Result<Self, StoreError> {
        let items = match store.load(ITEMS_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };
        Ok(Self { items, store })
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    // Highest live id + 1, so a fresh id can never collide with a live one
    // even after deletions.
    fn next_id(&self) -> u64 {
        self.items.iter().map(|i| i.id).max().unwrap_or(0) + 1
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.items)?;
        self.store.save(ITEMS_KEY, &json)
    }

    /// Append a new item from the form. Returns the assigned id, or `None`
    /// when validation fails (nothing is mutated and the form keeps its
    /// fields so the user can correct them).
    pub fn add(&mut self, form: &mut Form) -> Result<Option<u64>, StoreError> {
        if !form.validate() {
            return Ok(None);
        }
        let id = self.next_id();
        self.items.push(Item {
            id,
            name: form.name.clone(),
            description: form.description.clone(),
            priority: form.priority,
            created_at: Utc::now(),
            modified_at: None,
        });
        self.persist()?;
        form.reset();
        Ok(Some(id))
    }

    /// Replace name/description/priority of the form's edit target and stamp
    /// `modified_at`. Returns false without mutating when validation fails or
    /// the target is absent or stale; `id`, `created_at`, position, and all
    /// other items are never touched.
    pub fn update(&mut self, form: &mut Form) -> Result<bool, StoreError> {
        // Validate first so the flag reflects this submission even when the
        // target turns out to be stale.
        if !form.validate() {
            return Ok(false);
        }
        let Some(id) = form.edit_target else {
            return Ok(false);
        };
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            log::debug!("update target {id} no longer exists");
            return Ok(false);
        };
        item.name = form.name.clone();
        item.description = form.description.clone();
        item.priority = form.priority;
        item.modified_at = Some(Utc::now());
        self.persist()?;
        form.reset();
        Ok(true)
    }

    /// Remove the item with the given id. An absent id is a silent no-op,
    /// not an error; the snapshot is persisted either way.
    pub fn delete(&mut self, id: u64) -> Result<bool, StoreError> {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        let removed = self.items.len() != before;
        self.persist()?;
        Ok(removed)
    }

    /// Pre-populate the form from the item with the given id. Returns false
    /// (form untouched) when the id is unknown.
    pub fn start_edit(&self, id: u64, form: &mut Form) -> bool {
        match self.get(id) {
            Some(item) => {
                form.begin_edit(item);
                true
            }
            None => false,
        }
    }

    /// Derived view: filter, then sort, then paginate. Pure — the stored
    /// collection order is never touched. The page argument is trusted as
    /// given (clamping belongs to the caller's navigation); out-of-range
    /// pages yield an empty slice.
    pub fn view(&self, filter: Option<&FilterMode>, page: usize) -> Page<'_> {
        let mut rows: Vec<&Item> = match filter {
            Some(FilterMode::Priority(p)) => {
                self.items.iter().filter(|i| i.priority == *p).collect()
            }
            Some(FilterMode::NameSearch(text)) => {
                let needle = text.to_lowercase();
                self.items
                    .iter()
                    .filter(|i| i.name.to_lowercase().contains(&needle))
                    .collect()
            }
            Some(FilterMode::DateSort(_)) | None => self.items.iter().collect(),
        };

        match filter {
            Some(FilterMode::NameSearch(_)) => {
                rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            }
            // Stable sort: equal timestamps keep their original relative
            // order under both directions.
            Some(FilterMode::DateSort(SortOrder::Asc)) => {
                rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            }
            Some(FilterMode::DateSort(SortOrder::Desc)) => {
                rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            _ => {}
        }

        let total_items = rows.len();
        let total_pages = total_items.div_ceil(PAGE_SIZE).max(1);
        let start = page.saturating_sub(1) * PAGE_SIZE;
        let items = if start >= total_items {
            Vec::new()
        } else {
            rows[start..(start + PAGE_SIZE).min(total_items)].to_vec()
        };
        Page {
            items,
            total_pages,
            total_items,
        }
    }
}
