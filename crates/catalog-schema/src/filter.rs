use crate::Item;

/// Client-side narrowing of the upstream item list.
///
/// Every filter that is set must match. A set filter never matches an item that lacks
/// the field it looks at.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemFilter {
    /// Matches when the item id, written in decimal, contains this id.
    pub id: Option<i32>,
    /// Case-insensitive substring of the item name.
    pub name: Option<String>,
    /// Case-insensitive substring of the location state.
    pub state: Option<String>,
}

impl ItemFilter {
    pub fn matches(&self, item: &Item) -> bool {
        self.matches_id(item) && self.matches_name(item) && self.matches_state(item)
    }

    fn matches_id(&self, item: &Item) -> bool {
        let Some(id) = self.id else {
            return true;
        };

        item.item_id
            .is_some_and(|item_id| item_id.to_string().contains(&id.to_string()))
    }

    fn matches_name(&self, item: &Item) -> bool {
        let Some(name) = &self.name else {
            return true;
        };

        item.item_name.as_deref().is_some_and(|item_name| contains_ignore_case(item_name, name))
    }

    fn matches_state(&self, item: &Item) -> bool {
        let Some(state) = &self.state else {
            return true;
        };

        item_state(item).is_some_and(|item_state| contains_ignore_case(item_state, state))
    }

    /// Keeps the matching entries. A null entry counts as an item without fields, so only
    /// an empty filter keeps it.
    pub fn apply(&self, items: Vec<Option<Item>>) -> Vec<Option<Item>> {
        let missing = Item::default();

        items
            .into_iter()
            .filter(|item| self.matches(item.as_ref().unwrap_or(&missing)))
            .collect()
    }
}

/// The distinct location states of `items`, in order of first appearance.
pub fn distinct_states<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<String> {
    let mut states: Vec<String> = Vec::new();

    for state in items.into_iter().filter_map(item_state) {
        if !states.iter().any(|seen| seen == state) {
            states.push(state.to_string());
        }
    }

    states
}

fn item_state(item: &Item) -> Option<&str> {
    item.location.as_ref()?.state.as_deref()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
