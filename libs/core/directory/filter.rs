use std::{convert::Infallible, fmt, str::FromStr};

use crate::entities::BusinessRecord;

pub const ALL_CATEGORIES: &str = "All";

/// Category selection of the directory, `All` disables the category filter
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    All,
    Named(String),
}

impl Category {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            ALL_CATEGORIES => Self::All,
            name => Self::Named(name.to_string()),
        })
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value {
            ALL_CATEGORIES => Self::All,
            name => Self::Named(name.to_string()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Case-insensitive substring match on the name plus exact category match.
pub fn is_visible(record: &BusinessRecord, search_text: &str, category: &Category) -> bool {
    let name_matches = search_text.is_empty()
        || record
            .name
            .to_lowercase()
            .contains(&search_text.to_lowercase());

    name_matches && category.matches(&record.category)
}

pub fn visible_subset(
    full_set: &[BusinessRecord],
    search_text: &str,
    category: &Category,
) -> Vec<BusinessRecord> {
    full_set
        .iter()
        .filter(|record| is_visible(record, search_text, category))
        .cloned()
        .collect()
}

/// Distinct categories in first-seen order, preceded by `All`
pub fn available_categories(full_set: &[BusinessRecord]) -> Vec<Category> {
    let mut categories = vec![Category::All];
    for record in full_set {
        let category = Category::Named(record.category.clone());
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    categories
}

#[derive(Clone, Debug, PartialEq)]
pub enum FilterAction {
    LoadStarted,
    Loaded(Vec<BusinessRecord>),
    /// The fetch failed, the directory shows nothing
    LoadFailed,
    SetSearch(String),
    SetCategory(Category),
    /// Clear search and category, keep the loaded records
    Reset,
}

/// State of a directory screen. Only `reduce` produces new states and every
/// transition recomputes the visible set from scratch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    full_set: Vec<BusinessRecord>,
    visible_set: Vec<BusinessRecord>,
    search_text: String,
    active_category: Category,
    loading: bool,
}

impl FilterState {
    pub fn full_set(&self) -> &[BusinessRecord] {
        &self.full_set
    }

    pub fn visible_set(&self) -> &[BusinessRecord] {
        &self.visible_set
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn active_category(&self) -> &Category {
        &self.active_category
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn reduce(self, action: FilterAction) -> Self {
        let next = match action {
            FilterAction::LoadStarted => Self {
                loading: true,
                ..self
            },
            FilterAction::Loaded(full_set) => Self {
                full_set,
                loading: false,
                ..self
            },
            FilterAction::LoadFailed => Self {
                full_set: Vec::new(),
                loading: false,
                ..self
            },
            FilterAction::SetSearch(search_text) => Self {
                search_text,
                ..self
            },
            FilterAction::SetCategory(active_category) => Self {
                active_category,
                ..self
            },
            FilterAction::Reset => Self {
                search_text: String::new(),
                active_category: Category::All,
                ..self
            },
        };

        next.recompute()
    }

    fn recompute(self) -> Self {
        let visible_set = visible_subset(&self.full_set, &self.search_text, &self.active_category);
        Self {
            visible_set,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, category: &str) -> BusinessRecord {
        BusinessRecord::builder()
            .id(id)
            .name(name)
            .category(category)
            .owner_id("owner")
            .build()
    }

    fn full_set() -> Vec<BusinessRecord> {
        vec![
            record("1", "Joe's Cafe", "Food & Drink"),
            record("2", "QuickFix", "Services"),
        ]
    }

    fn loaded() -> FilterState {
        FilterState::default()
            .reduce(FilterAction::LoadStarted)
            .reduce(FilterAction::Loaded(full_set()))
    }

    fn ids(records: &[BusinessRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn no_filter_shows_everything_in_order() {
        let state = loaded();
        assert_eq!(ids(state.visible_set()), vec!["1", "2"]);
        assert_eq!(state.active_category(), &Category::All);
        assert!(!state.is_loading());
    }

    #[test]
    fn search_is_case_insensitive() {
        let state = loaded().reduce(FilterAction::SetSearch("joe".into()));
        assert_eq!(ids(state.visible_set()), vec!["1"]);

        let state = state.reduce(FilterAction::SetSearch("FIX".into()));
        assert_eq!(ids(state.visible_set()), vec!["2"]);
    }

    #[test]
    fn category_filter() {
        let state = loaded().reduce(FilterAction::SetCategory("Services".into()));
        assert_eq!(ids(state.visible_set()), vec!["2"]);

        let state = state.reduce(FilterAction::SetCategory(Category::Named("Retail".into())));
        assert!(state.visible_set().is_empty());
        assert_eq!(state.full_set().len(), 2);
    }

    #[test]
    fn search_and_category_combine() {
        let state = loaded()
            .reduce(FilterAction::SetCategory("Food & Drink".into()))
            .reduce(FilterAction::SetSearch("quick".into()));
        assert!(state.visible_set().is_empty());

        let state = state.reduce(FilterAction::Reset);
        assert_eq!(ids(state.visible_set()), vec!["1", "2"]);
    }

    #[test]
    fn filters_apply_to_later_loads() {
        let state = FilterState::default()
            .reduce(FilterAction::SetSearch("cafe".into()))
            .reduce(FilterAction::LoadStarted);
        assert!(state.is_loading());
        assert!(state.visible_set().is_empty());

        let state = state.reduce(FilterAction::Loaded(full_set()));
        assert_eq!(ids(state.visible_set()), vec!["1"]);
    }

    #[test]
    fn failed_load_is_empty_and_not_loading() {
        let state = loaded()
            .reduce(FilterAction::LoadStarted)
            .reduce(FilterAction::LoadFailed);

        assert!(state.full_set().is_empty());
        assert!(state.visible_set().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn empty_full_set() {
        let state = FilterState::default()
            .reduce(FilterAction::Loaded(Vec::new()))
            .reduce(FilterAction::SetSearch("x".into()));
        assert!(state.visible_set().is_empty());
    }

    #[test]
    fn filtering_is_pure_and_idempotent() {
        let full_set = full_set();
        let searches = ["", "joe", "o", "zzz"];
        let categories = [
            Category::All,
            Category::from("Services"),
            Category::from("Food & Drink"),
        ];

        for search in searches {
            for category in &categories {
                let once = visible_subset(&full_set, search, category);
                let twice = visible_subset(&full_set, search, category);
                assert_eq!(once, twice);
                assert_eq!(visible_subset(&once, search, category), once);

                let state = FilterState::default()
                    .reduce(FilterAction::Loaded(full_set.clone()))
                    .reduce(FilterAction::SetSearch(search.to_string()))
                    .reduce(FilterAction::SetCategory(category.clone()));
                assert_eq!(state.visible_set(), once.as_slice());
                assert_eq!(
                    state.clone().reduce(FilterAction::SetSearch(search.to_string())),
                    state
                );
            }
        }
    }

    #[test]
    fn unknown_categories_pass_with_all() {
        let records = vec![record("9", "Odd", "Something New")];
        assert_eq!(visible_subset(&records, "", &Category::All).len(), 1);
    }

    #[test]
    fn categories_for_picker() {
        let mut records = full_set();
        records.push(record("3", "Bean There", "Food & Drink"));

        assert_eq!(
            available_categories(&records),
            vec![
                Category::All,
                Category::from("Food & Drink"),
                Category::from("Services")
            ]
        );
        assert_eq!("All".parse::<Category>().unwrap(), Category::All);
        assert_eq!(Category::from("Services").to_string(), "Services");
    }
}
