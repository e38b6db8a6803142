use log::debug;

use crate::catalog::Catalog;
use crate::view::element::Element;
use crate::view::render::display_works;

pub const ALL_LABEL: &str = "Tous";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSelection {
    All,
    Category(String),
}

impl FilterSelection {
    pub fn label(&self) -> &str {
        match self {
            FilterSelection::All => ALL_LABEL,
            FilterSelection::Category(name) => name,
        }
    }

    pub fn to_button(&self) -> Element {
        let button = Element::with_text("button", self.label()).attr("type", "button");
        match self {
            FilterSelection::All => button.attr("data-filter", "all"),
            FilterSelection::Category(name) => button.attr("data-filter", "category").attr("data-category", name),
        }
    }

    pub fn from_button(button: &Element) -> Option<Self> {
        match button.data("filter")? {
            "all" => Some(FilterSelection::All),
            "category" => button.data("category").map(|name| FilterSelection::Category(name.to_string())),
            _ => None,
        }
    }
}

/// Appends "Tous" then one button per category (first-seen order) and returns
/// the selections in the same order.
pub fn setup_buttons(catalog: &Catalog, filter_container: &mut Element) -> Vec<FilterSelection> {
    let selections: Vec<FilterSelection> = std::iter::once(FilterSelection::All)
        .chain(catalog.categories().into_iter().map(FilterSelection::Category))
        .collect();

    for selection in &selections {
        filter_container.append(selection.to_button());
    }
    selections
}

/// Fully re-renders `display_container` from the selected subset.
pub fn apply_filter(selection: &FilterSelection, catalog: &Catalog, display_container: &mut Element) {
    debug!("filter: {}", selection.label());
    match selection {
        FilterSelection::All => display_works(catalog.all(), display_container),
        FilterSelection::Category(name) => display_works(catalog.by_category(name), display_container),
    }
}

#[cfg(test)]
mod tests {
    use crate::view::render::tests::work;

    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.load(vec![
            work(1, "A", "Objets", 1),
            work(2, "B", "Appartements", 2),
            work(3, "C", "Objets", 1),
        ]);
        catalog
    }

    #[test]
    fn buttons_start_with_all_then_categories() {
        let mut container = Element::new("div");
        let selections = setup_buttons(&catalog(), &mut container);

        let labels: Vec<&str> = container.children.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(labels, vec!["Tous", "Objets", "Appartements"]);
        assert_eq!(selections[1], FilterSelection::Category("Objets".to_string()));
    }

    #[test]
    fn buttons_round_trip_to_selection() {
        let mut container = Element::new("div");
        let selections = setup_buttons(&catalog(), &mut container);
        for (button, selection) in container.children.iter().zip(&selections) {
            assert_eq!(FilterSelection::from_button(button).as_ref(), Some(selection));
        }
    }

    #[test]
    fn category_filter_then_all_restores_everything() {
        let catalog = catalog();
        let mut gallery = Element::new("div");

        apply_filter(&FilterSelection::Category("Objets".to_string()), &catalog, &mut gallery);
        let ids: Vec<&str> = gallery.children.iter().filter_map(|c| c.data("id")).collect();
        assert_eq!(ids, vec!["1", "3"]);

        apply_filter(&FilterSelection::All, &catalog, &mut gallery);
        assert_eq!(gallery.children.len(), 3);
    }
}
