use std::collections::HashSet;

use crate::models::work::{Category, CategoryId, Work, WorkId};

/// In-memory snapshot of the works known to the page, in server order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    works: Vec<Work>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, works: Vec<Work>) {
        self.works = works;
    }

    pub fn all(&self) -> &[Work] {
        &self.works
    }

    pub fn len(&self) -> usize {
        self.works.len()
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }

    pub fn get(&self, id: WorkId) -> Option<&Work> {
        self.works.iter().find(|work| work.id == id)
    }

    /// Distinct category names, first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.works.iter()
            .filter_map(Work::category_name)
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }

    /// Distinct categories with their ids, first-seen order.
    pub fn category_options(&self) -> Vec<Category> {
        let mut seen = HashSet::new();
        self.works.iter()
            .filter_map(|work| work.category.as_ref())
            .filter(|category| seen.insert(category.id))
            .cloned()
            .collect()
    }

    pub fn category_by_id(&self, id: CategoryId) -> Option<&Category> {
        self.works.iter()
            .filter_map(|work| work.category.as_ref())
            .find(|category| category.id == id)
    }

    pub fn by_category(&self, name: &str) -> Vec<&Work> {
        self.works.iter()
            .filter(|work| work.category_name() == Some(name))
            .collect()
    }

    pub fn append(&mut self, work: Work) {
        self.works.push(work);
    }

    pub fn remove(&mut self, id: WorkId) -> Option<Work> {
        let index = self.works.iter().position(|work| work.id == id)?;
        Some(self.works.remove(index))
    }
}
