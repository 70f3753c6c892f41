//! Technology Repository
//!
//! CRUD plus the skills-section queries: featured set, category filter,
//! name search, and proficiency ordering.

use uuid::Uuid;

use crate::domain::{Technology, TechnologyDraft, TechnologyPatch};
use crate::error::Result;
use crate::repository::{Repository, SortOrder};

// == Technology Repository ==
pub struct TechnologyRepository {
    inner: Repository<Technology>,
}

impl TechnologyRepository {
    /// Wraps a configured generic repository.
    pub fn new(inner: Repository<Technology>) -> Self {
        Self { inner }
    }

    // == CRUD delegates ==
    pub async fn get_all(&self) -> Result<Vec<Technology>> {
        self.inner.get_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Technology>> {
        self.inner.get_by_id(id).await
    }

    pub async fn create(&self, draft: TechnologyDraft) -> Result<Technology> {
        self.inner.create(draft).await
    }

    pub async fn update(&self, id: Uuid, patch: TechnologyPatch) -> Result<Technology> {
        self.inner.update(id, patch).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.inner.delete(id).await
    }

    // == Domain queries ==
    /// Featured skills, strongest first.
    pub async fn get_featured(&self) -> Result<Vec<Technology>> {
        let mut featured: Vec<Technology> = self
            .inner
            .snapshot()
            .await
            .into_iter()
            .filter(|t| t.featured)
            .collect();
        sort_by_proficiency(&mut featured, SortOrder::Desc);
        Ok(featured)
    }

    /// Skills in a category, matched case-insensitively.
    pub async fn get_by_category(&self, category: &str) -> Result<Vec<Technology>> {
        Ok(self
            .inner
            .snapshot()
            .await
            .into_iter()
            .filter(|t| t.category.eq_ignore_ascii_case(category))
            .collect())
    }

    /// Case-insensitive substring search over names.
    pub async fn search(&self, name_query: &str) -> Result<Vec<Technology>> {
        let query = name_query.to_lowercase();
        Ok(self
            .inner
            .snapshot()
            .await
            .into_iter()
            .filter(|t| t.name.to_lowercase().contains(&query))
            .collect())
    }

    /// Whole collection ordered by proficiency — ascending unless the
    /// caller asks for descending.
    pub async fn by_proficiency(&self, order: Option<SortOrder>) -> Result<Vec<Technology>> {
        let mut technologies = self.inner.snapshot().await;
        sort_by_proficiency(&mut technologies, order.unwrap_or(SortOrder::Asc));
        Ok(technologies)
    }
}

fn sort_by_proficiency(technologies: &mut [Technology], order: SortOrder) {
    // Name breaks ties so the ordering is stable across loads
    technologies.sort_by(|a, b| {
        let ordering = a
            .proficiency
            .cmp(&b.proficiency)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
