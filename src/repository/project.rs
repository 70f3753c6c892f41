//! Project Repository
//!
//! CRUD plus the read queries the site actually renders: featured listing,
//! category/technology filters, free-text search, and summary statistics.
//! All queries are pure filters over the loaded collection — they never
//! reload and never mutate.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Project, ProjectDraft, ProjectPatch};
use crate::error::Result;
use crate::repository::Repository;

// == Sort Parameters ==
/// Direction override for sorted queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Sortable project fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSortField {
    Title,
    Year,
    Updated,
}

impl ProjectSortField {
    /// Conventional direction when the caller does not say: strings sort
    /// ascending, date-like fields most-recent-first.
    fn default_order(self) -> SortOrder {
        match self {
            ProjectSortField::Title => SortOrder::Asc,
            ProjectSortField::Year | ProjectSortField::Updated => SortOrder::Desc,
        }
    }
}

// == Project Query ==
/// Composable search parameters. Text matching is case-insensitive
/// substring throughout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectQuery {
    /// Substring over title and description
    pub query: Option<String>,
    /// Exact category (case-insensitive)
    pub category: Option<String>,
    /// Substring over the technology list
    pub technology: Option<String>,
    pub featured: Option<bool>,
    pub sort_by: Option<ProjectSortField>,
    pub sort_order: Option<SortOrder>,
}

// == Project Statistics ==
/// Aggregations over the full project collection.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectStatistics {
    pub total: usize,
    pub featured: usize,
    pub by_category: BTreeMap<String, usize>,
    pub distinct_technologies: usize,
    pub latest_year: Option<i32>,
}

// == Project Repository ==
pub struct ProjectRepository {
    inner: Repository<Project>,
}

impl ProjectRepository {
    /// Wraps a configured generic repository.
    pub fn new(inner: Repository<Project>) -> Self {
        Self { inner }
    }

    // == CRUD delegates ==
    pub async fn get_all(&self) -> Result<Vec<Project>> {
        self.inner.get_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Project>> {
        self.inner.get_by_id(id).await
    }

    pub async fn create(&self, draft: ProjectDraft) -> Result<Project> {
        self.inner.create(draft).await
    }

    pub async fn update(&self, id: Uuid, patch: ProjectPatch) -> Result<Project> {
        self.inner.update(id, patch).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.inner.delete(id).await
    }

    // == Domain queries ==
    /// Featured projects, newest first.
    pub async fn get_featured(&self) -> Result<Vec<Project>> {
        let mut projects: Vec<Project> = self
            .inner
            .snapshot()
            .await
            .into_iter()
            .filter(|p| p.featured)
            .collect();
        sort_projects(&mut projects, ProjectSortField::Year, SortOrder::Desc);
        Ok(projects)
    }

    /// Projects in a category, matched case-insensitively.
    pub async fn get_by_category(&self, category: &str) -> Result<Vec<Project>> {
        Ok(self
            .inner
            .snapshot()
            .await
            .into_iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .collect())
    }

    /// Projects whose technology list contains `technology` as a
    /// case-insensitive substring ("react" finds "React Native").
    pub async fn get_by_technology(&self, technology: &str) -> Result<Vec<Project>> {
        Ok(self
            .inner
            .snapshot()
            .await
            .into_iter()
            .filter(|p| p.uses_technology(technology))
            .collect())
    }

    /// Composable filtered search with explicit or conventional sorting.
    pub async fn search(&self, query: &ProjectQuery) -> Result<Vec<Project>> {
        let mut projects: Vec<Project> = self
            .inner
            .snapshot()
            .await
            .into_iter()
            .filter(|p| {
                query.query.as_deref().map_or(true, |q| p.matches_text(q))
                    && query
                        .category
                        .as_deref()
                        .map_or(true, |c| p.category.eq_ignore_ascii_case(c))
                    && query
                        .technology
                        .as_deref()
                        .map_or(true, |t| p.uses_technology(t))
                    && query.featured.map_or(true, |f| p.featured == f)
            })
            .collect();

        let field = query.sort_by.unwrap_or(ProjectSortField::Year);
        let order = query.sort_order.unwrap_or_else(|| field.default_order());
        sort_projects(&mut projects, field, order);
        Ok(projects)
    }

    /// Summary counts over the whole collection.
    pub async fn statistics(&self) -> Result<ProjectStatistics> {
        let projects = self.inner.snapshot().await;

        let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
        let mut technologies: HashSet<String> = HashSet::new();
        for project in &projects {
            *by_category.entry(project.category.to_lowercase()).or_default() += 1;
            technologies.extend(project.technologies.iter().map(|t| t.to_lowercase()));
        }

        Ok(ProjectStatistics {
            total: projects.len(),
            featured: projects.iter().filter(|p| p.featured).count(),
            by_category,
            distinct_technologies: technologies.len(),
            latest_year: projects.iter().map(|p| p.year).max(),
        })
    }
}

// == Sorting ==
fn sort_projects(projects: &mut [Project], field: ProjectSortField, order: SortOrder) {
    projects.sort_by(|a, b| {
        let ordering = match field {
            ProjectSortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            ProjectSortField::Year => a.year.cmp(&b.year),
            ProjectSortField::Updated => a.updated_at.cmp(&b.updated_at),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProjectLinks, Record};
    use crate::loader::RetryPolicy;
    use crate::repository::StaticSource;
    use chrono::Utc;
    use std::sync::Arc;

    fn project(title: &str, category: &str, technologies: &[&str], year: i32, featured: bool) -> Project {
        Project::from_draft(
            Uuid::new_v4(),
            Utc::now(),
            ProjectDraft {
                title: title.to_string(),
                description: format!("{} description", title),
                category: category.to_string(),
                technologies: technologies.iter().map(|t| t.to_string()).collect(),
                links: ProjectLinks::default(),
                year,
                featured,
            },
        )
    }

    fn fixture() -> Vec<Project> {
        vec![
            project("Hotel Booking Engine", "web", &["React", "Node"], 2021, true),
            project("Portfolio Site", "web", &["React", "TypeScript"], 2024, true),
            project("Hotel Review Scraper", "tooling", &["Python"], 2020, false),
            project("Inventory Service", "backend", &["Java", "Postgres"], 2022, false),
            project("City Hotel Map", "web", &["Vue"], 2019, false),
            project("Build Dashboard", "tooling", &["Rust"], 2023, true),
        ]
    }

    fn repo() -> ProjectRepository {
        ProjectRepository::new(
            Repository::new(Arc::new(StaticSource::new(fixture())))
                .with_retry(RetryPolicy::with_attempts(1)),
        )
    }

    #[tokio::test]
    async fn test_get_featured_newest_first() {
        let repo = repo();
        let featured = repo.get_featured().await.unwrap();

        let years: Vec<i32> = featured.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2024, 2023, 2021]);
        assert!(featured.iter().all(|p| p.featured));
    }

    #[tokio::test]
    async fn test_get_by_category_is_case_insensitive() {
        let repo = repo();
        let web = repo.get_by_category("WEB").await.unwrap();
        assert_eq!(web.len(), 3);
    }

    #[tokio::test]
    async fn test_get_by_technology_lowercase_query_matches() {
        let repo = repo();
        let react = repo.get_by_technology("react").await.unwrap();

        assert_eq!(react.len(), 2);
        assert!(react.iter().all(|p| p.uses_technology("React")));
    }

    #[tokio::test]
    async fn test_search_query_title_ascending() {
        let repo = repo();
        let results = repo
            .search(&ProjectQuery {
                query: Some("hotel".to_string()),
                sort_by: Some(ProjectSortField::Title),
                sort_order: Some(SortOrder::Asc),
                ..Default::default()
            })
            .await
            .unwrap();

        let titles: Vec<&str> = results.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["City Hotel Map", "Hotel Booking Engine", "Hotel Review Scraper"]
        );
    }

    #[tokio::test]
    async fn test_search_defaults_to_newest_first() {
        let repo = repo();
        let results = repo.search(&ProjectQuery::default()).await.unwrap();

        let years: Vec<i32> = results.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2024, 2023, 2022, 2021, 2020, 2019]);
    }

    #[tokio::test]
    async fn test_search_title_defaults_ascending() {
        let repo = repo();
        let results = repo
            .search(&ProjectQuery {
                sort_by: Some(ProjectSortField::Title),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(results[0].title, "Build Dashboard");
        assert_eq!(results.last().unwrap().title, "Portfolio Site");
    }

    #[tokio::test]
    async fn test_search_combines_filters() {
        let repo = repo();
        let results = repo
            .search(&ProjectQuery {
                category: Some("web".to_string()),
                featured: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_statistics() {
        let repo = repo();
        let stats = repo.statistics().await.unwrap();

        assert_eq!(stats.total, 6);
        assert_eq!(stats.featured, 3);
        assert_eq!(stats.by_category.get("web"), Some(&3));
        assert_eq!(stats.by_category.get("tooling"), Some(&2));
        assert_eq!(stats.latest_year, Some(2024));
        // React counted once despite appearing twice
        assert_eq!(stats.distinct_technologies, 8);
    }

    #[tokio::test]
    async fn test_queries_do_not_mutate() {
        let repo = repo();
        repo.search(&ProjectQuery::default()).await.unwrap();
        repo.get_featured().await.unwrap();

        assert_eq!(repo.get_all().await.unwrap().len(), 6);
    }
}
