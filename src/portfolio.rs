use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    pub github: String,
    #[serde(default)]
    pub demo: Option<String>,
    /// Preview image shown in the detail modal.
    #[serde(default)]
    pub image: Option<String>,
}

pub fn default_projects() -> Vec<Project> {
    vec![
        Project {
            id: "skillnet".into(),
            title: "Service exchange platform".into(),
            category: "python".into(),
            description: "Collaborative platform where people trade services with each other \
                          without money changing hands."
                .into(),
            tech: vec!["Python".into(), "Mysql".into(), "Html".into(), "Css".into()],
            github: "https://github.com/clara-cecilia/TueEu".into(),
            demo: None,
            image: Some("https://via.placeholder.com/600x400/1a1a2e/00d4ff?text=Skillnet".into()),
        },
        Project {
            id: "hospitalshelton".into(),
            title: "Hospital Shelton".into(),
            category: "web".into(),
            description: "Web site for managing queue tickets.".into(),
            tech: vec!["Html".into(), "Css".into(), "Javascript".into()],
            github: "https://github.com/oliverwolfz/Hospital-Shelton".into(),
            demo: None,
            image: None,
        },
    ]
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(category) => project.category == *category,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Filter::All => "all",
            Filter::Category(category) => category,
        }
    }
}

/// Project grid state: the catalog, the active filter and the open modal.
#[derive(Debug)]
pub struct Portfolio {
    projects: Vec<Project>,
    filter: Filter,
    open: Option<usize>,
}

impl Portfolio {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            filter: Filter::All,
            open: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Filter buttons: `All` followed by each category in first-seen order.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = vec![Filter::All];
        for project in &self.projects {
            let filter = Filter::Category(project.category.clone());
            if !filters.contains(&filter) {
                filters.push(filter);
            }
        }
        filters
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        tracing::debug!(filter = filter.label(), "portfolio filter changed");
        self.filter = filter;
    }

    pub fn visible(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|project| self.filter.matches(project))
    }

    /// Opens the detail modal. Unknown ids leave the modal as it was.
    pub fn open(&mut self, id: &str) -> bool {
        match self.projects.iter().position(|project| project.id == id) {
            Some(index) => {
                self.open = Some(index);
                true
            }
            None => {
                tracing::warn!(id, "no such project");
                false
            }
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn opened(&self) -> Option<&Project> {
        self.open.map(|index| &self.projects[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keeps_catalog_order() {
        let mut portfolio = Portfolio::new(default_projects());
        assert_eq!(portfolio.visible().count(), 2);

        portfolio.set_filter(Filter::Category("web".into()));
        let ids: Vec<_> = portfolio.visible().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["hospitalshelton"]);

        portfolio.set_filter(Filter::Category("mobile".into()));
        assert_eq!(portfolio.visible().count(), 0);
    }

    #[test]
    fn filters_are_unique_categories() {
        let portfolio = Portfolio::new(default_projects());
        assert_eq!(
            portfolio.filters(),
            vec![
                Filter::All,
                Filter::Category("python".into()),
                Filter::Category("web".into())
            ]
        );
    }

    #[test]
    fn modal_opens_known_projects_only() {
        let mut portfolio = Portfolio::new(default_projects());
        assert!(portfolio.open("skillnet"));
        assert_eq!(portfolio.opened().unwrap().tech.len(), 4);

        assert!(!portfolio.open("missing"));
        assert_eq!(portfolio.opened().unwrap().id, "skillnet");

        portfolio.close();
        assert!(portfolio.opened().is_none());
    }

    #[test]
    fn projects_load_from_toml_with_optional_image() {
        #[derive(Deserialize)]
        struct Catalog {
            projects: Vec<Project>,
        }

        let catalog: Catalog = toml::from_str(
            r#"
            [[projects]]
            id = "a"
            title = "A"
            category = "web"
            description = "First"
            github = "https://example.com/a"
            image = "https://example.com/a.png"

            [[projects]]
            id = "b"
            title = "B"
            category = "web"
            description = "Second"
            github = "https://example.com/b"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.projects[0].image.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(catalog.projects[1].image, None);
        assert!(catalog.projects[1].tech.is_empty());
    }
}
