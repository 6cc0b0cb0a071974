//! Page paths shared by the browser app and the sitemap.

use crate::content;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Projects,
    Project(String),
    NotFound,
}

impl Route {
    /// Trailing slashes and query strings are ignored. `/projects/<slug>` only
    /// resolves for known slugs.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["projects"] => Self::Projects,
            ["projects", slug] if content::project_by_slug(slug).is_some() => {
                Self::Project((*slug).to_string())
            }
            _ => Self::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Projects => "/projects".to_string(),
            Self::Project(slug) => format!("/projects/{slug}"),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// The landing page is the only route where the terminal starts as a hero.
    pub fn is_landing(&self) -> bool {
        matches!(self, Self::Home)
    }

    /// Relative sitemap weight, or `None` for pages that are not listed.
    pub fn sitemap_priority(&self) -> Option<f32> {
        match self {
            Self::Home => Some(1.0),
            Self::Projects => Some(0.8),
            Self::Project(_) => Some(0.7),
            Self::NotFound => None,
        }
    }

    /// Every page a crawler should know about.
    pub fn indexable() -> Vec<Self> {
        let mut routes = vec![Self::Home, Self::Projects];
        routes.extend(
            content::PROJECTS
                .iter()
                .map(|project| Self::Project(project.slug.to_string())),
        );
        routes
    }
}

/// Link target for a landing-page section from anywhere on the site.
pub fn section_href(on_landing: bool, id: &str) -> String {
    if on_landing {
        format!("#{id}")
    } else {
        format!("/#{id}")
    }
}
