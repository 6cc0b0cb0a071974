//! Static site content. Everything here is read-only data plus a few lookups.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectStatus {
    Live,
    InDevelopment,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::InDevelopment => "In Development",
            Self::Archived => "Archived",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Live => "status-live",
            Self::InDevelopment => "status-dev",
            Self::Archived => "status-archived",
        }
    }
}

/// Where a project is listed on `/projects`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectCategory {
    Main,
    Academic,
}

impl ProjectCategory {
    pub fn heading(self) -> &'static str {
        match self {
            Self::Main => "Systems & Products",
            Self::Academic => "Academic",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExternalLink {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub slug: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
    pub description: &'static [&'static str],
    pub tech: &'static [&'static str],
    pub status: ProjectStatus,
    pub image: Option<&'static str>,
    pub video: Option<&'static str>,
    pub links: &'static [ExternalLink],
    pub category: ProjectCategory,
    pub featured: bool,
}

impl Project {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tech.iter().any(|tech| *tech == tag)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Experience {
    pub role: &'static str,
    pub org: &'static str,
    pub start: &'static str,
    /// `None` while the role is ongoing.
    pub end: Option<&'static str>,
    pub bullets: &'static [&'static str],
    pub skills: &'static [&'static str],
}

impl Experience {
    pub fn period(&self) -> String {
        format!("{} — {}", self.start, self.end.unwrap_or("Present"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Education {
    pub school: &'static str,
    pub degree: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub coursework: &'static [&'static str],
    pub skills: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub href: &'static str,
    pub id: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct About {
    pub name: &'static str,
    pub initials: &'static str,
    pub greeting: &'static str,
    pub focus_line: &'static str,
    pub affiliation_line: &'static str,
    /// Shown under the name once the header has settled.
    pub header_role: &'static str,
    pub headshot: Option<&'static str>,
    pub resume_href: &'static str,
    pub paragraphs: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionLink {
    pub id: &'static str,
    pub label: &'static str,
}

pub const SITE_NAME: &str = "Gray Marshall";

pub const ABOUT: About = About {
    name: "Gray Marshall",
    initials: "GM",
    greeting: "Hey, I'm Gray Marshall.",
    focus_line: "Software Engineering • Full-Stack & Systems",
    affiliation_line: "Co-Founder & CTO, LSR | CS @ UT Austin",
    header_role: "Full Stack Developer",
    headshot: Some("headshot.jpg"),
    resume_href: "/downloads/Matthew_Gray_Marshall_SWE_Resume.pdf",
    paragraphs: &[
        "I'm a second-year CS major translating raw race-car bytes into winning insights for UT Austin's Formula SAE EV Team, and building the real-time systems that keep competition software reliable under pressure. At Longhorn Racing I work on a distributed telemetry stack spanning on-car data ingest, real-time streaming, persistent storage, and live visualization.",
        "That same systems-first mindset carries beyond the car. I co-founded and lead the technical direction of Longhorn Sim Racing, where I designed and shipped a production web platform with member accounts, event registration, admin tooling, and statistics dashboards.",
        "Across both domains I optimize for tight feedback loops, clear abstractions, and durable software that ships fast and performs under pressure. Iterate • Improve • Deploy. Open to Summer 2026 SWE internships.",
    ],
};

/// Landing-page sections in document order.
pub const SECTIONS: &[SectionLink] = &[
    SectionLink {
        id: "about",
        label: "About",
    },
    SectionLink {
        id: "featured-projects",
        label: "Projects",
    },
    SectionLink {
        id: "experience",
        label: "Experience",
    },
    SectionLink {
        id: "education",
        label: "Education",
    },
    SectionLink {
        id: "contact",
        label: "Contact",
    },
];

pub const PROJECTS: &[Project] = &[
    Project {
        slug: "fsae-telemetry",
        title: "FSAE Telemetry Web Tool",
        tagline: "Real-time telemetry ingestion and trackside tooling for LHR-E.",
        description: &[
            "Real-time telemetry ingestion, data monitoring, and labeling for Longhorn Racing Electric.",
            "Built for trackside operations with collaborative data tools, live tuning, and over-the-air firmware flashing.",
        ],
        tech: &["Python", "JavaScript", "Flask", "MQTT", "Docker", "PostgreSQL"],
        status: ProjectStatus::Live,
        image: Some("lhrwebtool.svg"),
        video: None,
        links: &[ExternalLink {
            label: "Team site",
            href: "https://www.longhornracing.org/",
        }],
        category: ProjectCategory::Main,
        featured: true,
    },
    Project {
        slug: "design-system-core",
        title: "Design System Core",
        tagline: "A framework-agnostic component library for enterprise apps.",
        description: &[
            "Built to solve consistency issues across five products.",
            "Reduced UI debt by 40% and improved accessibility scores significantly.",
        ],
        tech: &["TypeScript", "React", "Tailwind", "Storybook"],
        status: ProjectStatus::Live,
        image: None,
        video: None,
        links: &[
            ExternalLink {
                label: "Live",
                href: "https://example.com",
            },
            ExternalLink {
                label: "Source",
                href: "https://github.com/example/design-system",
            },
        ],
        category: ProjectCategory::Main,
        featured: true,
    },
    Project {
        slug: "dev-terminal",
        title: "DevTerminal",
        tagline: "A browser-based CLI for managing cloud resources.",
        description: &[
            "Experimental interface combining the speed of a CLI with the visual feedback of a dashboard.",
        ],
        tech: &["Rust", "WebAssembly", "Next.js"],
        status: ProjectStatus::InDevelopment,
        image: None,
        video: Some("dev-terminal.mp4"),
        links: &[ExternalLink {
            label: "Source",
            href: "https://github.com/example/dev-terminal",
        }],
        category: ProjectCategory::Main,
        featured: true,
    },
    Project {
        slug: "portfolio",
        title: "Personal Portfolio Website",
        tagline: "This site: a terminal that boots into a header.",
        description: &[
            "Built from scratch to showcase projects, experience, and contact info.",
            "Responsive layout, light and dark theming, a filterable project grid, and scroll-driven animation.",
        ],
        tech: &["Rust", "WebAssembly", "Yew", "CSS"],
        status: ProjectStatus::Live,
        image: Some("og-image.svg"),
        video: None,
        links: &[ExternalLink {
            label: "Source",
            href: "https://github.com/GrayM8/dev-site",
        }],
        category: ProjectCategory::Academic,
        featured: false,
    },
    Project {
        slug: "async-notes",
        title: "Async Notes",
        tagline: "Local-first note taking with peer-to-peer sync.",
        description: &[
            "Uses CRDTs for conflict-free editing. Designed for offline-first workflows and privacy.",
        ],
        tech: &["Svelte", "Yjs", "IndexedDB"],
        status: ProjectStatus::Archived,
        image: None,
        video: None,
        links: &[ExternalLink {
            label: "Source",
            href: "https://github.com/example/async-notes",
        }],
        category: ProjectCategory::Academic,
        featured: false,
    },
];

pub const EXPERIENCE: &[Experience] = &[
    Experience {
        role: "Co-Founder / CTO",
        org: "Longhorn Sim Racing (LSR)",
        start: "2025",
        end: None,
        bullets: &[
            "Architected the league's competition platform, handling registration and scoring for 500+ drivers.",
            "Implemented a real-time race control dashboard used for live stewarding decisions.",
            "Scaled infrastructure to support high-concurrency race events with zero downtime.",
        ],
        skills: &["TypeScript", "Next.js", "PostgreSQL"],
    },
    Experience {
        role: "Telemetry Software Engineer | Electronics System",
        org: "Longhorn Racing Electric (FSAE)",
        start: "2024",
        end: None,
        bullets: &[
            "Developed data acquisition software for the team's electric competition vehicle.",
            "Built a visualization suite for battery thermal performance and motor efficiency.",
            "Optimized data transmission to make the most of low-quality connections.",
        ],
        skills: &["Python", "Flask", "MQTT", "React"],
    },
];

pub const EDUCATION: Education = Education {
    school: "The University of Texas at Austin",
    degree: "B.S. Computer Science",
    start: "2024",
    end: "2028 (expected)",
    coursework: &["Data Structures", "Algorithms", "Operating Systems"],
    skills: &["C", "Java", "ARM Assembly"],
};

/// Shown as a strip under the contact section.
pub const TECHNOLOGIES: &[&str] = &[
    "TypeScript",
    "React",
    "Next.js",
    "Node.js",
    "Rust",
    "Go",
    "Python",
    "PostgreSQL",
    "Redis",
    "Docker",
    "AWS",
    "Terraform",
];

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        label: "GitHub",
        href: "https://github.com/GrayM8",
        id: "github",
    },
    SocialLink {
        label: "LinkedIn",
        href: "https://www.linkedin.com/in/graymarshall/",
        id: "linkedin",
    },
    SocialLink {
        label: "Email",
        href: "mailto:matthew.gray.marshall@gmail.com",
        id: "email",
    },
];

pub fn section_ids() -> impl Iterator<Item = &'static str> {
    SECTIONS.iter().map(|section| section.id)
}

pub fn project_by_slug(slug: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|project| project.slug == slug)
}

pub fn featured_projects() -> impl Iterator<Item = &'static Project> {
    PROJECTS.iter().filter(|project| project.featured)
}

/// Every tech tag used by any project, sorted and deduplicated.
pub fn all_tags() -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = PROJECTS
        .iter()
        .flat_map(|project| project.tech.iter().copied())
        .collect();
    tags.sort_unstable();
    tags.dedup();
    tags
}

pub fn filter_by_tag(tag: Option<&str>) -> Vec<&'static Project> {
    PROJECTS
        .iter()
        .filter(|project| tag.map_or(true, |tag| project.has_tag(tag)))
        .collect()
}

/// Clicking the selected tag again clears the filter.
pub fn toggle_tag(current: Option<&str>, clicked: &str) -> Option<String> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked.to_string())
    }
}

pub fn projects_document_title(tag: Option<&str>) -> String {
    let first_name = SITE_NAME.split_whitespace().next().unwrap_or(SITE_NAME);
    match tag {
        Some(tag) => format!("{first_name} • {tag} projects"),
        None => format!("{first_name} • Projects"),
    }
}

pub fn image_path(filename: &str) -> String {
    format!("/images/{filename}")
}

pub fn project_media_path(filename: &str) -> String {
    format!("/projects/media/{filename}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn technology_strip_has_no_duplicates() {
        let mut seen = TECHNOLOGIES.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), TECHNOLOGIES.len());
        assert!(TECHNOLOGIES.contains(&"Rust"));
    }

    #[test]
    fn slugs_are_unique() {
        let mut slugs: Vec<&str> = PROJECTS.iter().map(|project| project.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), PROJECTS.len());
    }

    #[test]
    fn section_ids_are_in_document_order() {
        let ids: Vec<&str> = section_ids().collect();
        assert_eq!(
            ids,
            vec!["about", "featured-projects", "experience", "education", "contact"]
        );
    }

    #[test]
    fn tags_are_sorted_and_unique() {
        let tags = all_tags();
        let mut sorted = tags.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(tags, sorted);
        assert!(tags.contains(&"Rust"));
    }

    #[test]
    fn filtering_by_tag_keeps_matching_projects() {
        let rust: Vec<&str> = filter_by_tag(Some("Rust"))
            .iter()
            .map(|project| project.slug)
            .collect();
        assert_eq!(rust, vec!["dev-terminal", "portfolio"]);
        assert_eq!(filter_by_tag(None).len(), PROJECTS.len());
        assert!(filter_by_tag(Some("COBOL")).is_empty());
    }

    #[test]
    fn toggling_the_active_tag_clears_it() {
        assert_eq!(toggle_tag(None, "Rust"), Some("Rust".to_string()));
        assert_eq!(toggle_tag(Some("Rust"), "Rust"), None);
        assert_eq!(toggle_tag(Some("Rust"), "Yew"), Some("Yew".to_string()));
    }

    #[test]
    fn document_title_names_the_tag() {
        assert_eq!(projects_document_title(None), "Gray • Projects");
        assert_eq!(projects_document_title(Some("MQTT")), "Gray • MQTT projects");
    }

    #[test]
    fn lookups_find_projects() {
        assert_eq!(
            project_by_slug("dev-terminal").map(|project| project.title),
            Some("DevTerminal")
        );
        assert!(project_by_slug("missing").is_none());
        assert!(featured_projects().all(|project| project.featured));
        assert_eq!(
            PROJECTS
                .iter()
                .filter(|project| project.category == ProjectCategory::Academic)
                .count(),
            2
        );
    }

    #[test]
    fn ongoing_roles_read_present() {
        assert_eq!(EXPERIENCE[0].period(), "2025 — Present");
    }
}
