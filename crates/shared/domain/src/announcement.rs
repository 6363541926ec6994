//! Announcements: static HTML pages bound to a virtual path.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::PROJECT_ANNOUNCEMENT_PREFIX;

const TUTORIAL_BODY: &str = concat!(
    r#"<div dir="ltr" lang="en">Tutorial project where users can "#,
    "play with Pootle and learn more about translation and ",
    "localisation.<br />For more help on localisation, visit the ",
    r#"<a href="http://docs.translatehouse.org/projects/"#,
    r#"localization-guide/en/latest/guide/start.html">localisation "#,
    "guide</a>.</div>",
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub virtual_path: String,
    pub title: String,
    pub body: String,
    pub active: bool,
}

impl std::fmt::Display for Announcement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.virtual_path)
    }
}

/// Announcement to create, keyed by virtual path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnnouncement {
    pub virtual_path: String,
    pub title: String,
    pub body: String,
    pub active: bool,
}

impl NewAnnouncement {
    /// Virtual path of the announcement page of a project
    pub fn project_path(project_code: &str) -> String {
        format!("{}{}", PROJECT_ANNOUNCEMENT_PREFIX, project_code)
    }

    /// Instructions shown on the tutorial project
    pub fn tutorial_instructions(project_code: &str) -> Self {
        Self {
            virtual_path: Self::project_path(project_code),
            title: "Project instructions".to_string(),
            body: TUTORIAL_BODY.to_string(),
            active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutorial_announcement_path() {
        let page = NewAnnouncement::tutorial_instructions("tutorial");
        assert_eq!(page.virtual_path, "announcements/projects/tutorial");
        assert!(page.active);
        assert!(page.body.starts_with(r#"<div dir="ltr" lang="en">"#));
        assert!(page.body.ends_with("guide</a>.</div>"));
    }
}
