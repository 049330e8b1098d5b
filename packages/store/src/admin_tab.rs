use std::fmt;

/// Section of the admin dashboard, carried in `/admin?tab=<tab>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AdminTab {
    #[default]
    Notices,
    Events,
    Gallery,
}

impl AdminTab {
    pub const ALL: [AdminTab; 3] = [AdminTab::Notices, AdminTab::Events, AdminTab::Gallery];

    /// Case-insensitive; anything unrecognized opens the notices tab.
    pub fn parse(tab: Option<&str>) -> Self {
        let Some(tab) = tab else {
            return AdminTab::default();
        };
        let tab = tab.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == tab)
            .unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AdminTab::Notices => "notices",
            AdminTab::Events => "events",
            AdminTab::Gallery => "gallery",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdminTab::Notices => "Notices",
            AdminTab::Events => "Events",
            AdminTab::Gallery => "Gallery",
        }
    }

    /// Deep link into the dashboard.
    pub fn link(self) -> String {
        format!("/admin?tab={}", self.as_str())
    }
}

impl fmt::Display for AdminTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(AdminTab::parse(Some("events")), AdminTab::Events);
        assert_eq!(AdminTab::parse(Some("GALLERY")), AdminTab::Gallery);
        assert_eq!(AdminTab::parse(Some("payments")), AdminTab::Notices);
        assert_eq!(AdminTab::parse(Some("")), AdminTab::Notices);
        assert_eq!(AdminTab::parse(None), AdminTab::Notices);
    }

    #[test]
    fn test_links() {
        assert_eq!(AdminTab::Gallery.link(), "/admin?tab=gallery");
        assert_eq!(AdminTab::parse(Some(AdminTab::Events.as_str())), AdminTab::Events);
    }
}
