//! Side navigation for authenticated operators.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub text: &'static str,
    pub page: &'static str,
    /// When set, only operators with one of these roles see the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<&'static [&'static str]>,
}

pub const MENU: &[MenuItem] = &[
    MenuItem {
        text: "Home",
        page: "/dashboard/home",
        roles: None,
    },
    MenuItem {
        text: "Students",
        page: "/dashboard/students",
        roles: None,
    },
    MenuItem {
        text: "Teachers",
        page: "/dashboard/teachers",
        roles: None,
    },
    MenuItem {
        text: "Academics",
        page: "/dashboard/academics",
        roles: None,
    },
    MenuItem {
        text: "Assessment",
        page: "/dashboard/assessment",
        roles: None,
    },
    MenuItem {
        text: "Authorized",
        page: "/dashboard/authorized",
        roles: Some(&["super_admin"]),
    },
    MenuItem {
        text: "Settings",
        page: "/dashboard/settings/profile-details",
        roles: None,
    },
];

impl MenuItem {
    /// Path segment right after `/dashboard/`, used to match the active item.
    #[must_use]
    pub fn segment(&self) -> &'static str {
        section(self.page).unwrap_or_default()
    }

    #[must_use]
    pub fn visible_to(&self, role: Option<&str>) -> bool {
        match self.roles {
            None => true,
            Some(roles) => role.is_some_and(|role| roles.contains(&role)),
        }
    }
}

/// Menu entries shown to an operator with `role`.
#[must_use]
pub fn visible_items(role: Option<&str>) -> Vec<MenuItem> {
    MENU.iter()
        .filter(|item| item.visible_to(role))
        .copied()
        .collect()
}

/// Dashboard section of `path`: the segment after `dashboard`.
#[must_use]
pub fn section(path: &str) -> Option<&str> {
    let mut segments = path.split('/');
    segments.find(|segment| *segment == "dashboard")?;
    segments.next().filter(|segment| !segment.is_empty())
}

/// Menu item highlighted for `path`.
#[must_use]
pub fn active_item(path: &str) -> Option<&'static MenuItem> {
    let current = section(path)?;
    MENU.iter().find(|item| item.segment() == current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorized_item_is_role_gated() {
        let texts = |role| {
            visible_items(role)
                .iter()
                .map(|item| item.text)
                .collect::<Vec<_>>()
        };
        assert!(!texts(None).contains(&"Authorized"));
        assert!(!texts(Some("admin")).contains(&"Authorized"));
        assert!(texts(Some("super_admin")).contains(&"Authorized"));
        assert_eq!(texts(Some("admin")).len(), MENU.len() - 1);
    }

    #[test]
    fn active_item_follows_dashboard_segment() {
        assert_eq!(active_item("/dashboard/students").map(|i| i.text), Some("Students"));
        assert_eq!(
            active_item("/dashboard/settings/school-details").map(|i| i.text),
            Some("Settings")
        );
        assert_eq!(active_item("/dashboard"), None);
        assert_eq!(active_item("/auth/login"), None);
    }
}
