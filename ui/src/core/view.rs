//! Dashboard screens and the role gating applied to them.

use crate::core::model::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Overview,
    DataTable,
    Reports,
}

impl View {
    pub const ALL: [View; 3] = [View::Overview, View::DataTable, View::Reports];

    pub fn slug(self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::DataTable => "data-table",
            View::Reports => "reports",
        }
    }

    /// Header label: capitalized slug with the first hyphen turned into a space.
    pub fn title(self) -> String {
        let slug = self.slug();
        let mut chars = slug.chars();
        match chars.next() {
            Some(first) => {
                let rest: String = chars.collect();
                format!("{}{}", first.to_uppercase(), rest.replacen('-', " ", 1))
            }
            None => String::new(),
        }
    }
}

/// Which affordances a role gets; fixed when the dashboard initializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleLayout {
    pub show_data_table: bool,
    pub show_edit_column: bool,
    pub show_admin_actions: bool,
    pub show_student_info: bool,
}

impl RoleLayout {
    pub fn for_role(role: Role) -> Self {
        let admin = role.is_admin();
        Self {
            show_data_table: admin,
            show_edit_column: admin,
            show_admin_actions: admin,
            show_student_info: !admin,
        }
    }

    /// Nothing gated is visible before a role is known.
    pub fn locked() -> Self {
        Self {
            show_data_table: false,
            show_edit_column: false,
            show_admin_actions: false,
            show_student_info: false,
        }
    }

    pub fn allows(&self, view: View) -> bool {
        match view {
            View::DataTable => self.show_data_table,
            View::Overview | View::Reports => true,
        }
    }

    /// Navigation entries in display order.
    pub fn nav_entries(&self) -> Vec<View> {
        View::ALL
            .into_iter()
            .filter(|view| self.allows(*view))
            .collect()
    }
}

impl Default for RoleLayout {
    fn default() -> Self {
        Self::locked()
    }
}
