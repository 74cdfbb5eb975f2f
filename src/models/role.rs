use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Operator,
    Manager,
    Admin,
    Viewer,
}

impl Role {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Operator => "operator",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::Viewer => "viewer",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "operator" => Some(Role::Operator),
            "manager" => Some(Role::Manager),
            "admin" => Some(Role::Admin),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }

    /// May start and stop timers.
    pub fn can_record(&self) -> bool {
        matches!(self, Role::Operator | Role::Admin)
    }

    /// May edit or delete recorded downtimes, read the reports and export.
    pub fn can_manage(&self) -> bool {
        matches!(self, Role::Manager | Role::Admin)
    }

    /// May manage users and machines.
    pub fn can_administer(&self) -> bool {
        matches!(self, Role::Admin)
    }
}
