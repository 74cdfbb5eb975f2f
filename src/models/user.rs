use super::role::Role;
use serde::Serialize;

/// Row of the `users` table.
///
/// The password is stored and compared as plain text: it only keeps
/// operators from recording under someone else's name by accident.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
}
