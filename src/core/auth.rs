use crate::db::users::find_user;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::User;
use rusqlite::Connection;

pub struct AuthLogic;

impl AuthLogic {
    /// Look the user up and compare the stored password verbatim.
    pub fn login(conn: &Connection, user: Option<&str>, password: Option<&str>) -> AppResult<User> {
        let (Some(id), Some(password)) = (user, password) else {
            return Err(AppError::MissingCredentials);
        };

        match find_user(conn, id.trim())? {
            Some(u) if u.password == password => Ok(u),
            _ => Err(AppError::AuthFailed(id.to_string())),
        }
    }

    /// Fail unless `user`'s role passes `allowed`.
    pub fn require(user: &User, allowed: fn(&Role) -> bool, action: &str) -> AppResult<()> {
        if allowed(&user.role) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!(
                "{} ({}) cannot {}",
                user.id,
                user.role.to_db_str(),
                action
            )))
        }
    }
}
