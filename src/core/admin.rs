use crate::core::auth::AuthLogic;
use crate::db::log::audit;
use crate::db::machines::{delete_machine, find_machine, insert_machine, rename_machine, require_machine};
use crate::db::pool::DbPool;
use crate::db::queries::count_downtimes_for_machine;
use crate::db::users::{count_admins, delete_user, find_user, insert_user, update_password, update_role};
use crate::errors::{AppError, AppResult};
use crate::models::downtime::MARKER_MACHINE;
use crate::models::machine::Machine;
use crate::models::role::Role;
use crate::models::user::User;

/// User and machine administration.
pub struct AdminLogic;

impl AdminLogic {
    pub fn add_user(
        pool: &mut DbPool,
        admin: &User,
        id: &str,
        name: &str,
        password: &str,
        role: Role,
    ) -> AppResult<User> {
        AuthLogic::require(admin, Role::can_administer, "manage users")?;

        let id = id.trim();
        if id.is_empty() || password.is_empty() {
            return Err(AppError::Conflict("User id and password must not be empty.".into()));
        }
        if find_user(&pool.conn, id)?.is_some() {
            return Err(AppError::Conflict(format!("User '{id}' already exists.")));
        }

        let user = User {
            id: id.to_string(),
            name: if name.trim().is_empty() { id.to_string() } else { name.trim().to_string() },
            password: password.to_string(),
            role,
        };

        pool.in_transaction(|conn| {
            insert_user(conn, &user)?;
            audit(conn, "user", &user.id, &format!("added as {}", role.to_db_str()))
        })?;

        Ok(user)
    }

    pub fn remove_user(pool: &mut DbPool, admin: &User, id: &str) -> AppResult<()> {
        AuthLogic::require(admin, Role::can_administer, "manage users")?;

        if id == admin.id {
            return Err(AppError::Conflict("You cannot delete your own account.".into()));
        }

        let target = find_user(&pool.conn, id)?.ok_or_else(|| AppError::UserNotFound(id.into()))?;
        if target.role == Role::Admin && count_admins(&pool.conn)? <= 1 {
            return Err(AppError::Conflict("Cannot delete the last administrator.".into()));
        }

        pool.in_transaction(|conn| {
            delete_user(conn, id)?;
            audit(conn, "user", id, "deleted")
        })
    }

    /// Admins may reset anyone's password; everyone may change their own.
    pub fn set_password(pool: &mut DbPool, actor: &User, id: &str, password: &str) -> AppResult<()> {
        if actor.id != id {
            AuthLogic::require(actor, Role::can_administer, "change other users' passwords")?;
        }
        if password.is_empty() {
            return Err(AppError::Conflict("Password must not be empty.".into()));
        }

        pool.in_transaction(|conn| {
            update_password(conn, id, password)?;
            audit(conn, "user", id, &format!("password changed by {}", actor.id))
        })
    }

    pub fn set_role(pool: &mut DbPool, admin: &User, id: &str, role: Role) -> AppResult<()> {
        AuthLogic::require(admin, Role::can_administer, "manage users")?;

        let target = find_user(&pool.conn, id)?.ok_or_else(|| AppError::UserNotFound(id.into()))?;
        if target.role == Role::Admin && role != Role::Admin && count_admins(&pool.conn)? <= 1 {
            return Err(AppError::Conflict("Cannot demote the last administrator.".into()));
        }

        pool.in_transaction(|conn| {
            update_role(conn, id, role)?;
            audit(conn, "user", id, &format!("role set to {}", role.to_db_str()))
        })
    }

    pub fn add_machine(pool: &mut DbPool, admin: &User, name: &str) -> AppResult<Machine> {
        AuthLogic::require(admin, Role::can_administer, "manage machines")?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Conflict("Machine name must not be empty.".into()));
        }
        if find_machine(&pool.conn, name)?.is_some() {
            return Err(AppError::Conflict(format!("Machine '{name}' already exists.")));
        }

        pool.in_transaction(|conn| {
            let machine = insert_machine(conn, name)?;
            audit(conn, "machine", &machine.name, "added")?;
            Ok(machine)
        })
    }

    /// Machines with recorded downtimes stay, so history keeps its reference.
    pub fn remove_machine(pool: &mut DbPool, admin: &User, name: &str) -> AppResult<()> {
        AuthLogic::require(admin, Role::can_administer, "manage machines")?;

        let machine = require_machine(&pool.conn, name)?;
        if machine.is_marker() {
            return Err(AppError::Conflict(format!("'{MARKER_MACHINE}' cannot be removed.")));
        }

        let used = count_downtimes_for_machine(&pool.conn, machine.id)?;
        if used > 0 {
            return Err(AppError::Conflict(format!(
                "Machine '{}' has {} recorded downtimes and cannot be removed.",
                machine.name, used
            )));
        }

        pool.in_transaction(|conn| {
            delete_machine(conn, machine.id)?;
            audit(conn, "machine", &machine.name, "deleted")
        })
    }

    pub fn rename_machine(pool: &mut DbPool, admin: &User, name: &str, new_name: &str) -> AppResult<()> {
        AuthLogic::require(admin, Role::can_administer, "manage machines")?;

        let machine = require_machine(&pool.conn, name)?;
        let new_name = new_name.trim();

        if machine.is_marker() || new_name.eq_ignore_ascii_case(MARKER_MACHINE) {
            return Err(AppError::Conflict(format!("'{MARKER_MACHINE}' is reserved.")));
        }
        if new_name.is_empty() {
            return Err(AppError::Conflict("Machine name must not be empty.".into()));
        }
        if let Some(other) = find_machine(&pool.conn, new_name)?
            && other.id != machine.id
        {
            return Err(AppError::Conflict(format!("Machine '{new_name}' already exists.")));
        }

        pool.in_transaction(|conn| {
            rename_machine(conn, machine.id, new_name)?;
            audit(conn, "machine", new_name, &format!("renamed from {}", machine.name))
        })
    }
}
