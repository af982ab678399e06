use std::fmt;

use super::AdminError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Editor, Role::Viewer];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Viewer => "Viewer",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
        })
    }
}

/// Assigned survey value meaning "no task".
pub const NO_ASSIGNMENT: &str = "None";

/// The editable part of a user, as held by the invite/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub zone: String,
    /// Survey title, or [`NO_ASSIGNMENT`].
    pub assigned_survey: String,
}

impl Default for UserForm {
    fn default() -> Self {
        UserForm {
            name: String::new(),
            email: String::new(),
            role: Role::Admin,
            zone: "North".to_string(),
            assigned_survey: NO_ASSIGNMENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub status: UserStatus,
    pub profile: UserForm,
}

/// Ordered list of users with its own id counter.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
    next_id: u64,
}

impl UserDirectory {
    pub fn seeded() -> Self {
        let seed = [
            ("Nikunj", "nc14842@gmail.com", Role::Admin, "North", NO_ASSIGNMENT),
            ("Amit Verma", "amit@dabur.com", Role::Editor, "West", "Q4 Audit"),
        ];
        let users = seed
            .into_iter()
            .enumerate()
            .map(|(i, (name, email, role, zone, survey))| User {
                id: i as u64 + 1,
                status: UserStatus::Active,
                profile: UserForm {
                    name: name.into(),
                    email: email.into(),
                    role,
                    zone: zone.into(),
                    assigned_survey: survey.into(),
                },
            })
            .collect::<Vec<_>>();
        let next_id = users.len() as u64 + 1;
        UserDirectory { users, next_id }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Invite a new user. New users are always active.
    pub fn add(&mut self, form: UserForm) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        log::info!("Invited user {} <{}> as {}", form.name, form.email, form.role);
        self.users.push(User {
            id,
            status: UserStatus::Active,
            profile: form,
        });
        id
    }

    pub fn update(&mut self, id: u64, form: UserForm) -> Result<(), AdminError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AdminError::UnknownUser(id))?;
        log::info!("Updated user {id}");
        user.profile = form;
        Ok(())
    }

    /// Flip a user between Active and Inactive. Returns the new status.
    pub fn toggle_status(&mut self, id: u64) -> Result<UserStatus, AdminError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AdminError::UnknownUser(id))?;
        user.status = match user.status {
            UserStatus::Active => UserStatus::Inactive,
            UserStatus::Inactive => UserStatus::Active,
        };
        log::info!("User {id} is now {}", user.status);
        Ok(user.status)
    }

    pub fn remove(&mut self, id: u64) -> Result<User, AdminError> {
        let idx = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(AdminError::UnknownUser(id))?;
        log::info!("Removed user {id}");
        Ok(self.users.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form(name: &str) -> UserForm {
        UserForm {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            ..Default::default()
        }
    }

    #[test]
    fn form_defaults() {
        let f = UserForm::default();
        assert_eq!(f.role, Role::Admin);
        assert_eq!(f.zone, "North");
        assert_eq!(f.assigned_survey, NO_ASSIGNMENT);
    }

    #[test]
    fn add_assigns_fresh_id_and_active_status() {
        let mut dir = UserDirectory::seeded();
        let id = dir.add(form("Priya"));
        assert_eq!(id, 3);
        let user = dir.get(id).unwrap();
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.profile.name, "Priya");
        assert_eq!(dir.users().len(), 3);
    }

    #[test]
    fn update_keeps_id_and_status() {
        let mut dir = UserDirectory::seeded();
        let mut changed = dir.get(2).unwrap().profile.clone();
        changed.role = Role::Viewer;
        changed.assigned_survey = "Q4 Market Sweep".into();
        dir.update(2, changed.clone()).unwrap();

        let user = dir.get(2).unwrap();
        assert_eq!(user.id, 2);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.profile, changed);
    }

    #[test]
    fn status_toggles_and_survives_update() {
        let mut dir = UserDirectory::seeded();
        assert_eq!(dir.toggle_status(1), Ok(UserStatus::Inactive));
        let profile = dir.get(1).unwrap().profile.clone();
        dir.update(1, profile).unwrap();
        assert_eq!(dir.get(1).map(|u| u.status), Some(UserStatus::Inactive));
        assert_eq!(dir.toggle_status(1), Ok(UserStatus::Active));
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut dir = UserDirectory::seeded();
        assert_eq!(dir.toggle_status(99), Err(AdminError::UnknownUser(99)));
        assert_eq!(dir.update(99, form("X")), Err(AdminError::UnknownUser(99)));
        assert_eq!(dir.remove(99).unwrap_err(), AdminError::UnknownUser(99));
    }

    #[test]
    fn remove_drops_only_that_user() {
        let mut dir = UserDirectory::seeded();
        let removed = dir.remove(1).unwrap();
        assert_eq!(removed.profile.name, "Nikunj");
        let ids: Vec<u64> = dir.users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2]);
        // Ids are never reused.
        assert_eq!(dir.add(form("Ravi")), 3);
    }
}
