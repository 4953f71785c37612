use std::collections::BTreeSet;

/// Permissions shown in the account-settings role editor. Nothing in the
/// client enforces them; the backend owns authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    ViewEvents,
    ManageEvents,
    ViewAttendees,
    CheckInAttendees,
    ViewOrders,
    RefundOrders,
    ManageTeam,
}

impl Permission {
    pub const ALL: [Permission; 7] = [
        Permission::ViewEvents,
        Permission::ManageEvents,
        Permission::ViewAttendees,
        Permission::CheckInAttendees,
        Permission::ViewOrders,
        Permission::RefundOrders,
        Permission::ManageTeam,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Permission::ViewEvents => "View events",
            Permission::ManageEvents => "Create and edit events",
            Permission::ViewAttendees => "View attendees",
            Permission::CheckInAttendees => "Check in attendees",
            Permission::ViewOrders => "View orders",
            Permission::RefundOrders => "Refund and cancel orders",
            Permission::ManageTeam => "Manage team roles",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: String,
    pub permissions: BTreeSet<Permission>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleError {
    #[error("role name cannot be empty")]
    EmptyName,
    #[error("a role named \"{0}\" already exists")]
    Duplicate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleBook {
    roles: Vec<Role>,
}

impl Default for RoleBook {
    fn default() -> Self {
        let all: BTreeSet<Permission> = Permission::ALL.into_iter().collect();
        let staff = [
            Permission::ViewEvents,
            Permission::ViewAttendees,
            Permission::CheckInAttendees,
        ]
        .into_iter()
        .collect();
        let finance = [
            Permission::ViewEvents,
            Permission::ViewOrders,
            Permission::RefundOrders,
        ]
        .into_iter()
        .collect();

        Self {
            roles: vec![
                Role {
                    name: "Owner".to_string(),
                    permissions: all,
                },
                Role {
                    name: "Door Staff".to_string(),
                    permissions: staff,
                },
                Role {
                    name: "Finance".to_string(),
                    permissions: finance,
                },
            ],
        }
    }
}

impl RoleBook {
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has(&self, role: &str, permission: Permission) -> bool {
        self.roles
            .iter()
            .find(|r| r.name == role)
            .is_some_and(|r| r.permissions.contains(&permission))
    }

    /// Returns the new state of the permission, or `None` for an unknown role.
    pub fn toggle_permission(&mut self, role: &str, permission: Permission) -> Option<bool> {
        let entry = self.roles.iter_mut().find(|r| r.name == role)?;
        if entry.permissions.remove(&permission) {
            Some(false)
        } else {
            entry.permissions.insert(permission);
            Some(true)
        }
    }

    pub fn add_role(&mut self, name: &str) -> Result<(), RoleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RoleError::EmptyName);
        }
        if self
            .roles
            .iter()
            .any(|r| r.name.eq_ignore_ascii_case(name))
        {
            return Err(RoleError::Duplicate(name.to_string()));
        }
        self.roles.push(Role {
            name: name.to_string(),
            permissions: BTreeSet::new(),
        });
        Ok(())
    }

    pub fn remove_role(&mut self, name: &str) -> bool {
        let before = self.roles.len();
        self.roles.retain(|r| r.name != name);
        self.roles.len() != before
    }
}
