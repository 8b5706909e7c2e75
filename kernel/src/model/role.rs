use strum::{Display, EnumString};

/// Caller capability evaluated once per action; the wire forms are the
/// role strings the institution uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Role {
    #[strum(serialize = "docente")]
    Teacher,
    #[strum(serialize = "administrador")]
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}
