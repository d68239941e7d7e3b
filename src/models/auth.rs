use serde::{Deserialize, Serialize};

/// Identidad del llamador autenticado
///
/// La inserta el middleware de autenticación en las extensiones de la
/// request y se pasa explícitamente a cada operación que filtra por dueño.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into() }
    }

    pub fn owner_id(&self) -> &str {
        &self.user_id
    }
}
