use quadra_core::models::usuario::Usuario;

/// An authenticated session: the opaque token plus the signed-in user.
///
/// Constructed by a successful login and passed explicitly to whoever needs
/// it; there is no ambient global session state. Dropping the value (or
/// calling [`crate::http::ApiClient::logout`]) is the teardown.
#[derive(Debug, Clone)]
pub struct Sessao {
    pub token: String,
    pub usuario: Usuario,
}

impl Sessao {
    pub fn nova(token: String, usuario: Usuario) -> Self {
        Self { token, usuario }
    }
}
