/// Decides whether an email/password pair belongs to the administrator.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> bool;
}

/// A single admin account configured through the environment. With no account configured every
/// login attempt is rejected.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    email: Option<String>,
    password: Option<String>,
}

impl StaticCredentials {
    pub fn new(email: Option<String>, password: Option<String>) -> Self {
        StaticCredentials { email, password }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, email: &str, password: &str) -> bool {
        match (&self.email, &self.password) {
            (Some(admin_email), Some(admin_password)) => {
                email == admin_email && password == admin_password
            }
            _ => false,
        }
    }
}
