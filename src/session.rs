use std::time::{Duration, Instant};

/// Who is signed in. There is no real identity provider behind this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl Profile {
    fn new(name: &str, email: &str) -> Self {
        Profile {
            name: name.into(),
            email: email.into(),
            role: "Admin".into(),
        }
    }

    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

/// Mocked SSO login: `begin_sso` starts a fixed delay after which `poll`
/// signs the user in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    SignedOut,
    SigningIn {
        started_at: Instant,
    },
    SignedIn(Profile),
}

impl Session {
    pub fn begin_sso(&mut self, now: Instant) {
        if matches!(self, Session::SignedOut) {
            *self = Session::SigningIn { started_at: now };
        }
    }

    /// Finish a pending sign-in once `delay` has elapsed. Returns true when
    /// this call completed it.
    pub fn poll(&mut self, now: Instant, delay: Duration) -> bool {
        match self {
            Session::SigningIn { started_at } if now.duration_since(*started_at) >= delay => {
                let profile = Profile::new("Azure User", "user@azure.com");
                log::info!("Signed in as {}", profile.email);
                *self = Session::SignedIn(profile);
                true
            }
            _ => false,
        }
    }

    /// Dev mode: sign in immediately.
    pub fn bypass(&mut self) {
        log::info!("Signed in through dev bypass");
        *self = Session::SignedIn(Profile::new("Dev Admin", "dev@local"));
    }

    pub fn sign_out(&mut self) {
        *self = Session::SignedOut;
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Session::SignedIn(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Session::SigningIn { .. })
    }
}
