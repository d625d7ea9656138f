//! Navigation side effects
//!
//! The gateway and the flow controller report navigation through the
//! `Navigator` trait instead of touching the host shell directly, so
//! tests can observe redirects with a recording double and production
//! can bind the router of the embedding application.

/// Destinations the auth flows navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Login,
    SignUp,
    Dashboard,
}

impl NavTarget {
    /// Route path of this destination in the host application
    pub fn path(&self) -> &'static str {
        match self {
            NavTarget::Login => "/login",
            NavTarget::SignUp => "/signup",
            NavTarget::Dashboard => "/dashboard",
        }
    }
}

/// Whether the navigation pushes onto or replaces the history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMode {
    Push,
    Replace,
}

/// Capability to move the user to another part of the application
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: NavTarget, mode: NavMode);
}
