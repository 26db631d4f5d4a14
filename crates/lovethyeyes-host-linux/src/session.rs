//! Session termination strategies

use async_trait::async_trait;
use lovethyeyes_host_api::{HostError, HostResult, SessionTerminator};
use nix::unistd::{User, getuid};
use tokio::process::Command;
use tracing::debug;

/// Ask the GNOME session manager to log out without a confirmation dialog
pub struct GnomeSessionLogout;

#[async_trait]
impl SessionTerminator for GnomeSessionLogout {
    fn name(&self) -> &'static str {
        "gnome-session"
    }

    async fn terminate(&self) -> HostResult<()> {
        // Logout(mode = 0): normal logout, no confirmation
        run_command(
            self.name(),
            "gdbus",
            &[
                "call",
                "--session",
                "--dest",
                "org.gnome.SessionManager",
                "--object-path",
                "/org/gnome/SessionManager",
                "--method",
                "org.gnome.SessionManager.Logout",
                "0",
            ],
        )
        .await
    }
}

/// Terminate every session of the user through systemd-logind
pub struct LoginctlTerminate {
    user: String,
}

impl LoginctlTerminate {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }

    /// Resolve the current user from the passwd database, then `$USER`
    pub fn for_current_user() -> Self {
        let user = User::from_uid(getuid())
            .ok()
            .flatten()
            .map(|u| u.name)
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_default();
        Self::new(user)
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

#[async_trait]
impl SessionTerminator for LoginctlTerminate {
    fn name(&self) -> &'static str {
        "loginctl"
    }

    async fn terminate(&self) -> HostResult<()> {
        if self.user.is_empty() {
            return Err(HostError::TerminateFailed {
                strategy: self.name(),
                message: "could not determine the current user".into(),
            });
        }
        run_command(self.name(), "loginctl", &["terminate-user", &self.user]).await
    }
}

async fn run_command(strategy: &'static str, program: &str, args: &[&str]) -> HostResult<()> {
    debug!(strategy, program, ?args, "Running session command");

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| HostError::TerminateFailed {
            strategy,
            message: format!("failed to run {}: {}", program, e),
        })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(HostError::TerminateFailed {
        strategy,
        message: format!("{} exited with {}: {}", program, output.status, stderr.trim()),
    })
}
