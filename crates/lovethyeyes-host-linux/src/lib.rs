//! Linux host adapter for lovethyeyes
//!
//! Provides:
//! - Prompt dispatch through the freedesktop notification service, with
//!   action buttons reported back as host events
//! - Session logout via the GNOME session manager, or loginctl as a fallback

mod notifier;
mod session;

pub use notifier::*;
pub use session::*;

use lovethyeyes_host_api::FallbackTerminator;

/// The termination chain used on Linux desktops
pub type LinuxSessionTerminator = FallbackTerminator<GnomeSessionLogout, LoginctlTerminate>;

/// GNOME session manager first, then `loginctl terminate-user`
pub fn linux_session_terminator() -> LinuxSessionTerminator {
    FallbackTerminator::new(GnomeSessionLogout, LoginctlTerminate::for_current_user())
}
