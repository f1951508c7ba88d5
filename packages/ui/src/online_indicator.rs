//! Backend connectivity indicator for the navbar.

use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::icons::{FaCloud, FaCloudBolt, FaUserSlash};
use crate::Icon;

/// A small icon that shows whether the session is live.
///
/// - **Signed in + online**: cloud icon ("Connected")
/// - **Signed in + offline**: cloud-bolt icon ("Backend unreachable")
/// - **No session**: slashed-user icon ("Not signed in")
#[component]
pub fn OnlineIndicator() -> Element {
    let auth = use_auth();
    let state = auth();

    match (&state.account, state.online) {
        (Some(account), true) => rsx! {
            span {
                class: "online-indicator online-indicator--connected",
                title: "Connected as {account.username}",
                Icon { icon: FaCloud, width: 14, height: 14 }
            }
        },
        (Some(_), false) => rsx! {
            span {
                class: "online-indicator online-indicator--offline",
                title: "Backend unreachable",
                Icon { icon: FaCloudBolt, width: 14, height: 14 }
            }
        },
        (None, _) => rsx! {
            span {
                class: "online-indicator online-indicator--anonymous",
                title: "Not signed in",
                Icon { icon: FaUserSlash, width: 14, height: 14 }
            }
        },
    }
}
