use stores::VerificationLink;
use wasm_bindgen::JsValue;
use yew::prelude::*;

use crate::contexts::{storefront::use_storefront, toast::use_toast};

#[derive(Debug, Clone, PartialEq)]
pub enum VerificationStatus {
    /// The page was not opened from a verification link.
    Idle,
    Verifying,
    Verified,
    Failed(String),
}

fn take_verification_link() -> Option<VerificationLink> {
    let window = web_sys::window()?;
    let location = window.location();
    let link = VerificationLink::from_query(&location.search().ok()?)?;

    // Drop the token from the address bar so a reload does not resend it.
    let path = location.pathname().unwrap_or_else(|_| "/".into());
    if let Ok(history) = window.history()
        && let Err(e) =
            history.replace_state_with_url(&JsValue::NULL, "", Some(&path))
    {
        tracing::warn!("Could not strip verification query: {e:?}");
    }
    Some(link)
}

/// Verify the signed-in user's email when the page was opened from a
/// verification link (`?token=..&email=..`).
#[hook]
pub fn use_email_verification() -> VerificationStatus {
    let storefront = use_storefront();
    let toast = use_toast();
    let status = use_state(|| VerificationStatus::Idle);

    {
        let status = status.clone();
        use_effect_with((), move |_| {
            if let Some(link) = take_verification_link() {
                status.set(VerificationStatus::Verifying);
                wasm_bindgen_futures::spawn_local(async move {
                    match storefront.auth.verify_email(link).await {
                        Ok(()) => {
                            toast.success("Your email address is verified");
                            status.set(VerificationStatus::Verified);
                        }
                        Err(e) => {
                            let message = e.to_string();
                            toast.error(message.clone());
                            status.set(VerificationStatus::Failed(message));
                        }
                    }
                });
            }
        });
    }

    (*status).clone()
}
