use api::models::ImageOwner;
use dioxus::prelude::*;

use crate::activity_log::{log_activity, log_api_error, use_activity_log, LogLevel};
use crate::platform::make_client;

/// An image the user just picked.
pub(crate) struct PickedImage {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Read the first file of a file input change.
pub(crate) async fn picked_image(evt: &FormEvent) -> Result<Option<PickedImage>, String> {
    let Some(file) = evt.files().into_iter().next() else {
        return Ok(None);
    };
    let content_type = file
        .content_type()
        .unwrap_or_else(|| "image/jpeg".to_string());
    if !content_type.starts_with("image/") {
        return Err("Please choose an image file.".to_string());
    }
    let bytes = file.read_bytes().await.map_err(|e| e.to_string())?;
    Ok(Some(PickedImage {
        name: file.name(),
        content_type,
        bytes: bytes.to_vec(),
    }))
}

/// Current portrait of a teacher or student, with a file picker to replace it.
#[component]
pub fn PortraitUpload(owner: ImageOwner, owner_id: i64) -> Element {
    let mut log = use_activity_log();
    let mut version = use_signal(|| 0u32);
    let mut uploading = use_signal(|| false);

    let portrait = use_resource(move || async move {
        let _ = version();
        let client = make_client();
        client
            .get_portrait(owner, owner_id)
            .await
            .map(|p| p.map(|p| client.image_url(&p.image_path)))
    });

    let on_pick = move |evt: FormEvent| async move {
        let image = match picked_image(&evt).await {
            Ok(Some(image)) => image,
            Ok(None) => return,
            Err(message) => {
                log_activity(&mut log, LogLevel::Warning, &message);
                return;
            }
        };
        uploading.set(true);
        match make_client()
            .upload_portrait(owner, owner_id, &image.name, image.bytes)
            .await
        {
            Ok(()) => {
                log_activity(&mut log, LogLevel::Success, "Portrait updated");
                version += 1;
            }
            Err(e) => log_api_error(&mut log, &e),
        }
        uploading.set(false);
    };

    rsx! {
        div { class: "portrait",
            match &*portrait.read() {
                Some(Ok(Some(url))) => rsx! {
                    img { class: "portrait-image", src: "{url}", alt: "Portrait" }
                },
                Some(Ok(None)) => rsx! {
                    div { class: "portrait-placeholder", "No portrait yet" }
                },
                Some(Err(e)) => rsx! {
                    div { class: "portrait-placeholder", {e.user_message()} }
                },
                None => rsx! {
                    div { class: "portrait-placeholder", "Loading..." }
                },
            }
            label { class: "btn btn-secondary portrait-pick",
                if uploading() { "Uploading..." } else { "Change portrait" }
                input {
                    r#type: "file",
                    accept: "image/*",
                    hidden: true,
                    disabled: uploading(),
                    onchange: on_pick,
                }
            }
        }
    }
}
