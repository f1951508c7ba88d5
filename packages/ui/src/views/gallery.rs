use api::GalleryImage;
use dioxus::prelude::*;

use crate::activity_log::{log_activity, log_api_error, use_activity_log, LogLevel};
use crate::image_crop::crop_square_jpeg;
use crate::platform::make_client;

use super::portrait::picked_image;
use super::ConfirmDialog;

/// Face images enrolled for a parent: upload (cropped to a centered square)
/// and delete.
#[component]
pub fn ParentGallery(parent_id: i64) -> Element {
    let mut log = use_activity_log();
    let mut version = use_signal(|| 0u32);
    let mut uploading = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<GalleryImage>::None);

    let images = use_resource(move || async move {
        let _ = version();
        make_client().list_gallery(parent_id).await
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
        let cropped = crop_square_jpeg(&image.bytes, &image.content_type).await;
        match cropped {
            Ok(jpeg) => match make_client().upload_gallery_image(parent_id, jpeg).await {
                Ok(()) => {
                    log_activity(&mut log, LogLevel::Success, "Image uploaded");
                    version += 1;
                }
                Err(e) => log_api_error(&mut log, &e),
            },
            Err(message) => log_activity(&mut log, LogLevel::Error, &message),
        }
        uploading.set(false);
    };

    let confirm_delete = move |_| async move {
        let Some(image) = pending_delete.take() else {
            return;
        };
        match make_client().delete_gallery_image(image.id).await {
            Ok(()) => {
                log_activity(&mut log, LogLevel::Success, "Image deleted");
                version += 1;
            }
            Err(e) => log_api_error(&mut log, &e),
        }
    };

    let client = make_client();

    rsx! {
        div { class: "gallery",
            div { class: "gallery-header",
                h3 { "Face images" }
                label { class: "btn btn-secondary",
                    if uploading() { "Uploading..." } else { "Add image" }
                    input {
                        r#type: "file",
                        accept: "image/*",
                        hidden: true,
                        disabled: uploading(),
                        onchange: on_pick,
                    }
                }
            }
            match &*images.read() {
                None => rsx! { p { "Loading..." } },
                Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "gallery-empty", "No images for this parent yet." }
                },
                Some(Ok(list)) => rsx! {
                    div { class: "gallery-grid",
                        for image in list.iter().cloned() {
                            div { key: "{image.id}", class: "gallery-item",
                                img { src: client.image_url(&image.image_path), alt: "Face image" }
                                button {
                                    class: "btn btn-destructive gallery-delete",
                                    onclick: move |_| pending_delete.set(Some(image.clone())),
                                    "Delete"
                                }
                            }
                        }
                    }
                },
            }
            if pending_delete().is_some() {
                ConfirmDialog {
                    message: "Delete this image?",
                    on_confirm: confirm_delete,
                    on_cancel: move |_| pending_delete.set(None),
                }
            }
        }
    }
}
