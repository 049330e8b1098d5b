use base64::Engine;
use dioxus::prelude::*;
use store::gallery::is_allowed_image_url;
use store::models::{GalleryDraft, GalleryItem, Id};
use store::QueryState;

use crate::auth::confirm;
use crate::client::{query_state, use_gallery, use_site};
use crate::icons::{FaTrashCan, FaXmark};
use crate::status::{read_error, ToastMessage};
use crate::{Icon, ImageWithFallback};

/// Everything the backend holds, newest first. Unlike the public gallery,
/// entries with unusable images stay listed so they can be deleted.
fn admin_listing(mut items: Vec<GalleryItem>) -> Vec<GalleryItem> {
    items.sort_by(|a, b| b.id.cmp(&a.id));
    items
}

const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
const ALLOWED_IMAGE_TYPES: [&str; 5] = ["image/png", "image/jpeg", "image/jpg", "image/webp", "image/gif"];

/// Mime type of an uploaded image: the browser's content type when it sent
/// one, otherwise guessed from the file extension.
fn image_mime(name: &str, content_type: Option<&str>) -> Option<&'static str> {
    if let Some(content_type) = content_type.filter(|t| !t.is_empty()) {
        let content_type = content_type.to_ascii_lowercase();
        return ALLOWED_IMAGE_TYPES.into_iter().find(|allowed| *allowed == content_type);
    }
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

fn check_upload(mime: Option<&'static str>, size: u64) -> Result<&'static str, &'static str> {
    let Some(mime) = mime else {
        return Err("Please select a valid image file (PNG, JPG, WebP, or GIF)");
    };
    if size > MAX_IMAGE_BYTES {
        return Err("Image file size must be less than 5MB");
    }
    Ok(mime)
}

fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

fn check_draft(draft: &GalleryDraft) -> Result<(), &'static str> {
    if draft.title.is_empty() {
        return Err("Please enter a title");
    }
    if draft.image_url.is_empty() {
        return Err("Please select an image file or enter an image URL");
    }
    if !is_allowed_image_url(&draft.image_url) {
        return Err("Image URL must start with http://, https://, / or data:image/");
    }
    Ok(())
}

#[component]
pub fn GalleryAdmin(toast: Signal<Option<ToastMessage>>) -> Element {
    let site = use_site();
    let gallery = use_gallery();
    let mut toast = toast;
    let mut title = use_signal(String::new);
    let mut image_url = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut upload = use_signal(|| None::<String>);
    let mut upload_error = use_signal(|| None::<String>);
    // Bumped to remount the file input, which clears its selection.
    let mut file_input = use_signal(|| 0u32);

    let mut clear_upload = move || {
        upload.set(None);
        upload_error.set(None);
        file_input += 1;
    };

    let onchange_file = move |evt: FormEvent| async move {
        upload.set(None);
        upload_error.set(None);
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        let name = file.name();
        let content_type = file.content_type();
        let mime = match check_upload(image_mime(&name, content_type.as_deref()), file.size()) {
            Ok(mime) => mime,
            Err(message) => {
                upload_error.set(Some(message.to_string()));
                file_input += 1;
                return;
            }
        };
        match file.read_bytes().await {
            Ok(bytes) => upload.set(Some(to_data_url(mime, &bytes))),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", name, e);
                upload_error.set(Some("Failed to read the image file".to_string()));
            }
        }
    };

    let submit_site = site.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let site = submit_site.clone();
        async move {
            if let Some(message) = upload_error() {
                toast.set(Some(ToastMessage::Error(message)));
                return;
            }
            let draft = GalleryDraft {
                title: title().trim().to_string(),
                image_url: upload().unwrap_or_else(|| image_url().trim().to_string()),
                description: description().trim().to_string(),
            };
            if let Err(message) = check_draft(&draft) {
                toast.set(Some(ToastMessage::Error(message.to_string())));
                return;
            }
            saving.set(true);
            match site.client.add_gallery_item(draft).await {
                Ok(_) => {
                    toast.set(Some(ToastMessage::Success("Gallery item added successfully!".to_string())));
                    title.set(String::new());
                    image_url.set(String::new());
                    description.set(String::new());
                    clear_upload();
                    site.notify();
                }
                Err(e) => toast.set(Some(ToastMessage::Error(e.message))),
            }
            saving.set(false);
        }
    };

    let delete = move |id: Id| {
        let site = site.clone();
        async move {
            if !confirm("Are you sure you want to delete this gallery item?") {
                return;
            }
            match site.client.delete_gallery_item(id).await {
                Ok(()) => {
                    toast.set(Some(ToastMessage::Success("Gallery item deleted successfully!".to_string())));
                    site.notify();
                }
                Err(e) => toast.set(Some(ToastMessage::Error(e.message))),
            }
        }
    };

    let rows = match query_state(&gallery) {
        QueryState::Idle | QueryState::Loading => rsx! {
            tr { td { colspan: "3", class: "muted center", "Loading gallery..." } }
        },
        QueryState::Error(err) => {
            let message = read_error(&err);
            rsx! {
                tr { td { colspan: "3", class: "field-error center", "{message}" } }
            }
        }
        QueryState::Success(items) if items.is_empty() => rsx! {
            tr { td { colspan: "3", class: "muted center", "No gallery items found" } }
        },
        QueryState::Success(items) => rsx! {
            for item in admin_listing(items) {
                tr { key: "{item.id}",
                    td {
                        ImageWithFallback {
                            class: "thumb",
                            src: item.image_url.clone(),
                            alt: item.title.clone(),
                        }
                    }
                    td { class: "strong", "{item.title}" }
                    td { class: "actions",
                        button {
                            class: "icon-btn danger",
                            aria_label: "Delete gallery item",
                            onclick: {
                                let id = item.id;
                                let delete = delete.clone();
                                move |_| delete(id)
                            },
                            Icon { icon: FaTrashCan, width: 14, height: 14 }
                        }
                    }
                }
            }
        },
    };

    let preview = upload().unwrap_or_else(|| image_url().trim().to_string());

    rsx! {
        div { class: "grid two",
            section { class: "card",
                h3 { "Add Gallery Item" }
                p { class: "muted", "Upload an image or link one to publish it in the gallery" }
                form { class: "form", onsubmit,
                    div { class: "field",
                        label { r#for: "gallery-title", "Title" }
                        input {
                            id: "gallery-title",
                            placeholder: "Image title",
                            value: title(),
                            oninput: move |evt: FormEvent| title.set(evt.value()),
                        }
                    }
                    div { class: "field",
                        label { r#for: "gallery-description", "Description" }
                        textarea {
                            id: "gallery-description",
                            rows: "3",
                            placeholder: "Image description",
                            value: description(),
                            oninput: move |evt: FormEvent| description.set(evt.value()),
                        }
                    }
                    div { class: "field",
                        label { r#for: "gallery-file", "Image File" }
                        div { class: "row",
                            input {
                                key: "{file_input}",
                                id: "gallery-file",
                                r#type: "file",
                                accept: ALLOWED_IMAGE_TYPES.join(","),
                                onchange: onchange_file,
                            }
                            if upload().is_some() {
                                button {
                                    class: "icon-btn",
                                    r#type: "button",
                                    aria_label: "Clear selected image",
                                    onclick: move |_| clear_upload(),
                                    Icon { icon: FaXmark, width: 14, height: 14 }
                                }
                            }
                        }
                        p { class: "muted small", "PNG, JPG, WebP or GIF, up to 5MB." }
                        if let Some(message) = upload_error() {
                            p { class: "field-error", "{message}" }
                        }
                    }
                    div { class: "field",
                        label { r#for: "gallery-image", "Or Image URL" }
                        input {
                            id: "gallery-image",
                            placeholder: "https://example.org/photo.jpg",
                            disabled: upload().is_some(),
                            value: image_url(),
                            oninput: move |evt: FormEvent| {
                                image_url.set(evt.value());
                                upload_error.set(None);
                            },
                        }
                        if !preview.is_empty() && is_allowed_image_url(&preview) {
                            ImageWithFallback { class: "preview", src: preview.clone(), alt: "Preview" }
                        }
                    }
                    button {
                        class: "btn btn-primary wide",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Adding..." } else { "Add to Gallery" }
                    }
                }
            }
            section { class: "card",
                h3 { "Manage Gallery" }
                p { class: "muted", "View and delete gallery items" }
                div { class: "table-wrap",
                    table {
                        thead {
                            tr {
                                th { "Image" }
                                th { "Title" }
                                th { class: "actions", "Action" }
                            }
                        }
                        tbody { {rows} }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, image_url: &str) -> GalleryDraft {
        GalleryDraft {
            title: title.to_string(),
            image_url: image_url.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_check_draft() {
        assert_eq!(check_draft(&draft("Diwali", "https://cdn.example.org/a.jpg")), Ok(()));
        assert_eq!(check_draft(&draft("Diwali", "/assets/a.png")), Ok(()));
        assert_eq!(check_draft(&draft("", "/assets/a.png")), Err("Please enter a title"));
        assert_eq!(
            check_draft(&draft("Diwali", "")),
            Err("Please select an image file or enter an image URL")
        );
        assert_eq!(check_draft(&draft("Diwali", "data:image/png;base64,iVBORw0KGgo=")), Ok(()));
        assert!(check_draft(&draft("Diwali", "ftp://example.org/a.jpg")).is_err());
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime("holi.png", Some("image/png")), Some("image/png"));
        assert_eq!(image_mime("holi.JPG", None), Some("image/jpeg"));
        assert_eq!(image_mime("holi.webp", Some("")), Some("image/webp"));
        assert_eq!(image_mime("minutes.pdf", Some("application/pdf")), None);
        assert_eq!(image_mime("vector.svg", None), None);
        assert_eq!(image_mime("no-extension", None), None);
    }

    #[test]
    fn test_check_upload_limits() {
        assert_eq!(check_upload(Some("image/gif"), MAX_IMAGE_BYTES), Ok("image/gif"));
        assert_eq!(
            check_upload(Some("image/png"), MAX_IMAGE_BYTES + 1),
            Err("Image file size must be less than 5MB")
        );
        assert!(check_upload(None, 10).is_err());
    }

    #[test]
    fn test_data_url_is_an_allowed_image_reference() {
        let url = to_data_url("image/png", &[0x89, b'P', b'N', b'G']);
        assert_eq!(url, "data:image/png;base64,iVBORw==");
        assert!(is_allowed_image_url(&url));
    }

    #[test]
    fn test_admin_listing_keeps_unusable_items() {
        let item = |id, image_url: &str| GalleryItem {
            id,
            title: String::new(),
            description: String::new(),
            image_url: image_url.to_string(),
        };
        let listed = admin_listing(vec![item(1, "/a.png"), item(3, "bogus"), item(2, "/b.png")]);
        let ids: Vec<Id> = listed.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
