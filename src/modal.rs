//! Admin workflow behind the edit modal: listing, deleting and adding works.
//!
//! Server calls are single attempts. On failure the page is left exactly as it was.

use log::{debug, error, info, warn};
use reqwest::StatusCode;

use crate::catalog::Catalog;
use crate::clients::api_client::{NewWork, WorksApi};
use crate::models::work::{CategoryId, WorkId};
use crate::preview::ImageFile;
use crate::view::element::Element;
use crate::view::page::{Page, FORM_ERROR_TEXT};
use crate::view::render::{create_figure, create_thumbnail, mirror_thumbnails};

pub const UPLOAD_ERROR_TEXT: &str = "Erreur lors de l'ajout du projet";
pub const FILE_TOO_LARGE_TEXT: &str = "L'image dépasse la taille maximale autorisée";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    CloseButton,
    Backdrop,
    Content,
}

#[derive(Debug, Clone, Default)]
pub struct AddWorkForm {
    pub image: Option<ImageFile>,
    pub title: String,
    pub category: Option<CategoryId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Invalid,
    Added(WorkId),
    Rejected(StatusCode),
    Failed,
}

pub fn set_modal_visible(page: &mut Page, visible: bool) {
    page.modal.root.set_hidden(!visible);
}

pub fn open_modal(page: &mut Page, catalog: &Catalog) {
    set_modal_visible(page, true);
    mirror_thumbnails(&page.gallery, &mut page.modal.thumbnails);
    populate_categories(&mut page.modal.category_select, catalog);
    page.modal.form_error.set_hidden(true);
    page.modal.success_message.set_hidden(true);
    debug!("modal opened with {} thumbnails", page.modal.thumbnails.children.len());
}

/// Clicks on the modal content itself keep it open. Returns whether it closed.
pub fn close_modal(page: &mut Page, click: ModalClick) -> bool {
    match click {
        ModalClick::Content => false,
        ModalClick::CloseButton | ModalClick::Backdrop => {
            set_modal_visible(page, false);
            page.modal.success_message.set_hidden(true);
            true
        }
    }
}

pub fn populate_categories(select: &mut Element, catalog: &Catalog) {
    select.clear_children();
    select.append(Element::new("option").attr("value", ""));
    for category in catalog.category_options() {
        select.append(Element::with_text("option", &category.name).attr("value", &category.id.to_string()));
    }
}

pub fn show_preview(page: &mut Page, image: &ImageFile, src: String) {
    match image.preview(src) {
        Ok(preview) => {
            page.modal.preview.set_attribute("src", &preview.src);
            page.modal.preview.set_attribute("width", &preview.width.to_string());
            page.modal.preview.set_attribute("height", &preview.height.to_string());
            page.modal.preview.set_hidden(false);
        }
        Err(err) => {
            warn!("can't preview {}: {}", image.file_name, err);
            page.modal.preview.set_hidden(true);
        }
    }
}

/// Removes the work from the modal list, the gallery and the catalog, but only
/// once the server accepted the delete.
pub async fn delete_work(
    api: &dyn WorksApi,
    token: &str,
    id: WorkId,
    page: &mut Page,
    catalog: &mut Catalog,
) -> bool {
    match api.delete_work(id, token).await {
        Ok(reply) if reply.is_success() => {
            let key = id.to_string();
            page.modal.thumbnails.remove_children_by_data("id", &key);
            page.gallery.remove_children_by_data("id", &key);
            catalog.remove(id);
            info!("work {} deleted", id);
            true
        }
        Ok(reply) => {
            warn!("delete of work {} refused: {}", id, reply.status);
            false
        }
        Err(err) => {
            error!("delete of work {} failed: {}", id, err);
            false
        }
    }
}

pub fn validate(form: &AddWorkForm, max_upload_bytes: u64) -> Result<NewWork, &'static str> {
    let title = form.title.trim();
    match (&form.image, form.category) {
        (Some(image), Some(category)) if !title.is_empty() => {
            if image.len() > max_upload_bytes {
                return Err(FILE_TOO_LARGE_TEXT);
            }
            Ok(NewWork { image: image.clone(), title: title.to_string(), category })
        }
        _ => Err(FORM_ERROR_TEXT),
    }
}

pub fn show_form_error(page: &mut Page, message: &str) {
    page.modal.form_error.set_text(message);
    page.modal.form_error.set_hidden(false);
}

pub async fn submit_add(
    api: &dyn WorksApi,
    token: &str,
    form: &AddWorkForm,
    max_upload_bytes: u64,
    page: &mut Page,
    catalog: &mut Catalog,
) -> AddOutcome {
    let new_work = match validate(form, max_upload_bytes) {
        Ok(new_work) => new_work,
        Err(message) => {
            show_form_error(page, message);
            return AddOutcome::Invalid;
        }
    };
    page.modal.form_error.set_hidden(true);

    let reply = match api.create_work(&new_work, token).await {
        Ok(reply) => reply,
        Err(err) => {
            error!("upload of {} failed: {}", new_work.title, err);
            return AddOutcome::Failed;
        }
    };

    let mut created = match reply.body {
        Some(created) if reply.status.is_success() => created,
        _ => {
            warn!("upload of {} refused: {}", new_work.title, reply.status);
            return AddOutcome::Rejected(reply.status);
        }
    };

    if created.category.is_none() {
        let category_id = created.category_id.unwrap_or(new_work.category);
        created.category = catalog.category_by_id(category_id).cloned();
    }

    let figure = create_figure(&created);
    if let Some(thumbnail) = create_thumbnail(&figure) {
        page.modal.thumbnails.append(thumbnail);
    }
    page.gallery.append(figure);

    page.modal.success_message.set_hidden(false);
    page.modal.preview.set_hidden(true);
    page.modal.preview.attributes.remove("src");

    let id = created.id;
    info!("work {} added", id);
    catalog.append(created);
    AddOutcome::Added(id)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use crate::preview::tests::png_bytes;

    use super::*;

    fn image() -> ImageFile {
        ImageFile::from_bytes("villa.png".to_string(), png_bytes(2, 2)).unwrap()
    }

    #[test]
    fn validation_requires_every_field() {
        let full = AddWorkForm { image: Some(image()), title: "Villa".to_string(), category: Some(2) };
        assert!(validate(&full, 1024 * 1024).is_ok());

        let no_title = AddWorkForm { title: "   ".to_string(), ..full.clone() };
        assert_eq!(validate(&no_title, 1024 * 1024).err(), Some(FORM_ERROR_TEXT));

        let no_image = AddWorkForm { image: None, ..full.clone() };
        assert_eq!(validate(&no_image, 1024 * 1024).err(), Some(FORM_ERROR_TEXT));

        let no_category = AddWorkForm { category: None, ..full };
        assert_eq!(validate(&no_category, 1024 * 1024).err(), Some(FORM_ERROR_TEXT));
    }

    #[test]
    fn oversized_image_is_rejected() {
        let form = AddWorkForm { image: Some(image()), title: "Villa".to_string(), category: Some(2) };
        assert_eq!(validate(&form, 4).err(), Some(FILE_TOO_LARGE_TEXT));
    }

    #[test]
    fn content_click_keeps_modal_open() {
        let mut page = Page::new();
        open_modal(&mut page, &Catalog::new());
        assert!(page.modal.is_visible());

        assert!(!close_modal(&mut page, ModalClick::Content));
        assert!(page.modal.is_visible());
        assert!(close_modal(&mut page, ModalClick::Backdrop));
        assert!(!page.modal.is_visible());
    }

    #[test]
    fn broken_image_hides_preview() {
        let mut page = Page::new();
        let bogus = ImageFile {
            file_name: "broken.png".to_string(),
            mime: "image/png".to_string(),
            bytes: Bytes::from_static(b"\x89PNG\r\n\x1a\n"),
        };
        show_preview(&mut page, &bogus, "broken.png".to_string());
        assert!(page.modal.preview.is_hidden());

        show_preview(&mut page, &image(), "villa.png".to_string());
        assert!(!page.modal.preview.is_hidden());
        assert_eq!(page.modal.preview.attribute("width"), Some("2"));
    }
}
