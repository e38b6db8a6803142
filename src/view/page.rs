use crate::view::element::Element;

pub const FORM_ERROR_TEXT: &str = "Veuillez remplir tous les champs";
pub const UPLOAD_SUCCESS_TEXT: &str = "Projet ajouté avec succès";
pub const LOGIN_ERROR_TEXT: &str = "Identifiant ou mot de passe incorrect";

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: Element,
    pub password: Element,
    pub error_message: Element,
}

#[derive(Debug, Clone)]
pub struct Modal {
    pub root: Element,
    pub thumbnails: Element,
    pub category_select: Element,
    pub preview: Element,
    pub form_error: Element,
    pub success_message: Element,
}

impl Modal {
    pub fn is_visible(&self) -> bool {
        !self.root.is_hidden()
    }
}

/// The regions of the portfolio page the scripts touch.
#[derive(Debug, Clone)]
pub struct Page {
    pub login_link: Element,
    pub admin_bar: Element,
    pub open_modal_buttons: Vec<Element>,
    pub filters: Element,
    pub gallery: Element,
    pub login_form: LoginForm,
    pub modal: Modal,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            login_link: Element::with_text("a", "login").attr("id", "login-link"),
            admin_bar: Element::with_text("div", "Mode édition").attr("id", "admin-bar").class("hidden"),
            open_modal_buttons: vec![
                Element::with_text("button", "modifier").attr("id", "add-project-btn").class("open-modal").class("hidden"),
            ],
            filters: Element::new("div").class("filtres"),
            gallery: Element::new("div").class("gallery"),
            login_form: LoginForm {
                email: Element::new("input").attr("id", "login-email").attr("type", "email"),
                password: Element::new("input").attr("id", "login-password").attr("type", "password"),
                error_message: Element::new("p").attr("id", "error-message"),
            },
            modal: Modal {
                root: Element::new("aside").attr("id", "edit-modal").class("hidden"),
                thumbnails: Element::new("div").class("modal-gallery"),
                category_select: Element::new("select").attr("id", "category"),
                preview: Element::new("img").attr("id", "image-preview").class("hidden"),
                form_error: Element::with_text("p", FORM_ERROR_TEXT).attr("id", "form-error").class("hidden"),
                success_message: Element::with_text("p", UPLOAD_SUCCESS_TEXT).attr("id", "upload-success").class("hidden"),
            },
        }
    }

    pub fn to_html(&self) -> String {
        let mut header = Element::new("header")
            .child(self.admin_bar.clone())
            .child(Element::new("nav").child(self.login_link.clone()));
        for button in &self.open_modal_buttons {
            header.append(button.clone());
        }

        let portfolio = Element::new("section")
            .attr("id", "portfolio")
            .child(self.filters.clone())
            .child(self.gallery.clone());

        let modal = self.modal.root.clone()
            .child(Element::new("div").class("modal-content")
                .child(Element::with_text("button", "×").class("close-modal"))
                .child(self.modal.thumbnails.clone())
                .child(Element::new("form").attr("id", "add-work-form")
                    .child(self.modal.preview.clone())
                    .child(Element::new("input").attr("id", "image").attr("type", "file"))
                    .child(Element::new("input").attr("id", "title").attr("type", "text"))
                    .child(self.modal.category_select.clone())
                    .child(self.modal.form_error.clone())
                    .child(self.modal.success_message.clone())));

        let body = Element::new("body")
            .child(header)
            .child(Element::new("main").child(portfolio))
            .child(modal);

        format!("<!DOCTYPE html>\n<html lang=\"fr\">{}</html>\n", body)
    }
}
