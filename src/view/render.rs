use crate::models::work::Work;
use crate::view::element::Element;

pub const DELETE_CLASS: &str = "delete-work";

pub fn create_figure(work: &Work) -> Element {
    Element::new("figure")
        .attr("data-id", &work.id.to_string())
        .child(Element::new("img").attr("src", &work.image_url).attr("alt", &work.title))
        .child(Element::with_text("figcaption", &work.title))
}

/// Replaces every child of `container` with one card per work, in order.
pub fn display_works<'a, I>(works: I, container: &mut Element)
    where
        I: IntoIterator<Item=&'a Work>,
{
    container.clear_children();
    for work in works {
        container.append(create_figure(work));
    }
}

/// Modal copy of a gallery card: the image plus a delete control keyed by the same id.
pub fn create_thumbnail(card: &Element) -> Option<Element> {
    let id = card.data("id")?;
    let mut thumbnail = Element::new("figure").attr("data-id", id);
    if let Some(img) = card.children.iter().find(|child| child.tag == "img") {
        thumbnail.append(img.clone());
    }
    thumbnail.append(
        Element::with_text("button", "🗑")
            .class(DELETE_CLASS)
            .attr("data-id", id)
            .attr("type", "button"),
    );
    Some(thumbnail)
}

pub fn mirror_thumbnails(gallery: &Element, thumbnails: &mut Element) {
    thumbnails.clear_children();
    for thumbnail in gallery.children.iter().filter_map(create_thumbnail) {
        thumbnails.append(thumbnail);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::models::work::Category;

    use super::*;

    pub(crate) fn work(id: u32, title: &str, category: &str, category_id: u32) -> Work {
        Work {
            id,
            title: title.to_string(),
            image_url: format!("/images/{}.png", id),
            category_id: Some(category_id),
            user_id: Some(1),
            category: Some(Category { id: category_id, name: category.to_string() }),
        }
    }

    #[test]
    fn figure_carries_id_image_and_caption() {
        let figure = create_figure(&work(7, "Villa", "Appartements", 2));
        assert_eq!(figure.data("id"), Some("7"));
        assert_eq!(figure.children[0].attribute("src"), Some("/images/7.png"));
        assert_eq!(figure.children[1].text, "Villa");
    }

    #[test]
    fn second_render_replaces_the_first() {
        let mut container = Element::new("div");
        let first = vec![work(1, "A", "Objets", 1), work(2, "B", "Objets", 1), work(3, "C", "Hotels", 3)];
        let second = vec![work(4, "D", "Hotels", 3)];

        display_works(&first, &mut container);
        display_works(&second, &mut container);

        assert_eq!(container.children.len(), 1);
        assert_eq!(container.children[0].data("id"), Some("4"));
    }

    #[test]
    fn thumbnails_mirror_gallery_order() {
        let mut gallery = Element::new("div");
        display_works(&vec![work(1, "A", "Objets", 1), work(2, "B", "Hotels", 3)], &mut gallery);

        let mut thumbnails = Element::new("div").child(Element::new("figure"));
        mirror_thumbnails(&gallery, &mut thumbnails);

        let ids: Vec<&str> = thumbnails.children.iter().filter_map(|c| c.data("id")).collect();
        assert_eq!(ids, vec!["1", "2"]);
        let delete = thumbnails.children[0].children.last().unwrap();
        assert!(delete.has_class(DELETE_CLASS));
        assert_eq!(delete.data("id"), Some("1"));
    }
}
