//! Fixed page layout
//!
//! The newspaper is two pages of five slots each. Every slot carries
//! fixed color tokens, and position 2 of each page is the featured
//! slot. The mapping is a declarative `(page, position) -> style`
//! table, filled by exactly one article per slot.

use crate::data::{Article, ArticleImage};

use super::newspaper::ArticleStub;

/// One slot of the fixed layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSlot {
    pub page: u8,
    pub position: u8,
    pub border_color: &'static str,
    pub headline_color: &'static str,
    pub featured: bool,
}

const fn slot(
    page: u8,
    position: u8,
    border_color: &'static str,
    headline_color: &'static str,
    featured: bool,
) -> LayoutSlot {
    LayoutSlot {
        page,
        position,
        border_color,
        headline_color,
        featured,
    }
}

/// The ten slots in reading order
pub const LAYOUT_SLOTS: [LayoutSlot; 10] = [
    // Page 1
    slot(1, 1, "border-green-500", "text-green-700", false),
    slot(1, 2, "border-blue-500", "text-blue-700", true),
    slot(1, 3, "border-purple-500", "text-purple-700", false),
    slot(1, 4, "border-teal-500", "text-teal-700", false),
    slot(1, 5, "border-rose-500", "text-rose-700", false),
    // Page 2
    slot(2, 1, "border-orange-500", "text-orange-700", false),
    slot(2, 2, "border-indigo-500", "text-indigo-700", true),
    slot(2, 3, "border-pink-500", "text-pink-700", false),
    slot(2, 4, "border-cyan-500", "text-cyan-700", false),
    slot(2, 5, "border-lime-500", "text-lime-700", false),
];

/// Assign article stubs to the ten layout slots
///
/// Featured stubs fill the featured slots in order; the rest fill the
/// regular slots in order. Always yields ten articles: a slot whose
/// stub (or stub field) is missing gets safe defaults instead of
/// failing the newspaper.
pub fn assign_slots(stubs: Vec<ArticleStub>) -> Vec<Article> {
    let (featured, regular): (Vec<_>, Vec<_>) = stubs.into_iter().partition(|s| s.featured);
    let mut featured = featured.into_iter();
    let mut regular = regular.into_iter();

    LAYOUT_SLOTS
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let stub = if slot.featured {
                featured.next()
            } else {
                regular.next()
            };
            place(stub.unwrap_or_default(), slot, index)
        })
        .collect()
}

fn place(stub: ArticleStub, slot: &LayoutSlot, index: usize) -> Article {
    let image_alt = stub
        .image_alt
        .or_else(|| stub.headline.clone())
        .unwrap_or_default();

    Article {
        id: stub.id.unwrap_or_else(|| format!("article-{}", index)),
        headline: stub.headline.unwrap_or_else(|| "News Story!".to_string()),
        body_text: stub.body_text.unwrap_or_default(),
        images: vec![ArticleImage {
            url: "placeholder".to_string(),
            alt: image_alt,
        }],
        border_color: slot.border_color.to_string(),
        headline_color: slot.headline_color.to_string(),
        page: slot.page,
        position: slot.position,
        featured: slot.featured,
        row: None,
        col_span: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(id: &str, featured: bool) -> ArticleStub {
        ArticleStub {
            id: Some(id.to_string()),
            headline: Some(format!("{} Headline!", id)),
            body_text: Some(format!("{} body", id)),
            featured,
            image_alt: Some(format!("{} illustration", id)),
        }
    }

    fn ten_stubs() -> Vec<ArticleStub> {
        // Two featured first, then eight regular, matching the prompt contract
        let mut stubs = vec![stub("feat-a", true), stub("feat-b", true)];
        stubs.extend((0..8).map(|i| stub(&format!("reg-{}", i), false)));
        stubs
    }

    #[test]
    fn layout_table_has_one_featured_slot_per_page() {
        assert_eq!(LAYOUT_SLOTS.len(), 10);
        for page in 1..=2u8 {
            let slots: Vec<_> = LAYOUT_SLOTS.iter().filter(|s| s.page == page).collect();
            assert_eq!(slots.len(), 5);
            let featured: Vec<_> = slots.iter().filter(|s| s.featured).collect();
            assert_eq!(featured.len(), 1);
            assert_eq!(featured[0].position, 2);
        }
    }

    #[test]
    fn assigns_featured_stubs_to_featured_slots() {
        let articles = assign_slots(ten_stubs());

        assert_eq!(articles.len(), 10);
        assert_eq!(articles[1].id, "feat-a");
        assert_eq!(articles[1].page, 1);
        assert_eq!(articles[1].position, 2);
        assert!(articles[1].featured);
        assert_eq!(articles[6].id, "feat-b");
        assert_eq!(articles[6].page, 2);
        assert_eq!(articles[6].position, 2);
        assert!(articles[6].featured);

        // Regular stubs keep their order across the remaining slots
        let regular_ids: Vec<_> = articles
            .iter()
            .filter(|a| !a.featured)
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(
            regular_ids,
            vec!["reg-0", "reg-1", "reg-2", "reg-3", "reg-4", "reg-5", "reg-6", "reg-7"]
        );
    }

    #[test]
    fn slot_colors_come_from_the_table() {
        let articles = assign_slots(ten_stubs());

        for (article, slot) in articles.iter().zip(LAYOUT_SLOTS.iter()) {
            assert_eq!(article.border_color, slot.border_color);
            assert_eq!(article.headline_color, slot.headline_color);
        }
    }

    #[test]
    fn short_stub_list_still_fills_ten_slots() {
        let stubs = vec![stub("feat-a", true), stub("reg-0", false)];
        let articles = assign_slots(stubs);

        assert_eq!(articles.len(), 10);
        // Missing slots get defaults rather than dropping out
        assert_eq!(articles[6].id, "article-6");
        assert_eq!(articles[6].headline, "News Story!");
        assert_eq!(articles[6].body_text, "");
        assert_eq!(articles[9].id, "article-9");
        // Image reference defaults to the pre-illustration placeholder
        assert_eq!(articles[9].images[0].url, "placeholder");
    }

    #[test]
    fn stub_without_alt_falls_back_to_headline() {
        let mut stubs = ten_stubs();
        stubs[0].image_alt = None;

        let articles = assign_slots(stubs);
        assert_eq!(articles[1].images[0].alt, "feat-a Headline!");
    }

    #[test]
    fn stub_missing_every_field_gets_defaults() {
        let mut stubs = ten_stubs();
        stubs[2] = ArticleStub::default();

        let articles = assign_slots(stubs);
        // First regular slot is page 1 position 1
        assert_eq!(articles[0].id, "article-0");
        assert_eq!(articles[0].headline, "News Story!");
        assert_eq!(articles[0].images[0].alt, "");
    }
}
