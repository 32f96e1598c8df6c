//! Static fallback content
//!
//! Ten pre-written articles with fixed layout metadata, served when no
//! generated newspaper is available. Legacy `row`/`colSpan` values from
//! the older layout scheme are preserved on the articles that had them.

use crate::data::{Article, ArticleImage, NewspaperData};

/// The built-in sample newspaper.
///
/// Upholds the standard layout invariant: ten articles across two
/// five-slot pages, with the featured stories at position 2 of each page.
pub fn sample_newspaper() -> NewspaperData {
    NewspaperData {
        title: "THE KIDS' WEEKLY NEWS".to_string(),
        subtitle: "Your weekly source for fun and fascinating stories!".to_string(),
        date_range: None,
        articles: vec![
            sample_article(
                "skyscraper-climber",
                "Man Climbs Super Tall Tower!",
                "Alex is a super climber. He climbed a very tall building named Taipei 101. \
                 He did not use any ropes! He went up very fast and set a new record. \
                 Everyone cheered for him from the ground. It was an amazing feat!",
                "image_0.png",
                "A cartoon man climbing a tall skyscraper with a cheering crowd below.",
                "border-green-500",
                "text-green-700",
                1,
                1,
                false,
                Some(1),
                None,
            ),
            sample_article(
                "flying-car-is-here",
                "Real Flying Cars Are Coming!",
                "Imagine a car that can drive on the road and then fly in the sky! A company \
                 named Alef has started making the very first flying car for people to buy. \
                 It looks like something from a movie. Soon, people might be zooming over \
                 traffic instead of sitting in it. Get ready for the future of travel!",
                "image_1.png",
                "A futuristic cartoon flying car soaring above a city.",
                "border-blue-500",
                "text-blue-700",
                1,
                2,
                true,
                Some(1),
                Some(2),
            ),
            sample_article(
                "super-comic-find",
                "Old Comic Book Is Worth Millions!",
                "Three brothers were cleaning an old attic. They found a dusty box of comic \
                 books. Inside was a very rare Superman comic! It is one of the first ones \
                 ever made. Now it sold for a lot of money. What a super surprise!",
                "image_2.png",
                "Kids discovering a glowing comic book in a dusty attic box.",
                "border-purple-500",
                "text-purple-700",
                1,
                3,
                false,
                Some(1),
                None,
            ),
            sample_article(
                "space-traveler-wheels",
                "First Wheelchair User Goes to Space!",
                "Michaela is an engineer who uses a wheelchair. She had a big dream to go to \
                 space. Recently, her dream came true! She blasted off in a rocket and \
                 floated in zero gravity. She showed everyone that space is for everybody.",
                "image_3.png",
                "An astronaut in a wheelchair floating inside a spaceship.",
                "border-teal-500",
                "text-teal-700",
                1,
                4,
                false,
                Some(2),
                None,
            ),
            sample_article(
                "polar-bear-mom",
                "Mama Polar Bear Adopts a Cub!",
                "Scientists saw something special in the cold Arctic. A mama polar bear \
                 adopted a little cub that was all alone. She is taking care of it like her \
                 own baby. They snuggle and travel together on the ice. It is a very sweet \
                 family.",
                "image_4.png",
                "A mama polar bear cuddling a small cub on an ice floe.",
                "border-rose-500",
                "text-rose-700",
                1,
                5,
                false,
                Some(2),
                None,
            ),
            sample_article(
                "so-many-new-animals",
                "Scientists Find Thousands of New Animals!",
                "Did you know we are still finding new animals? A new study says scientists \
                 discover about 16,000 new types of creatures every single year! They find \
                 tiny bugs, strange fish, and colorful lizards in jungles and oceans all \
                 over the world.",
                "image_5.png",
                "A cartoon collage of newly discovered colorful animals in a jungle.",
                "border-green-500",
                "text-green-700",
                2,
                1,
                false,
                Some(2),
                None,
            ),
            sample_article(
                "moon-rocket-ready",
                "Giant Moon Rocket Is Ready!",
                "NASA has a huge new rocket. It is called Artemis II. It just moved to its \
                 launch pad in Florida. Soon, astronauts will get inside. This rocket will \
                 take them all the way around the Moon and back! It is a very big adventure.",
                "image_6.png",
                "A large cartoon rocket on a launchpad under a full moon.",
                "border-yellow-500",
                "text-yellow-700",
                2,
                2,
                true,
                Some(2),
                None,
            ),
            sample_article(
                "airport-owls",
                "Snowy Owls Visit a Busy Airport!",
                "Snowy owls usually live in the cold north. But this winter, many are \
                 visiting an airport in Boston! They like the flat, open land. People at \
                 the airport are working hard to keep the beautiful birds safe from the \
                 big airplanes.",
                "image_7.png",
                "Cartoon snowy owls perched on signs and fences at an airport.",
                "border-green-500",
                "text-green-700",
                2,
                3,
                false,
                Some(3),
                None,
            ),
            sample_article(
                "dogs-listen-in",
                "Your Dog Might Be Listening!",
                "Do you talk to your family? Your dog might be learning from you! A new \
                 study shows some smart dogs learn new words just by listening to people \
                 talk to each other. They are very clever eavesdroppers. So be careful \
                 what you say!",
                "image_8.png",
                "A cartoon dog listening to two people talk, with a thought bubble of toys.",
                "border-blue-500",
                "text-blue-700",
                2,
                4,
                false,
                Some(3),
                None,
            ),
            sample_article(
                "ice-time-capsule",
                "Old Ice Tells Earth's Secrets!",
                "Scientists are digging up very old ice from deep in the ground. This ice \
                 is like a time capsule. By looking at it, they can learn what Earth's \
                 weather was like millions of years ago. It helps us understand our \
                 planet's history.",
                "image_9.png",
                "Cartoon scientists drilling an ice core in a snowy landscape.",
                "border-teal-500",
                "text-teal-700",
                2,
                5,
                false,
                Some(3),
                None,
            ),
        ],
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_article(
    id: &str,
    headline: &str,
    body_text: &str,
    image_url: &str,
    image_alt: &str,
    border_color: &str,
    headline_color: &str,
    page: u8,
    position: u8,
    featured: bool,
    row: Option<u8>,
    col_span: Option<u8>,
) -> Article {
    Article {
        id: id.to_string(),
        headline: headline.to_string(),
        body_text: body_text.to_string(),
        images: vec![ArticleImage {
            url: image_url.to_string(),
            alt: image_alt.to_string(),
        }],
        border_color: border_color.to_string(),
        headline_color: headline_color.to_string(),
        page,
        position,
        featured,
        row,
        col_span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_newspaper_upholds_layout_invariant() {
        let newspaper = sample_newspaper();

        assert_eq!(newspaper.articles.len(), 10);

        let featured: Vec<_> = newspaper.articles.iter().filter(|a| a.featured).collect();
        assert_eq!(featured.len(), 2);
        assert!(featured.iter().any(|a| a.page == 1 && a.position == 2));
        assert!(featured.iter().any(|a| a.page == 2 && a.position == 2));

        for page in 1..=2u8 {
            let positions: Vec<_> = newspaper
                .articles
                .iter()
                .filter(|a| a.page == page)
                .map(|a| a.position)
                .collect();
            assert_eq!(positions, vec![1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn sample_articles_have_images_and_alt_text() {
        for article in sample_newspaper().articles {
            assert_eq!(article.images.len(), 1);
            assert!(!article.images[0].url.is_empty());
            assert!(!article.images[0].alt.is_empty());
        }
    }
}
