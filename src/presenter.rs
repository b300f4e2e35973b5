//! Text and style values the card screens render, kept free of DOM types.

use crate::gesture::Offset;

pub const APP_TITLE: &str = "💰 Friend Auction";
pub const LOADING_MESSAGE: &str = "Loading friends...";
pub const ALL_DONE_TITLE: &str = "All done!";
pub const BID_BADGE_LABEL: &str = "BID!";
pub const PASS_BADGE_LABEL: &str = "PASS";
pub const PROFILE_PLACEHOLDER: &str = "Profile coming soon";

// Detail screen copy; profiles carry no such fields yet, so every candidate
// shows the same sections.
pub const DETAIL_LOCATION: &str = "San Francisco";
pub const DETAIL_OCCUPATION: &str = "Creative Designer";
pub const DETAIL_PROS: &[&str] = &[
    "Great sense of humor",
    "Life of the party",
    "Always down for adventure",
];
pub const DETAIL_CONS: &[&str] = &[
    "Talks too much about crypto",
    "Can't cook to save their life",
    "Snores a bit (allegedly)",
];
pub const DETAIL_INTERESTS: &[(&str, &str)] = &[
    ("📷", "Photography"),
    ("✈️", "Travel"),
    ("🎵", "Music"),
    ("🎨", "Art"),
    ("🍕", "Foodie"),
];
pub const GALLERY_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Testimonial {
    pub avatar: &'static str,
    pub author: &'static str,
    pub role: &'static str,
    pub quote: String,
}

pub fn testimonials(name: &str) -> Vec<Testimonial> {
    vec![
        Testimonial {
            avatar: "https://i.pravatar.cc/100?img=1",
            author: "Alex P.",
            role: "Friend since 2019",
            quote: format!(
                "\"{name} is the best friend you could ask for! Always there when you need them.\""
            ),
        },
        Testimonial {
            avatar: "https://i.pravatar.cc/100?img=5",
            author: "Jessica F.",
            role: "Colleague",
            quote: "\"Super reliable and fun to hang out with. 10/10 would recommend!\"".to_string(),
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardStyle {
    pub transform: String,
    pub bid_opacity: f64,
    pub pass_opacity: f64,
}

impl CardStyle {
    pub fn new(offset: Offset, rotation_deg: f64, bid_opacity: f64, pass_opacity: f64) -> Self {
        Self {
            transform: card_transform(offset, rotation_deg),
            bid_opacity,
            pass_opacity,
        }
    }

    pub fn card_css(&self) -> String {
        format!("transform: {};", self.transform)
    }

    pub fn bid_badge_css(&self) -> String {
        format!("opacity: {:.3};", self.bid_opacity)
    }

    pub fn pass_badge_css(&self) -> String {
        format!("opacity: {:.3};", self.pass_opacity)
    }
}

pub fn card_transform(offset: Offset, rotation_deg: f64) -> String {
    format!(
        "translate({:.1}px, {:.1}px) rotate({:.2}deg)",
        offset.x, offset.y, rotation_deg
    )
}

pub fn bids_placed_summary(count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("You placed {count} bid{suffix}")
}

pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${amount:.0}")
    } else {
        format!("${amount:.2}")
    }
}

pub fn name_and_age(name: &str, age: u32) -> String {
    format!("{name}, {age}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_pluralizes() {
        assert_eq!(bids_placed_summary(0), "You placed 0 bids");
        assert_eq!(bids_placed_summary(1), "You placed 1 bid");
        assert_eq!(bids_placed_summary(2), "You placed 2 bids");
    }

    #[test]
    fn transform_includes_offset_and_rotation() {
        let style = CardStyle::new(Offset::new(12.0, -4.5), 1.25, 0.2, 0.0);
        assert_eq!(
            style.card_css(),
            "transform: translate(12.0px, -4.5px) rotate(1.25deg);"
        );
        assert_eq!(style.bid_badge_css(), "opacity: 0.200;");
    }

    #[test]
    fn first_testimonial_names_the_candidate() {
        let quotes = testimonials("Maya");
        assert_eq!(quotes.len(), 2);
        assert!(quotes[0].quote.starts_with("\"Maya is the best friend"));
        assert!(!quotes[1].quote.contains("Maya"));
    }

    #[test]
    fn amounts_drop_zero_cents() {
        assert_eq!(format_amount(50.0), "$50");
        assert_eq!(format_amount(12.5), "$12.50");
    }
}
