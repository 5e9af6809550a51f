//! # Renderer
//!
//! Pure projections of quotes to display text, plus the random pick.

use rand::Rng;

use crate::core::quote::Quote;

pub const NO_QUOTES_MESSAGE: &str = "No quotes available for this category.";
pub const NO_QUOTES_RANDOM_MESSAGE: &str = "No quotes available.";

/// Picks a uniformly random element. An empty slice yields `None`.
pub fn pick_random<'a, R: Rng + ?Sized>(quotes: &[&'a Quote], rng: &mut R) -> Option<&'a Quote> {
    if quotes.is_empty() {
        return None;
    }
    let index = rng.random_range(0..quotes.len());
    Some(quotes[index])
}

pub fn render_one(quote: &Quote) -> String {
    format!("\"{}\" - {}", quote.text, quote.category)
}

pub fn render_many(quotes: &[&Quote]) -> String {
    if quotes.is_empty() {
        return NO_QUOTES_MESSAGE.to_string();
    }
    quotes
        .iter()
        .map(|q| render_one(q))
        .collect::<Vec<_>>()
        .join("\n")
}
