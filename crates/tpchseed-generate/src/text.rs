use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, CountryName, StateAbbr, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;

/// Truncate `text` to at most `max` characters.
///
/// Must run after all formatting so stored values never exceed column
/// widths.
pub(crate) fn clip(text: String, max: usize) -> String {
    if text.chars().count() <= max {
        text
    } else {
        text.chars().take(max).collect()
    }
}

pub(crate) fn word_upper<R: Rng + ?Sized>(rng: &mut R) -> String {
    let word: String = Word().fake_with_rng(rng);
    word.to_uppercase()
}

pub(crate) fn sentence<R: Rng + ?Sized>(rng: &mut R, words: std::ops::Range<usize>) -> String {
    Sentence(words).fake_with_rng(rng)
}

pub(crate) fn company<R: Rng + ?Sized>(rng: &mut R) -> String {
    CompanyName().fake_with_rng(rng)
}

pub(crate) fn person_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    Name().fake_with_rng(rng)
}

pub(crate) fn country<R: Rng + ?Sized>(rng: &mut R) -> String {
    CountryName().fake_with_rng(rng)
}

/// Single-line postal address.
pub(crate) fn street_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    let city: String = CityName().fake_with_rng(rng);
    let state: String = StateAbbr().fake_with_rng(rng);
    let zip: String = ZipCode().fake_with_rng(rng);
    format!("{number} {street}, {city}, {state} {zip}")
}

pub(crate) fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    PhoneNumber().fake_with_rng(rng)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn clip_keeps_short_text_untouched() {
        assert_eq!(clip("hello".to_string(), 25), "hello");
    }

    #[test]
    fn clip_counts_characters_not_bytes() {
        assert_eq!(clip("aéiöu".to_string(), 3), "aéi");
    }

    #[test]
    fn sentence_respects_clipping_after_formatting() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..20 {
            let text = clip(sentence(&mut rng, 10..20), 23);
            assert!(text.chars().count() <= 23);
        }
    }
}
