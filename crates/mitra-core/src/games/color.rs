//! Color canvas: pick colors, receive an affirmation for each pick.

use std::str::FromStr;

use rand::Rng;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{MitraError, Result};

/// The mood a swatch stands for; selects the affirmation pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Mood {
    Peaceful,
    Happy,
    Balanced,
    Loving,
    Energized,
    Wise,
    Confident,
    Clear,
}

impl Mood {
    pub fn affirmations(self) -> &'static [&'static str; 3] {
        match self {
            Self::Peaceful => &[
                "You are at peace with yourself and the world around you.",
                "Calmness flows through you like a gentle river.",
                "You find tranquility in every breath you take.",
            ],
            Self::Happy => &[
                "Joy radiates from within you and touches everyone you meet.",
                "You are a beacon of positivity and light.",
                "Happiness is your natural state of being.",
            ],
            Self::Balanced => &[
                "You are growing stronger and wiser every day.",
                "Balance comes naturally to you in all aspects of life.",
                "You are rooted in strength and reaching for your dreams.",
            ],
            Self::Loving => &[
                "You are worthy of love and you give love freely.",
                "Your heart is open to receiving and sharing beautiful moments.",
                "Love surrounds you and flows through you.",
            ],
            Self::Energized => &[
                "You have the power to create positive change in your life.",
                "Your passion fuels your purpose and drives you forward.",
                "You are strong, capable, and ready for anything.",
            ],
            Self::Wise => &[
                "You possess inner wisdom that guides you on your path.",
                "Your intuition is strong and you trust your inner voice.",
                "You see the beauty and lessons in every experience.",
            ],
            Self::Confident => &[
                "You radiate confidence and warmth wherever you go.",
                "You believe in yourself and your ability to succeed.",
                "You are comfortable being authentically you.",
            ],
            Self::Clear => &[
                "Your mind is clear and focused on what matters most.",
                "You see situations with clarity and wisdom.",
                "You have a fresh perspective on life's opportunities.",
            ],
        }
    }
}

/// One of the eight fixed colors on the palette.
///
/// Parses from its kebab-case name (`calm-blue`) or its first word
/// (`blue`), case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Swatch {
    #[strum(to_string = "calm-blue", serialize = "blue")]
    CalmBlue,
    #[strum(to_string = "joy-yellow", serialize = "yellow")]
    JoyYellow,
    #[strum(to_string = "growth-green", serialize = "green")]
    GrowthGreen,
    #[strum(to_string = "love-pink", serialize = "pink")]
    LovePink,
    #[strum(to_string = "passion-red", serialize = "red")]
    PassionRed,
    #[strum(to_string = "wisdom-purple", serialize = "purple")]
    WisdomPurple,
    #[strum(to_string = "warm-orange", serialize = "orange")]
    WarmOrange,
    #[strum(to_string = "pure-white", serialize = "white")]
    PureWhite,
}

impl Swatch {
    /// Parses a swatch name, reporting unknown names as `NotFound`.
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name.trim()).map_err(|_| MitraError::not_found("color", name))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CalmBlue => "Calm Blue",
            Self::JoyYellow => "Joy Yellow",
            Self::GrowthGreen => "Growth Green",
            Self::LovePink => "Love Pink",
            Self::PassionRed => "Passion Red",
            Self::WisdomPurple => "Wisdom Purple",
            Self::WarmOrange => "Warm Orange",
            Self::PureWhite => "Pure White",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            Self::CalmBlue => "#3b82f6",
            Self::JoyYellow => "#fbbf24",
            Self::GrowthGreen => "#10b981",
            Self::LovePink => "#ec4899",
            Self::PassionRed => "#ef4444",
            Self::WisdomPurple => "#8b5cf6",
            Self::WarmOrange => "#f97316",
            Self::PureWhite => "#ffffff",
        }
    }

    pub fn mood(self) -> Mood {
        match self {
            Self::CalmBlue => Mood::Peaceful,
            Self::JoyYellow => Mood::Happy,
            Self::GrowthGreen => Mood::Balanced,
            Self::LovePink => Mood::Loving,
            Self::PassionRed => Mood::Energized,
            Self::WisdomPurple => Mood::Wise,
            Self::WarmOrange => Mood::Confident,
            Self::PureWhite => Mood::Clear,
        }
    }

    pub fn all() -> Vec<Swatch> {
        Self::iter().collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColorCanvas {
    picked: Vec<Swatch>,
    affirmation: Option<&'static str>,
}

impl ColorCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn picked(&self) -> &[Swatch] {
        &self.picked
    }

    pub fn affirmation(&self) -> Option<&'static str> {
        self.affirmation
    }

    /// Adds `swatch` to the canvas and draws an affirmation for its mood.
    pub fn pick<R: Rng + ?Sized>(&mut self, swatch: Swatch, rng: &mut R) -> &'static str {
        self.picked.push(swatch);
        let pool = swatch.mood().affirmations();
        let affirmation = pool[rng.gen_range(0..pool.len())];
        self.affirmation = Some(affirmation);
        affirmation
    }

    pub fn clear(&mut self) {
        self.picked.clear();
        self.affirmation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_parse_by_full_name_or_color_word() {
        assert_eq!(Swatch::parse("calm-blue").unwrap(), Swatch::CalmBlue);
        assert_eq!(Swatch::parse("Blue").unwrap(), Swatch::CalmBlue);
        assert_eq!(Swatch::parse(" WISDOM-PURPLE ").unwrap(), Swatch::WisdomPurple);
        assert!(Swatch::parse("teal").unwrap_err().is_not_found());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for swatch in Swatch::all() {
            assert_eq!(Swatch::parse(&swatch.to_string()).unwrap(), swatch);
        }
    }

    #[test]
    fn test_every_mood_is_used_once() {
        let moods: std::collections::HashSet<Mood> = Swatch::all().into_iter().map(Swatch::mood).collect();
        assert_eq!(moods.len(), 8);
    }

    #[test]
    fn test_pick_draws_from_the_swatch_mood() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut canvas = ColorCanvas::new();
        for swatch in Swatch::all() {
            for _ in 0..10 {
                let text = canvas.pick(swatch, &mut rng);
                assert!(swatch.mood().affirmations().contains(&text));
                assert_eq!(canvas.affirmation(), Some(text));
            }
        }
        assert_eq!(canvas.picked().len(), 80);
    }

    #[test]
    fn test_clear_empties_canvas() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut canvas = ColorCanvas::new();
        canvas.pick(Swatch::PassionRed, &mut rng);
        canvas.pick(Swatch::PureWhite, &mut rng);
        canvas.clear();
        assert!(canvas.picked().is_empty());
        assert_eq!(canvas.affirmation(), None);
    }
}
