//! Message catalog

use lovethyeyes_config::MessageOverrides;
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::StatTemplate;

/// Probability (numerator, denominator) of appending an eco tip to a short break
pub const ECO_TIP_CHANCE: (u32, u32) = (1, 5);

const SHORT_BREAK_MESSAGES: &[&str] = &[
    "Look 20 feet away for 20 seconds. Your eyes will thank you!",
    "Time for the 20-20-20 rule! Look away at something distant.",
    "Give your eyes a micro-vacation. Look at the horizon for a moment.",
    "Roll your eyes in circles 5 times each direction. It helps reduce strain.",
    "Blink rapidly for 15 seconds - it refreshes your tear film!",
    "Cup your palms over your closed eyes for 30 seconds. Feel the darkness?",
    "Focus on your breath for 30 seconds while looking away from the screen.",
    "Trace an imaginary figure eight with your eyes. It exercises eye muscles!",
];

const LONG_BREAK_MESSAGES: &[&str] = &[
    "Go out, see something beautiful, something far away, a mountain, a river, a forest or a sea.",
    "Time to stretch your legs AND your eyes! A 5-minute walk outside works wonders.",
    "Get some fresh air! Look at the clouds, trees, or just enjoy the open space.",
    "Your eyes and brain need a proper break. Step outside and look at distant objects.",
    "Try the 10-10-10 exercise: look at something 10 feet, 100 feet, and 1000 feet away.",
    "Grab a cup of tea or water, and gaze out a window while you enjoy it.",
    "Find the most distant thing you can see from your window and focus on it for 2 minutes.",
    "Your eyes deserve a panoramic view - find one and take it all in for a few minutes.",
];

const ECO_MESSAGES: &[&str] = &[
    "Water your plants while giving your eyes a break!",
    "Check on your indoor garden while resting your eyes.",
    "Open a window for fresh air - good for you and saves energy on climate control!",
    "Use this break to sort some recyclables - your eyes and the planet will thank you.",
    "Turn off unnecessary lights while you take your break - energy saving is eye saving!",
    "Check that your electronic devices are on power-saving mode during your break.",
    "Go admire a tree or plant - biophilia is good for mental health and eye strain!",
    "If you have a balcony or garden, spend your break time there with nature.",
];

/// Catalog construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Message pool '{0}' is empty")]
    EmptyPool(Pool),

    #[error("Message pool '{pool}' has a blank entry at index {index}")]
    BlankMessage { pool: Pool, index: usize },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// The plain-text message pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pool {
    ShortBreak,
    LongBreak,
    Eco,
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pool::ShortBreak => write!(f, "short_break"),
            Pool::LongBreak => write!(f, "long_break"),
            Pool::Eco => write!(f, "eco"),
        }
    }
}

/// Immutable, non-empty message pools.
///
/// Stats summaries are drawn from `StatTemplate::ALL` rather than a text pool.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    short_break: Vec<String>,
    long_break: Vec<String>,
    eco: Vec<String>,
}

impl MessageCatalog {
    pub fn new(
        short_break: Vec<String>,
        long_break: Vec<String>,
        eco: Vec<String>,
    ) -> CatalogResult<Self> {
        check_pool(Pool::ShortBreak, &short_break)?;
        check_pool(Pool::LongBreak, &long_break)?;
        check_pool(Pool::Eco, &eco)?;

        Ok(Self {
            short_break,
            long_break,
            eco,
        })
    }

    /// Built-in pools with any configured replacements applied
    pub fn from_overrides(overrides: &MessageOverrides) -> CatalogResult<Self> {
        let pick = |custom: &Option<Vec<String>>, builtin: &[&str]| {
            custom.clone().unwrap_or_else(|| to_owned(builtin))
        };

        Self::new(
            pick(&overrides.short_break, SHORT_BREAK_MESSAGES),
            pick(&overrides.long_break, LONG_BREAK_MESSAGES),
            pick(&overrides.eco, ECO_MESSAGES),
        )
    }

    pub fn pool(&self, pool: Pool) -> &[String] {
        match pool {
            Pool::ShortBreak => &self.short_break,
            Pool::LongBreak => &self.long_break,
            Pool::Eco => &self.eco,
        }
    }

    /// Uniformly random entry from a pool
    pub fn pick_random<R: Rng + ?Sized>(&self, pool: Pool, rng: &mut R) -> &str {
        // Pools are checked non-empty at construction
        self.pool(pool)
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Uniformly random stats-summary template
    pub fn pick_stat_template<R: Rng + ?Sized>(&self, rng: &mut R) -> StatTemplate {
        StatTemplate::ALL
            .choose(rng)
            .copied()
            .unwrap_or(StatTemplate::LoveHatredRatio)
    }

    /// A short-break message, sometimes followed by an eco tip after a blank line
    pub fn short_break_message<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let mut message = self.pick_random(Pool::ShortBreak, rng).to_string();
        let (numerator, denominator) = ECO_TIP_CHANCE;
        if rng.gen_ratio(numerator, denominator) {
            message.push_str("\n\n");
            message.push_str(self.pick_random(Pool::Eco, rng));
        }
        message
    }

    pub fn long_break_message<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.pick_random(Pool::LongBreak, rng).to_string()
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            short_break: to_owned(SHORT_BREAK_MESSAGES),
            long_break: to_owned(LONG_BREAK_MESSAGES),
            eco: to_owned(ECO_MESSAGES),
        }
    }
}

fn to_owned(messages: &[&str]) -> Vec<String> {
    messages.iter().map(|m| m.to_string()).collect()
}

fn check_pool(pool: Pool, entries: &[String]) -> CatalogResult<()> {
    if entries.is_empty() {
        return Err(CatalogError::EmptyPool(pool));
    }
    if let Some(index) = entries.iter().position(|m| m.trim().is_empty()) {
        return Err(CatalogError::BlankMessage { pool, index });
    }
    Ok(())
}
