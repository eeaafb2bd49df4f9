//! Emoji response construction.
//!
//! A reply is assembled in up to four slots: an optional expression, the
//! winning response emoji, an optional modifier, and an occasional need
//! plea when thriving runs low. Scores blend learned preferences, the
//! pet's attention/thriving state, the sender's sentiment and advisory
//! re-ranking.

use crate::fep::core::FepCore;
use crate::fep::emoji::{EmojiTable, EmotionalContext};
use crate::sim::Advice;
use rand::Rng;

const POSITIVE_RESPONSES: [&str; 4] = ["❤️", "🥰", "✨", "🎉"];
const ATTENTION_SEEKING: [&str; 3] = ["❓", "👋", "🤗"];
const DISTRESS_RESPONSES: [&str; 3] = ["😤", "💔", "👎"];
const COMFORTING_RESPONSES: [&str; 3] = ["🤗", "🙏", "👋"];
const JOY_EXPRESSIONS: [&str; 4] = ["😊", "😍", "🥰", "😆"];
const SAD_EXPRESSIONS: [&str; 2] = ["😔", "💔"];
const CURIOUS_EXPRESSIONS: [&str; 2] = ["🤔", "😋"];
const CONTENT_EXPRESSIONS: [&str; 2] = ["😌", "😴"];
const ENERGY_MODIFIERS: [&str; 4] = ["✨", "🔥", "⚡", "🌟"];
const POSITIVE_MODIFIERS: [&str; 4] = ["💫", "⭐", "💝", "🎊"];
const NEED_PLEAS: [&str; 5] = ["🍎", "🍕", "🎮", "💤", "🤗"];

/// Builds a multi-emoji reply for the given emotional context.
pub(crate) fn generate_response(
    core: &FepCore,
    table: &EmojiTable,
    context: &EmotionalContext,
    advice: Option<&Advice>,
    rng: &mut impl Rng,
) -> String {
    let attention = core.attention() / 100.0;
    let thriving = core.thriving() / 100.0;

    let response_scores: Vec<f32> = table
        .responses()
        .iter()
        .enumerate()
        .map(|(i, glyph)| {
            let mut score = 0.0;

            let preference = core.action_preferences().get(i).copied().unwrap_or(0.5)
                + core.emoji_preferences().get(*glyph).copied().unwrap_or(0.0);
            score += preference * 0.3;

            if attention > 0.7 && POSITIVE_RESPONSES.contains(glyph) {
                score += 0.4;
            } else if attention < 0.3 && ATTENTION_SEEKING.contains(glyph) {
                score += 0.4;
            }

            if thriving > 0.7 && POSITIVE_RESPONSES.contains(glyph) {
                score += 0.3;
            } else if thriving < 0.3 && DISTRESS_RESPONSES.contains(glyph) {
                score += 0.3;
            }

            if context.sentiment > 0.5 && POSITIVE_RESPONSES.contains(glyph) {
                score += 0.3;
            } else if context.sentiment < -0.3 && COMFORTING_RESPONSES.contains(glyph) {
                score += 0.3;
            }

            if let Some(advice) = advice {
                if advice
                    .preferred_response_emojis
                    .iter()
                    .any(|p| p.as_str() == *glyph)
                {
                    score += 0.3 * advice.confidence;
                }
            }

            score + jitter(rng)
        })
        .collect();

    let expression_scores: Vec<f32> = table
        .expressions()
        .iter()
        .map(|glyph| {
            let mut score = 0.0;
            if context.joy > 0.5 && JOY_EXPRESSIONS.contains(glyph) {
                score += 0.6;
            } else if context.joy < -0.3 && SAD_EXPRESSIONS.contains(glyph) {
                score += 0.6;
            } else if context.curiosity > 0.5 && CURIOUS_EXPRESSIONS.contains(glyph) {
                score += 0.5;
            } else if context.contentment > 0.5 && CONTENT_EXPRESSIONS.contains(glyph) {
                score += 0.5;
            }
            score + jitter(rng)
        })
        .collect();

    let modifier_scores: Vec<f32> = table
        .modifiers()
        .iter()
        .map(|glyph| {
            let mut score = 0.0;
            if context.attention_potential > 0.7 && ENERGY_MODIFIERS.contains(glyph) {
                score += 0.4;
            } else if context.sentiment > 0.5 && POSITIVE_MODIFIERS.contains(glyph) {
                score += 0.3;
            }
            score + jitter(rng)
        })
        .collect();

    let mut parts: Vec<&str> = Vec::with_capacity(4);

    // Optional leading expression.
    let expression_roll = rng.gen::<f32>() < 0.5;
    if let Some((best, score)) = argmax(&expression_scores) {
        if expression_roll && score >= 0.3 {
            parts.push(table.expressions()[best]);
        }
    }

    // The main response always lands.
    if let Some((best, _)) = argmax(&response_scores) {
        parts.push(table.responses()[best]);
    }

    // Optional trailing modifier.
    let modifier_roll = rng.gen::<f32>() < 0.3;
    if let Some((best, score)) = argmax(&modifier_scores) {
        if modifier_roll && score >= 0.2 {
            parts.push(table.modifiers()[best]);
        }
    }

    // Occasional need plea while thriving is low.
    if rng.gen::<f32>() < 0.2 && thriving < 0.4 {
        let pick = rng.gen_range(0..NEED_PLEAS.len());
        parts.push(NEED_PLEAS[pick]);
    }

    parts.concat()
}

fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .enumerate()
        .fold(None, |best, (i, &score)| match best {
            Some((_, b)) if b >= score => best,
            _ => Some((i, score)),
        })
}

/// Zero-mean score jitter with roughly 0.1 standard deviation.
fn jitter(rng: &mut impl Rng) -> f32 {
    let sum: f32 = (0..3).map(|_| rng.gen::<f32>()).sum();
    (sum - 1.5) * 0.2
}
