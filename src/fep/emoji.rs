//! The emoji lexicon: vocabulary, affect vectors and sequence parsing.
//!
//! The table is constructor-injected configuration, immutable after
//! construction. There is no process-wide emoji state anywhere in the core.

use serde::{Deserialize, Serialize};

/// Vocabulary category an emoji belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmojiCategory {
    Expression,
    Need,
    Response,
    Modifier,
}

/// Fixed affect vector attached to a known emoji.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmojiAffect {
    pub joy: f32,
    pub curiosity: f32,
    pub contentment: f32,
    /// How much attention this emoji tends to draw.
    pub attention_potential: f32,
}

/// Per-axis mean affect over a recognised emoji sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionalContext {
    pub joy: f32,
    pub curiosity: f32,
    pub contentment: f32,
    pub attention_potential: f32,
    /// `(joy + contentment) / 2`.
    pub sentiment: f32,
    /// Emojis extracted from the input, recognised or not.
    pub emoji_count: usize,
}

impl EmotionalContext {
    /// The neutral context used when nothing was recognised.
    #[must_use]
    pub fn neutral(emoji_count: usize) -> Self {
        EmotionalContext {
            joy: 0.0,
            curiosity: 0.0,
            contentment: 0.0,
            attention_potential: 0.3,
            sentiment: 0.0,
            emoji_count,
        }
    }
}

const fn affect(joy: f32, curiosity: f32, contentment: f32, attention: f32) -> EmojiAffect {
    EmojiAffect {
        joy,
        curiosity,
        contentment,
        attention_potential: attention,
    }
}

/// The affect map: canonical codepoint, display glyph, affect vector.
///
/// Display glyphs may carry a variation selector; parsing matches on the
/// canonical codepoint with selectors stripped.
const AFFECTS: &[(char, &str, EmojiAffect)] = &[
    ('\u{1F60A}', "😊", affect(0.8, 0.1, 0.7, 0.9)),
    ('\u{1F60D}', "😍", affect(0.9, 0.3, 0.8, 0.95)),
    ('\u{1F970}', "🥰", affect(0.8, 0.1, 0.9, 0.9)),
    ('\u{2764}', "❤️", affect(0.9, 0.2, 0.9, 0.95)),
    ('\u{1F917}', "🤗", affect(0.6, 0.1, 0.8, 0.85)),
    ('\u{1F60B}', "😋", affect(0.5, 0.2, 0.3, 0.7)),
    ('\u{1F606}', "😆", affect(0.9, 0.2, 0.5, 0.8)),
    ('\u{1F389}', "🎉", affect(0.8, 0.3, 0.6, 0.85)),
    ('\u{2728}', "✨", affect(0.3, 0.4, 0.3, 0.6)),
    ('\u{1F914}', "🤔", affect(0.0, 0.8, 0.1, 0.4)),
    ('\u{2753}', "❓", affect(0.0, 0.9, 0.0, 0.3)),
    ('\u{1F44B}', "👋", affect(0.5, 0.1, 0.4, 0.5)),
    ('\u{1F614}', "😔", affect(-0.8, 0.0, -0.5, 0.1)),
    ('\u{1F634}', "😴", affect(0.0, 0.0, 0.9, 0.2)),
    ('\u{1F44E}', "👎", affect(-0.4, 0.0, -0.2, 0.1)),
    ('\u{1F494}', "💔", affect(-0.8, 0.0, -0.8, 0.05)),
    ('\u{1F34E}', "🍎", affect(0.1, 0.8, 0.2, 0.6)),
    ('\u{1F355}', "🍕", affect(0.3, 0.7, 0.4, 0.7)),
    ('\u{1F3AE}', "🎮", affect(0.4, 0.9, 0.3, 0.8)),
    ('\u{1F4A4}', "💤", affect(0.0, 0.0, 0.9, 0.2)),
    ('\u{1F44D}', "👍", affect(0.4, 0.0, 0.3, 0.6)),
    ('\u{1F624}', "😤", affect(-0.3, 0.2, -0.4, 0.2)),
    ('\u{1F64F}', "🙏", affect(0.3, 0.0, 0.8, 0.5)),
    ('\u{1F6BF}', "🚿", affect(0.2, 0.1, 0.6, 0.4)),
    ('\u{26BD}', "⚽", affect(0.5, 0.8, 0.4, 0.7)),
    ('\u{1F4DA}', "📚", affect(0.2, 0.9, 0.3, 0.5)),
    ('\u{1F3B5}', "🎵", affect(0.6, 0.3, 0.5, 0.6)),
    ('\u{1F525}', "🔥", affect(0.7, 0.4, 0.2, 0.7)),
    ('\u{1F4AB}', "💫", affect(0.4, 0.5, 0.3, 0.5)),
    ('\u{2B50}', "⭐", affect(0.5, 0.3, 0.4, 0.6)),
    ('\u{1F4A8}', "💨", affect(0.2, 0.6, 0.1, 0.3)),
    ('\u{26A1}', "⚡", affect(0.6, 0.7, 0.2, 0.6)),
    ('\u{1F31F}', "🌟", affect(0.6, 0.4, 0.5, 0.7)),
    ('\u{1F49D}', "💝", affect(0.8, 0.2, 0.8, 0.9)),
    ('\u{1F38A}', "🎊", affect(0.8, 0.3, 0.6, 0.85)),
];

const EXPRESSIONS: &[&str] = &["😊", "😔", "😴", "🤔", "😋", "😆", "😍", "🥰", "😌", "😎"];
const NEEDS: &[&str] = &["🍎", "🍕", "🎮", "💤", "🤗", "🚿", "🎯", "⚽", "📚", "🎵"];
const RESPONSES: &[&str] = &[
    "❤️", "👍", "👎", "❓", "✨", "🎉", "💔", "😤", "🙏", "👋", "🤗", "🥰",
];
const MODIFIERS: &[&str] = &["❓", "✨", "🔥", "💫", "⭐", "💨", "⚡", "🌟", "💝", "🎊"];

/// Immutable emoji vocabulary and affect table.
#[derive(Debug, Clone)]
pub struct EmojiTable {
    affects: Vec<(char, &'static str, EmojiAffect)>,
    expressions: Vec<&'static str>,
    needs: Vec<&'static str>,
    responses: Vec<&'static str>,
    modifiers: Vec<&'static str>,
}

impl Default for EmojiTable {
    fn default() -> Self {
        EmojiTable::standard()
    }
}

impl EmojiTable {
    /// The standard table used by the simulation.
    #[must_use]
    pub fn standard() -> Self {
        EmojiTable {
            affects: AFFECTS.to_vec(),
            expressions: EXPRESSIONS.to_vec(),
            needs: NEEDS.to_vec(),
            responses: RESPONSES.to_vec(),
            modifiers: MODIFIERS.to_vec(),
        }
    }

    /// The vocabulary for one category.
    #[must_use]
    pub fn category(&self, category: EmojiCategory) -> &[&'static str] {
        match category {
            EmojiCategory::Expression => &self.expressions,
            EmojiCategory::Need => &self.needs,
            EmojiCategory::Response => &self.responses,
            EmojiCategory::Modifier => &self.modifiers,
        }
    }

    /// The response vocabulary; its length is the FEP action-space size.
    #[must_use]
    pub fn responses(&self) -> &[&'static str] {
        self.category(EmojiCategory::Response)
    }

    /// The expression vocabulary.
    #[must_use]
    pub fn expressions(&self) -> &[&'static str] {
        self.category(EmojiCategory::Expression)
    }

    /// The need vocabulary.
    #[must_use]
    pub fn needs(&self) -> &[&'static str] {
        self.category(EmojiCategory::Need)
    }

    /// The modifier vocabulary.
    #[must_use]
    pub fn modifiers(&self) -> &[&'static str] {
        self.category(EmojiCategory::Modifier)
    }

    /// Looks up the affect vector for a glyph, ignoring variation selectors.
    #[must_use]
    pub fn affect_of(&self, glyph: &str) -> Option<EmojiAffect> {
        let canonical = glyph.chars().find(|c| *c != '\u{FE0F}')?;
        self.affects
            .iter()
            .find(|(ch, _, _)| *ch == canonical)
            .map(|(_, _, affect)| *affect)
    }

    /// Extracts emoji glyphs from free text by Unicode range.
    ///
    /// Returns canonical display glyphs for recognised codepoints and
    /// single-char strings for in-range codepoints without an affect entry.
    #[must_use]
    pub fn parse(&self, input: &str) -> Vec<String> {
        let mut out = Vec::new();
        for ch in input.chars() {
            if ch == '\u{FE0F}' {
                continue;
            }
            if !is_emoji_codepoint(ch) {
                continue;
            }
            match self.affects.iter().find(|(c, _, _)| *c == ch) {
                Some((_, glyph, _)) => out.push((*glyph).to_string()),
                None => out.push(ch.to_string()),
            }
        }
        out
    }

    /// Computes the per-axis mean affect over a parsed sequence.
    ///
    /// Falls back to the neutral context when nothing is recognised.
    #[must_use]
    pub fn emotional_context(&self, emojis: &[String]) -> EmotionalContext {
        let mut joy = 0.0;
        let mut curiosity = 0.0;
        let mut contentment = 0.0;
        let mut attention = 0.0;
        let mut recognised = 0;

        for glyph in emojis {
            if let Some(affect) = self.affect_of(glyph) {
                joy += affect.joy;
                curiosity += affect.curiosity;
                contentment += affect.contentment;
                attention += affect.attention_potential;
                recognised += 1;
            }
        }

        if recognised == 0 {
            return EmotionalContext::neutral(emojis.len());
        }

        let n = recognised as f32;
        let joy = joy / n;
        let contentment = contentment / n;
        EmotionalContext {
            joy,
            curiosity: curiosity / n,
            contentment,
            attention_potential: attention / n,
            sentiment: (joy + contentment) / 2.0,
            emoji_count: emojis.len(),
        }
    }
}

/// Whether a codepoint falls in the recognised emoji ranges.
fn is_emoji_codepoint(ch: char) -> bool {
    matches!(ch,
        '\u{1F600}'..='\u{1F64F}'
        | '\u{1F300}'..='\u{1F5FF}'
        | '\u{1F680}'..='\u{1F6FF}'
        | '\u{1F1E0}'..='\u{1F1FF}'
        | '\u{2600}'..='\u{27BF}'
        | '\u{1F900}'..='\u{1F9FF}'
    )
}
