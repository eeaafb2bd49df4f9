//! Emoji exchange through the full FEP path.

use companion_dynamics::fep::{EmojiTable, FepCore};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn exchange_boosts_attention_and_learns_preferences() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut core = FepCore::new(12, &mut rng);
    let table = EmojiTable::standard();
    core.set_attention(40.0);

    let outcome = core.process_emoji_interaction("😊❤️", &table, None, 1, &mut rng);
    assert!(outcome.attention > 40.0);
    assert!(!outcome.response.is_empty());
    assert!((0.0..=1.0).contains(&outcome.surprise));

    // Preferences were nudged for both received glyphs.
    assert!(core.emoji_preferences()["😊"] > 0.0);
    assert!(core.emoji_preferences()["❤️"] > 0.0);
}

#[test]
fn repeated_identical_greetings_become_less_surprising() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut core = FepCore::new(12, &mut rng);
    let table = EmojiTable::standard();

    let first = core.process_emoji_interaction("😊", &table, None, 1, &mut rng);
    let mut last = first.surprise;
    for tick in 2..40 {
        last = core
            .process_emoji_interaction("😊", &table, None, tick, &mut rng)
            .surprise;
    }
    assert!(last < first.surprise);
}

#[test]
fn gibberish_input_still_gets_a_reply() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut core = FepCore::new(12, &mut rng);
    let table = EmojiTable::standard();

    let outcome = core.process_emoji_interaction("hello world", &table, None, 1, &mut rng);
    assert!(!outcome.response.is_empty());
    assert_eq!(outcome.context.emoji_count, 0);
}
