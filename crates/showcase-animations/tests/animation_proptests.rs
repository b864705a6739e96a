//! Property-based tests for effect timing, palette draws and counters

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use showcase_animations::core::palette::COLORS;
use showcase_animations::engine::{GLOW_SHADOW, GLOW_TRANSFORM};
use showcase_animations::prelude::*;

const BOX: &str = "animated-box";

// ===== Strategy definitions =====

/// Durations up to ten seconds, including zero
fn duration_strategy() -> impl Strategy<Value = u64> {
    0u64..10_000
}

/// Lowercase tags that name no known effect
fn unknown_tag_strategy() -> impl Strategy<Value = String> {
    "[a-z]{3,10}".prop_filter("must not name a known effect", |tag| {
        !matches!(
            tag.as_str(),
            "shake" | "glow" | "rainbow" | "bounce" | "spin" | "pulse"
        )
    })
}

fn stage_with_background(background: &str) -> Stage {
    let mut dom = MockDom::new();
    dom.register_element(
        DomElement::new("div")
            .with_id(BOX)
            .with_background(background),
    );
    Stage::new(dom, ShowcaseConfig::default())
}

// ===== Effect timing =====

proptest! {
    /// Glow holds until exactly its duration, then clears and completes
    #[test]
    fn prop_glow_reverts_at_duration(duration in duration_strategy()) {
        let mut stage = stage_with_background("");
        let scheduled = stage.apply_effect(BOX, EffectKind::Glow, duration, None).unwrap();
        prop_assert_eq!(scheduled.reversal_at_ms, duration);

        if duration > 0 {
            stage.advance(duration - 1);
            let style = stage.dom().style(BOX).unwrap();
            prop_assert_eq!(style.box_shadow.as_str(), GLOW_SHADOW);
            prop_assert_eq!(style.transform.as_str(), GLOW_TRANSFORM);
            prop_assert_eq!(stage.completions().count(), 0);
        }

        stage.advance_to(duration);
        let style = stage.dom().style(BOX).unwrap();
        prop_assert!(style.box_shadow.is_empty());
        prop_assert!(style.transform.is_empty());

        let events = stage.drain_completions();
        prop_assert_eq!(events.len(), 1);
        prop_assert_eq!(events[0].at_ms, duration);
        prop_assert_eq!(events[0].outcome, CompletionOutcome::Completed);
    }

    /// Rainbow writes palette colors in order, restores the background and
    /// never touches the element after its reversal
    #[test]
    fn prop_rainbow_cycle_and_restore(duration in 0u64..3_000, background in "#[0-9a-f]{6}") {
        let mut stage = stage_with_background(&background);
        stage.apply_effect(BOX, EffectKind::Rainbow, duration, None).unwrap();
        let palette = *stage.palette();

        let mut tick = 1u64;
        while tick * 200 < duration {
            stage.advance_to(tick * 200);
            let index = usize::try_from(tick - 1).unwrap();
            prop_assert_eq!(
                stage.dom().style(BOX).unwrap().background_color.as_str(),
                palette.cycle(index)
            );
            tick += 1;
        }

        stage.advance_to(duration);
        prop_assert_eq!(
            stage.dom().style(BOX).unwrap().background_color.as_str(),
            background.as_str()
        );
        prop_assert!(stage.timers().is_empty());

        let writes = stage.dom().get_element(BOX).unwrap().style_writes;
        stage.advance(5_000);
        prop_assert_eq!(stage.dom().get_element(BOX).unwrap().style_writes, writes);
    }

    /// Unknown tags leave style alone but still complete on schedule
    #[test]
    fn prop_unknown_tag_completes(tag in unknown_tag_strategy(), duration in duration_strategy()) {
        let mut stage = stage_with_background("#101010");
        let before = stage.dom().style(BOX).unwrap().clone();
        stage
            .apply_effect(BOX, EffectKind::from_name(&tag), duration, None)
            .unwrap();
        prop_assert_eq!(stage.dom().style(BOX).unwrap(), &before);

        stage.run_until_idle();
        let events = stage.drain_completions();
        prop_assert_eq!(events.len(), 1);
        prop_assert_eq!(events[0].at_ms, duration);
        prop_assert_eq!(&events[0].effect, &EffectKind::Unknown(tag));
    }

    /// Configured repeats dispatch exactly twice, the second after the delay
    #[test]
    fn prop_repeat_dispatches_twice(duration in 0u64..5_000) {
        let mut stage = stage_with_background("");
        let config = AnimationConfig::new()
            .with_effect("shake")
            .with_duration_ms(duration)
            .with_repeat(true);
        stage.run_configured(&config).unwrap();
        stage.run_until_idle();

        let dispatched = stage.dispatched();
        prop_assert_eq!(dispatched.len(), 2);
        prop_assert_eq!(dispatched[1].dispatched_at_ms, duration + 500);
        prop_assert_eq!(stage.now_ms(), 2 * duration + 500);
    }
}

// ===== Palette and counters =====

proptest! {
    /// Every random draw comes from the palette
    #[test]
    fn prop_palette_closure(seed in any::<u64>(), draws in 1usize..200) {
        let palette = ColorPalette::standard();
        let mut rng = Xorshift64::new(Seed::from_u64(seed));
        for _ in 0..draws {
            prop_assert!(COLORS.contains(&palette.pick(&mut rng)));
        }
    }

    /// The cycle wraps with the palette length
    #[test]
    fn prop_palette_cycle_wraps(index in 0usize..10_000) {
        let palette = ColorPalette::standard();
        prop_assert_eq!(palette.cycle(index), palette.cycle(index + palette.len()));
    }

    /// Interleaved counters never observe each other
    #[test]
    fn prop_counters_isolated(
        a in -1_000i64..1_000,
        b in -1_000i64..1_000,
        steps in proptest::collection::vec(any::<bool>(), 0..50),
    ) {
        let mut first = create_counter(a);
        let mut second = create_counter(b);
        let (mut seen_a, mut seen_b) = (a, b);
        for pick_first in steps {
            if pick_first {
                seen_a += 1;
                prop_assert_eq!(first.advance(), seen_a);
            } else {
                seen_b += 1;
                prop_assert_eq!(second.advance(), seen_b);
            }
        }
    }
}

// ===== Timer ordering =====

proptest! {
    /// Timers fire sorted by deadline, ties in arming order
    #[test]
    fn prop_timer_queue_order(delays in proptest::collection::vec(0u64..100, 1..40)) {
        let mut queue = TimerQueue::new();
        for (index, delay) in delays.iter().enumerate() {
            queue.set_timeout(*delay, index);
        }

        let mut fired = Vec::new();
        while let Some(due) = queue.pop_due(u64::MAX) {
            fired.push((due.deadline_ms, due.task));
        }

        let mut expected: Vec<(u64, usize)> =
            delays.iter().copied().enumerate().map(|(i, d)| (d, i)).collect();
        expected.sort_unstable();
        prop_assert_eq!(fired, expected);
    }
}

#[test]
fn test_counter_sequence_from_five() {
    let mut counter = create_counter(5);
    assert_eq!(
        (0..3).map(|_| counter.advance()).collect::<Vec<_>>(),
        vec![6, 7, 8]
    );
}

#[test]
fn test_counter_into_fn() {
    let mut next = create_counter(0).into_fn();
    assert_eq!(next(), 1);
    assert_eq!(next(), 2);
}
