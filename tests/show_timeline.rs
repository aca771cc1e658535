use cantik::lyrics::standard_cues;
use cantik::scene::SlotStage;
use cantik::{CardKind, Session, ShowAction, TickReport, Zone};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn session(seed: u64) -> Session<StdRng> {
    Session::new(StdRng::seed_from_u64(seed)).unwrap()
}

/// Ticks every frame of a `fps` display from `from` (exclusive) through `to`.
fn run_frames(session: &mut Session<StdRng>, fps: u32, from: u32, to: u32) -> Vec<TickReport> {
    (from + 1..=to).map(|frame| session.tick(frame as f32 / fps as f32)).collect()
}

#[test]
fn end_to_end_scenario() {
    let mut show = session(2024);
    let fps = 60;
    show.tick(0.0);

    run_frames(&mut show, fps, 0, 2 * fps);
    let caption = show.scene().caption.clone().unwrap();
    assert_eq!(caption.text, "🎵 Bukan karena make up di...");
    assert_eq!(caption.zone, Zone::Bottom);
    assert_eq!(caption.shown_at, 2.0);

    run_frames(&mut show, fps, 2 * fps, 13 * fps);
    assert_eq!(show.scene().slot(CardKind::LandscapePair).stage, SlotStage::Visible);
    assert_eq!(show.scene().slot(CardKind::LandscapePair).changed_at, 13.0);

    run_frames(&mut show, fps, 13 * fps, 25 * fps);
    let pair = show.scene().slot(CardKind::LandscapePair);
    assert_eq!(pair.stage, SlotStage::Exiting);
    assert_eq!(pair.changed_at, 25.0);

    run_frames(&mut show, fps, 25 * fps, 39 * fps);
    let caption = show.scene().caption.clone().unwrap();
    assert_eq!(caption.text, "Karena kamu cantik 🤍");
    assert!(caption.highlight);
    assert_eq!(show.scene().slot(CardKind::LandscapePair).stage, SlotStage::Removed);

    run_frames(&mut show, fps, 39 * fps, 50 * fps);
    let last = show.scene().slot(CardKind::Final);
    assert_eq!(last.stage, SlotStage::Visible);
    assert_eq!(last.changed_at, 50.0);
    assert_eq!(CardKind::Final.caption(), Some("Untuk Putri 💕"));

    run_frames(&mut show, fps, 50 * fps, 90 * fps);
    assert_eq!(show.scene().slot(CardKind::Final).stage, SlotStage::Visible);
    assert!(show.scheduler().is_exhausted());
    assert!(show.lyrics().is_exhausted());
}

#[test]
fn cues_fire_once_in_order_and_never_early() {
    let cues = standard_cues();
    let mut rng = StdRng::seed_from_u64(99);
    for seed in 0..20 {
        let mut show = session(seed);
        let mut shown = Vec::new();
        let mut now = 0.0_f32;
        while now < 70.0 {
            // Irregular frame pacing with the odd long stall.
            now += if rng.random_bool(0.05) { rng.random_range(1.0..9.0) } else { rng.random_range(0.001..0.05) };
            if let Some(caption) = show.tick(now).caption {
                assert!(now >= cues[caption.index].trigger_time, "cue {} shown at {now}", caption.index);
                shown.push(caption.index);
            }
        }
        assert_eq!(shown, (0..cues.len()).collect::<Vec<_>>());
    }
}

#[test]
fn cue_pointer_only_moves_forward() {
    let mut show = session(3);
    let mut fired = 0;
    for frame in 0..=(55 * 30) {
        show.tick(frame as f32 / 30.0);
        assert!(show.lyrics().fired() >= fired);
        fired = show.lyrics().fired();
    }
    for _ in 0..10 {
        assert!(show.tick(60.0).caption.is_none());
    }
    assert_eq!(show.lyrics().fired(), 11);
}

#[test]
fn card_introductions_fire_exactly_once() {
    let offsets = [(CardKind::LandscapePair, 13.0), (CardKind::Intermediate, 30.0), (CardKind::Final, 50.0)];
    for fps in [7, 24, 60, 144] {
        let mut show = session(5);
        let reports = run_frames(&mut show, fps, 0, 60 * fps);
        for (kind, offset) in offsets {
            let presented: Vec<f32> = reports
                .iter()
                .filter(|r| r.actions.contains(&ShowAction::Present(kind)))
                .map(|r| r.at)
                .collect();
            assert_eq!(presented.len(), 1, "{kind:?} at {fps} fps");
            assert!(presented[0] >= offset);
            assert!(presented[0] < offset + 1.0 / fps as f32 + 1e-3);
        }
    }
}

#[test]
fn intermediate_card_leaves_fifteen_seconds_after_arriving() {
    let mut show = session(8);
    show.tick(30.0);
    assert_eq!(show.scene().slot(CardKind::Intermediate).stage, SlotStage::Visible);
    show.tick(44.9);
    assert_eq!(show.scene().slot(CardKind::Intermediate).stage, SlotStage::Visible);
    show.tick(45.0);
    assert_eq!(show.scene().slot(CardKind::Intermediate).stage, SlotStage::Exiting);
    show.tick(46.0);
    assert_eq!(show.scene().slot(CardKind::Intermediate).stage, SlotStage::Removed);
}

#[test]
fn late_captions_move_to_center_during_photo_cards() {
    let mut show = session(12);
    // Stall straight to 51s: cues are shown one per tick, all inside the center window.
    for _ in 0..11 {
        let caption = show.tick(51.0).caption.unwrap();
        assert_eq!(caption.zone, Zone::Center);
    }
}
