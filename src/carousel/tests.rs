use super::*;
use crate::animation::{AnimationRequest, MockAnimator, RecordingAnimator};
use crate::constants::test_constants::*;
use crate::scheduler::{EventLoop, MockScheduler};
use crate::time_source::{TimeSource, VirtualClock};
use mockall::predicate::eq;
use std::sync::Arc;

struct Harness {
    clock: Arc<VirtualClock>,
    event_loop: Rc<EventLoop>,
    recorder: RecordingAnimator,
    carousel: CarouselController,
}

impl Harness {
    fn new() -> Self {
        let clock = Arc::new(VirtualClock::new());
        let event_loop = Rc::new(EventLoop::new(clock.clone()));
        let recorder = RecordingAnimator::new();
        let scheduler: Rc<dyn Scheduler> = event_loop.clone();
        let carousel = CarouselController::new(scheduler, Box::new(recorder.clone()))
            .with_fade(Duration::from_millis(TEST_FADE_MS));
        Self {
            clock,
            event_loop,
            recorder,
            carousel,
        }
    }

    fn started(slides: Vec<Slide>) -> Self {
        let mut harness = Self::new();
        harness
            .carousel
            .start(slides, Duration::from_millis(TEST_INTERVAL_MS))
            .unwrap();
        harness
    }

    fn run_until(&mut self, millis: u64) {
        let event_loop = self.event_loop.clone();
        let carousel = &mut self.carousel;
        event_loop.run_until(Duration::from_millis(millis), |event| {
            carousel.on_timer(&event);
        });
    }
}

fn test_slides(count: usize) -> Vec<Slide> {
    (0..count)
        .map(|i| Slide::new(format!("/slide{i}.jpg"), format!("Slide {i}")))
        .collect()
}

fn abc_slides() -> Vec<Slide> {
    TEST_SLIDE_IMAGES
        .iter()
        .zip(["A", "B", "C"])
        .map(|(image, caption)| Slide::new(*image, caption))
        .collect()
}

/// Slides left visible after replaying every recorded request.
fn visible_slides(recorder: &RecordingAnimator) -> Vec<usize> {
    let mut opacity = std::collections::BTreeMap::new();
    for request in recorder.requests() {
        match request {
            AnimationRequest::Fade { slide, to, .. } => opacity.insert(slide, to),
            AnimationRequest::Set { slide, value } => opacity.insert(slide, value),
        };
    }
    opacity
        .into_iter()
        .filter(|(_, value)| *value == Opacity::VISIBLE)
        .map(|(slide, _)| slide)
        .collect()
}

fn idle(index: usize) -> TransitionState {
    TransitionState::Idle { index }
}

fn fading(from: usize, to: usize, elapsed_ms: u64) -> TransitionState {
    TransitionState::Transitioning {
        from,
        to,
        elapsed: Duration::from_millis(elapsed_ms),
    }
}

#[test]
fn test_start_shows_first_slide_without_fade() {
    let harness = Harness::started(abc_slides());

    assert_eq!(harness.carousel.transition(), idle(0));
    assert_eq!(harness.carousel.current_slide().unwrap().caption, "A");
    assert_eq!(
        harness.recorder.requests(),
        vec![AnimationRequest::Set {
            slide: 0,
            value: Opacity::VISIBLE
        }]
    );
    assert_eq!(harness.event_loop.pending(), 1);
    assert!(harness.carousel.is_running());
}

#[test]
fn test_three_slide_timeline() {
    let mut harness = Harness::started(abc_slides());

    harness.run_until(4999);
    assert_eq!(harness.carousel.transition(), idle(0));

    harness.run_until(5000);
    assert_eq!(harness.carousel.transition(), fading(0, 1, 0));
    assert_eq!(harness.carousel.current_index(), 1);

    harness.run_until(6199);
    assert_eq!(harness.carousel.transition(), fading(0, 1, 1199));

    harness.run_until(6200);
    assert_eq!(harness.carousel.transition(), idle(1));

    harness.run_until(10000);
    assert_eq!(harness.carousel.transition(), fading(1, 2, 0));

    harness.run_until(11200);
    assert_eq!(harness.carousel.transition(), idle(2));

    harness.run_until(15000);
    assert_eq!(harness.carousel.current_index(), 0);
    assert_eq!(harness.carousel.transition(), fading(2, 0, 0));

    harness.run_until(16200);
    assert_eq!(harness.carousel.transition(), idle(0));
}

#[test]
fn test_tick_requests_simultaneous_cross_fade() {
    let mut harness = Harness::started(abc_slides());
    harness.recorder.take();

    harness.run_until(5000);

    let fade = Duration::from_millis(TEST_FADE_MS);
    assert_eq!(
        harness.recorder.take(),
        vec![
            AnimationRequest::Fade {
                slide: 0,
                from: Opacity::VISIBLE,
                to: Opacity::HIDDEN,
                duration: fade,
            },
            AnimationRequest::Fade {
                slide: 1,
                from: Opacity::HIDDEN,
                to: Opacity::VISIBLE,
                duration: fade,
            },
        ]
    );

    // Settling does not ask the animator for anything more
    harness.run_until(6200);
    assert!(harness.recorder.requests().is_empty());
}

#[test]
fn test_fade_never_overlaps_next_tick() {
    let mut harness = Harness::started(test_slides(4));
    let event_loop = harness.event_loop.clone();
    let carousel = &mut harness.carousel;

    let mut ticks = 0;
    event_loop.run_until(Duration::from_millis(60_000), |event| {
        let was_idle = carousel.transition().is_idle();
        let before = carousel.current_index();
        carousel.on_timer(&event);
        if carousel.current_index() != before {
            assert!(was_idle, "tick at {:?} landed mid-fade", event.fired_at);
            ticks += 1;
        }
    });
    assert_eq!(ticks, 12);
}

#[test]
fn test_start_with_empty_slides_schedules_nothing() {
    let mut scheduler = MockScheduler::new();
    scheduler.expect_schedule().never();
    scheduler.expect_cancel().never();
    let mut animator = MockAnimator::new();
    animator.expect_set_opacity().never();
    animator.expect_fade().never();

    let mut carousel = CarouselController::new(Rc::new(scheduler), Box::new(animator));
    let result = carousel.start(Vec::new(), Duration::from_millis(TEST_INTERVAL_MS));

    assert_eq!(result, Err(ConfigurationError::EmptySlides));
    assert!(!carousel.is_running());
}

#[test]
fn test_start_rejects_unusable_timing() {
    let mut harness = Harness::new();
    assert_eq!(
        harness.carousel.start(abc_slides(), Duration::ZERO),
        Err(ConfigurationError::ZeroInterval)
    );
    assert_eq!(
        harness
            .carousel
            .start(abc_slides(), Duration::from_millis(TEST_FADE_MS)),
        Err(ConfigurationError::OverlappingFade {
            interval: Duration::from_millis(TEST_FADE_MS),
            fade: Duration::from_millis(TEST_FADE_MS),
        })
    );
    assert_eq!(harness.event_loop.pending(), 0);

    let mut zero_fade = Harness::new();
    zero_fade.carousel = CarouselController::new(
        zero_fade.event_loop.clone(),
        Box::new(zero_fade.recorder.clone()),
    )
    .with_fade(Duration::ZERO);
    assert_eq!(
        zero_fade
            .carousel
            .start(abc_slides(), Duration::from_millis(TEST_INTERVAL_MS)),
        Err(ConfigurationError::ZeroFade)
    );
}

#[test]
fn test_stop_freezes_index() {
    let mut harness = Harness::started(abc_slides());
    harness.run_until(7000);
    assert_eq!(harness.carousel.current_index(), 1);

    harness.carousel.stop();
    harness.recorder.take();
    harness.run_until(120_000);

    assert_eq!(harness.carousel.current_index(), 1);
    assert_eq!(harness.carousel.transition(), idle(1));
    assert!(harness.recorder.requests().is_empty());
    assert_eq!(harness.event_loop.pending(), 0);
}

#[test]
fn test_stop_mid_fade_settles_on_incoming_slide() {
    let mut harness = Harness::started(abc_slides());
    harness.run_until(5600);
    assert_eq!(harness.carousel.transition(), fading(0, 1, 600));
    harness.recorder.take();

    harness.carousel.stop();

    assert_eq!(harness.carousel.transition(), idle(1));
    assert_eq!(
        harness.recorder.requests(),
        vec![
            AnimationRequest::Set {
                slide: 0,
                value: Opacity::HIDDEN
            },
            AnimationRequest::Set {
                slide: 1,
                value: Opacity::VISIBLE
            },
        ]
    );
    assert_eq!(harness.event_loop.pending(), 0);

    // Stopping twice is harmless
    harness.carousel.stop();
    assert_eq!(harness.carousel.transition(), idle(1));
}

#[test]
fn test_dequeued_tick_is_ignored_after_stop() {
    let mut harness = Harness::started(abc_slides());
    harness.clock.advance_to(Duration::from_millis(5000));
    let in_flight = harness.event_loop.pop_due().unwrap();

    harness.carousel.stop();

    assert!(!harness.carousel.on_timer(&in_flight));
    assert_eq!(harness.carousel.current_index(), 0);
    assert_eq!(harness.carousel.transition(), idle(0));
}

#[test]
fn test_single_slide_ticks_onto_itself_without_fading() {
    let mut harness = Harness::started(test_slides(1));
    harness.recorder.take();

    let event_loop = harness.event_loop.clone();
    let carousel = &mut harness.carousel;
    let mut ticks = 0;
    event_loop.run_until(Duration::from_millis(20_000), |event| {
        assert!(carousel.on_timer(&event));
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.transition(), idle(0));
        ticks += 1;
    });

    assert_eq!(ticks, 4);
    assert!(harness.recorder.requests().is_empty());
    // Only the autoplay timer, never a fade timer
    assert_eq!(harness.event_loop.pending(), 1);
}

#[test]
fn test_reset_cross_fades_and_keeps_cadence() {
    let mut harness = Harness::started(abc_slides());
    harness.run_until(1000);

    harness.carousel.reset(2).unwrap();
    assert_eq!(harness.carousel.transition(), fading(0, 2, 0));

    harness.run_until(2200);
    assert_eq!(harness.carousel.transition(), idle(2));

    harness.run_until(4999);
    assert_eq!(harness.carousel.current_index(), 2);

    harness.run_until(5000);
    assert_eq!(harness.carousel.transition(), fading(2, 0, 0));
}

#[test]
fn test_reset_to_current_slide_is_noop() {
    let mut harness = Harness::started(abc_slides());
    harness.recorder.take();

    harness.carousel.reset(0).unwrap();

    assert_eq!(harness.carousel.transition(), idle(0));
    assert!(harness.recorder.requests().is_empty());
}

#[test]
fn test_reset_out_of_range() {
    let mut harness = Harness::started(abc_slides());
    assert_eq!(
        harness.carousel.reset(3),
        Err(ConfigurationError::IndexOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(harness.carousel.current_index(), 0);
}

#[test]
fn test_reset_mid_fade_finishes_previous_fade_first() {
    let mut harness = Harness::started(abc_slides());
    harness.run_until(5300);
    harness.recorder.take();

    harness.carousel.reset(2).unwrap();

    let requests = harness.recorder.requests();
    assert_eq!(
        requests[..2],
        [
            AnimationRequest::Set {
                slide: 0,
                value: Opacity::HIDDEN
            },
            AnimationRequest::Set {
                slide: 1,
                value: Opacity::VISIBLE
            },
        ]
    );
    assert_eq!(harness.carousel.transition(), fading(1, 2, 0));
    // One autoplay timer plus exactly one fade timer
    assert_eq!(harness.event_loop.pending(), 2);
}

#[test]
fn test_reset_on_stopped_carousel_jumps_instantly() {
    let mut harness = Harness::started(abc_slides());
    harness.carousel.stop();

    harness.carousel.reset(2).unwrap();

    assert_eq!(harness.carousel.transition(), idle(2));
    assert_eq!(harness.event_loop.pending(), 0);
}

#[test]
fn test_slide_count_change_resets_progress() {
    let mut harness = Harness::started(abc_slides());
    harness.run_until(7000);
    assert_eq!(harness.carousel.current_index(), 1);

    harness.carousel.set_slides(test_slides(4)).unwrap();
    assert_eq!(harness.carousel.transition(), idle(0));

    // The interval restarts from the moment of the change
    harness.run_until(11_999);
    assert_eq!(harness.carousel.current_index(), 0);
    harness.run_until(12_000);
    assert_eq!(harness.carousel.current_index(), 1);
    assert_eq!(harness.event_loop.pending(), 2);
}

#[test]
fn test_same_slide_count_keeps_phase() {
    let mut harness = Harness::started(abc_slides());
    harness.run_until(7000);

    harness.carousel.set_slides(test_slides(3)).unwrap();
    assert_eq!(harness.carousel.current_index(), 1);
    assert_eq!(harness.carousel.current_slide().unwrap().caption, "Slide 1");

    harness.run_until(10_000);
    assert_eq!(harness.carousel.current_index(), 2);
}

#[test]
fn test_set_slides_rejects_empty_sequence() {
    let mut harness = Harness::started(abc_slides());
    assert_eq!(
        harness.carousel.set_slides(Vec::new()),
        Err(ConfigurationError::EmptySlides)
    );
    assert_eq!(harness.carousel.slides().len(), 3);
}

#[test]
fn test_restart_keeps_single_autoplay_timer() {
    let mut harness = Harness::started(abc_slides());
    harness.run_until(5000);

    harness
        .carousel
        .start(abc_slides(), Duration::from_millis(TEST_INTERVAL_MS))
        .unwrap();

    assert_eq!(harness.carousel.transition(), idle(0));
    assert_eq!(harness.event_loop.pending(), 1);
}

#[test]
fn test_slide_count_change_hides_previous_slide() {
    let mut harness = Harness::started(abc_slides());
    harness.run_until(7000);
    assert_eq!(visible_slides(&harness.recorder), vec![1]);

    harness.carousel.set_slides(test_slides(4)).unwrap();
    assert_eq!(harness.carousel.transition(), idle(0));
    assert_eq!(visible_slides(&harness.recorder), vec![0]);
}

#[test]
fn test_slide_count_change_mid_fade_leaves_one_visible() {
    let mut harness = Harness::started(abc_slides());
    harness.run_until(5600);

    harness.carousel.set_slides(test_slides(2)).unwrap();
    assert_eq!(visible_slides(&harness.recorder), vec![0]);
    assert_eq!(harness.event_loop.pending(), 1);
}

#[test]
fn test_restart_hides_previous_slide() {
    let mut harness = Harness::started(abc_slides());
    harness.run_until(5600);

    harness
        .carousel
        .start(abc_slides(), Duration::from_millis(TEST_INTERVAL_MS))
        .unwrap();
    assert_eq!(harness.carousel.transition(), idle(0));
    assert_eq!(visible_slides(&harness.recorder), vec![0]);

    harness.run_until(12_000);
    harness
        .carousel
        .start(abc_slides(), Duration::from_millis(TEST_INTERVAL_MS))
        .unwrap();
    assert_eq!(visible_slides(&harness.recorder), vec![0]);
}

#[test]
fn test_drop_releases_every_timer() {
    let mut harness = Harness::started(abc_slides());
    harness.run_until(5600);
    assert_eq!(harness.event_loop.pending(), 2);

    let Harness {
        event_loop,
        carousel,
        ..
    } = harness;
    drop(carousel);

    assert_eq!(event_loop.pending(), 0);
}

#[test]
fn test_foreign_timer_events_are_not_claimed() {
    let mut harness = Harness::started(abc_slides());
    let foreign = harness
        .event_loop
        .schedule(TimerKind::Once(Duration::from_millis(10)));
    harness.clock.advance(Duration::from_millis(10));

    let event = harness.event_loop.pop_due().unwrap();
    assert_eq!(event.id, foreign);
    assert!(!harness.carousel.on_timer(&event));
    assert_eq!(harness.clock.now(), Duration::from_millis(10));
}

#[test]
fn test_animator_boundary_calls() {
    let fade = Duration::from_millis(TEST_FADE_MS);
    let mut animator = MockAnimator::new();
    animator
        .expect_set_opacity()
        .with(eq(0), eq(Opacity::VISIBLE))
        .times(1)
        .return_const(());
    animator
        .expect_fade()
        .with(eq(0), eq(Opacity::VISIBLE), eq(Opacity::HIDDEN), eq(fade))
        .times(1)
        .return_const(());
    animator
        .expect_fade()
        .with(eq(1), eq(Opacity::HIDDEN), eq(Opacity::VISIBLE), eq(fade))
        .times(1)
        .return_const(());

    let clock = Arc::new(VirtualClock::new());
    let event_loop = Rc::new(EventLoop::new(clock));
    let mut carousel = CarouselController::new(event_loop.clone(), Box::new(animator))
        .with_fade(fade);
    carousel
        .start(abc_slides(), Duration::from_millis(TEST_INTERVAL_MS))
        .unwrap();

    event_loop.run_until(Duration::from_millis(6200), |event| {
        carousel.on_timer(&event);
    });
    assert_eq!(carousel.transition(), idle(1));
}
