//! Hub-level coalescing behavior, driven through the mock clock.

use mock::{make_hub, make_hub_with_delay, NotifyEvent};
use notify::{
    EntityId, NotifyError, Progress, ProgressHubBuilder, ProgressNotifier, SubmitOutcome,
};
use std::sync::Arc;
use std::time::Duration;

const DELAY_BETWEEN_CALLS: u64 = 10;

fn entity(name: &str) -> EntityId {
    EntityId::new(name)
}

#[test]
fn all_progress_is_notified_for_slow_updates() {
    let (hub, notifier, clock) = make_hub_with_delay(1);
    let id = entity("dl-slow");

    for pct in [10u64, 30, 30] {
        let outcome = hub.submit_progress(&id, Progress::percent(pct));
        assert_eq!(
            outcome,
            SubmitOutcome::Emitted,
            "updates spaced beyond the delay should all emit"
        );
        clock.advance(DELAY_BETWEEN_CALLS);
    }

    assert_eq!(
        notifier.take_events(),
        vec![
            NotifyEvent::Progress(id.clone(), Progress::percent(10)),
            NotifyEvent::Progress(id.clone(), Progress::percent(30)),
            NotifyEvent::Progress(id.clone(), Progress::percent(30)),
        ]
    );
}

#[test]
fn only_two_progress_for_fast_updates() {
    let (hub, notifier, clock) = make_hub();
    let id = entity("dl-fast");

    assert_eq!(
        hub.submit_progress(&id, Progress::percent(10)),
        SubmitOutcome::Emitted
    );
    clock.advance(DELAY_BETWEEN_CALLS);
    assert_eq!(
        hub.submit_progress(&id, Progress::percent(30)),
        SubmitOutcome::Deferred
    );
    clock.advance(DELAY_BETWEEN_CALLS);
    assert_eq!(
        hub.submit_progress(&id, Progress::percent(60)),
        SubmitOutcome::Coalesced
    );

    // Nothing more happens until the deadline anchored at the first emission.
    clock.set(499);
    assert_eq!(hub.poll_due(), 0);
    clock.set(500);
    assert_eq!(hub.poll_due(), 1);

    assert_eq!(
        notifier.take_events(),
        vec![
            NotifyEvent::Progress(id.clone(), Progress::percent(10)),
            NotifyEvent::Progress(id.clone(), Progress::percent(60)),
        ],
        "the middle update must never be emitted on its own"
    );
}

#[test]
fn next_deadline_tracks_earliest_pending_lane() {
    let (hub, _notifier, clock) = make_hub();
    let first = entity("dl-a");
    let second = entity("dl-b");

    hub.submit_progress(&first, Progress::percent(5));
    assert_eq!(hub.next_deadline(), None, "immediate emission leaves no deadline");

    clock.set(100);
    hub.submit_progress(&first, Progress::percent(6));
    assert_eq!(hub.next_deadline(), Some(500));

    clock.set(200);
    hub.submit_progress(&second, Progress::percent(1));
    clock.set(210);
    hub.submit_progress(&second, Progress::percent(2));
    assert_eq!(
        hub.next_deadline(),
        Some(500),
        "earliest lane wins even with a later lane pending at 700"
    );
}

#[test]
fn completion_flushes_buffered_progress_first() {
    let (hub, notifier, clock) = make_hub();
    let id = entity("dl-complete");

    hub.submit_progress(&id, Progress::percent(10));
    clock.advance(DELAY_BETWEEN_CALLS);
    hub.submit_progress(&id, Progress::percent(80));
    hub.complete(&id).expect("entity is live");

    assert_eq!(
        notifier.take_events(),
        vec![
            NotifyEvent::Progress(id.clone(), Progress::percent(10)),
            NotifyEvent::Progress(id.clone(), Progress::percent(80)),
            NotifyEvent::Succeeded(id.clone()),
        ],
        "terminal success must flush the buffered update in order"
    );
}

#[test]
fn completion_without_prior_progress_notifies_directly() {
    let (hub, notifier, _clock) = make_hub();
    let id = entity("dl-direct");

    hub.complete(&id).expect("fresh entity");
    assert_eq!(notifier.take_events(), vec![NotifyEvent::Succeeded(id)]);
}

#[test]
fn non_resumable_interrupt_fails_the_entity() {
    let (hub, notifier, _clock) = make_hub();
    let id = entity("dl-broken");

    hub.interrupt(&id, false).expect("fresh entity");
    assert_eq!(notifier.take_events(), vec![NotifyEvent::Failed(id.clone())]);

    assert_eq!(
        hub.submit_progress(&id, Progress::percent(50)),
        SubmitOutcome::Rejected,
        "terminal failure must reject later updates"
    );
}

#[test]
fn resumable_interrupt_pauses_and_discards_pending() {
    let (hub, notifier, clock) = make_hub();
    let id = entity("dl-flaky");

    hub.submit_progress(&id, Progress::percent(10));
    clock.advance(DELAY_BETWEEN_CALLS);
    hub.submit_progress(&id, Progress::percent(20));
    hub.interrupt(&id, true).expect("entity is live");

    assert_eq!(
        notifier.take_events(),
        vec![
            NotifyEvent::Progress(id.clone(), Progress::percent(10)),
            NotifyEvent::Interrupted(id.clone(), true),
        ],
        "stale buffered progress should not surface after an interruption"
    );

    // The lane is still live and may resume reporting.
    clock.set(5_000);
    assert_eq!(
        hub.submit_progress(&id, Progress::percent(25)),
        SubmitOutcome::Emitted
    );
}

#[test]
fn cancel_discards_buffered_progress() {
    let (hub, notifier, clock) = make_hub();
    let id = entity("dl-cancel");

    hub.submit_progress(&id, Progress::percent(10));
    clock.advance(DELAY_BETWEEN_CALLS);
    hub.submit_progress(&id, Progress::percent(40));
    hub.cancel(&id).expect("entity is live");

    assert_eq!(
        notifier.take_events(),
        vec![
            NotifyEvent::Progress(id.clone(), Progress::percent(10)),
            NotifyEvent::Canceled(id.clone()),
        ]
    );
}

#[test]
fn terminal_transitions_are_rejected_twice() {
    let (hub, _notifier, _clock) = make_hub();
    let id = entity("dl-done");

    hub.complete(&id).expect("first terminal transition");
    assert_eq!(
        hub.complete(&id),
        Err(NotifyError::AlreadyFinished(id.clone()))
    );
    assert_eq!(hub.pause(&id), Err(NotifyError::AlreadyFinished(id)));
}

#[test]
fn entities_coalesce_independently() {
    let (hub, notifier, clock) = make_hub();
    let first = entity("dl-1");
    let second = entity("dl-2");
    let third = entity("dl-3");

    // Each entity's first update is immediate regardless of the others.
    hub.submit_progress(&first, Progress::percent(1));
    hub.submit_progress(&second, Progress::percent(2));
    hub.submit_progress(&third, Progress::percent(3));
    assert_eq!(notifier.event_count(), 3);

    // A deferral on one lane does not rate-limit the others.
    clock.advance(DELAY_BETWEEN_CALLS);
    assert_eq!(
        hub.submit_progress(&first, Progress::percent(11)),
        SubmitOutcome::Deferred
    );
    hub.complete(&second).expect("second entity is live");
    assert_eq!(
        notifier.take_events().last(),
        Some(&NotifyEvent::Succeeded(second))
    );
}

#[test]
fn pump_emits_deferred_update_in_real_time() {
    let notifier = mock::RecordingNotifier::new_handle();
    let hub = ProgressHubBuilder::new()
        .notifier(Arc::clone(&notifier) as Arc<dyn ProgressNotifier>)
        .min_delay_ms(50)
        .build()
        .expect("hub build");
    let _pump = notify::spawn_pump(Arc::clone(&hub)).expect("pump spawn");

    let id = entity("dl-pump");
    hub.submit_progress(&id, Progress::percent(10));
    hub.submit_progress(&id, Progress::percent(90));

    // The deferred update must arrive without any explicit poll.
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while notifier.event_count() < 2 {
        assert!(
            std::time::Instant::now() < deadline,
            "pump failed to emit the deferred update"
        );
        std::thread::sleep(Duration::from_millis(5));
    }

    let events = notifier.take_events();
    assert_eq!(
        events.last(),
        Some(&NotifyEvent::Progress(id, Progress::percent(90)))
    );
}
