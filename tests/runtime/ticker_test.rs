/*!
 * Tick Source Tests
 * Timer behavior on a paused tokio clock
 */

use pretty_assertions::assert_eq;
use rr_scheduler_sim::{SchedulerEvent, TickSource};
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::test(start_paused = true)]
async fn test_one_tick_per_period() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let source = TickSource::start(Duration::from_millis(10), tx).unwrap();
    assert_eq!(source.period(), Duration::from_millis(10));

    tokio::time::sleep(Duration::from_millis(105)).await;
    let fired = source.stop().await;
    assert_eq!(fired, 10);

    let mut received = 0;
    while let Some(event) = rx.recv().await {
        assert_eq!(event, SchedulerEvent::Tick);
        received += 1;
    }
    assert_eq!(received, fired);
}

#[tokio::test(start_paused = true)]
async fn test_no_tick_before_first_period() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let source = TickSource::start(Duration::from_millis(50), tx).unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(rx.try_recv().is_err());

    assert_eq!(source.stop().await, 0);
}

#[tokio::test]
async fn test_stops_when_receiver_dropped() {
    let (tx, rx) = mpsc::unbounded_channel();
    let source = TickSource::start(Duration::from_millis(1), tx).unwrap();
    drop(rx);

    tokio::time::sleep(Duration::from_millis(20)).await;
    // Task already ended on the failed send; stop still returns cleanly
    assert_eq!(source.stop().await, 0);
}
