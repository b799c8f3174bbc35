use super::SlotBank;
use crate::clock::ManualClock;
use crate::config::SLOT_CAPACITY;
use crate::error::TimerError;
use std::time::Duration;

fn bank() -> (SlotBank<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (SlotBank::new(clock.clone()), clock)
}

fn cycle(bank: &mut SlotBank<ManualClock>, clock: &ManualClock, slot: usize, wall_ms: u64) {
    bank.start(slot).unwrap();
    clock.advance_ms(wall_ms);
    bank.stop(slot).unwrap();
}

fn predicted_cycle(
    bank: &mut SlotBank<ManualClock>,
    clock: &ManualClock,
    slot: usize,
    wall_ms: u64,
    predicted_ms: i64,
) {
    bank.start(slot).unwrap();
    clock.advance_ms(wall_ms);
    bank.stop_with_prediction(slot, predicted_ms).unwrap();
}

#[test]
fn test_default_capacity() {
    let (bank, _clock) = bank();
    assert_eq!(bank.capacity(), SLOT_CAPACITY);
}

#[test]
fn test_report_empty_after_init_all() {
    let (mut bank, clock) = bank();
    cycle(&mut bank, &clock, 3, 10);
    bank.init_all();

    assert_eq!(bank.total_calls(), 0);
    assert_eq!(bank.report(), "");
}

#[test]
fn test_slot_five_two_calls() {
    let (mut bank, clock) = bank();
    cycle(&mut bank, &clock, 5, 100);
    cycle(&mut bank, &clock, 5, 200);

    let stats = bank.slot(5).unwrap();
    assert_eq!(stats.calls, 2);
    assert_eq!(stats.user_ms, 300);

    let expected = "    n     Number   User ticks        Avg  Syst time
    5          2          300      150.00          0

";
    assert_eq!(bank.report(), expected);
    assert!(!bank.report().contains("Prediction"));
}

#[test]
fn test_average_is_real_division() {
    let (mut bank, clock) = bank();
    cycle(&mut bank, &clock, 0, 3);
    cycle(&mut bank, &clock, 0, 4);

    assert!(bank.report().contains("        3.50 "));
}

#[test]
fn test_only_active_slots_reported() {
    let (mut bank, clock) = bank();
    cycle(&mut bank, &clock, 0, 1);
    cycle(&mut bank, &clock, 1999, 2);

    let report = bank.report();
    let rows: Vec<&str> = report.lines().skip(1).filter(|l| !l.is_empty()).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("    0 "));
    assert!(rows[1].starts_with(" 1999 "));

    let active: Vec<usize> = bank.active_slots().map(|(i, _)| i).collect();
    assert_eq!(active, vec![0, 1999]);
}

#[test]
fn test_slots_are_independent() {
    let (mut bank, clock) = bank();
    bank.start(1).unwrap();
    clock.advance_ms(5);
    bank.start(2).unwrap();
    clock.advance_ms(7);
    bank.stop(1).unwrap();
    clock.advance_ms(1);
    bank.stop(2).unwrap();

    assert_eq!(bank.slot(1).unwrap().user_ms, 12);
    assert_eq!(bank.slot(2).unwrap().user_ms, 8);
    assert_eq!(bank.total_calls(), 2);
}

#[test]
fn test_cpu_time_per_slot() {
    let (mut bank, clock) = bank();
    bank.start(4).unwrap();
    clock.advance(Duration::from_millis(30), 25);
    bank.stop(4).unwrap();

    assert_eq!(bank.slot(4).unwrap().sys_ms, 25);
    assert!(bank.report().contains("    4          1           30       30.00         25\n"));
}

#[test]
fn test_single_prediction() {
    let (mut bank, clock) = bank();
    predicted_cycle(&mut bank, &clock, 2, 40, 55);

    assert_eq!(bank.prediction_error(), -15);
    assert_eq!(bank.prediction_abs_error(), 15);
    assert_eq!(bank.slot(2).unwrap().user_ms, 40);
}

#[test]
fn test_predictions_accumulate() {
    let (mut bank, clock) = bank();
    predicted_cycle(&mut bank, &clock, 0, 40, 55);
    predicted_cycle(&mut bank, &clock, 1, 100, 70);

    assert_eq!(bank.prediction_error(), (40 - 55) + (100 - 70));
    assert_eq!(bank.prediction_abs_error(), 15 + 30);
}

#[test]
fn test_prediction_block_in_report() {
    let (mut bank, clock) = bank();
    predicted_cycle(&mut bank, &clock, 0, 40, 55);
    predicted_cycle(&mut bank, &clock, 1, 100, 70);
    // Plain stop still counts towards the mean's denominator
    cycle(&mut bank, &clock, 1, 10);

    let report = bank.report();
    // error 15 / 3 calls = 5, abs error 45 / 3 = 15
    assert!(report.ends_with(
        "\nTotal number          3\nPrediction mean          5\nPrediction abs mean         15\n\n"
    ));
}

#[test]
fn test_no_prediction_block_when_errors_cancel() {
    let (mut bank, clock) = bank();
    predicted_cycle(&mut bank, &clock, 0, 10, 20);
    predicted_cycle(&mut bank, &clock, 0, 20, 10);

    assert_eq!(bank.prediction_error(), 0);
    assert_eq!(bank.prediction_abs_error(), 20);
    assert!(!bank.report().contains("Prediction"));
}

#[test]
fn test_init_all_keeps_predictions() {
    let (mut bank, clock) = bank();
    predicted_cycle(&mut bank, &clock, 0, 10, 4);
    bank.init_all();
    assert_eq!(bank.prediction_error(), 6);

    bank.reset_predictions();
    assert_eq!(bank.prediction_error(), 0);
    assert_eq!(bank.prediction_abs_error(), 0);
}

#[test]
fn test_init_all_idles_running_slots() {
    let (mut bank, _clock) = bank();
    bank.start(9).unwrap();
    bank.init_all();
    assert!(!bank.is_running(9));
    assert_eq!(bank.stop(9), Err(TimerError::SlotNotRunning(9)));
}

#[test]
fn test_out_of_range_slot() {
    let clock = ManualClock::new();
    let mut bank = SlotBank::with_capacity(clock, 4);

    assert_eq!(
        bank.start(4),
        Err(TimerError::SlotOutOfRange {
            slot: 4,
            capacity: 4
        })
    );
    assert!(bank.stop(10).is_err());
    assert!(bank.stop_with_prediction(10, 0).is_err());
    assert_eq!(bank.slot(4), None);
    assert_eq!(bank.prediction_error(), 0);
}

#[test]
fn test_misordered_calls_rejected() {
    let (mut bank, _clock) = bank();
    assert_eq!(bank.stop(3), Err(TimerError::SlotNotRunning(3)));
    assert_eq!(
        bank.stop_with_prediction(3, 5),
        Err(TimerError::SlotNotRunning(3))
    );
    bank.start(3).unwrap();
    assert_eq!(bank.start(3), Err(TimerError::SlotAlreadyRunning(3)));
    assert_eq!(bank.slot(3).unwrap().calls, 1);
    assert_eq!(bank.prediction_error(), 0);
}

#[test]
fn test_extreme_predictions_saturate() {
    let (mut bank, clock) = bank();
    predicted_cycle(&mut bank, &clock, 0, 5, i64::MIN);

    assert_eq!(bank.prediction_error(), i64::MAX);
    assert_eq!(bank.prediction_abs_error(), i64::MAX);
    // The cycle itself still lands in the slot totals
    assert_eq!(bank.slot(0).unwrap().user_ms, 5);

    predicted_cycle(&mut bank, &clock, 0, 5, i64::MIN);
    assert_eq!(bank.prediction_error(), i64::MAX);
    assert_eq!(bank.prediction_abs_error(), i64::MAX);
    assert_eq!(bank.slot(0).unwrap().calls, 2);
}

#[test]
fn test_large_positive_prediction() {
    let (mut bank, clock) = bank();
    predicted_cycle(&mut bank, &clock, 1, 5, i64::MAX);

    assert_eq!(bank.prediction_error(), 5 - i64::MAX);
    assert_eq!(bank.prediction_abs_error(), i64::MAX - 5);
    assert!(bank.report().contains("Prediction abs mean"));
}
