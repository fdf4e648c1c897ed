//! Tests that must recover secrets from the variable-time comparator.
//!
//! Every test here times real comparisons, so they run one at a time.

use std::time::Duration;

use serial_test::serial;

use compare_oracle::{
    generate_secret, Config, DelayMode, Target, TimingAttack, VariableTimeComparator,
};

/// 2 ms spin delay, 8 trials.
fn leaky_config() -> Config {
    Config::quick()
        .with_per_byte_delay(Duration::from_millis(2))
        .with_delay_mode(DelayMode::Spin)
        .with_trials(8)
}

/// The worked example: secret 0x41 0x99 with a 1ms delay and 8 trials.
#[test]
#[serial]
fn recovers_worked_example() {
    let secret = [0x41u8, 0x99];
    let config = Config::default()
        .with_secret_len(2)
        .with_per_byte_delay(Duration::from_millis(1))
        .with_delay_mode(DelayMode::Spin)
        .with_trials(8);
    let mut target = Target::new(
        &secret,
        VariableTimeComparator::new(config.per_byte_delay, config.delay_mode),
    );

    let recovery = TimingAttack::with_config(config).recover(&mut target, secret.len());

    assert_eq!(recovery.secret, secret);
    let first = &recovery.log.records()[0];
    // Only 0x41 reaches the per-byte delay at position 0.
    assert!(
        first.margin() > 0.0005,
        "0x41 should lead by most of a millisecond, got {}",
        first.margin()
    );
    let second = &recovery.log.records()[1];
    assert!(
        second.mean_secs > first.mean_secs,
        "a full match waits twice: {} vs {}",
        second.mean_secs,
        first.mean_secs
    );
}

/// Random secrets are recovered exactly at least 95% of the time.
#[test]
#[serial]
fn recovers_random_secrets() {
    let config = leaky_config();
    let runs = 20;
    let mut exact = 0;

    for _ in 0..runs {
        let secret = generate_secret(config.secret_len);
        let mut target = Target::new(
            &secret,
            VariableTimeComparator::new(config.per_byte_delay, config.delay_mode),
        );
        let recovery =
            TimingAttack::with_config(config.clone()).recover(&mut target, secret.len());
        if recovery.score(&secret).exact {
            exact += 1;
        }
    }

    assert!(
        exact * 100 >= runs * 95,
        "Should recover nearly every secret, got {}/{}",
        exact,
        runs
    );
}

/// The recovered secret grows by one byte per position.
#[test]
#[serial]
fn recovered_prefix_grows_monotonically() {
    let config = Config::quick().with_secret_len(3).with_trials(1);
    let secret = [0x10u8, 0x20, 0x30];
    let mut target = Target::new(
        &secret,
        VariableTimeComparator::new(config.per_byte_delay, config.delay_mode),
    );
    let mut committed = Vec::new();

    let recovery = TimingAttack::with_config(config).recover_with(&mut target, 3, |record| {
        assert_eq!(record.position, committed.len());
        committed.push(record.byte);
    });

    assert_eq!(committed, recovery.secret);
    assert_eq!(recovery.secret.len(), 3);
}
