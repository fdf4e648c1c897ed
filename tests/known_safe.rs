//! Tests that the attack gains nothing against the constant-time comparator.

use serial_test::serial;

use compare_oracle::{generate_secret, Config, ConstantTimeComparator, Target, TimingAttack};

/// Exact recovery never happens, and per-byte accuracy stays near chance.
#[test]
#[serial]
fn no_recovery_against_constant_time() {
    let config = Config::quick().with_secret_len(4);
    let runs = 20;
    let mut exact = 0;
    let mut correct_bytes = 0;

    for _ in 0..runs {
        let secret = generate_secret(config.secret_len);
        let mut target = Target::new(&secret, ConstantTimeComparator);
        let recovery =
            TimingAttack::with_config(config.clone()).recover(&mut target, secret.len());

        let score = recovery.score(&secret);
        if score.exact {
            exact += 1;
        }
        correct_bytes += score.correct_bytes;
    }

    let total_bytes = runs * config.secret_len;
    assert_eq!(exact, 0, "constant-time comparison leaked a whole secret");
    // Chance is 1/256 per byte; allow generous slack for timer noise.
    assert!(
        correct_bytes * 10 <= total_bytes,
        "Should be near chance, got {}/{} bytes",
        correct_bytes,
        total_bytes
    );
}

/// Constant-time margins stay far below the per-byte delay the variable-time
/// comparator would add.
#[test]
#[serial]
fn constant_time_margins_carry_no_delay() {
    let config = Config::quick().with_secret_len(2);
    let secret = generate_secret(2);
    let mut target = Target::new(&secret, ConstantTimeComparator);

    let recovery = TimingAttack::with_config(config.clone()).recover(&mut target, 2);

    let delay = config.per_byte_delay.as_secs_f64();
    let small = recovery
        .log
        .iter()
        .filter(|record| record.margin() < delay)
        .count();
    // A single preempted sample can inflate one margin; not both.
    let margins: Vec<f64> = recovery.log.iter().map(|r| r.margin()).collect();
    assert!(small >= 1, "margins: {:?}", margins);
}
