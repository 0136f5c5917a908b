use ntk_ball::{Acb, Arb};
use ntk_ca::{check_equal, Ca, Truth};
use proptest::prelude::*;

fn ratio(num: i64, den: i64) -> Ca {
    Ca::from_ratio(num, den).unwrap()
}

#[test]
fn rationals_compare_exactly() {
    assert_eq!(check_equal(&ratio(2, 4), &ratio(1, 2)), Truth::True);
    assert_eq!(check_equal(&Ca::from_int(3), &ratio(9, 3)), Truth::True);
    assert_eq!(check_equal(&Ca::from_int(1), &Ca::from_int(2)), Truth::False);
}

#[test]
fn rationals_closer_than_a_double_are_still_distinguished() {
    let a = ratio(1, 3);
    let big = num_bigint::BigInt::from(10).pow(40);
    let b = Ca::from_ratio(&big + 1, 3 * big).unwrap();
    assert_eq!(check_equal(&a, &b), Truth::False);
}

#[test]
fn zero_denominator_is_rejected() {
    let err = Ca::from_ratio(1, 0).unwrap_err();
    assert_eq!(err.code(), "zero-denominator");
}

#[test]
fn disjoint_enclosures_are_unequal() {
    let x = Ca::Enclosure(Acb::new(Arb::new(1.0, 0.1), Arb::zero()));
    let y = Ca::from_int(2);
    assert_eq!(check_equal(&x, &y), Truth::False);
    assert_eq!(check_equal(&y, &x), Truth::False);
}

#[test]
fn overlapping_enclosures_are_undecided() {
    let x = Ca::Enclosure(Acb::new(Arb::new(1.0, 0.5), Arb::zero()));
    assert_eq!(check_equal(&x, &Ca::from_int(1)), Truth::Unknown);
    assert_eq!(check_equal(&x, &x), Truth::Unknown);
}

#[test]
fn exact_enclosures_are_never_proven_equal() {
    let x = Ca::Enclosure(Acb::from_f64s(0.5, 0.0));
    assert_eq!(check_equal(&x, &ratio(1, 2)), Truth::Unknown);
}

#[test]
fn imaginary_part_separates() {
    let x = Ca::from_enclosure(Acb::from_f64s(1.0, 1.0));
    assert_eq!(check_equal(&x, &Ca::from_int(1)), Truth::False);
}

#[test]
fn truth_logic() {
    assert_eq!(Truth::Unknown.not(), Truth::Unknown);
    assert_eq!(Truth::True.and(Truth::Unknown), Truth::Unknown);
    assert_eq!(Truth::False.and(Truth::Unknown), Truth::False);
    assert!(Truth::from_bool(true).is_true());
    assert!(Truth::from_bool(false).is_false());
}

#[test]
fn numbers_survive_json() {
    let x = ratio(-7, 12);
    let text = serde_json::to_string(&x).unwrap();
    let back: Ca = serde_json::from_str(&text).unwrap();
    assert_eq!(back, x);
    assert_eq!(serde_json::to_string(&Truth::Unknown).unwrap(), "\"unknown\"");
}

proptest! {
    #[test]
    fn rational_equality_matches_cross_multiplication(
        a in -1000i64..1000, b in 1i64..1000, c in -1000i64..1000, d in 1i64..1000,
    ) {
        let expected = Truth::from_bool(a * d == b * c);
        prop_assert_eq!(check_equal(&ratio(a, b), &ratio(c, d)), expected);
    }

    #[test]
    fn enclosures_contain_the_rational(a in -1_000_000i64..1_000_000, b in 1i64..1_000_000) {
        let x = ratio(a, b);
        let ball = x.enclosure();
        prop_assert!(ball.is_finite());
        prop_assert!(ball.imag().is_zero());
        prop_assert!(ball.real().rad() <= 1e-15 * ball.real().mid().abs().max(1.0));
        let other = Ca::Enclosure(ball);
        prop_assert_ne!(check_equal(&x, &other), Truth::False);
    }
}
