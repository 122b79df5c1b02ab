/// Check whether two floats differ by at most 5e-5 times the magnitude of the smaller one.
#[macro_export]
macro_rules! assert_floats_near_equal {
    ($expected:expr, $actual:expr, $msg:expr) => {{
        let a: f64 = $expected;
        let b: f64 = $actual;
        let smaller = a.abs().min(b.abs());
        assert!((a - b).abs() <= 0.00005 * smaller, "{}: expected {}, got {}", $msg, a, b);
    }};
}
