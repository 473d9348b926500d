use super::*;

#[test]
fn test_format_f64_6() {
    assert_eq!(format_f64_6(0.5), "0.500000");
    assert_eq!(format_f64_6(2.0 / 3.0), "0.666667");
}

#[test]
fn test_bin_range_closes_last_bin() {
    let edges = [0.0, 1.0, 2.0];
    assert_eq!(bin_range(&edges, 0), "[0.000, 1.000)");
    assert_eq!(bin_range(&edges, 1), "[1.000, 2.000]");
}
