mod arbitrary;
mod directives;
mod property_format;

/// Iterations for quickcheck properties: more on CI, few under miri.
pub(crate) fn quickcheck_tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}
