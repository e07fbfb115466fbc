use std::time::Instant;

///
/// measure time in milli-seconds (ms) of closure.
///
pub fn timer<F, T>(f: F) -> (T, u128)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let ret = f();
    let duration = start.elapsed();
    (ret, duration.as_millis())
}

///
/// get strings with repeated n-times space (' ').
/// used as an indent of the recursion logs.
///
pub fn spaces(n: usize) -> String {
    " ".repeat(n)
}

///
/// get treebipart/resources directory
///
pub fn resource_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources")
}

//
// tests
//
