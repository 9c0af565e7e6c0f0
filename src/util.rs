use std::time::Instant;

/// Time a statement and log the elapsed milliseconds.
/// ```
/// # use growth_image::profile;
/// profile!("sum", {
///   let _: u64 = (0..1000u64).sum();
/// });
/// ```
#[macro_export]
macro_rules! profile(
  ($title: literal, $stmt: stmt) => {{
    let t0 = std::time::Instant::now();
    $stmt
    $crate::util::report($title, t0);
  }}
);

#[doc(hidden)]
pub fn report(title: &str, t0: Instant) {
  log::info!("{} profile: {}ms", title, t0.elapsed().as_millis());
}
