pub mod parser;
pub mod probe;
pub mod result;
pub mod view;

pub mod prelude {
    pub use super::parser::ParseError;
    pub use super::probe::collect_target;
    pub use super::result::{Cluster, ProbeResult};
    pub use super::view::ResultView;
}

use std::fmt::Write;

/// Renders an error together with its chain of sources.
pub fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, "\n\nCaused by: {}", src);
        err = src;
    }
    s
}
