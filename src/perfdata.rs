//! Nagios performance data, appended after `|` when requested.

use crate::report::TubeResult;

/// The purpose of ToPerfString is only so one can define custom representations of custom types
/// without using the ToString trait so we don't interfere with that.
pub trait ToPerfString {
    fn to_perf_string(&self) -> String;
}

impl_to_perf_string_on_to_string!(u64);

impl<T> ToPerfString for Option<T>
where
    T: ToPerfString,
{
    fn to_perf_string(&self) -> String {
        match self {
            Some(s) => s.to_perf_string(),
            None => String::new(),
        }
    }
}

/// Escapes a tube name so it can be used as a perfdata label.
pub fn perf_label(name: &str) -> String {
    // replace `=`
    let name = name.replace('=', "_");

    // quote `'`
    let name = name.replace('\'', "''");

    // quote if contains spaces
    if name.contains(' ') {
        format!("'{}'", name)
    } else {
        name
    }
}

impl ToPerfString for TubeResult {
    fn to_perf_string(&self) -> String {
        metric_string!(
            perf_label(&self.name),
            self.ready,
            Some(self.thresholds.warn()),
            Some(self.thresholds.crit()),
            Some(0u64)
        )
    }
}
