//! `wh` shorthand expansion
//!
//! `wh=<width>x<height>` sets both axes at once. A non-zero component
//! overrides any `w`/`h` already present; a zero component leaves that axis
//! alone. The `wh` key itself never reaches the query string.

use crate::constants::{HEIGHT_PARAM, WH_PARAM, WIDTH_PARAM};

use super::ParameterSet;

/// Expand the `wh` pseudo-parameter into `w` and `h`
///
/// Malformed values (missing `x`, non-numeric or negative components) are
/// dropped with a warning and `w`/`h` are left untouched.
pub fn normalize(mut params: ParameterSet) -> ParameterSet {
    let Some(wh) = params.remove(WH_PARAM) else {
        return params;
    };

    if wh.is_falsy() {
        return params;
    }

    let raw = wh.to_string();
    match parse_wh(&raw) {
        Some((width, height)) => {
            if width != 0 {
                params.insert(WIDTH_PARAM, width);
            }
            if height != 0 {
                params.insert(HEIGHT_PARAM, height);
            }
        }
        None => {
            tracing::warn!(wh = %raw, "Ignoring malformed wh parameter");
        }
    }

    params
}

fn parse_wh(raw: &str) -> Option<(u32, u32)> {
    let (width, height) = raw.split_once('x')?;
    let width = width.trim().parse::<u32>().ok()?;
    let height = height.trim().parse::<u32>().ok()?;
    Some((width, height))
}
