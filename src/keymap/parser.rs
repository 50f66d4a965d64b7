//! Shortcut string parsing
//!
//! Turns `"defmod-shift-s"` style strings into a [`KeyCombination`]. The
//! parser is permissive: it never fails, and odd input yields a combination
//! that simply never matches a real event.

use super::platform::{Platform, DEFMOD};
use super::types::{KeyCombination, Modifiers};

/// Split a combo string on `-`, keeping a trailing `-` key intact
///
/// `"ctrl--"` splits into `["ctrl", "-"]` and `"-"` stays `["-"]`.
pub(crate) fn split_combo(spec: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;

    for (idx, _) in spec.match_indices('-') {
        // A hyphen in final position is the key, not a separator
        if idx + 1 == spec.len() {
            break;
        }
        segments.push(&spec[start..idx]);
        start = idx + 1;
    }

    segments.push(&spec[start..]);
    segments
}

/// Parse a shortcut string into its canonical combination
///
/// Every segment but the last is a modifier; `defmod` resolves to `cmd` or
/// `ctrl` for `platform` right here, so the result is platform-fixed.
pub fn parse_combination(spec: &str, platform: Platform) -> KeyCombination {
    let mut segments = split_combo(spec);
    let key = segments.pop().unwrap_or_default();

    let mut mods = Modifiers::NONE;
    for segment in segments {
        let lowered = segment.to_lowercase();
        let token = if lowered == DEFMOD {
            platform.default_modifier()
        } else {
            lowered.as_str()
        };

        match Modifiers::from_token(token) {
            Some(modifier) => mods |= modifier,
            None => {
                tracing::debug!("Unknown modifier {:?} in shortcut {:?}", segment, spec);
                mods |= Modifiers::UNKNOWN;
            }
        }
    }

    KeyCombination::new(mods, key)
}
