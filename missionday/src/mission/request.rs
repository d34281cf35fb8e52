use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::countdown::engine::YearlyTarget;
use crate::foundation::error::{MissionError, MissionResult};
use crate::mission::character::{DEFAULT_CHARACTER, find_character};

/// Path prefix of a shareable mission link.
pub const MISSION_PREFIX: &str = "/mission";

/// Bytes left unescaped in a link segment, matching JavaScript's `encodeURIComponent`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Raw form input, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MissionForm {
    /// Recipient name.
    pub name: String,
    /// Day of month, as typed.
    pub day: String,
    /// Month, as typed.
    pub month: String,
    /// Selected character id.
    pub character: String,
}

/// A validated countdown mission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionRequest {
    /// Recipient name, trimmed.
    pub name: String,
    /// Birthday.
    pub target: YearlyTarget,
    /// Character id; unknown ids are kept and resolved to the default at display time.
    pub character: String,
}

impl MissionForm {
    /// Validate in form order, failing with the first user-facing message.
    pub fn validate(&self) -> MissionResult<MissionRequest> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(MissionError::validation("TARGET NAME IS REQUIRED!"));
        }
        if name.contains('/') {
            return Err(MissionError::validation("TARGET NAME CANNOT CONTAIN '/'!"));
        }
        if self.day.trim().is_empty() {
            return Err(MissionError::validation("MISSING DAY PARAMETER (DD)!"));
        }
        if self.month.trim().is_empty() {
            return Err(MissionError::validation("MISSING MONTH PARAMETER (MM)!"));
        }

        let day = parse_in_range(&self.day, 1, 31)
            .ok_or_else(|| MissionError::validation("INVALID DAY! (1-31)"))?;
        let month = parse_in_range(&self.month, 1, 12)
            .ok_or_else(|| MissionError::validation("INVALID MONTH! (1-12)"))?;

        let character = match self.character.trim() {
            "" => DEFAULT_CHARACTER.to_owned(),
            id => id.to_owned(),
        };

        Ok(MissionRequest {
            name: name.to_owned(),
            target: YearlyTarget::new(day, month)?,
            character,
        })
    }
}

impl MissionRequest {
    /// Shareable path: `/mission/{name}/{day}/{month}/{character}`, name and character
    /// percent-encoded.
    pub fn to_path(&self) -> String {
        format!(
            "{MISSION_PREFIX}/{}/{}/{}/{}",
            utf8_percent_encode(&self.name, SEGMENT),
            self.target.day(),
            self.target.month(),
            utf8_percent_encode(&self.character, SEGMENT)
        )
    }

    /// Parse a mission path. The character segment is optional, as in older links.
    pub fn from_path(path: &str) -> MissionResult<Self> {
        let rest = path
            .strip_prefix(MISSION_PREFIX)
            .and_then(|r| r.strip_prefix('/'))
            .ok_or_else(|| MissionError::validation(format!("not a mission path: '{path}'")))?;
        let segments: Vec<&str> = rest.trim_end_matches('/').split('/').collect();
        let (name, day, month, character) = match segments.as_slice() {
            [name, day, month] => (*name, *day, *month, ""),
            [name, day, month, character] => (*name, *day, *month, *character),
            _ => {
                return Err(MissionError::validation(format!(
                    "mission path needs name/day/month[/character]: '{path}'"
                )));
            }
        };
        MissionForm {
            name: decode_segment(name)?,
            day: day.to_owned(),
            month: month.to_owned(),
            character: decode_segment(character)?,
        }
        .validate()
    }

    /// Return `true` when the character id is one this build knows.
    pub fn has_known_character(&self) -> bool {
        find_character(&self.character).is_some()
    }
}

fn decode_segment(raw: &str) -> MissionResult<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| MissionError::validation(format!("link segment '{raw}' is not UTF-8: {e}")))
}

fn parse_in_range(raw: &str, min: u32, max: u32) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|v| (min..=max).contains(v))
}

#[cfg(test)]
#[path = "../../tests/unit/mission/request.rs"]
mod tests;
