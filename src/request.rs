use crate::{
    Character, PortraitRequest, RequestError, DEFAULT_LEVEL, MAX_GEAR_LEVEL, MAX_LEVEL,
    MAX_RELIC_LEVEL,
};

/// Decoded query pairs. Lookups return the first occurrence of a key.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl QueryParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `None` when the key is absent or empty, otherwise the parsed integer.
    fn int(&self, key: &'static str) -> Result<Option<i64>, RequestError> {
        match self.get(key) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| RequestError::NotAnInteger {
                    key,
                    value: raw.to_string(),
                }),
        }
    }

    /// Absent, empty, and unparsable values all read as zero.
    fn lenient_int(&self, key: &'static str) -> i64 {
        self.int(key).ok().flatten().unwrap_or(0)
    }
}

fn in_range(value: i64, min: u32, max: u32) -> Option<u32> {
    (value >= min as i64 && value <= max as i64).then_some(value as u32)
}

impl PortraitRequest {
    /// Validate the query, checking parameters in a fixed order and stopping
    /// at the first violation.
    pub fn from_query(query: &QueryParams) -> Result<(Self, &'static Character), RequestError> {
        let id = query.get("char").unwrap_or_default();
        let character = Character::lookup(id)
            .ok_or_else(|| RequestError::UnsupportedCharacter(id.to_string()))?;

        let gear_level = query
            .int("gear_level")
            .ok()
            .flatten()
            .and_then(|v| in_range(v, 1, MAX_GEAR_LEVEL))
            .ok_or(RequestError::GearLevelOutOfRange)?;

        // A non-integer relic level reads as 0: ignored below max gear, out of range at it.
        let relic = query.lenient_int("relic_level");
        let relic_level = if gear_level == MAX_GEAR_LEVEL {
            in_range(relic, 1, MAX_RELIC_LEVEL).ok_or(RequestError::RelicLevelOutOfRange)?
        } else if relic != 0 {
            return Err(RequestError::UnexpectedRelicLevel);
        } else {
            0
        };

        let zetas = in_range(query.lenient_int("zetas"), 0, character.max_zetas).ok_or(
            RequestError::ZetasOutOfRange {
                max: character.max_zetas,
                name: character.name,
            },
        )?;

        let omicrons = in_range(query.lenient_int("omicrons"), 0, character.max_omicrons).ok_or(
            RequestError::OmicronsOutOfRange {
                max: character.max_omicrons,
                name: character.name,
            },
        )?;

        let level = match query.int("level")? {
            None => DEFAULT_LEVEL,
            Some(v) => in_range(v, 1, MAX_LEVEL).ok_or(RequestError::LevelOutOfRange)?,
        };

        let request = PortraitRequest {
            character: character.id.to_string(),
            gear_level,
            relic_level,
            zetas,
            omicrons,
            level,
        };
        Ok((request, character))
    }
}
