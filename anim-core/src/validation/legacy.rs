//! Legacy document validation
//!
//! The legacy JSON is parsed into an untyped tree first and only becomes a
//! [`LegacyAnimateFile`] after every field below has been checked.

use super::metadata::validate_ratio;
use super::value::{
    expect_array, expect_integer_in, expect_number, expect_object, expect_string, join_index,
    join_key, optional_field, require_fields, type_name,
};
use crate::format::constants::MAX_FRAME_COUNT;
use crate::legacy::{LegacyAnimateFile, LegacyLayer, LegacySound, LEGACY_PATH};
use crate::{AnimError, Result};
use hashbrown::HashMap;
use serde_json::Value;

/// Fields every legacy document must carry
pub const REQUIRED_LEGACY_FIELDS: [&str; 4] = ["ratio", "bitmaps", "frame_max", "frames"];

/// Parse legacy JSON text, keeping the raw parse failure
pub fn parse_legacy_value(json_text: &str) -> Result<Value> {
    serde_json::from_str(json_text).map_err(|err| AnimError::JsonParse {
        message: err.to_string(),
        line: err.line(),
        column: err.column(),
    })
}

/// Parse and validate legacy JSON text
///
/// Text that is not JSON fails with `ConversionFailed`; a well-formed
/// document with bad fields fails with the validator's error.
pub fn parse_legacy(json_text: &str) -> Result<LegacyAnimateFile> {
    let value = parse_legacy_value(json_text)
        .map_err(|err| AnimError::conversion(format!("legacy file is not valid JSON: {err}")))?;
    validate_legacy(&value)
}

/// Check presence and type of every legacy field and build the typed document
///
/// All absent required fields are reported in one `MissingField` error.
pub fn validate_legacy(value: &Value) -> Result<LegacyAnimateFile> {
    let object = expect_object(value, LEGACY_PATH)?;
    let [ratio, bitmaps, frame_max, frames] = require_fields(object, REQUIRED_LEGACY_FIELDS, "")?;

    let ratio_path = join_key(LEGACY_PATH, "ratio");
    let ratio = expect_number(ratio, &ratio_path)?;
    validate_ratio(ratio, &ratio_path)?;

    let bitmaps_path = join_key(LEGACY_PATH, "bitmaps");
    let bitmaps = expect_array(bitmaps, &bitmaps_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| expect_string(item, &join_index(&bitmaps_path, i)).map(str::to_string))
        .collect::<Result<Vec<_>>>()?;

    let frame_max = expect_integer_in(
        frame_max,
        &join_key(LEGACY_PATH, "frame_max"),
        0,
        u64::from(MAX_FRAME_COUNT),
    )? as u32;

    let frames_path = join_key(LEGACY_PATH, "frames");
    let frames = expect_array(frames, &frames_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| parse_frame_layers(item, &join_index(&frames_path, i)))
        .collect::<Result<Vec<_>>>()?;

    let se = optional_field(object, "se")
        .map(|v| parse_sound(v, &join_key(LEGACY_PATH, "se")))
        .transpose()?
        .flatten();

    let pitch = match optional_field(object, "pitch") {
        Some(v) => {
            let pitch_path = join_key(LEGACY_PATH, "pitch");
            sparse_entries(v, &pitch_path)?
                .into_iter()
                .map(|(frame, item, path)| Ok((frame, expect_number(item, &path)?)))
                .collect::<Result<HashMap<_, _>>>()?
        }
        None => HashMap::new(),
    };

    Ok(LegacyAnimateFile {
        ratio,
        se,
        pitch,
        bitmaps,
        frame_max,
        frames,
    })
}

fn parse_frame_layers(value: &Value, path: &str) -> Result<Option<Vec<LegacyLayer>>> {
    if value.is_null() {
        return Ok(None);
    }

    let layers = expect_array(value, path)?
        .iter()
        .enumerate()
        .map(|(j, layer)| {
            let layer_path = join_index(path, j);
            let numbers = expect_array(layer, &layer_path)?
                .iter()
                .enumerate()
                .map(|(k, n)| expect_number(n, &join_index(&layer_path, k)))
                .collect::<Result<Vec<_>>>()?;
            Ok(LegacyLayer(numbers))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(layers))
}

/// `se` is either one name or a sparse map; an empty name counts as no sound
fn parse_sound(value: &Value, path: &str) -> Result<Option<LegacySound>> {
    if let Value::String(name) = value {
        return Ok((!name.is_empty()).then(|| LegacySound::Global(name.clone())));
    }

    let names = sparse_entries(value, path)?
        .into_iter()
        .map(|(frame, item, item_path)| Ok((frame, expect_string(item, &item_path)?.to_string())))
        .filter(|entry| !matches!(entry, Ok((_, name)) if name.is_empty()))
        .collect::<Result<HashMap<_, _>>>()?;

    Ok(Some(LegacySound::PerFrame(names)))
}

/// Entries of a sparse frame map, skipping nulls
///
/// Accepts an object keyed by frame index or an array where unused frames
/// hold `null`, which is how sparse arrays come out of JSON serializers.
fn sparse_entries<'v>(value: &'v Value, path: &str) -> Result<Vec<(u32, &'v Value, String)>> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter(|(_, item)| !item.is_null())
            .map(|(key, item)| {
                let item_path = join_key(path, key);
                let frame = key.parse::<u32>().map_err(|_| {
                    AnimError::out_of_range(&item_path, "key must be a non-negative frame index")
                })?;
                Ok((frame, item, item_path))
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_null())
            .map(|(i, item)| {
                let frame = u32::try_from(i).map_err(|_| {
                    AnimError::out_of_range(join_index(path, i), "frame index exceeds u32")
                })?;
                Ok((frame, item, join_index(path, i)))
            })
            .collect(),
        other => Err(AnimError::type_mismatch(path, "object", type_name(other))),
    }
}
