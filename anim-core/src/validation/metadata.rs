//! Animation metadata validation
//!
//! Two directions are covered here. `*_from_value` functions turn an
//! untrusted JSON tree into typed values, failing on the first violation
//! with its field path. `validate_*` functions check typed values before
//! they are written.

use super::value::{
    expect_array, expect_integer_in, expect_number, expect_object, expect_string, expect_u32,
    join_index, join_key, optional_field, require_fields, type_name,
};
use crate::format::constants::object::{MAX_OPACITY, MIN_TUPLE_LEN, TUPLE_LEN};
use crate::model::{AnimatedObject, AnimationMetadata, Frame, Sound};
use crate::{AnimError, Result};
use serde_json::Value;

/// Root path used for metadata field paths
pub const META_PATH: &str = "meta";

/// Build an animated object from its compact array form
///
/// Accepts 5 to 7 elements; absent mirror and rotate default to 0.
pub fn animated_object_from_value(value: &Value, path: &str) -> Result<AnimatedObject> {
    let items = expect_array(value, path)?;
    animated_object_from_slice(items, path)
}

/// Build an animated object from already-split tuple elements
pub fn animated_object_from_slice(items: &[Value], path: &str) -> Result<AnimatedObject> {
    if !(MIN_TUPLE_LEN..=TUPLE_LEN).contains(&items.len()) {
        return Err(AnimError::InvalidArrayLength {
            field_path: path.to_string(),
            expected: format!("{MIN_TUPLE_LEN} to {TUPLE_LEN}"),
            actual: items.len(),
        });
    }

    let index = expect_u32(&items[0], &join_key(path, "index"))?;
    let x = expect_number(&items[1], &join_key(path, "x"))?;
    let y = expect_number(&items[2], &join_key(path, "y"))?;
    let scale = expect_number(&items[3], &join_key(path, "scale"))?;
    let opacity =
        expect_integer_in(&items[4], &join_key(path, "opacity"), 0, u64::from(MAX_OPACITY))?;
    let mirror = match items.get(5) {
        Some(value) => expect_integer_in(value, &join_key(path, "mirror"), 0, 1)? == 1,
        None => false,
    };
    let rotate = match items.get(6) {
        Some(value) => expect_number(value, &join_key(path, "rotate"))?,
        None => 0.0,
    };

    Ok(AnimatedObject {
        index,
        x,
        y,
        scale,
        opacity: opacity as u8,
        mirror,
        rotate,
    })
}

pub fn sound_from_value(value: &Value, path: &str) -> Result<Sound> {
    let object = expect_object(value, path)?;
    let [name] = require_fields(object, ["name"], path)?;

    let name_path = join_key(path, "name");
    let name = expect_string(name, &name_path)?;
    if name.is_empty() {
        return Err(AnimError::out_of_range(name_path, "sound name must not be empty"));
    }

    let volume = optional_field(object, "volume")
        .map(|v| expect_number(v, &join_key(path, "volume")))
        .transpose()?;
    let pitch = optional_field(object, "pitch")
        .map(|v| expect_number(v, &join_key(path, "pitch")))
        .transpose()?;

    Ok(Sound {
        name: name.to_string(),
        volume,
        pitch,
    })
}

pub fn frame_from_value(value: &Value, path: &str) -> Result<Frame> {
    let object = expect_object(value, path)?;

    let sound = match optional_field(object, "sound") {
        Some(value) => {
            let sound_path = join_key(path, "sound");
            let items = expect_array(value, &sound_path)?;
            let sounds = items
                .iter()
                .enumerate()
                .map(|(i, item)| sound_from_value(item, &join_index(&sound_path, i)))
                .collect::<Result<Vec<_>>>()?;
            Some(sounds)
        }
        None => None,
    };

    let objects = match optional_field(object, "objects") {
        Some(value) => {
            let objects_path = join_key(path, "objects");
            let items = expect_array(value, &objects_path)?;
            let objects = items
                .iter()
                .enumerate()
                .map(|(i, item)| animated_object_from_value(item, &join_index(&objects_path, i)))
                .collect::<Result<Vec<_>>>()?;
            Some(objects)
        }
        None => None,
    };

    Ok(Frame { sound, objects })
}

/// Build typed metadata from the parsed JSON block
pub fn metadata_from_value(value: &Value) -> Result<AnimationMetadata> {
    let object = expect_object(value, META_PATH)?;
    let [ratio, frames] = require_fields(object, ["ratio", "frame"], META_PATH)?;

    let ratio_path = join_key(META_PATH, "ratio");
    let ratio = expect_number(ratio, &ratio_path)?;
    validate_ratio(ratio, &ratio_path)?;

    let frames_path = join_key(META_PATH, "frame");
    let frames = expect_array(frames, &frames_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| frame_from_value(item, &join_index(&frames_path, i)))
        .collect::<Result<Vec<_>>>()?;

    Ok(AnimationMetadata { ratio, frames })
}

pub fn validate_ratio(ratio: f64, path: &str) -> Result<()> {
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(AnimError::out_of_range(path, format!("ratio must be > 0, got {ratio}")));
    }
    Ok(())
}

fn check_finite(value: f64, path: String) -> Result<()> {
    if !value.is_finite() {
        return Err(AnimError::out_of_range(path, "number must be finite"));
    }
    Ok(())
}

pub fn validate_animated_object(object: &AnimatedObject, path: &str) -> Result<()> {
    check_finite(object.x, join_key(path, "x"))?;
    check_finite(object.y, join_key(path, "y"))?;
    check_finite(object.scale, join_key(path, "scale"))?;
    check_finite(object.rotate, join_key(path, "rotate"))
}

pub fn validate_sound(sound: &Sound, path: &str) -> Result<()> {
    if sound.name.is_empty() {
        return Err(AnimError::out_of_range(
            join_key(path, "name"),
            "sound name must not be empty",
        ));
    }
    if let Some(volume) = sound.volume {
        check_finite(volume, join_key(path, "volume"))?;
    }
    if let Some(pitch) = sound.pitch {
        check_finite(pitch, join_key(path, "pitch"))?;
    }
    Ok(())
}

pub fn validate_frame(frame: &Frame, path: &str) -> Result<()> {
    if let Some(sounds) = &frame.sound {
        let sound_path = join_key(path, "sound");
        for (i, sound) in sounds.iter().enumerate() {
            validate_sound(sound, &join_index(&sound_path, i))?;
        }
    }
    if let Some(objects) = &frame.objects {
        let objects_path = join_key(path, "objects");
        for (i, object) in objects.iter().enumerate() {
            validate_animated_object(object, &join_index(&objects_path, i))?;
        }
    }
    Ok(())
}

/// Check typed metadata, failing on the first violation
pub fn validate_metadata(meta: &AnimationMetadata) -> Result<()> {
    validate_ratio(meta.ratio, &join_key(META_PATH, "ratio"))?;

    let frames_path = join_key(META_PATH, "frame");
    for (i, frame) in meta.frames.iter().enumerate() {
        validate_frame(frame, &join_index(&frames_path, i))?;
    }
    Ok(())
}

/// Reject a metadata block that is not a JSON object before field checks
pub fn ensure_metadata_object(value: &Value) -> Result<()> {
    if !value.is_object() {
        return Err(AnimError::InvalidMetadata {
            message: format!("metadata must be a JSON object, got {}", type_name(value)),
            position: None,
        });
    }
    Ok(())
}
