//! Legacy JSON animation format
//!
//! The predecessor format stores everything in one JSON document: Base64
//! images, sparse per-frame sound and pitch maps, and layers as raw arrays.
//! This module holds the typed form of that document and the pure mapping
//! into [`AnimationMetadata`]. Image handling lives with the pixel codec.

use crate::format::constants::object::{MAX_OPACITY, MIN_TUPLE_LEN, TUPLE_LEN};
use crate::format::constants::MAX_FRAME_COUNT;
use crate::model::{AnimatedObject, AnimationMetadata, Frame, Sound};
use crate::validation::value::{check_integral, join_index, join_key};
use crate::{AnimError, Result};
use hashbrown::HashMap;

/// Root path used for legacy field paths
pub const LEGACY_PATH: &str = "legacy";

/// Sound effect assignment in a legacy file
#[derive(Debug, Clone, PartialEq)]
pub enum LegacySound {
    /// One sound name, played on frame 0 only
    Global(String),
    /// Sparse frame index to sound name mapping
    PerFrame(HashMap<u32, String>),
}

/// One raw layer tuple: `[index, x, y, scale, opacity, mirror?, rotate?]`
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyLayer(pub Vec<f64>);

/// Parsed and type-checked legacy document
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyAnimateFile {
    pub ratio: f64,
    pub se: Option<LegacySound>,
    /// Sparse frame index to pitch mapping, only read where `se` has an entry
    pub pitch: HashMap<u32, f64>,
    /// Base64 or data-URI images; empty strings mark unused slots
    pub bitmaps: Vec<String>,
    pub frame_max: u32,
    /// Layers per frame; `None` where the source had no entry
    pub frames: Vec<Option<Vec<LegacyLayer>>>,
}

/// Map a 5 to 7 element layer tuple to an animated object
///
/// Absent mirror and rotate default to 0.
pub fn convert_frame_layer(layer: &LegacyLayer, path: &str) -> Result<AnimatedObject> {
    let items = &layer.0;
    if !(MIN_TUPLE_LEN..=TUPLE_LEN).contains(&items.len()) {
        return Err(AnimError::InvalidArrayLength {
            field_path: path.to_string(),
            expected: format!("{MIN_TUPLE_LEN} to {TUPLE_LEN}"),
            actual: items.len(),
        });
    }

    let index = check_integral(items[0], &join_key(path, "index"), 0, u64::from(u32::MAX))?;
    let opacity = check_integral(items[4], &join_key(path, "opacity"), 0, u64::from(MAX_OPACITY))?;
    let mirror = match items.get(5) {
        Some(&value) => check_integral(value, &join_key(path, "mirror"), 0, 1)? == 1,
        None => false,
    };

    Ok(AnimatedObject {
        index: index as u32,
        x: items[1],
        y: items[2],
        scale: items[3],
        opacity: opacity as u8,
        mirror,
        rotate: items.get(6).copied().unwrap_or(0.0),
    })
}

/// Sounds for one frame
///
/// A global sound applies to frame 0 only. A per-frame map yields a sound
/// where it has an entry, with pitch attached when the pitch map has an entry
/// for the same frame.
pub fn convert_sound_data(legacy: &LegacyAnimateFile, frame_index: u32) -> Option<Vec<Sound>> {
    match legacy.se.as_ref()? {
        LegacySound::Global(name) => (frame_index == 0).then(|| vec![Sound::named(name.clone())]),
        LegacySound::PerFrame(names) => {
            let name = names.get(&frame_index)?;
            Some(vec![Sound {
                name: name.clone(),
                volume: None,
                pitch: legacy.pitch.get(&frame_index).copied(),
            }])
        }
    }
}

/// Build the metadata for frames `0..frame_max`
///
/// A frame whose layer list is absent or empty gets `objects: None`.
pub fn convert_metadata(legacy: &LegacyAnimateFile) -> Result<AnimationMetadata> {
    if legacy.frame_max > MAX_FRAME_COUNT {
        return Err(AnimError::out_of_range(
            join_key(LEGACY_PATH, "frame_max"),
            format!("must be <= {MAX_FRAME_COUNT}"),
        ));
    }

    let frames_path = join_key(LEGACY_PATH, "frames");
    let mut frames = Vec::new();

    for i in 0..legacy.frame_max {
        let frame_path = join_index(&frames_path, i as usize);
        let objects = match legacy.frames.get(i as usize) {
            Some(Some(layers)) if !layers.is_empty() => Some(
                layers
                    .iter()
                    .enumerate()
                    .map(|(j, layer)| convert_frame_layer(layer, &join_index(&frame_path, j)))
                    .collect::<Result<Vec<_>>>()?,
            ),
            _ => None,
        };

        frames.push(Frame {
            sound: convert_sound_data(legacy, i),
            objects,
        });
    }

    Ok(AnimationMetadata {
        ratio: legacy.ratio,
        frames,
    })
}

/// Bitmaps that carry image data, in their original order
pub fn non_empty_bitmaps(legacy: &LegacyAnimateFile) -> Vec<&str> {
    legacy
        .bitmaps
        .iter()
        .map(String::as_str)
        .filter(|bitmap| !bitmap.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;

    fn legacy_with(se: Option<LegacySound>, frame_max: u32) -> LegacyAnimateFile {
        LegacyAnimateFile {
            ratio: 1.0,
            se,
            pitch: HashMap::new(),
            bitmaps: vec!["".to_string(), "AAAA".to_string()],
            frame_max,
            frames: vec![],
        }
    }

    #[test]
    fn test_convert_frame_layer() {
        let layer = LegacyLayer(vec![1.0, 5.0, 6.0, 100.0, 128.0]);
        let object = convert_frame_layer(&layer, "l").unwrap();
        assert_eq!(object, AnimatedObject::new(1, 5.0, 6.0, 100.0, 128));

        let layer = LegacyLayer(vec![1.0, 5.0, 6.0, 100.0, 128.0, 1.0, 30.0]);
        let object = convert_frame_layer(&layer, "l").unwrap();
        assert!(object.mirror);
        assert_eq!(object.rotate, 30.0);

        let err = convert_frame_layer(&LegacyLayer(vec![1.0; 4]), "l").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArrayLength);

        let layer = LegacyLayer(vec![1.0, 5.0, 6.0, 100.0, 400.0]);
        let err = convert_frame_layer(&layer, "l").unwrap_err();
        assert_eq!(err.field_path(), Some("l.opacity"));
    }

    #[test]
    fn test_global_sound_only_on_first_frame() {
        let legacy = legacy_with(Some(LegacySound::Global("hit.mp3".to_string())), 3);
        let meta = convert_metadata(&legacy).unwrap();

        assert_eq!(meta.frames.len(), 3);
        assert_eq!(meta.frames[0].sound, Some(vec![Sound::named("hit.mp3")]));
        assert_eq!(meta.frames[1].sound, None);
        assert_eq!(meta.frames[2].sound, None);
    }

    #[test]
    fn test_sparse_sound_with_pitch() {
        let mut names = HashMap::new();
        names.insert(2, "x.mp3".to_string());
        let mut legacy = legacy_with(Some(LegacySound::PerFrame(names)), 4);
        legacy.pitch.insert(2, 1.5);
        // Pitch without a matching sound is ignored
        legacy.pitch.insert(3, 0.5);

        let meta = convert_metadata(&legacy).unwrap();
        for (i, frame) in meta.frames.iter().enumerate() {
            if i == 2 {
                assert_eq!(
                    frame.sound,
                    Some(vec![Sound {
                        name: "x.mp3".to_string(),
                        volume: None,
                        pitch: Some(1.5)
                    }])
                );
            } else {
                assert_eq!(frame.sound, None);
            }
        }
    }

    #[test]
    fn test_empty_layers_convert_to_absent_objects() {
        let mut legacy = legacy_with(None, 3);
        legacy.frames = vec![
            Some(vec![]),
            Some(vec![LegacyLayer(vec![0.0, 0.0, 0.0, 100.0, 255.0])]),
        ];

        let meta = convert_metadata(&legacy).unwrap();
        assert_eq!(meta.frames[0].objects, None);
        assert_eq!(meta.frames[1].objects.as_ref().map(Vec::len), Some(1));
        // frame_max reaches past the frames array
        assert!(meta.frames[2].is_empty());
    }

    #[test]
    fn test_layer_error_path() {
        let mut legacy = legacy_with(None, 1);
        legacy.frames = vec![Some(vec![LegacyLayer(vec![-1.0, 0.0, 0.0, 100.0, 255.0])])];

        let err = convert_metadata(&legacy).unwrap_err();
        assert_eq!(err.field_path(), Some("legacy.frames[0][0].index"));
    }

    #[test]
    fn test_oversized_frame_max_rejected_before_building() {
        let legacy = legacy_with(None, u32::MAX);
        let err = convert_metadata(&legacy).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutOfRange);
        assert_eq!(err.field_path(), Some("legacy.frame_max"));
    }

    #[test]
    fn test_non_empty_bitmaps() {
        let legacy = legacy_with(None, 0);
        assert_eq!(non_empty_bitmaps(&legacy), ["AAAA"]);
    }
}
