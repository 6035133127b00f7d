//! Non-failing validation for batch and advisory use
//!
//! These checks never abort; each failing component or frame contributes
//! one line to the report.

use super::legacy::validate_legacy;
use super::metadata::{validate_frame, validate_ratio, META_PATH};
use super::sprite::validate_sprite_info;
use super::value::{join_index, join_key};
use crate::format::SpriteInfo;
use crate::model::AnimationMetadata;
use crate::Result;
use serde::Serialize;
use serde_json::Value;

/// Outcome of a non-failing validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Record a check outcome, keeping its diagnostic line on failure
    pub fn record<T>(&mut self, outcome: Result<T>) {
        if let Err(err) = outcome {
            self.valid = false;
            self.errors.push(err.diagnostic());
        }
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: ValidationReport) {
        self.valid &= other.valid;
        self.errors.extend(other.errors);
    }
}

/// Check the ratio and every frame independently
pub fn check_metadata(meta: &AnimationMetadata) -> ValidationReport {
    let mut report = ValidationReport::new();
    report.record(validate_ratio(meta.ratio, &join_key(META_PATH, "ratio")));

    let frames_path = join_key(META_PATH, "frame");
    for (i, frame) in meta.frames.iter().enumerate() {
        report.record(validate_frame(frame, &join_index(&frames_path, i)));
    }
    report
}

pub fn check_sprite_info(info: &SpriteInfo) -> ValidationReport {
    let mut report = ValidationReport::new();
    report.record(validate_sprite_info(info));
    report
}

/// Check a legacy document without converting it
pub fn check_legacy(value: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();
    report.record(validate_legacy(value));
    report
}

/// Check everything `encode` would check, reporting instead of failing
pub fn check_bundle(
    meta: Option<&AnimationMetadata>,
    sprite_info: Option<&SpriteInfo>,
    pixel_payload: Option<&[u8]>,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    report.record(super::require_encode_inputs(meta, sprite_info, pixel_payload));

    if let Some(meta) = meta {
        report.merge(check_metadata(meta));
    }
    if let Some(info) = sprite_info {
        report.merge(check_sprite_info(info));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnimatedObject, Frame, Sound};

    fn metadata() -> AnimationMetadata {
        AnimationMetadata {
            ratio: 1.0,
            frames: vec![
                Frame {
                    sound: Some(vec![Sound::named("")]),
                    objects: None,
                },
                Frame::empty(),
                Frame {
                    sound: None,
                    objects: Some(vec![AnimatedObject::new(0, f64::INFINITY, 0.0, 100.0, 255)]),
                },
            ],
        }
    }

    #[test]
    fn test_report_collects_every_failing_frame() {
        let report = check_metadata(&metadata());
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("meta.frame[0].sound[0].name"));
        assert!(report.errors[1].contains("meta.frame[2].objects[0].x"));
    }

    #[test]
    fn test_valid_report() {
        let report = check_sprite_info(&SpriteInfo::single(4, 4));
        assert_eq!(report, ValidationReport::new());
    }

    #[test]
    fn test_bundle_report() {
        let report = check_bundle(None, Some(&SpriteInfo::single(0, 4)), None);
        assert!(!report.valid);
        assert!(report.errors[0].contains("missing: meta, pixelPayload"));
        assert!(report.errors[1].contains("spriteInfo.dimensions[0].width"));
    }

    #[test]
    fn test_legacy_report() {
        let report = check_legacy(&serde_json::json!({"ratio": 1}));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
    }
}
