mod common;

use anim::{AnimError, AnimationCodec, AnimatedObject, ErrorCode, Frame, Sound, SpriteInfo};
use common::*;
use serde_json::{json, Value};

fn png_animation_codec() -> AnimationCodec<anim::ImageCodec> {
    AnimationCodec::with_codec(png_codec()).with_pack_options(png_options())
}

fn legacy_document() -> Value {
    json!({
        "ratio": 2,
        "se": {"2": "x.mp3"},
        "pitch": {"2": 1.5, "3": 0.5},
        "bitmaps": [
            "",
            data_uri(&solid_png(80, 50, RED)),
            base64(&solid_png(120, 50, GREEN)),
        ],
        "frame_max": 4,
        "frames": [
            [[0, 0, 0, 100, 255]],
            [],
            [[1, 10, 20, 100, 128, 1, 90]],
        ]
    })
}

#[tokio::test]
async fn test_convert_then_decode() {
    let codec = png_animation_codec();
    let bytes = codec.convert_legacy(&legacy_document()).await.unwrap();
    let decoded = codec.decode(&bytes).unwrap();

    // The empty bitmap is dropped before packing
    assert_eq!(decoded.sprite_info, SpriteInfo::single(120, 100));
    assert_eq!(
        bytes.len(),
        16 + decoded.header.image_data_size as usize + decoded.header.meta_data_size as usize
    );

    let meta = &decoded.metadata;
    assert_eq!(meta.ratio, 2.0);
    assert_eq!(meta.frames.len(), 4);
    assert_eq!(
        meta.frames[0].objects,
        Some(vec![AnimatedObject::new(0, 0.0, 0.0, 100.0, 255)])
    );
    assert_eq!(meta.frames[0].sound, None);
    assert_eq!(meta.frames[1], Frame::empty());

    let mut mirrored = AnimatedObject::new(1, 10.0, 20.0, 100.0, 128);
    mirrored.mirror = true;
    mirrored.rotate = 90.0;
    assert_eq!(meta.frames[2].objects, Some(vec![mirrored]));
    assert_eq!(
        meta.frames[2].sound,
        Some(vec![Sound {
            name: "x.mp3".to_string(),
            volume: None,
            pitch: Some(1.5),
        }])
    );

    // Pitch without a sound entry is dropped; frames past the list are empty
    assert_eq!(meta.frames[3], Frame::empty());

    let frame = codec.extract_frame(&decoded, 1, 50, None).await.unwrap();
    let frame = rgba(&frame);
    assert_eq!(frame.dimensions(), (120, 50));
    assert_eq!(pixel(&frame, 0, 0), GREEN);

    let frame = codec.extract_frame(&decoded, 0, 50, Some(80)).await.unwrap();
    assert_eq!(pixel(&rgba(&frame), 79, 49), RED);
}

#[tokio::test]
async fn test_global_sound_only_on_first_frame() {
    let mut doc = legacy_document();
    doc["se"] = json!("hit.mp3");

    let codec = png_animation_codec();
    let bytes = codec.convert_legacy(&doc).await.unwrap();
    let decoded = codec.decode(&bytes).unwrap();

    assert_eq!(
        decoded.metadata.frames[0].sound,
        Some(vec![Sound::named("hit.mp3")])
    );
    for frame in &decoded.metadata.frames[1..] {
        assert_eq!(frame.sound, None);
    }
}

#[tokio::test]
async fn test_all_empty_bitmaps_fail() {
    let mut doc = legacy_document();
    doc["bitmaps"] = json!(["", ""]);

    let err = png_animation_codec().convert_legacy(&doc).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ConversionFailed);
}

#[tokio::test]
async fn test_bad_base64_names_its_bitmap() {
    let mut doc = legacy_document();
    doc["bitmaps"][2] = json!("%%%not base64%%%");

    let err = png_animation_codec().convert_legacy(&doc).await.unwrap_err();
    assert!(matches!(err, AnimError::Base64Decode { index: 2, .. }));
}

#[tokio::test]
async fn test_missing_legacy_fields() {
    let err = png_animation_codec()
        .convert_legacy(&json!({"ratio": 1, "frames": []}))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingField);
    assert_eq!(err.missing_fields(), ["bitmaps", "frame_max"]);
}

#[tokio::test]
async fn test_json_text_entry_point() {
    let codec = png_animation_codec();

    let err = codec.convert_legacy_json("{\"ratio\": ").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ConversionFailed);

    let bytes = codec
        .convert_legacy_json(&legacy_document().to_string())
        .await
        .unwrap();
    assert_eq!(codec.decode(&bytes).unwrap().metadata.frames.len(), 4);
}

#[tokio::test]
async fn test_default_codec_writes_webp() {
    let codec = AnimationCodec::new();
    let bytes = codec.convert_legacy(&legacy_document()).await.unwrap();
    let decoded = codec.decode(&bytes).unwrap();

    assert_eq!(
        image::guess_format(decoded.pixel_payload).unwrap(),
        image::ImageFormat::WebP
    );
    let frame = codec.extract_frame(&decoded, 0, 50, None).await.unwrap();
    assert_eq!(pixel(&rgba(&frame), 0, 0), RED);
}

#[tokio::test]
async fn test_encode_round_trip_through_facade() {
    let codec = png_animation_codec();
    let packed = codec
        .sprite_sheets()
        .pack(&three_frames(), codec.pack_options())
        .await
        .unwrap();
    let meta = anim::AnimationMetadata {
        ratio: 1.0,
        frames: vec![Frame::empty(); 3],
    };

    let bytes = codec
        .encode(
            Some(&meta),
            Some(&packed.sprite_info),
            Some(packed.pixel_payload.as_slice()),
        )
        .unwrap();
    let decoded = codec.decode(&bytes).unwrap();
    assert_eq!(decoded.metadata, meta);
    assert_eq!(decoded.pixel_payload, packed.pixel_payload.as_slice());

    let err = codec.encode(None, None, Some(&[] as &[u8])).unwrap_err();
    assert_eq!(err.missing_fields(), ["meta", "spriteInfo"]);
}
