use openshade_common::ShaderFile;
use openshade_presets::{
    custom_tweak_key, load_comment, load_custom_tweaks, load_post_processes, load_tweaks,
    post_process_catalog, save_preset, state_hash, tweak_catalog, Codec, CustomTweak, HexCodec,
    PostProcessId, PresetFile, TweakId,
};

fn sample_customs() -> Vec<CustomTweak> {
    vec![
        CustomTweak::new(
            custom_tweak_key(0),
            "Terrain saturation boost",
            ShaderFile::Terrain,
            0,
            "float3 final = color.rgb;\r\nreturn float4(final, color.a);",
            "float3 final = saturate(color.rgb * 1.08);\r\nreturn float4(final, color.a);",
            true,
        ),
        CustomTweak::new(
            custom_tweak_key(1),
            "Cloud alpha clamp",
            ShaderFile::Cloud,
            1,
            "cColor.a = fAlpha;",
            "cColor.a = min(fAlpha, 0.97);",
            false,
        ),
    ]
}

#[test]
fn save_then_load_round_trips_the_full_preset() {
    let codec = HexCodec;
    let mut tweaks = tweak_catalog();
    let mut posts = post_process_catalog();
    let mut customs = sample_customs();

    let haze = tweaks
        .iter_mut()
        .find(|t| t.id == TweakId::HazeEffect)
        .unwrap();
    haze.is_enabled = true;
    haze.parameters[0].value = "3.5".to_string();
    haze.parameters[3].value = "1.2,0.9,1.1".to_string();

    let levels = posts
        .iter_mut()
        .find(|p| p.id == PostProcessId::Levels)
        .unwrap();
    levels.is_enabled = true;
    levels.parameters[0].value = "24".to_string();

    let comment = "Dusk preset.\r\nTuned against default weather.";

    let mut store = PresetFile::new();
    save_preset(&mut store, &tweaks, &customs, &posts, comment, &codec);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dusk.ini");
    store.save(&path).unwrap();

    let reopened = PresetFile::open(&path).unwrap();
    let mut loaded_tweaks = tweak_catalog();
    let mut loaded_posts = post_process_catalog();
    let mut loaded_customs = Vec::new();

    let log = load_tweaks(&mut loaded_tweaks, &reopened, false);
    assert!(log.is_empty(), "unexpected load events: {log:?}");
    let log = load_post_processes(&mut loaded_posts, &reopened, &codec, false);
    assert!(log.is_empty(), "unexpected load events: {log:?}");
    let log = load_custom_tweaks(&mut loaded_customs, &reopened, &codec);
    assert!(log.is_empty(), "unexpected load events: {log:?}");

    let haze = loaded_tweaks
        .iter()
        .find(|t| t.id == TweakId::HazeEffect)
        .unwrap();
    assert!(haze.is_enabled);
    assert_eq!(haze.parameters[0].value, "3.5");
    assert_eq!(haze.parameters[3].value, "1.2,0.9,1.1");

    let levels = loaded_posts
        .iter()
        .find(|p| p.id == PostProcessId::Levels)
        .unwrap();
    assert!(levels.is_enabled);
    assert_eq!(levels.parameters[0].value, "24");

    assert_eq!(loaded_customs, customs);
    assert_eq!(load_comment(&reopened), comment);

    // Identical state gives an identical hash on both sides of the disk.
    assert_eq!(
        state_hash(&tweaks, &customs, &posts, comment),
        state_hash(&loaded_tweaks, &loaded_customs, &loaded_posts, comment),
    );

    loaded_customs[1].is_enabled = true;
    assert_ne!(
        state_hash(&tweaks, &customs, &posts, comment),
        state_hash(&loaded_tweaks, &loaded_customs, &loaded_posts, comment),
    );
}

#[test]
fn stored_chain_order_survives_the_round_trip() {
    let codec = HexCodec;
    let mut posts = post_process_catalog();
    let last = posts.len() as i32 - 1;
    posts.first_mut().unwrap().index = last;
    for post in &mut posts[1..] {
        post.index -= 1;
    }

    let mut store = PresetFile::new();
    save_preset(&mut store, &[], &[], &posts, "", &codec);

    let mut loaded = post_process_catalog();
    let log = load_post_processes(&mut loaded, &store, &codec, false);
    assert!(log.is_empty(), "unexpected load events: {log:?}");

    assert_eq!(loaded.last().unwrap().id, PostProcessId::Sepia);
    assert_eq!(loaded.first().unwrap().index, 0);
}

#[test]
fn custom_tweak_discovery_stops_at_the_first_gap() {
    let codec = HexCodec;
    let mut store = PresetFile::new();
    save_preset(&mut store, &[], &sample_customs(), &[], "", &codec);

    // A section numbered past a gap is never reached.
    let orphan = custom_tweak_key(3);
    store.write(&orphan, "IsActive", "1");
    store.write(&orphan, "Name", "Orphan");
    store.write(&orphan, "Shader", ShaderFile::General.file_name());
    store.write(&orphan, "Index", "3");
    store.write(&orphan, "OldPattern", codec.encode("a"));
    store.write(&orphan, "NewPattern", codec.encode("b"));

    let mut customs = Vec::new();
    let log = load_custom_tweaks(&mut customs, &store, &codec);
    assert!(log.is_empty(), "unexpected load events: {log:?}");
    assert_eq!(customs, sample_customs());
}

#[test]
fn a_malformed_enabled_flag_is_reported_and_the_tweak_skipped() {
    let codec = HexCodec;
    let mut store = PresetFile::new();
    save_preset(&mut store, &tweak_catalog(), &[], &[], "", &codec);
    store.write("WATER_WAVESPEED", "IsActive", "yes");

    let mut tweaks = tweak_catalog();
    let log = load_tweaks(&mut tweaks, &store, false);
    assert_eq!(log.len(), 1);
    assert!(log[0].message.contains("boolean"), "{}", log[0].message);
    assert!(log[0].message.contains("yes"), "{}", log[0].message);
    assert!(tweaks.iter().all(|t| !t.is_enabled));
}

#[test]
fn sparse_preset_loads_what_it_has_and_logs_the_rest() {
    let codec = HexCodec;
    let mut store = PresetFile::new();
    store.write("HDR & POST-PROCESSING_HDRTONEMAP", "IsActive", "1");

    let mut tweaks = tweak_catalog();
    let log = load_tweaks(&mut tweaks, &store, false);

    let tonemap = tweaks
        .iter()
        .find(|t| t.id == TweakId::AlternateTonemap)
        .unwrap();
    assert!(tonemap.is_enabled);
    // Every other tweak is reported missing and left at defaults.
    assert_eq!(log.len(), tweaks.len() - 1);
    assert!(tweaks
        .iter()
        .filter(|t| t.id != TweakId::AlternateTonemap)
        .all(|t| !t.is_enabled));

    let log = load_post_processes(&mut post_process_catalog(), &store, &codec, false);
    assert!(!log.is_empty());
}
