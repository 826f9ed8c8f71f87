//! The apply run: a full deterministic rebuild of the shader set from
//! the unmodified backups plus the current preset state.

use openshade_common::log::{Log, LogEvent};
use openshade_common::ShaderFile;
use openshade_patch::PatchRun;
use openshade_presets::{CustomTweak, PostProcess, Tweak};
use std::path::Path;

use crate::error::ApplyError;
use crate::postprocess;
use crate::sources::{self, ShaderSources};
use crate::tweaks::{apply_tweak, EnabledSet, TweakOutcome};

/// Applies every enabled tweak, custom tweak and post process to the
/// given (unmodified) sources, in that order.
///
/// Stock tweaks are independent: one failing to match its anchors is
/// logged and the run continues. Custom tweaks and post processes edit
/// user-controlled or chained text, so their first failure aborts the
/// run with the buffers left as they are.
pub fn apply(
    tweaks: &[Tweak],
    customs: &[CustomTweak],
    posts: &[PostProcess],
    sources: &mut ShaderSources,
    log: &mut Log,
) -> Result<(), ApplyError> {
    let enabled = EnabledSet::from_tweaks(tweaks);

    for tweak in tweaks.iter().filter(|t| t.is_enabled) {
        let (file, outcome) = apply_tweak(tweak, &enabled, sources);
        match outcome {
            TweakOutcome::Applied => {
                log.push(LogEvent::info(format!("Tweak [{}] applied.", tweak.name)));
            }
            TweakOutcome::Unsupported => {
                log.push(LogEvent::warning(format!(
                    "Did not apply tweak [{}] in {file} file. Tweak is not supported.",
                    tweak.name
                )));
            }
            TweakOutcome::AnchorMissing => {
                log.push(LogEvent::error(format!(
                    "Failed to apply tweak [{}] in {file} file.",
                    tweak.name
                )));
            }
            TweakOutcome::BadValue(e) => {
                log.push(LogEvent::error(format!(
                    "Failed to apply tweak [{}] in {file} file. {e}.",
                    tweak.name
                )));
            }
        }
    }

    for custom in customs.iter().filter(|c| c.is_enabled) {
        let file = custom.shader_file;
        let mut run = PatchRun::new(std::mem::take(sources.get_mut(file)));
        run.replace_all(&custom.old_code, &custom.new_code);
        let ok = run.ok();
        sources.set(file, run.into_text());
        if !ok {
            log.push(LogEvent::error(format!(
                "Failed to apply custom tweak [{}] in {file} file.",
                custom.name
            )));
            return Err(ApplyError::CustomTweakFailed(custom.name.clone(), file));
        }
        log.push(LogEvent::info(format!(
            "Custom tweak [{}] applied.",
            custom.name
        )));
    }

    let mut chain: Vec<&PostProcess> = posts.iter().filter(|p| p.is_enabled).collect();
    if chain.is_empty() {
        return Ok(());
    }
    chain.sort_by_key(|p| p.index);

    let hdr = ShaderFile::Hdr;
    let mut run = PatchRun::new(std::mem::take(sources.get_mut(hdr)));
    postprocess::install_accumulator(&mut run);
    if !run.ok() {
        sources.set(hdr, run.into_text());
        log.push(LogEvent::error(format!(
            "Failed to apply post process function block in {hdr} file."
        )));
        return Err(ApplyError::AccumulatorFailed(hdr));
    }

    for post in chain {
        postprocess::install_post(post, &mut run);
        if !run.ok() {
            sources.set(hdr, run.into_text());
            log.push(LogEvent::error(format!(
                "Failed to apply post process [{}] in {hdr} file.",
                post.name
            )));
            return Err(ApplyError::PostProcessFailed(post.name.clone(), hdr));
        }
        log.push(LogEvent::info(format!(
            "Post process [{}] applied.",
            post.name
        )));
    }
    sources.set(hdr, run.into_text());

    Ok(())
}

/// The whole pipeline against the file system: read the backups, patch,
/// write the live shader directory, then invalidate the shader cache.
pub fn apply_to_directory(
    tweaks: &[Tweak],
    customs: &[CustomTweak],
    posts: &[PostProcess],
    backup_dir: &Path,
    live_dir: &Path,
    cache_dir: &Path,
    log: &mut Log,
) -> Result<(), ApplyError> {
    tracing::info!(backup = %backup_dir.display(), live = %live_dir.display(), "applying preset");
    let mut shader_sources = ShaderSources::load(backup_dir)?;
    apply(tweaks, customs, posts, &mut shader_sources, log)?;
    shader_sources.write_live(live_dir)?;
    sources::clear_directory(cache_dir)?;
    log.push(LogEvent::info("Shader cache cleared"));
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use openshade_common::log::{has_errors, Severity};
    use openshade_common::ShaderFile;
    use openshade_presets::{
        custom_tweak_key, post_process_catalog, tweak_catalog, PostProcessId, TweakId,
        DAY_NIGHT_KEY,
    };
    use std::fs;

    const HDR_STUB: &str = "// Applies exposure and tone mapping to the input, and combines it with the\r\nfloat4 FinalPass(PsQuad vert) : SV_Target\r\n{\r\nreturn float4(finalColor, 1.0f);\r\n}\r\n";

    fn enabled(id: TweakId) -> Vec<Tweak> {
        let mut tweaks = tweak_catalog();
        for tweak in &mut tweaks {
            tweak.is_enabled = tweak.id == id;
        }
        tweaks
    }

    fn enabled_post(id: PostProcessId) -> PostProcess {
        let mut post = post_process_catalog()
            .into_iter()
            .find(|p| p.id == id)
            .unwrap();
        post.is_enabled = true;
        post
    }

    #[test]
    fn a_failing_stock_tweak_logs_and_continues() {
        let mut sources = ShaderSources::default();
        let mut log = Log::new();
        let tweaks = enabled(TweakId::SpecularLighting);
        apply(&tweaks, &[], &[], &mut sources, &mut log).unwrap();
        assert!(has_errors(&log));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn a_failing_custom_tweak_aborts() {
        let mut sources = ShaderSources::default();
        sources.set(ShaderFile::Cloud, "float a;\r\n".to_string());
        let custom = CustomTweak::new(
            custom_tweak_key(0),
            "my edit".to_string(),
            ShaderFile::Cloud,
            0,
            "no such code".to_string(),
            "float b;".to_string(),
            true,
        );
        let mut log = Log::new();
        let err = apply(&[], &[custom], &[], &mut sources, &mut log).unwrap_err();
        assert!(matches!(err, ApplyError::CustomTweakFailed(_, ShaderFile::Cloud)));
        assert_eq!(sources.get(ShaderFile::Cloud), "float a;\r\n");
        assert_eq!(log.last().unwrap().severity, Severity::Error);
    }

    #[test]
    fn a_bad_parameter_value_is_reported_with_the_value() {
        let mut sources = ShaderSources::default();
        let mut tweaks = enabled(TweakId::ContrastTuning);
        for tweak in &mut tweaks {
            if tweak.id == TweakId::ContrastTuning {
                tweak.parameters[0].value = "strong".to_string();
            }
        }
        let mut log = Log::new();
        apply(&tweaks, &[], &[], &mut sources, &mut log).unwrap();
        let event = log.last().unwrap();
        assert_eq!(event.severity, Severity::Error);
        assert!(event.message.contains("Coeff"), "{}", event.message);
        assert!(event.message.contains("strong"), "{}", event.message);
    }

    #[test]
    fn a_missing_accumulator_anchor_aborts_the_post_chain() {
        let mut sources = ShaderSources::default();
        sources.set(ShaderFile::Hdr, "// no tone map return here\r\n".to_string());
        let posts = vec![enabled_post(PostProcessId::Sepia)];
        let mut log = Log::new();
        let err = apply(&[], &[], &posts, &mut sources, &mut log).unwrap_err();
        assert!(matches!(err, ApplyError::AccumulatorFailed(ShaderFile::Hdr)));
        assert_eq!(sources.get(ShaderFile::Hdr), "// no tone map return here\r\n");
        assert_eq!(log.last().unwrap().severity, Severity::Error);
    }

    #[test]
    fn a_post_process_missing_its_anchor_aborts() {
        let mut sources = ShaderSources::default();
        // The accumulator return is present, the function anchor is not.
        sources.set(
            ShaderFile::Hdr,
            "return float4(finalColor, 1.0f);\r\n".to_string(),
        );
        let posts = vec![enabled_post(PostProcessId::Sepia)];
        let mut log = Log::new();
        let err = apply(&[], &[], &posts, &mut sources, &mut log).unwrap_err();
        assert!(matches!(
            err,
            ApplyError::PostProcessFailed(_, ShaderFile::Hdr)
        ));
        assert_eq!(log.last().unwrap().severity, Severity::Error);
    }

    #[test]
    fn post_chain_follows_stored_indices_and_gates_call_sites() {
        let mut sources = ShaderSources::default();
        sources.set(ShaderFile::Hdr, HDR_STUB.to_string());

        let mut sepia = enabled_post(PostProcessId::Sepia);
        sepia.index = 1;
        for parameter in &mut sepia.parameters {
            if parameter.data_key.to_string() == DAY_NIGHT_KEY {
                parameter.value = "2".to_string();
            }
        }
        let mut vibrance = enabled_post(PostProcessId::Vibrance);
        vibrance.index = 0;

        let mut log = Log::new();
        apply(&[], &[], &[sepia, vibrance], &mut sources, &mut log).unwrap();
        assert!(!has_errors(&log));

        let text = sources.get(ShaderFile::Hdr);
        let vibrance_call = text.find("EndColor = VibranceMain(vert, EndColor);").unwrap();
        let sepia_call = text.find("EndColor = SepiaMain(vert, EndColor);").unwrap();
        assert!(vibrance_call < sepia_call);
        assert!(text.contains(
            "if (cb_mDayNightInterpolant > 0.89) {\r\nEndColor = SepiaMain(vert, EndColor);\r\n}"
        ));
        assert!(!text.contains("if (cb_mDayNightInterpolant > 0.89) {\r\nEndColor = VibranceMain"));
    }

    #[test]
    fn disabled_entries_do_not_touch_the_buffers() {
        let mut sources = ShaderSources::default();
        sources.set(ShaderFile::Hdr, "untouched".to_string());
        let mut log = Log::new();
        apply(
            &tweak_catalog(),
            &[],
            &openshade_presets::post_process_catalog(),
            &mut sources,
            &mut log,
        )
        .unwrap();
        assert!(log.is_empty());
        assert_eq!(sources.get(ShaderFile::Hdr), "untouched");
    }

    #[test]
    fn apply_to_directory_writes_live_files_and_clears_the_cache() {
        let backup = tempfile::tempdir().unwrap();
        let live = tempfile::tempdir().unwrap();
        let cache = tempfile::tempdir().unwrap();
        for file in ShaderFile::ALL {
            fs::write(backup.path().join(file.file_name()), "// stock\r\n").unwrap();
        }
        fs::write(cache.path().join("stale.bin"), b"x").unwrap();

        let mut log = Log::new();
        apply_to_directory(
            &tweak_catalog(),
            &[],
            &[],
            backup.path(),
            live.path(),
            cache.path(),
            &mut log,
        )
        .unwrap();

        assert!(live.path().join("PostProcess").join("HDR.hlsl").is_file());
        assert!(!cache.path().join("stale.bin").exists());
        assert!(!has_errors(&log));
    }
}
