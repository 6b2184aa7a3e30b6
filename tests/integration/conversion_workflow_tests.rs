/*!
 * End-to-end tests of the file conversion workflow
 */

use anyhow::Result;
use std::fs;

use subconv::app_config::Config;
use subconv::app_controller::{ConversionStatus, Controller, FolderSummary};
use subconv::errors::{AppError, FormatError};

use crate::common::{create_temp_dir, create_test_file, init_test_logging, ADOBE_SAMPLE, SRT_SAMPLE};

const ADOBE: &str = "Adobe Encore (line#/tabs/n)";

fn controller() -> Result<Controller> {
    init_test_logging();
    Controller::with_config(Config::default())
}

#[test]
fn test_run_withAdobeFile_shouldWriteSubRipNextToIt() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let input = create_test_file(temp_dir.path(), "movie.txt", ADOBE_SAMPLE)?;

    let status = controller()?.run(&input, temp_dir.path(), None, false)?;

    let expected_path = temp_dir.path().join("movie.srt");
    assert_eq!(
        status,
        ConversionStatus::Converted {
            source_format: ADOBE,
            output_path: expected_path.clone(),
            error_count: 0,
        }
    );
    assert_eq!(fs::read_to_string(expected_path)?, SRT_SAMPLE);
    Ok(())
}

#[test]
fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let input = create_test_file(temp_dir.path(), "movie.txt", ADOBE_SAMPLE)?;
    let existing = create_test_file(temp_dir.path(), "movie.srt", "old")?;
    let controller = controller()?;

    let status = controller.run(&input, temp_dir.path(), None, false)?;
    assert_eq!(status, ConversionStatus::Skipped(existing.clone()));
    assert_eq!(fs::read_to_string(&existing)?, "old");

    let status = controller.run(&input, temp_dir.path(), None, true)?;
    assert!(matches!(status, ConversionStatus::Converted { .. }));
    assert_eq!(fs::read_to_string(&existing)?, SRT_SAMPLE);
    Ok(())
}

#[test]
fn test_run_withOutputEqualToInput_shouldSkipEvenWhenForced() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let input = create_test_file(temp_dir.path(), "movie.txt", ADOBE_SAMPLE)?;

    let status = controller()?.run(&input, temp_dir.path(), Some(ADOBE), true)?;

    assert_eq!(status, ConversionStatus::Skipped(input.clone()));
    assert_eq!(fs::read_to_string(&input)?, ADOBE_SAMPLE);
    Ok(())
}

#[test]
fn test_run_withSubRipToAdobe_shouldWriteFrameTimecodes() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let input = create_test_file(temp_dir.path(), "movie.srt", SRT_SAMPLE)?;
    let output_dir = temp_dir.path().join("out");

    controller()?.run(&input, &output_dir, Some(ADOBE), false)?;

    assert_eq!(fs::read_to_string(output_dir.join("movie.txt"))?, ADOBE_SAMPLE);
    Ok(())
}

#[test]
fn test_run_withUnrecognizedOrMissingInput_shouldFail() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let prose = create_test_file(temp_dir.path(), "notes.txt", "Just some notes.\nNothing timed.\n")?;
    let controller = controller()?;

    assert!(controller.run(&prose, temp_dir.path(), None, false).is_err());
    assert!(controller
        .run(&temp_dir.path().join("missing.txt"), temp_dir.path(), None, false)
        .is_err());
    assert!(controller.run(&prose, temp_dir.path(), Some("Nope"), false).is_err());
    Ok(())
}

#[test]
fn test_run_folder_shouldConvertRecognizedFilesAndCountFailures() -> Result<()> {
    let input_dir = create_temp_dir()?;
    let output_dir = create_temp_dir()?;
    create_test_file(input_dir.path(), "a.txt", ADOBE_SAMPLE)?;
    create_test_file(input_dir.path(), "b.srt", SRT_SAMPLE)?;
    create_test_file(input_dir.path(), "c.txt", "no captions here\n")?;

    let summary = controller()?.run_folder(input_dir.path(), Some(output_dir.path()), None, false)?;

    assert_eq!(
        summary,
        FolderSummary {
            converted: 2,
            skipped: 0,
            failed: 1
        }
    );
    assert_eq!(fs::read_to_string(output_dir.path().join("a.srt"))?, SRT_SAMPLE);
    assert_eq!(fs::read_to_string(output_dir.path().join("b.srt"))?, SRT_SAMPLE);
    Ok(())
}

#[test]
fn test_run_folder_withMissingDirectory_shouldFail() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let result = controller()?.run_folder(&temp_dir.path().join("missing"), None, None, false);
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_detect_file_shouldReportProbesAndMatch() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let input = create_test_file(temp_dir.path(), "movie.txt", ADOBE_SAMPLE)?;

    let (detected, probes) = controller()?.detect_file(&input)?;

    assert_eq!(detected, Some(ADOBE));
    assert_eq!(probes.len(), 2);
    assert!(!probes[0].accepted);
    Ok(())
}

#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let config = Config {
        frame_rate: -1.0,
        ..Config::default()
    };
    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_run_errors_shouldCarryTypedAppErrors() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let prose = create_test_file(temp_dir.path(), "notes.txt", "Just some notes.\n")?;
    let controller = controller()?;

    let missing = controller
        .run(&temp_dir.path().join("missing.txt"), temp_dir.path(), None, false)
        .unwrap_err();
    assert!(matches!(missing.downcast_ref::<AppError>(), Some(AppError::File(_))));

    let unknown = controller.run(&prose, temp_dir.path(), Some("Nope"), false).unwrap_err();
    assert!(matches!(
        unknown.downcast_ref::<AppError>(),
        Some(AppError::Format(FormatError::UnknownFormat(name))) if name == "Nope"
    ));

    let unrecognized = controller.run(&prose, temp_dir.path(), None, false).unwrap_err();
    assert!(matches!(
        unrecognized.downcast_ref::<AppError>(),
        Some(AppError::Format(FormatError::NotRecognized(_)))
    ));
    Ok(())
}
