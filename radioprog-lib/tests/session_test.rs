use radioprog_lib::models::builtin_models;
use radioprog_lib::{
    Action, DevicePort, Error, Flasher, NextRadioPrompt, Operator, Preselection, RadioModel,
    Result, Session, SessionOutcome, run_session,
};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// Flasher that answers with canned exit codes and records every call.
struct FakeFlasher {
    codes: VecDeque<i32>,
    calls: Vec<Vec<String>>,
}

impl FakeFlasher {
    fn with_codes(codes: &[i32]) -> Self {
        Self {
            codes: codes.iter().copied().collect(),
            calls: Vec::new(),
        }
    }
}

impl Flasher for FakeFlasher {
    fn run(&mut self, args: &[String]) -> Result<()> {
        self.calls.push(args.to_vec());
        // chirpc reports success with exit code 1
        match self.codes.pop_front().unwrap_or(1) {
            1 => Ok(()),
            code => Err(Error::TransferFailure { code: Some(code) }),
        }
    }
}

#[derive(Default)]
struct ScriptedOperator {
    action: usize,
    output_name: String,
    image: usize,
    overwrite: bool,
    next_radio: VecDeque<bool>,
    prompts: Vec<String>,
}

impl ScriptedOperator {
    fn choosing(action: Action) -> Self {
        let action = match action {
            Action::Download => 0,
            Action::Upload => 1,
            Action::Loop => 2,
        };
        Self {
            action,
            ..Self::default()
        }
    }
}

impl NextRadioPrompt for ScriptedOperator {
    fn confirm_next_radio(&mut self, message: &str) -> Result<bool> {
        self.prompts.push(message.to_string());
        Ok(self.next_radio.pop_front().unwrap_or(false))
    }
}

impl Operator for ScriptedOperator {
    fn select_port(&mut self, _ports: &[DevicePort]) -> Result<usize> {
        self.prompts.push("port".to_string());
        Ok(0)
    }

    fn select_model(&mut self, _models: &[RadioModel]) -> Result<usize> {
        self.prompts.push("model".to_string());
        Ok(0)
    }

    fn select_action(&mut self, actions: &[Action]) -> Result<usize> {
        assert_eq!(actions, &[Action::Download, Action::Upload, Action::Loop]);
        self.prompts.push("action".to_string());
        Ok(self.action)
    }

    fn output_file_name(&mut self, default: &str) -> Result<String> {
        self.prompts.push(format!("output:{}", default));
        Ok(self.output_name.clone())
    }

    fn select_image(&mut self, _images: &[String]) -> Result<usize> {
        self.prompts.push("image".to_string());
        Ok(self.image)
    }

    fn confirm_overwrite(&mut self, _path: &Path) -> Result<bool> {
        self.prompts.push("overwrite".to_string());
        Ok(self.overwrite)
    }
}

fn usb_ports() -> Vec<DevicePort> {
    vec![DevicePort::new("/dev/ttyUSB0")]
}

fn session_in(dir: &Path, images: &[&str]) -> Session {
    for name in images {
        fs::write(dir.join(name), b"\x00\x01").unwrap();
    }
    Session::new(
        usb_ports(),
        builtin_models(),
        dir,
        images.iter().map(|s| s.to_string()).collect(),
    )
    .unwrap()
}

fn direction_flag(call: &[String]) -> &str {
    &call[4]
}

#[test]
fn no_usb_ports_means_no_session() {
    let err = Session::new(Vec::new(), builtin_models(), "images", Vec::new()).unwrap_err();
    assert!(matches!(err, Error::NoDeviceFound));
    assert_eq!(err.to_string(), "No USB devices found.");
}

#[test]
fn single_upload_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), &["club.img"]);
    let mut operator = ScriptedOperator::choosing(Action::Upload);
    let mut flasher = FakeFlasher::with_codes(&[1]);

    let outcome = run_session(&session, &mut flasher, &mut operator, &Preselection::default())
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Uploaded(dir.path().join("club.img")));
    assert_eq!(outcome.to_string(), "Image uploaded successfully.");
    assert_eq!(flasher.calls.len(), 1);
    assert_eq!(direction_flag(&flasher.calls[0]), "--upload-mmap");
    assert_eq!(operator.prompts, vec!["port", "model", "action", "image"]);
}

#[test]
fn single_upload_failure_is_reported_with_code() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), &["club.img"]);
    let mut operator = ScriptedOperator::choosing(Action::Upload);
    let mut flasher = FakeFlasher::with_codes(&[0]);

    let err = run_session(&session, &mut flasher, &mut operator, &Preselection::default())
        .unwrap_err();
    assert!(matches!(err, Error::TransferFailure { code: Some(0) }));
    assert_eq!(flasher.calls.len(), 1);
}

#[test]
fn loop_confirmed_twice_then_quit() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), &["club.img"]);
    let mut operator = ScriptedOperator::choosing(Action::Loop);
    operator.next_radio = VecDeque::from([true, true, false]);
    let mut flasher = FakeFlasher::with_codes(&[1, 1]);

    let outcome = run_session(&session, &mut flasher, &mut operator, &Preselection::default())
        .unwrap();

    assert_eq!(
        outcome,
        SessionOutcome::Sequence {
            image: dir.path().join("club.img"),
            completed: 2,
        }
    );
    assert_eq!(outcome.to_string(), "Done. 2 radio(s) flashed.");
    assert_eq!(flasher.calls.len(), 2);
    assert!(
        flasher
            .calls
            .iter()
            .all(|call| direction_flag(call) == "--upload-mmap")
    );
}

#[test]
fn loop_aborts_on_first_failure_without_prompting_again() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), &["club.img"]);
    let mut operator = ScriptedOperator::choosing(Action::Loop);
    operator.next_radio = VecDeque::from([true, true, true]);
    let mut flasher = FakeFlasher::with_codes(&[2]);

    let err = run_session(&session, &mut flasher, &mut operator, &Preselection::default())
        .unwrap_err();

    assert_eq!(err.to_string(), "Error uploading image.");
    match err {
        Error::SequenceAborted { completed, source } => {
            assert_eq!(completed, 0);
            assert!(matches!(*source, Error::TransferFailure { code: Some(2) }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(flasher.calls.len(), 1);
    let radio_prompts: Vec<_> = operator
        .prompts
        .iter()
        .filter(|p| p.starts_with("Connect"))
        .collect();
    assert_eq!(radio_prompts.len(), 1);
}

#[test]
fn loop_stops_at_kth_failure() {
    for k in 1..=4usize {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path(), &["club.img"]);
        let mut operator = ScriptedOperator::choosing(Action::Loop);
        operator.next_radio = std::iter::repeat_n(true, 10).collect();
        let mut codes = vec![1; k - 1];
        codes.push(2);
        let mut flasher = FakeFlasher::with_codes(&codes);

        let err = run_session(&session, &mut flasher, &mut operator, &Preselection::default())
            .unwrap_err();

        assert_eq!(flasher.calls.len(), k);
        match err {
            Error::SequenceAborted { completed, .. } => assert_eq!(completed as usize, k - 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[test]
fn missing_upload_image_runs_nothing() {
    let dir = tempfile::tempdir().unwrap();
    // Listed but deleted before the transfer starts.
    let session = session_in(dir.path(), &["club.img"]);
    fs::remove_file(dir.path().join("club.img")).unwrap();

    for action in [Action::Upload, Action::Loop] {
        let mut operator = ScriptedOperator::choosing(action);
        operator.next_radio = VecDeque::from([true]);
        let mut flasher = FakeFlasher::with_codes(&[1]);

        let err = run_session(&session, &mut flasher, &mut operator, &Preselection::default())
            .unwrap_err();
        match err {
            Error::MissingInputFile { path } => assert_eq!(path, dir.path().join("club.img")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(flasher.calls.is_empty());
    }
}

#[test]
fn upload_without_images_fails_before_prompting_for_one() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), &[]);
    let mut operator = ScriptedOperator::choosing(Action::Upload);
    let mut flasher = FakeFlasher::with_codes(&[]);

    let err = run_session(&session, &mut flasher, &mut operator, &Preselection::default())
        .unwrap_err();
    assert!(matches!(err, Error::NoImagesFound { .. }));
    assert!(!operator.prompts.contains(&"image".to_string()));
    assert!(flasher.calls.is_empty());
}

#[test]
fn download_uses_model_default_name() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), &[]);
    let mut operator = ScriptedOperator::choosing(Action::Download);
    let mut flasher = FakeFlasher::with_codes(&[1]);

    let outcome = run_session(&session, &mut flasher, &mut operator, &Preselection::default())
        .unwrap();

    let expected: PathBuf = dir.path().join("Baofeng_UV-5R.img");
    assert_eq!(outcome, SessionOutcome::Downloaded(expected.clone()));
    assert_eq!(
        outcome.to_string(),
        format!("Download complete. Image saved to: {}", expected.display())
    );
    assert!(operator.prompts.contains(&"output:Baofeng_UV-5R.img".to_string()));
    assert!(!operator.prompts.contains(&"overwrite".to_string()));
    assert_eq!(direction_flag(&flasher.calls[0]), "--download-mmap");
    assert_eq!(flasher.calls[0][6], expected.to_string_lossy());
}

#[test]
fn declined_overwrite_runs_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), &["backup.img"]);
    let mut operator = ScriptedOperator::choosing(Action::Download);
    operator.output_name = "backup.img".to_string();
    operator.overwrite = false;
    let mut flasher = FakeFlasher::with_codes(&[1]);

    let outcome = run_session(&session, &mut flasher, &mut operator, &Preselection::default())
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Declined(dir.path().join("backup.img")));
    assert!(operator.prompts.contains(&"overwrite".to_string()));
    assert!(flasher.calls.is_empty());
}

#[test]
fn accepted_overwrite_downloads() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), &["backup.img"]);
    let mut operator = ScriptedOperator::choosing(Action::Download);
    operator.output_name = "backup.img".to_string();
    operator.overwrite = true;
    let mut flasher = FakeFlasher::with_codes(&[1]);

    let outcome = run_session(&session, &mut flasher, &mut operator, &Preselection::default())
        .unwrap();
    assert_eq!(outcome, SessionOutcome::Downloaded(dir.path().join("backup.img")));
    assert_eq!(flasher.calls.len(), 1);
}

#[test]
fn preselection_skips_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), &["club.img"]);
    let mut operator = ScriptedOperator::default();
    let mut flasher = FakeFlasher::with_codes(&[1]);
    let preselection = Preselection {
        port: Some("/dev/ttyUSB0".to_string()),
        model: Some("Baofeng_UV-5R".to_string()),
        action: Some(Action::Upload),
        image: Some("club.img".to_string()),
    };

    run_session(&session, &mut flasher, &mut operator, &preselection).unwrap();
    assert!(operator.prompts.is_empty());
    assert_eq!(
        flasher.calls[0][..4],
        ["-s", "/dev/ttyUSB0", "-r", "Baofeng_UV-5R"]
    );
}

#[test]
fn unknown_preselected_port_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), &[]);
    let mut operator = ScriptedOperator::default();
    let preselection = Preselection {
        port: Some("/dev/ttyUSB9".to_string()),
        ..Preselection::default()
    };

    let err = session.plan(&mut operator, &preselection).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}
