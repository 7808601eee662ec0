//! Recording session controller use case

use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::capture::{ArtifactLabel, CaptureKind, CaptureSession};
use crate::domain::checklist::Checklist;
use crate::domain::journal::{Journal, JournalEntry};
use crate::domain::media::CodecProfile;

use super::ports::{
    ArtifactSink, AudioCue, AudioCueType, CaptureError, DisplaySource, EncoderError,
    EncoderFactory, FragmentSink, MediaStream, MicrophoneSource, NotificationIcon, Notifier,
    PermissionProbe, PermissionState, StreamEncoder,
};

// Fixed checklist positions for the four milestones.
const MILESTONE_MIC_PERMISSION: usize = 0;
const MILESTONE_MIC_TEST: usize = 1;
const MILESTONE_SYSTEM_AUDIO: usize = 2;
const MILESTONE_SYSTEM_TEST: usize = 3;

/// Errors from starting a recording
#[derive(Debug, Error)]
pub enum StartError {
    #[error("{0} recording already in progress")]
    AlreadyRecording(CaptureKind),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Encoder(#[from] EncoderError),
}

/// Controller behavior toggles
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerOptions {
    /// Play audible cues on recording start/stop
    pub enable_cue: bool,
    /// Show a desktop notification when an artifact is saved
    pub enable_notify: bool,
}

/// UI callbacks fired as controller state changes.
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct ControllerEvents {
    /// Called when a checklist entry flips
    pub on_checklist: Option<Box<dyn Fn(usize, bool) + Send + Sync>>,
    /// Called for every appended journal entry
    pub on_journal: Option<Box<dyn Fn(&JournalEntry) + Send + Sync>>,
    /// Called when a kind enters (true) or leaves (false) recording
    pub on_recording_change: Option<Box<dyn Fn(CaptureKind, bool) + Send + Sync>>,
}

/// One running recording: the session, its encoder, and the stream
/// feeding it. The system kind may carry a companion session recording
/// the duplicated system-audio track.
struct ActiveRecording {
    session: Arc<StdMutex<CaptureSession>>,
    encoder: Box<dyn StreamEncoder>,
    stream: MediaStream,
    companion: Option<CompanionRecording>,
}

struct CompanionRecording {
    session: Arc<StdMutex<CaptureSession>>,
    encoder: Box<dyn StreamEncoder>,
    stream: MediaStream,
}

/// Recording session controller.
///
/// Owns the per-kind session slots, the milestone checklist, and the
/// status journal. The two kinds hold entirely separate state and may
/// record concurrently; all failures are caught here and surfaced as
/// journal entries.
pub struct SessionController<P, M, D, F, S, C, N>
where
    P: PermissionProbe,
    M: MicrophoneSource,
    D: DisplaySource,
    F: EncoderFactory,
    S: ArtifactSink,
    C: AudioCue,
    N: Notifier,
{
    probe: P,
    microphone: M,
    display: D,
    encoders: F,
    sink: S,
    cue: C,
    notifier: N,
    options: ControllerOptions,
    events: ControllerEvents,
    checklist: StdMutex<Checklist>,
    journal: StdMutex<Journal>,
    mic_slot: Mutex<Option<ActiveRecording>>,
    system_slot: Mutex<Option<ActiveRecording>>,
}

impl<P, M, D, F, S, C, N> SessionController<P, M, D, F, S, C, N>
where
    P: PermissionProbe,
    M: MicrophoneSource,
    D: DisplaySource,
    F: EncoderFactory,
    S: ArtifactSink,
    C: AudioCue,
    N: Notifier,
{
    /// Create a controller over its collaborator ports
    pub fn new(
        probe: P,
        microphone: M,
        display: D,
        encoders: F,
        sink: S,
        cue: C,
        notifier: N,
        options: ControllerOptions,
    ) -> Self {
        Self {
            probe,
            microphone,
            display,
            encoders,
            sink,
            cue,
            notifier,
            options,
            events: ControllerEvents::default(),
            checklist: StdMutex::new(Checklist::new()),
            journal: StdMutex::new(Journal::new()),
            mic_slot: Mutex::new(None),
            system_slot: Mutex::new(None),
        }
    }

    /// Attach UI event callbacks
    pub fn with_events(mut self, events: ControllerEvents) -> Self {
        self.events = events;
        self
    }

    /// One-shot startup capability probe.
    ///
    /// Marks the first milestone when the microphone permission is
    /// already granted; a failed query is logged and otherwise ignored.
    pub async fn probe_permissions(&self) {
        match self.probe.microphone().await {
            Ok(PermissionState::Granted) => {
                self.set_milestone(MILESTONE_MIC_PERMISSION, true);
            }
            Ok(_) => {}
            Err(e) => {
                self.log_error(format!("Failed to set up audio capabilities: {}", e));
            }
        }
    }

    /// Start recording the given kind.
    ///
    /// Asynchronous: resolves once the stream has been acquired and the
    /// encoder is running. Failures are logged and leave every slot,
    /// milestone, and journal state unchanged apart from the error
    /// entry itself.
    pub async fn start(&self, kind: CaptureKind) -> Result<(), StartError> {
        let result = match kind {
            CaptureKind::Microphone => self.start_microphone().await,
            CaptureKind::System => self.start_system().await,
        };

        match &result {
            Ok(()) => {
                self.log(format!("Started {} recording", kind));
                if self.options.enable_cue {
                    let _ = self.cue.play(AudioCueType::RecordingStart).await;
                }
            }
            Err(e) => {
                self.log_error(format!("Recording failed: {}", e));
            }
        }

        result
    }

    /// Stop recording the given kind.
    ///
    /// A no-op when the kind has no active session. Otherwise flips the
    /// kind to non-recording immediately, stops the encoder(s), releases
    /// every captured track, and saves one artifact per finalized
    /// session. Returns the saved paths.
    pub async fn stop(&self, kind: CaptureKind) -> Vec<PathBuf> {
        let active = match kind {
            CaptureKind::Microphone => self.mic_slot.lock().await.take(),
            CaptureKind::System => self.system_slot.lock().await.take(),
        };

        let Some(active) = active else {
            return Vec::new();
        };

        // The kind leaves recording state before finalization work runs
        self.emit_recording_change(kind, false);

        let mut saved = Vec::new();

        if active.encoder.is_active() {
            if let Err(e) = active.encoder.stop().await {
                self.log_error(format!("Failed to stop {} encoder: {}", kind, e));
            }
        }
        active.stream.stop_tracks();
        if let Some(path) = self.finalize_and_save(&active.session).await {
            saved.push(path);
        }

        if let Some(companion) = active.companion {
            if companion.encoder.is_active() {
                if let Err(e) = companion.encoder.stop().await {
                    self.log_error(format!("Failed to stop system-audio encoder: {}", e));
                }
            }
            companion.stream.stop_tracks();
            if let Some(path) = self.finalize_and_save(&companion.session).await {
                saved.push(path);
            }
        }

        if self.options.enable_cue {
            let _ = self.cue.play(AudioCueType::RecordingStop).await;
        }

        saved
    }

    /// Check whether a kind currently records
    pub async fn is_recording(&self, kind: CaptureKind) -> bool {
        match kind {
            CaptureKind::Microphone => self.mic_slot.lock().await.is_some(),
            CaptureKind::System => self.system_slot.lock().await.is_some(),
        }
    }

    /// Snapshot of the milestone checklist
    pub fn checklist(&self) -> Checklist {
        self.checklist
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Snapshot of the journal entries in append order
    pub fn journal_entries(&self) -> Vec<JournalEntry> {
        self.journal
            .lock()
            .map(|j| j.entries().to_vec())
            .unwrap_or_default()
    }

    async fn start_microphone(&self) -> Result<(), StartError> {
        let mut slot = self.mic_slot.lock().await;
        if slot.is_some() {
            return Err(StartError::AlreadyRecording(CaptureKind::Microphone));
        }

        let stream = self.microphone.acquire().await?;
        self.set_milestone(MILESTONE_MIC_TEST, true);

        let profile = CodecProfile::for_label(ArtifactLabel::Microphone);
        let session = Arc::new(StdMutex::new(CaptureSession::start(
            ArtifactLabel::Microphone,
            profile,
        )));

        let encoder = match self.encoders.open(&stream, profile).await {
            Ok(encoder) => encoder,
            Err(e) => {
                stream.stop_tracks();
                return Err(e.into());
            }
        };
        if let Err(e) = encoder.start(Self::fragment_sink(&session)).await {
            stream.stop_tracks();
            return Err(e.into());
        }

        *slot = Some(ActiveRecording {
            session,
            encoder,
            stream,
            companion: None,
        });
        self.emit_recording_change(CaptureKind::Microphone, true);
        Ok(())
    }

    async fn start_system(&self) -> Result<(), StartError> {
        let mut slot = self.system_slot.lock().await;
        if slot.is_some() {
            return Err(StartError::AlreadyRecording(CaptureKind::System));
        }

        let stream = self.display.acquire().await?;
        let active = self.open_system_recording(stream).await?;

        *slot = Some(active);
        self.emit_recording_change(CaptureKind::System, true);
        Ok(())
    }

    /// Wire the primary display recording and, when the stream carries
    /// an audio track, the companion system-audio recording over a
    /// duplicate of that track. Every acquired track is released on
    /// failure.
    async fn open_system_recording(
        &self,
        stream: MediaStream,
    ) -> Result<ActiveRecording, StartError> {
        let mut companion = None;

        if let Some(audio) = stream.audio_track() {
            let aux_stream = MediaStream::from_track(audio.duplicate());
            let profile = CodecProfile::for_label(ArtifactLabel::SystemAudio);
            let session = Arc::new(StdMutex::new(CaptureSession::start(
                ArtifactLabel::SystemAudio,
                profile,
            )));

            let encoder = match self.encoders.open(&aux_stream, profile).await {
                Ok(encoder) => encoder,
                Err(e) => {
                    aux_stream.stop_tracks();
                    stream.stop_tracks();
                    return Err(e.into());
                }
            };
            if let Err(e) = encoder.start(Self::fragment_sink(&session)).await {
                aux_stream.stop_tracks();
                stream.stop_tracks();
                return Err(e.into());
            }

            self.set_milestone(MILESTONE_SYSTEM_AUDIO, true);
            companion = Some(CompanionRecording {
                session,
                encoder,
                stream: aux_stream,
            });
        }

        self.set_milestone(MILESTONE_SYSTEM_TEST, true);

        let profile = CodecProfile::for_label(ArtifactLabel::System);
        let session = Arc::new(StdMutex::new(CaptureSession::start(
            ArtifactLabel::System,
            profile,
        )));

        let primary = async {
            let encoder = self.encoders.open(&stream, profile).await?;
            encoder.start(Self::fragment_sink(&session)).await?;
            Ok::<_, EncoderError>(encoder)
        }
        .await;

        let encoder = match primary {
            Ok(encoder) => encoder,
            Err(e) => {
                if let Some(companion) = companion.take() {
                    let _ = companion.encoder.stop().await;
                    companion.stream.stop_tracks();
                }
                stream.stop_tracks();
                return Err(e.into());
            }
        };

        Ok(ActiveRecording {
            session,
            encoder,
            stream,
            companion,
        })
    }

    /// Build the fragment callback appending encoder output to a session
    fn fragment_sink(session: &Arc<StdMutex<CaptureSession>>) -> FragmentSink {
        let session = Arc::clone(session);
        Arc::new(move |fragment| {
            if let Ok(mut session) = session.lock() {
                session.push_fragment(fragment);
            }
        })
    }

    /// Package a finalized session and hand it to the sink.
    /// Save failures are logged; nothing propagates.
    async fn finalize_and_save(&self, session: &Arc<StdMutex<CaptureSession>>) -> Option<PathBuf> {
        let artifact = match session.lock() {
            Ok(mut session) => session.finalize(),
            Err(_) => return None,
        };

        let label = artifact.label();
        let size = artifact.media().human_readable_size();
        let secs = artifact.duration().as_secs_f64();

        match self.sink.save(&artifact).await {
            Ok(path) => {
                self.log(format!(
                    "Saved {} recording ({:.1}s, {}) to {}",
                    label,
                    secs,
                    size,
                    path.display()
                ));
                if self.options.enable_notify {
                    let _ = self
                        .notifier
                        .notify(
                            "CaptureCheck",
                            &format!("Saved {} recording ({})", label, size),
                            NotificationIcon::Success,
                        )
                        .await;
                }
                Some(path)
            }
            Err(e) => {
                self.log_error(format!("Failed to save {} recording: {}", label, e));
                None
            }
        }
    }

    fn set_milestone(&self, index: usize, completed: bool) {
        let changed = match self.checklist.lock() {
            Ok(mut checklist) => checklist.set_completed(index, completed),
            Err(_) => false,
        };
        if changed {
            if let Some(on_checklist) = &self.events.on_checklist {
                on_checklist(index, completed);
            }
        }
    }

    fn emit_recording_change(&self, kind: CaptureKind, recording: bool) {
        if let Some(on_recording_change) = &self.events.on_recording_change {
            on_recording_change(kind, recording);
        }
    }

    fn log(&self, message: impl Into<String>) {
        if let Ok(mut journal) = self.journal.lock() {
            let entry = journal.log(message);
            if let Some(on_journal) = &self.events.on_journal {
                on_journal(entry);
            }
        }
    }

    fn log_error(&self, message: impl Into<String>) {
        if let Ok(mut journal) = self.journal.lock() {
            let entry = journal.log_error(message);
            if let Some(on_journal) = &self.events.on_journal {
                on_journal(entry);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        AudioCueError, CaptureInput, MediaTrack, NotificationError, ProbeError, SaveError,
        TrackKind,
    };
    use crate::domain::media::Artifact;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct MockProbe {
        state: PermissionState,
        fail: bool,
    }

    #[async_trait]
    impl PermissionProbe for MockProbe {
        async fn microphone(&self) -> Result<PermissionState, ProbeError> {
            if self.fail {
                Err(ProbeError::Unsupported("no permission backend".into()))
            } else {
                Ok(self.state)
            }
        }
    }

    struct MockMicSource {
        deny: bool,
    }

    #[async_trait]
    impl MicrophoneSource for MockMicSource {
        async fn acquire(&self) -> Result<MediaStream, CaptureError> {
            if self.deny {
                return Err(CaptureError::Denied("Permission denied".into()));
            }
            Ok(MediaStream::from_track(MediaTrack::new(
                TrackKind::Audio,
                CaptureInput::new("mock", "mic"),
            )))
        }
    }

    struct MockDisplaySource {
        with_audio: bool,
    }

    #[async_trait]
    impl DisplaySource for MockDisplaySource {
        async fn acquire(&self) -> Result<MediaStream, CaptureError> {
            let mut tracks = vec![MediaTrack::new(
                TrackKind::Video,
                CaptureInput::new("mock", "display"),
            )];
            if self.with_audio {
                tracks.push(MediaTrack::new(
                    TrackKind::Audio,
                    CaptureInput::new("mock", "monitor"),
                ));
            }
            Ok(MediaStream::new(tracks))
        }
    }

    /// Encoder delivering a scripted fragment sequence on start.
    struct MockEncoder {
        fragments: Vec<Vec<u8>>,
        active: AtomicBool,
    }

    #[async_trait]
    impl StreamEncoder for MockEncoder {
        async fn start(&self, sink: FragmentSink) -> Result<(), EncoderError> {
            self.active.store(true, Ordering::SeqCst);
            for fragment in &self.fragments {
                sink(fragment.clone());
            }
            Ok(())
        }

        async fn stop(&self) -> Result<(), EncoderError> {
            self.active.store(false, Ordering::SeqCst);
            Ok(())
        }

        fn is_active(&self) -> bool {
            self.active.load(Ordering::SeqCst)
        }
    }

    /// Factory handing audio-profile encoders one script and
    /// video-profile encoders another.
    struct MockEncoderFactory {
        audio_fragments: Vec<Vec<u8>>,
        video_fragments: Vec<Vec<u8>>,
        fail: bool,
    }

    impl MockEncoderFactory {
        fn with_fragments(audio: Vec<Vec<u8>>, video: Vec<Vec<u8>>) -> Self {
            Self {
                audio_fragments: audio,
                video_fragments: video,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                audio_fragments: Vec::new(),
                video_fragments: Vec::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl EncoderFactory for MockEncoderFactory {
        async fn open(
            &self,
            _stream: &MediaStream,
            profile: CodecProfile,
        ) -> Result<Box<dyn StreamEncoder>, EncoderError> {
            if self.fail {
                return Err(EncoderError::UnsupportedProfile(
                    profile.mime_type().to_string(),
                ));
            }
            let fragments = if profile.has_video() {
                self.video_fragments.clone()
            } else {
                self.audio_fragments.clone()
            };
            Ok(Box::new(MockEncoder {
                fragments,
                active: AtomicBool::new(false),
            }))
        }
    }

    #[derive(Default)]
    struct SinkState {
        saved: StdMutex<Vec<(String, usize, String)>>,
    }

    struct MockSink {
        state: Arc<SinkState>,
        fail: bool,
    }

    impl MockSink {
        fn new() -> (Self, Arc<SinkState>) {
            let state = Arc::new(SinkState::default());
            (
                Self {
                    state: Arc::clone(&state),
                    fail: false,
                },
                state,
            )
        }

        fn failing() -> Self {
            Self {
                state: Arc::new(SinkState::default()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl ArtifactSink for MockSink {
        async fn save(&self, artifact: &Artifact) -> Result<PathBuf, SaveError> {
            if self.fail {
                return Err(SaveError::WriteFailed("disk full".into()));
            }
            let filename = artifact.filename();
            if let Ok(mut saved) = self.state.saved.lock() {
                saved.push((
                    artifact.label().to_string(),
                    artifact.size_bytes(),
                    filename.clone(),
                ));
            }
            Ok(PathBuf::from(filename))
        }
    }

    struct MockCue;

    #[async_trait]
    impl AudioCue for MockCue {
        async fn play(&self, _cue_type: AudioCueType) -> Result<(), AudioCueError> {
            Ok(())
        }
    }

    struct MockNotifier;

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn notify(
            &self,
            _title: &str,
            _message: &str,
            _icon: NotificationIcon,
        ) -> Result<(), NotificationError> {
            Ok(())
        }
    }

    type TestController = SessionController<
        MockProbe,
        MockMicSource,
        MockDisplaySource,
        MockEncoderFactory,
        MockSink,
        MockCue,
        MockNotifier,
    >;

    struct Fixture {
        controller: TestController,
        sink_state: Arc<SinkState>,
    }

    fn fixture(
        probe: MockProbe,
        mic: MockMicSource,
        display: MockDisplaySource,
        encoders: MockEncoderFactory,
    ) -> Fixture {
        let (sink, sink_state) = MockSink::new();
        let controller = SessionController::new(
            probe,
            mic,
            display,
            encoders,
            sink,
            MockCue,
            MockNotifier,
            ControllerOptions::default(),
        );
        Fixture {
            controller,
            sink_state,
        }
    }

    fn default_fixture() -> Fixture {
        fixture(
            MockProbe {
                state: PermissionState::Granted,
                fail: false,
            },
            MockMicSource { deny: false },
            MockDisplaySource { with_audio: true },
            MockEncoderFactory::with_fragments(vec![vec![1u8; 100], vec![2u8; 200]], vec![vec![3u8; 50]]),
        )
    }

    fn saved(state: &Arc<SinkState>) -> Vec<(String, usize, String)> {
        state.saved.lock().map(|s| s.clone()).unwrap_or_default()
    }

    #[tokio::test]
    async fn probe_granted_marks_first_milestone() {
        let f = default_fixture();
        f.controller.probe_permissions().await;

        let checklist = f.controller.checklist();
        assert!(checklist.is_completed(0));
        assert!(!checklist.is_completed(1));
        assert!(f.controller.journal_entries().is_empty());
    }

    #[tokio::test]
    async fn probe_denied_leaves_checklist_untouched() {
        let f = fixture(
            MockProbe {
                state: PermissionState::Denied,
                fail: false,
            },
            MockMicSource { deny: false },
            MockDisplaySource { with_audio: false },
            MockEncoderFactory::with_fragments(Vec::new(), Vec::new()),
        );
        f.controller.probe_permissions().await;

        assert_eq!(f.controller.checklist().completed_count(), 0);
        assert!(f.controller.journal_entries().is_empty());
    }

    #[tokio::test]
    async fn probe_failure_is_logged_non_fatally() {
        let f = fixture(
            MockProbe {
                state: PermissionState::Unknown,
                fail: true,
            },
            MockMicSource { deny: false },
            MockDisplaySource { with_audio: false },
            MockEncoderFactory::with_fragments(Vec::new(), Vec::new()),
        );
        f.controller.probe_permissions().await;

        let entries = f.controller.journal_entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_error());
        assert!(entries[0].message().contains("audio capabilities"));

        // Still usable: a later start succeeds
        assert!(f.controller.start(CaptureKind::Microphone).await.is_ok());
    }

    #[tokio::test]
    async fn start_microphone_marks_test_milestone() {
        let f = default_fixture();
        f.controller.probe_permissions().await;
        f.controller.start(CaptureKind::Microphone).await.unwrap();

        let checklist = f.controller.checklist();
        assert!(checklist.is_completed(0));
        assert!(checklist.is_completed(1));
        assert!(f.controller.is_recording(CaptureKind::Microphone).await);
    }

    #[tokio::test]
    async fn microphone_artifact_concatenates_fragments() {
        let f = default_fixture();
        f.controller.start(CaptureKind::Microphone).await.unwrap();

        let paths = f.controller.stop(CaptureKind::Microphone).await;
        assert_eq!(paths.len(), 1);

        let saved = saved(&f.sink_state);
        assert_eq!(saved.len(), 1);
        let (label, bytes, filename) = &saved[0];
        assert_eq!(label, "microphone");
        assert_eq!(*bytes, 300);
        assert!(filename.starts_with("microphone-"));
        assert!(filename.ends_with(".webm"));
        assert!(!f.controller.is_recording(CaptureKind::Microphone).await);
    }

    #[tokio::test]
    async fn stop_without_session_is_noop() {
        let f = default_fixture();

        let paths = f.controller.stop(CaptureKind::Microphone).await;
        assert!(paths.is_empty());
        assert!(f.controller.journal_entries().is_empty());
        assert!(saved(&f.sink_state).is_empty());
        assert_eq!(f.controller.checklist().completed_count(), 0);
    }

    #[tokio::test]
    async fn double_stop_is_idempotent() {
        let f = default_fixture();
        f.controller.start(CaptureKind::Microphone).await.unwrap();
        let first = f.controller.stop(CaptureKind::Microphone).await;
        assert_eq!(first.len(), 1);

        let journal_len = f.controller.journal_entries().len();
        let second = f.controller.stop(CaptureKind::Microphone).await;

        assert!(second.is_empty());
        assert_eq!(f.controller.journal_entries().len(), journal_len);
        assert_eq!(saved(&f.sink_state).len(), 1);
    }

    #[tokio::test]
    async fn system_with_audio_yields_two_artifacts() {
        let f = default_fixture();
        f.controller.start(CaptureKind::System).await.unwrap();

        let checklist = f.controller.checklist();
        assert!(checklist.is_completed(2));
        assert!(checklist.is_completed(3));

        let paths = f.controller.stop(CaptureKind::System).await;
        assert_eq!(paths.len(), 2);

        let labels: Vec<String> = saved(&f.sink_state)
            .iter()
            .map(|(label, _, _)| label.clone())
            .collect();
        assert_eq!(labels, vec!["system".to_string(), "system-audio".to_string()]);
    }

    #[tokio::test]
    async fn system_without_audio_yields_one_artifact() {
        let f = fixture(
            MockProbe {
                state: PermissionState::Granted,
                fail: false,
            },
            MockMicSource { deny: false },
            MockDisplaySource { with_audio: false },
            MockEncoderFactory::with_fragments(vec![vec![9u8; 10]], vec![vec![8u8; 20]]),
        );
        f.controller.start(CaptureKind::System).await.unwrap();

        let checklist = f.controller.checklist();
        assert!(!checklist.is_completed(2));
        assert!(checklist.is_completed(3));

        let paths = f.controller.stop(CaptureKind::System).await;
        assert_eq!(paths.len(), 1);

        let saved = saved(&f.sink_state);
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "system");
        // Milestone 2 stays incomplete through the whole cycle
        assert!(!f.controller.checklist().is_completed(2));
    }

    #[tokio::test]
    async fn acquisition_failure_is_logged_and_state_unchanged() {
        let f = fixture(
            MockProbe {
                state: PermissionState::Granted,
                fail: false,
            },
            MockMicSource { deny: true },
            MockDisplaySource { with_audio: false },
            MockEncoderFactory::with_fragments(Vec::new(), Vec::new()),
        );

        let result = f.controller.start(CaptureKind::Microphone).await;
        assert!(result.is_err());

        let entries = f.controller.journal_entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_error());
        assert!(entries[0].message().contains("Recording failed"));
        assert!(entries[0].message().contains("Permission denied"));

        assert!(!f.controller.is_recording(CaptureKind::Microphone).await);
        assert!(!f.controller.checklist().is_completed(1));
        assert!(saved(&f.sink_state).is_empty());
    }

    #[tokio::test]
    async fn encoder_failure_is_logged_and_state_unchanged() {
        let f = fixture(
            MockProbe {
                state: PermissionState::Granted,
                fail: false,
            },
            MockMicSource { deny: false },
            MockDisplaySource { with_audio: false },
            MockEncoderFactory::failing(),
        );

        let result = f.controller.start(CaptureKind::Microphone).await;
        assert!(result.is_err());
        assert!(!f.controller.is_recording(CaptureKind::Microphone).await);

        let entries = f.controller.journal_entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_error());
    }

    #[tokio::test]
    async fn double_start_is_rejected() {
        let f = default_fixture();
        f.controller.start(CaptureKind::Microphone).await.unwrap();

        let second = f.controller.start(CaptureKind::Microphone).await;
        assert!(matches!(
            second,
            Err(StartError::AlreadyRecording(CaptureKind::Microphone))
        ));

        // First session still running and stoppable
        assert!(f.controller.is_recording(CaptureKind::Microphone).await);
        let paths = f.controller.stop(CaptureKind::Microphone).await;
        assert_eq!(paths.len(), 1);
    }

    #[tokio::test]
    async fn kinds_record_concurrently() {
        let f = default_fixture();
        f.controller.start(CaptureKind::Microphone).await.unwrap();
        f.controller.start(CaptureKind::System).await.unwrap();

        assert!(f.controller.is_recording(CaptureKind::Microphone).await);
        assert!(f.controller.is_recording(CaptureKind::System).await);

        f.controller.stop(CaptureKind::Microphone).await;
        assert!(!f.controller.is_recording(CaptureKind::Microphone).await);
        assert!(f.controller.is_recording(CaptureKind::System).await);

        f.controller.stop(CaptureKind::System).await;
        assert!(!f.controller.is_recording(CaptureKind::System).await);
    }

    #[tokio::test]
    async fn save_failure_is_logged() {
        let controller = SessionController::new(
            MockProbe {
                state: PermissionState::Granted,
                fail: false,
            },
            MockMicSource { deny: false },
            MockDisplaySource { with_audio: false },
            MockEncoderFactory::with_fragments(vec![vec![1u8; 4]], Vec::new()),
            MockSink::failing(),
            MockCue,
            MockNotifier,
            ControllerOptions::default(),
        );

        controller.start(CaptureKind::Microphone).await.unwrap();
        let paths = controller.stop(CaptureKind::Microphone).await;

        assert!(paths.is_empty());
        let entries = controller.journal_entries();
        let last = entries.last().expect("journal entry");
        assert!(last.is_error());
        assert!(last.message().contains("Failed to save"));
    }

    #[tokio::test]
    async fn events_fire_on_checklist_and_recording_changes() {
        let checklist_flips = Arc::new(AtomicUsize::new(0));
        let recording_changes = Arc::new(AtomicUsize::new(0));

        let flips = Arc::clone(&checklist_flips);
        let changes = Arc::clone(&recording_changes);
        let (sink, _) = MockSink::new();
        let controller = SessionController::new(
            MockProbe {
                state: PermissionState::Granted,
                fail: false,
            },
            MockMicSource { deny: false },
            MockDisplaySource { with_audio: true },
            MockEncoderFactory::with_fragments(vec![vec![1u8; 4]], vec![vec![2u8; 4]]),
            sink,
            MockCue,
            MockNotifier,
            ControllerOptions::default(),
        )
        .with_events(ControllerEvents {
            on_checklist: Some(Box::new(move |_, _| {
                flips.fetch_add(1, Ordering::SeqCst);
            })),
            on_journal: None,
            on_recording_change: Some(Box::new(move |_, _| {
                changes.fetch_add(1, Ordering::SeqCst);
            })),
        });

        controller.probe_permissions().await;
        controller.start(CaptureKind::System).await.unwrap();
        controller.stop(CaptureKind::System).await;
        // Stopping again must not emit another change
        controller.stop(CaptureKind::System).await;

        // Milestones 0, 2, 3 flipped once each
        assert_eq!(checklist_flips.load(Ordering::SeqCst), 3);
        // One start, one stop
        assert_eq!(recording_changes.load(Ordering::SeqCst), 2);
    }
}
