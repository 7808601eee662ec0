//! FFmpeg-based stream encoder adapter

use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStderr, Command};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::application::ports::{
    EncoderError, EncoderFactory, FragmentSink, MediaStream, StreamEncoder,
};
use crate::domain::media::CodecProfile;

/// Size of one fragment read from the encoder pipe
const FRAGMENT_BUF_SIZE: usize = 32 * 1024;

/// Build the ffmpeg invocation for a stream/profile pair.
///
/// Inputs come from the stream's track descriptors; output is WebM on
/// stdout so the encoder emits fragments while recording runs.
fn build_encoder_args(stream: &MediaStream, profile: CodecProfile) -> Vec<String> {
    let mut args: Vec<String> = vec!["-hide_banner".into(), "-loglevel".into(), "error".into()];

    if profile.has_video() {
        if let Some(video) = stream.video_track() {
            let input = video.input();
            // Grab facilities need the rate set on the input side
            if input.facility == "x11grab" || input.facility == "gdigrab" {
                args.extend(["-framerate".into(), "30".into()]);
            }
            args.extend([
                "-f".into(),
                input.facility.clone(),
                "-i".into(),
                input.target.clone(),
            ]);
        }
    }

    if let Some(audio) = stream.audio_track() {
        let input = audio.input();
        args.extend([
            "-f".into(),
            input.facility.clone(),
            "-i".into(),
            input.target.clone(),
        ]);
    }

    if let Some(video_codec) = profile.video_codec() {
        args.extend([
            "-c:v".into(),
            video_codec.to_string(),
            "-b:v".into(),
            "2M".into(),
        ]);
    }
    if stream.has_audio() {
        args.extend([
            "-c:a".into(),
            profile.audio_codec().to_string(),
            "-b:a".into(),
            "96k".into(),
        ]);
    }

    args.extend(["-f".into(), "webm".into(), "pipe:1".into()]);
    args
}

/// One encoder instance: an ffmpeg child muxing WebM to its stdout.
///
/// Fragments are delivered from a reader task in pipe order; `stop`
/// interrupts the child so it writes the container trailer, then drains
/// the reader before returning.
pub struct FfmpegEncoder {
    args: Vec<String>,
    process: Mutex<Option<Child>>,
    stderr: Mutex<Option<ChildStderr>>,
    reader: Mutex<Option<JoinHandle<()>>>,
    is_active: Arc<AtomicBool>,
}

impl FfmpegEncoder {
    fn new(args: Vec<String>) -> Self {
        Self {
            args,
            process: Mutex::new(None),
            stderr: Mutex::new(None),
            reader: Mutex::new(None),
            is_active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Ask the child to finish the container and exit
    #[cfg(unix)]
    fn interrupt(child: &mut Child) -> Result<(), EncoderError> {
        if let Some(id) = child.id() {
            signal::kill(Pid::from_raw(id as i32), Signal::SIGINT)
                .map_err(|e| EncoderError::StopFailed(format!("Signal failed: {}", e)))?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn interrupt(child: &mut Child) -> Result<(), EncoderError> {
        child
            .start_kill()
            .map_err(|e| EncoderError::StopFailed(e.to_string()))
    }

    /// Last stderr line, for surfacing a crashed child's reason
    async fn stderr_tail(stderr: Option<ChildStderr>) -> String {
        let Some(mut stderr) = stderr else {
            return "unknown error".into();
        };
        let mut buf = Vec::new();
        let _ = stderr.read_to_end(&mut buf).await;
        let text = String::from_utf8_lossy(&buf);
        text.lines()
            .last()
            .unwrap_or("unknown error")
            .to_string()
    }
}

#[async_trait]
impl StreamEncoder for FfmpegEncoder {
    async fn start(&self, sink: FragmentSink) -> Result<(), EncoderError> {
        let mut process = self.process.lock().await;
        if process.is_some() {
            return Err(EncoderError::StartFailed("encoder already started".into()));
        }

        let mut child = Command::new("ffmpeg")
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    EncoderError::NotAvailable("ffmpeg not found in PATH".into())
                } else {
                    EncoderError::StartFailed(e.to_string())
                }
            })?;

        let Some(mut stdout) = child.stdout.take() else {
            return Err(EncoderError::StartFailed(
                "failed to open encoder output pipe".into(),
            ));
        };
        *self.stderr.lock().await = child.stderr.take();

        let is_active = Arc::clone(&self.is_active);
        let reader = tokio::spawn(async move {
            let mut buf = vec![0u8; FRAGMENT_BUF_SIZE];
            loop {
                match stdout.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => sink(buf[..n].to_vec()),
                }
            }
            // Pipe closed: the child exited or was stopped
            is_active.store(false, Ordering::SeqCst);
        });

        *process = Some(child);
        *self.reader.lock().await = Some(reader);
        self.is_active.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<(), EncoderError> {
        let child = self.process.lock().await.take();
        let Some(mut child) = child else {
            return Ok(());
        };
        self.is_active.store(false, Ordering::SeqCst);

        // A child that already exited died on its own; its stderr holds why
        let exited_early = child
            .try_wait()
            .map_err(|e| EncoderError::StopFailed(e.to_string()))?
            .is_some();

        if !exited_early {
            Self::interrupt(&mut child)?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| EncoderError::StopFailed(e.to_string()))?;

        // Drain the reader so every pending fragment is delivered
        // before finalization runs
        if let Some(reader) = self.reader.lock().await.take() {
            let _ = reader.await;
        }

        if exited_early && !status.success() {
            let stderr = self.stderr.lock().await.take();
            return Err(EncoderError::StopFailed(format!(
                "encoder exited with error: {}",
                Self::stderr_tail(stderr).await
            )));
        }

        Ok(())
    }

    fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }
}

/// Factory binding ffmpeg encoder instances to acquired streams.
pub struct FfmpegEncoderFactory;

impl FfmpegEncoderFactory {
    /// Create a new factory
    pub fn new() -> Self {
        Self
    }
}

impl Default for FfmpegEncoderFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EncoderFactory for FfmpegEncoderFactory {
    async fn open(
        &self,
        stream: &MediaStream,
        profile: CodecProfile,
    ) -> Result<Box<dyn StreamEncoder>, EncoderError> {
        if profile.has_video() && stream.video_track().is_none() {
            return Err(EncoderError::UnsupportedProfile(format!(
                "{} requires a video track",
                profile.mime_type()
            )));
        }
        if !profile.has_video() && stream.audio_track().is_none() {
            return Err(EncoderError::UnsupportedProfile(format!(
                "{} requires an audio track",
                profile.mime_type()
            )));
        }

        Ok(Box::new(FfmpegEncoder::new(build_encoder_args(
            stream, profile,
        ))))
    }
}
