use std::io::Read;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc;
use std::thread::JoinHandle;

use crate::encode::sink::{StreamConfig, StreamEncoder, check_order};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{GardenError, GardenResult};
use crate::foundation::math::unpremultiply_rgba8;
use crate::render::frame::FrameRGBA;

const STDOUT_CHUNK_BYTES: usize = 64 * 1024;

/// Options for [`FfmpegStreamEncoder`].
#[derive(Clone, Debug)]
pub struct FfmpegStreamOpts {
    /// `ffmpeg` executable to run.
    pub program: String,
    /// libvpx deadline (`realtime`, `good` or `best`).
    pub deadline: String,
    /// Constant-quality level for VP9 (`-crf`).
    pub crf: u8,
}

impl Default for FfmpegStreamOpts {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            deadline: "realtime".to_string(),
            crf: 32,
        }
    }
}

/// Encoder that spawns the system `ffmpeg`, streams raw RGBA frames to stdin, and collects VP9
/// WebM bytes from stdout.
///
/// Stdout and stderr are drained on helper threads so the pipes never fill up; stdout chunks are
/// forwarded over a channel in the order `ffmpeg` wrote them.
pub struct FfmpegStreamEncoder {
    opts: FfmpegStreamOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    chunks_rx: Option<mpsc::Receiver<Vec<u8>>>,
    stdout_drain: Option<JoinHandle<std::io::Result<()>>>,
    stderr_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<StreamConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegStreamEncoder {
    /// Create a new encoder; nothing is spawned until `begin`.
    pub fn new(opts: FfmpegStreamOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            chunks_rx: None,
            stdout_drain: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    fn validate(cfg: &StreamConfig) -> GardenResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(GardenError::validation(
                "ffmpeg encoder width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(GardenError::validation(
                "ffmpeg encoder width/height must be even (required for yuv420p output)",
            ));
        }
        Ok(())
    }

    fn command(&self, cfg: &StreamConfig) -> Command {
        let mut cmd = Command::new(&self.opts.program);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        cmd.args([
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0", "-an", "-c:v", "libvpx-vp9"]);
        cmd.args(["-pix_fmt", if cfg.alpha { "yuva420p" } else { "yuv420p" }]);
        cmd.args(["-b:v", "0", "-crf", &self.opts.crf.to_string()]);
        cmd.args(["-deadline", &self.opts.deadline]);
        cmd.args(["-f", "webm", "pipe:1"]);
        cmd
    }

    fn join_drains(&mut self) -> GardenResult<Vec<u8>> {
        if let Some(handle) = self.stdout_drain.take() {
            handle
                .join()
                .map_err(|_| GardenError::encoding_fault("ffmpeg stdout drain thread panicked"))?
                .map_err(|e| {
                    GardenError::encoding_fault(format!("ffmpeg stdout read failed: {e}"))
                })?;
        }
        match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| GardenError::encoding_fault("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| {
                    GardenError::encoding_fault(format!("ffmpeg stderr read failed: {e}"))
                }),
            None => Ok(Vec::new()),
        }
    }
}

impl StreamEncoder for FfmpegStreamEncoder {
    fn begin(&mut self, cfg: StreamConfig) -> GardenResult<()> {
        if self.child.is_some() {
            return Err(GardenError::capture_busy("ffmpeg encoder already started"));
        }
        Self::validate(&cfg)?;
        if !is_program_on_path(&self.opts.program) {
            return Err(GardenError::capture_unsupported(format!(
                "'{}' is required for video encoding, but was not found on PATH",
                self.opts.program
            )));
        }

        let mut child = self.command(&cfg).spawn().map_err(|e| {
            GardenError::capture_unsupported(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (Some(stdin), Some(mut stdout), Some(mut stderr)) = (stdin, stdout, stderr) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(GardenError::encoding_fault(
                "failed to open ffmpeg pipes (unexpected)",
            ));
        };

        let (tx, rx) = mpsc::channel();
        let stdout_drain = std::thread::spawn(move || -> std::io::Result<()> {
            let mut buf = vec![0u8; STDOUT_CHUNK_BYTES];
            loop {
                let n = stdout.read(&mut buf)?;
                if n == 0 {
                    return Ok(());
                }
                if tx.send(buf[..n].to_vec()).is_err() {
                    return Ok(());
                }
            }
        });
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(w = cfg.width, h = cfg.height, alpha = cfg.alpha, "spawned ffmpeg");
        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.chunks_rx = Some(rx);
        self.stdout_drain = Some(stdout_drain);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> GardenResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| GardenError::encoding_fault("ffmpeg encoder not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(GardenError::encoding_fault(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(GardenError::encoding_fault(
                "frame.data size mismatch with width*height*4",
            ));
        }
        check_order(&mut self.last_idx, idx)?;

        // ffmpeg's rgba input is straight alpha.
        if frame.premultiplied {
            unpremultiply_rgba8(&mut self.scratch, &frame.data);
        } else {
            self.scratch.copy_from_slice(&frame.data);
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(GardenError::encoding_fault("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            GardenError::encoding_fault(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn take_chunks(&mut self) -> Vec<Vec<u8>> {
        match self.chunks_rx.as_ref() {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        }
    }

    fn finish(&mut self) -> GardenResult<Vec<Vec<u8>>> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| GardenError::encoding_fault("ffmpeg encoder not started"))?;

        let status = child.wait().map_err(|e| {
            GardenError::encoding_fault(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = self.join_drains()?;
        let chunks = self.take_chunks();
        self.chunks_rx = None;
        self.cfg = None;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(GardenError::encoding_fault(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }
        Ok(chunks)
    }

    fn abort(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            tracing::debug!("ffmpeg encoder aborted");
        }
        let _ = self.join_drains();
        self.chunks_rx = None;
        self.cfg = None;
    }
}

impl Drop for FfmpegStreamEncoder {
    fn drop(&mut self) {
        if self.child.is_some() {
            self.abort();
        }
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // For rawvideo input, `-r` before `-i` sets the input framerate; accept rational `num/den`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    is_program_on_path("ffmpeg")
}

fn is_program_on_path(program: &str) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
