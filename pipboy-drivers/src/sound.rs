//! Sound output
//!
//! The engine only names cues; how they are played is up to the
//! implementation. [`CommandSound`] runs an external player for each cue
//! file (`<directory>/<cue>.wav`), [`SilentSound`] logs them.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use pipboy_core::state::Cue;
use tracing::{debug, trace, warn};

const CUE_EXTENSION: &str = "wav";

/// Sound collaborator
pub trait SoundOutput {
    /// Play a discrete cue (fire and forget)
    fn play(&mut self, cue: Cue);

    /// Set the looping hum volume (0.0 to 1.0)
    fn set_hum_volume(&mut self, volume: f32);
}

impl<S: SoundOutput + ?Sized> SoundOutput for Box<S> {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue)
    }

    fn set_hum_volume(&mut self, volume: f32) {
        (**self).set_hum_volume(volume)
    }
}

/// Sound disabled: cues are only logged
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSound;

impl SoundOutput for SilentSound {
    fn play(&mut self, cue: Cue) {
        debug!("sound: {}", cue.key());
    }

    fn set_hum_volume(&mut self, volume: f32) {
        trace!("hum volume {:.2}", volume);
    }
}

/// Plays cue files through an external command such as `aplay -q`
///
/// Discrete cues are fire and forget. The hum runs as its own child that is
/// started again whenever it ends, so it keeps looping for the life of the
/// output. Its volume reaches the player through `hum_volume_arg` (a
/// template like `--volume={}` filled with 0-100) when the hum is spawned.
pub struct CommandSound {
    player: Vec<String>,
    directory: PathBuf,
    hum_volume_arg: Option<String>,
    hum_volume: f32,
    hum: Option<Child>,
    hum_spawns: usize,
    children: Vec<Child>,
}

impl CommandSound {
    /// - `player`: program and leading arguments; the cue file is appended
    /// - `directory`: folder holding `<cue>.wav` files
    pub fn new(player: Vec<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            player,
            directory: directory.into(),
            hum_volume_arg: None,
            hum_volume: 1.0,
            hum: None,
            hum_spawns: 0,
            children: Vec::new(),
        }
    }

    /// Pass the hum volume to the player with this argument template
    pub fn with_hum_volume_arg(mut self, template: Option<String>) -> Self {
        self.hum_volume_arg = template;
        self
    }

    /// Path of the file played for `cue`
    pub fn cue_path(&self, cue: Cue) -> PathBuf {
        self.directory.join(cue.key()).with_extension(CUE_EXTENSION)
    }

    /// Volume argument for the current hum volume, if the player takes one
    fn hum_volume_args(&self) -> Option<String> {
        let percent = (self.hum_volume.clamp(0.0, 1.0) * 100.0).round() as u32;
        self.hum_volume_arg
            .as_ref()
            .map(|template| template.replace("{}", &percent.to_string()))
    }

    fn spawn(&self, cue: Cue, extra: Option<String>) -> Option<Child> {
        let (program, args) = self.player.split_first()?;
        let path = self.cue_path(cue);
        let result = Command::new(program)
            .args(args)
            .args(extra)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match result {
            Ok(child) => {
                debug!("sound: {} ({})", cue.key(), path.display());
                Some(child)
            }
            Err(e) => {
                warn!("sound {} failed: {}", cue.key(), e);
                None
            }
        }
    }

    fn start_hum(&mut self) {
        if let Some(child) = self.spawn(Cue::Hum, self.hum_volume_args()) {
            self.hum = Some(child);
            self.hum_spawns += 1;
        }
    }

    /// Drop finished cue players and restart the hum if it ended
    fn reap(&mut self) {
        self.children
            .retain_mut(|child| matches!(child.try_wait(), Ok(None)));
        let hum_ended = match self.hum.as_mut() {
            Some(child) => !matches!(child.try_wait(), Ok(None)),
            None => false,
        };
        if hum_ended {
            trace!("hum ended, looping");
            // a failed restart leaves the hum off instead of retrying every tick
            self.hum = None;
            self.start_hum();
        }
    }
}

impl SoundOutput for CommandSound {
    fn play(&mut self, cue: Cue) {
        self.reap();
        if cue == Cue::Hum {
            if let Some(mut old) = self.hum.take() {
                let _ = old.kill();
                let _ = old.wait();
            }
            self.start_hum();
            return;
        }
        if let Some(child) = self.spawn(cue, None) {
            self.children.push(child);
        }
    }

    fn set_hum_volume(&mut self, volume: f32) {
        trace!("hum volume {:.2}", volume);
        self.hum_volume = volume;
        self.reap();
    }
}

impl Drop for CommandSound {
    fn drop(&mut self) {
        for child in self.children.iter_mut().chain(self.hum.as_mut()) {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
