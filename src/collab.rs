//! Host-injected collaborators.
//!
//! The engine has no I/O of its own. Hosts plug in:
//!
//! - [`AssetSource`]: resolves image references before the deck is built, so
//!   the render layer never shows a face whose asset failed to load.
//! - [`AudioSink`]: one fire-and-forget playback call at round start.
//!
//! Both traits use `anyhow::Result` so implementations can surface whatever
//! error their platform produces. Asset failures abort round setup; audio
//! failures are logged and swallowed.

use anyhow::Result;

use crate::core::ImageId;

/// Image-loading facility.
///
/// `fetch` returns once the asset is fetched/decoded, or errs if it is
/// unavailable. The deck builder calls it once per distinct image and will
/// not hand out a deck referencing an unready face.
pub trait AssetSource {
    fn fetch(&mut self, image: &ImageId) -> Result<()>;
}

/// Ambient audio playback.
///
/// Called at most once per round. Failure (e.g. playback blocked by platform
/// policy) is never fatal.
pub trait AudioSink {
    fn play(&mut self, clip: &str) -> Result<()>;
}

/// Asset source for hosts whose images are already resident (embedded,
/// preloaded, or test fixtures). Every fetch resolves immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReadyAssets;

impl AssetSource for ReadyAssets {
    fn fetch(&mut self, _image: &ImageId) -> Result<()> {
        Ok(())
    }
}

/// Audio sink that discards playback requests. The default for headless
/// hosts and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopAudio;

impl AudioSink for NoopAudio {
    fn play(&mut self, _clip: &str) -> Result<()> {
        Ok(())
    }
}
