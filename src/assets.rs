// Fire-and-forget image loading.
// Each image decodes on its own thread; the frame loop polls without blocking and
// the effect simply draws nothing until the hidden image shows up.

use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tracing::{info, warn};

type Decoded = Result<RgbaImage, String>;

pub enum ImageSlot {
    Pending { path: PathBuf, rx: Receiver<Decoded> },
    Ready,
    Failed,
}

impl ImageSlot {
    /// Start decoding `path` in the background.
    pub fn spawn(path: &Path) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_path = path.to_path_buf();
        thread::spawn(move || {
            let decoded = image::open(&worker_path)
                .map(|img| img.to_rgba8())
                .map_err(|e| e.to_string());
            // The receiver may be gone if the window closed first.
            let _ = tx.send(decoded);
        });
        ImageSlot::Pending { path: path.to_path_buf(), rx }
    }

    /// Hand out the image exactly once, on the poll after decoding finishes.
    pub fn poll(&mut self) -> Option<RgbaImage> {
        let ImageSlot::Pending { path, rx } = &*self else {
            return None;
        };
        match rx.try_recv() {
            Ok(Ok(img)) => {
                info!(path = %path.display(), width = img.width(), height = img.height(), "image loaded");
                *self = ImageSlot::Ready;
                Some(img)
            }
            Ok(Err(e)) => {
                warn!(path = %path.display(), error = %e, "image failed to decode; leaving it blank");
                *self = ImageSlot::Failed;
                None
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!(path = %path.display(), "image loader exited without a result");
                *self = ImageSlot::Failed;
                None
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ImageSlot::Pending { .. })
    }
}

/// The two images the effect needs.
pub struct AssetStore {
    pub cover: ImageSlot,
    pub hidden: ImageSlot,
}

impl AssetStore {
    pub fn load(cover: &Path, hidden: &Path) -> Self {
        Self { cover: ImageSlot::spawn(cover), hidden: ImageSlot::spawn(hidden) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::time::{Duration, Instant};

    fn wait_for(slot: &mut ImageSlot) -> Option<RgbaImage> {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            if let Some(img) = slot.poll() {
                return Some(img);
            }
            if !slot.is_pending() {
                return None;
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn decodes_in_background_and_yields_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hidden.png");
        RgbaImage::from_pixel(8, 4, Rgba([1, 2, 3, 255])).save(&path).unwrap();

        let mut slot = ImageSlot::spawn(&path);
        let img = wait_for(&mut slot).expect("image should load");
        assert_eq!(img.dimensions(), (8, 4));
        assert!(matches!(slot, ImageSlot::Ready));
        assert!(slot.poll().is_none());
    }

    #[test]
    fn missing_file_fails_quietly() {
        let dir = tempfile::tempdir().unwrap();
        let mut slot = ImageSlot::spawn(&dir.path().join("nope.jpg"));
        assert!(wait_for(&mut slot).is_none());
        assert!(matches!(slot, ImageSlot::Failed));
    }

    #[test]
    fn store_loads_both_images() {
        let dir = tempfile::tempdir().unwrap();
        let cover = dir.path().join("cover.png");
        let hidden = dir.path().join("hidden.png");
        RgbaImage::new(2, 2).save(&cover).unwrap();
        RgbaImage::new(3, 3).save(&hidden).unwrap();

        let mut store = AssetStore::load(&cover, &hidden);
        assert_eq!(wait_for(&mut store.cover).unwrap().dimensions(), (2, 2));
        assert_eq!(wait_for(&mut store.hidden).unwrap().dimensions(), (3, 3));
    }
}
