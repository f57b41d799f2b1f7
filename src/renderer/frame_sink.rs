use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>, // Tightly packed RGBA
    pub width: u32,
    pub height: u32,
    pub timestamp: f64, // Seconds
}

impl VideoFrame {
    /// Repack a strided RGBA plane into rows of exactly `width * 4` bytes.
    pub fn from_strided(
        raw: &[u8],
        width: u32,
        height: u32,
        stride: usize,
        timestamp: f64,
    ) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let row_len = width as usize * 4;
        if stride < row_len || raw.len() < stride * (height as usize).saturating_sub(1) + row_len {
            return None;
        }
        let mut data = vec![0u8; row_len * height as usize];
        for (row, dst) in data.chunks_exact_mut(row_len).enumerate() {
            let start = row * stride;
            dst.copy_from_slice(&raw[start..start + row_len]);
        }
        Some(Self {
            data,
            width,
            height,
            timestamp,
        })
    }
}

impl fmt::Debug for VideoFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

#[derive(Default)]
struct Slot {
    frame: Option<VideoFrame>,
    generation: u64,
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// The render target handed to a media engine.
///
/// Holds only the most recent frame. The engine's streaming thread pushes,
/// the UI thread reads whatever is newest when it paints.
#[derive(Clone, Default)]
pub struct FrameSink {
    slot: Arc<Mutex<Slot>>,
    waker: Option<Waker>,
}

impl FrameSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// `waker` runs after every pushed frame, typically to request a repaint.
    pub fn with_waker(waker: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            slot: Arc::default(),
            waker: Some(Arc::new(waker)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, frame: VideoFrame) {
        {
            let mut slot = self.lock();
            slot.frame = Some(frame);
            slot.generation += 1;
        }
        if let Some(waker) = &self.waker {
            waker();
        }
    }

    pub fn clear(&self) {
        let mut slot = self.lock();
        slot.frame = None;
        slot.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// The current frame if anything changed since `seen`, with the new generation.
    /// `Some((generation, None))` means the sink was cleared.
    pub fn newer_than(&self, seen: u64) -> Option<(u64, Option<VideoFrame>)> {
        let slot = self.lock();
        (slot.generation != seen).then(|| (slot.generation, slot.frame.clone()))
    }

    pub fn same_target(&self, other: &FrameSink) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

impl fmt::Debug for FrameSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameSink")
            .field("generation", &self.generation())
            .field("has_waker", &self.waker.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn frame(timestamp: f64) -> VideoFrame {
        VideoFrame {
            data: vec![0; 4],
            width: 1,
            height: 1,
            timestamp,
        }
    }

    #[test]
    fn test_from_strided_drops_padding() {
        // 2x2 RGBA with 4 bytes of padding per row.
        let raw: Vec<u8> = (0..24).collect();
        let frame = VideoFrame::from_strided(&raw, 2, 2, 12, 0.0).unwrap();
        assert_eq!(frame.data.len(), 16);
        assert_eq!(&frame.data[..8], &raw[0..8]);
        assert_eq!(&frame.data[8..], &raw[12..20]);
    }

    #[test]
    fn test_from_strided_rejects_short_buffers() {
        assert!(VideoFrame::from_strided(&[0; 10], 2, 2, 8, 0.0).is_none());
        assert!(VideoFrame::from_strided(&[0; 32], 2, 2, 4, 0.0).is_none());
    }

    #[test]
    fn test_from_strided_rejects_empty_frames() {
        assert!(VideoFrame::from_strided(&[0; 16], 0, 2, 8, 0.0).is_none());
        assert!(VideoFrame::from_strided(&[0; 16], 2, 0, 8, 0.0).is_none());
    }

    #[test]
    fn test_newer_than_tracks_generations() {
        let sink = FrameSink::new();
        assert!(sink.newer_than(0).is_none());

        sink.push(frame(1.0));
        let (generation, latest) = sink.newer_than(0).unwrap();
        assert_eq!(generation, 1);
        assert_eq!(latest.unwrap().timestamp, 1.0);
        assert!(sink.newer_than(generation).is_none());

        sink.clear();
        let (generation, latest) = sink.newer_than(generation).unwrap();
        assert_eq!(generation, 2);
        assert!(latest.is_none());
    }

    #[test]
    fn test_clones_share_the_slot_and_wake() {
        let woken = Arc::new(AtomicUsize::new(0));
        let counter = woken.clone();
        let sink = FrameSink::with_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let engine_side = sink.clone();
        assert!(sink.same_target(&engine_side));

        engine_side.push(frame(0.5));
        engine_side.push(frame(1.0));
        assert_eq!(woken.load(Ordering::SeqCst), 2);
        assert_eq!(sink.newer_than(0).unwrap().1.unwrap().timestamp, 1.0);
        assert!(!sink.same_target(&FrameSink::new()));
    }
}
