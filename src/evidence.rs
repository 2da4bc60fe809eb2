// Evidence buffer
// Retains the session's frames for the persistence collaborator. Bounded by
// a ring policy by default; unbounded retention is an explicit opt-in for
// short offline simulation runs.

use std::collections::VecDeque;

use uuid::Uuid;

use crate::config::RetentionPolicy;
use crate::frame::Frame;

pub struct EvidenceBuffer {
    frames: VecDeque<Frame>,
    capacity: Option<usize>,
    /// Total frames appended this session, including evicted ones.
    appended: u64,
}

impl EvidenceBuffer {
    pub fn new(policy: RetentionPolicy, source_fps: f64) -> Self {
        let capacity = policy.frame_capacity(source_fps);
        Self {
            frames: match capacity {
                Some(n) => VecDeque::with_capacity(n),
                None => VecDeque::new(),
            },
            capacity,
            appended: 0,
        }
    }

    pub fn append(&mut self, frame: Frame) {
        if let Some(cap) = self.capacity {
            if self.frames.len() == cap {
                self.frames.pop_front();
            }
        }
        self.frames.push_back(frame);
        self.appended += 1;
    }

    /// Current contents in capture order, without mutating the buffer.
    pub fn snapshot(&self) -> Vec<Frame> {
        self.frames.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.appended = 0;
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn total_appended(&self) -> u64 {
        self.appended
    }
}

/// Immutable handle to the frames retained for one incident. The fingerprint
/// is a blake3 hash over the pixel data, so the persistence collaborator can
/// verify what it stored against what the session produced.
#[derive(Debug, Clone)]
pub struct EvidenceRef {
    pub id: Uuid,
    pub frames: Vec<Frame>,
    pub fps: f64,
    pub fingerprint: String,
}

impl EvidenceRef {
    pub fn from_snapshot(frames: Vec<Frame>, fps: f64) -> Self {
        let mut hasher = blake3::Hasher::new();
        for frame in &frames {
            hasher.update(frame.data());
        }
        Self {
            id: Uuid::new_v4(),
            fps,
            fingerprint: hasher.finalize().to_hex().to_string(),
            frames,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(fill: u8) -> Frame {
        Frame::new(2, 2, 1, vec![fill; 4])
    }

    #[test]
    fn test_ring_by_frame_count() {
        let mut buffer = EvidenceBuffer::new(RetentionPolicy::RingFrames(3), 25.0);
        for i in 0..5u8 {
            buffer.append(frame(i));
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.total_appended(), 5);

        // Oldest frames evicted first
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot[0].data()[0], 2);
        assert_eq!(snapshot[2].data()[0], 4);
    }

    #[test]
    fn test_ring_by_duration_sized_from_fps() {
        let mut buffer = EvidenceBuffer::new(RetentionPolicy::RingSeconds(2), 10.0);
        for i in 0..30u8 {
            buffer.append(frame(i));
        }
        assert_eq!(buffer.len(), 20);
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let mut buffer = EvidenceBuffer::new(RetentionPolicy::Unbounded, 25.0);
        for i in 0..100u8 {
            buffer.append(frame(i));
        }
        assert_eq!(buffer.len(), 100);
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let mut buffer = EvidenceBuffer::new(RetentionPolicy::RingFrames(4), 25.0);
        buffer.append(frame(1));
        buffer.append(frame(2));
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_clear_releases_frames() {
        let mut buffer = EvidenceBuffer::new(RetentionPolicy::RingFrames(4), 25.0);
        buffer.append(frame(1));
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.total_appended(), 0);
    }

    #[test]
    fn test_evidence_ref_fingerprint_depends_on_pixels() {
        let a = EvidenceRef::from_snapshot(vec![frame(1), frame(2)], 25.0);
        let b = EvidenceRef::from_snapshot(vec![frame(1), frame(2)], 25.0);
        let c = EvidenceRef::from_snapshot(vec![frame(1), frame(3)], 25.0);
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_ne!(a.fingerprint, c.fingerprint);
        assert_ne!(a.id, b.id);
    }
}
