//=========================================================================
// Animation Clock
//=========================================================================
//
// Maps elapsed playing time to a frame of a sprite atlas.
//
// The atlas is a grid read in row-major order. Playing time excludes
// every interval spent stopped, so stopping freezes the frame and
// starting again resumes from the same frame.
//
//   elapsed = (playing ? now : stopped_at) - total_time_stopped
//   frame   = floor(elapsed * fps / 1000) mod frame_count
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::clock::Clock;

//=== Atlas Trait =========================================================

/// Sprite sheet an animation reads frames from.
///
/// Only the pixel size is needed here; the texture itself belongs to the
/// renderer.
pub trait Atlas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

//=== SpriteRect ==========================================================

/// Source rectangle of one frame inside the atlas, in atlas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

//=== AnimationError ======================================================

/// Misuse of an [`AnimationClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnimationError {
    #[error("frame {index} is out of range (animation has {frame_count} frames)")]
    FrameOutOfRange { index: i64, frame_count: u32 },

    #[error("cannot start an animation that is already animating")]
    AlreadyAnimating,

    #[error("cannot stop an animation that is not animating")]
    NotAnimating,
}

//=== Playback ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Playback {
    Playing { started_at: u64 },
    Stopped { stopped_at: u64 },
}

//=== AnimationClock ======================================================

/// Time-driven frame selector over a sprite atlas.
///
/// A new clock is stopped on frame 0; call [`start`](Self::start) to play.
///
/// ```rust
/// use cadence::core::animation::{AnimationClock, Atlas};
/// use cadence::core::clock::ManualClock;
///
/// struct Sheet;
/// impl Atlas for Sheet {
///     fn width(&self) -> u32 { 128 }
///     fn height(&self) -> u32 { 64 }
/// }
///
/// let clock = ManualClock::new();
/// let mut walk = AnimationClock::new(Sheet, clock.clone(), 4, 2, 8, 10.0);
/// walk.start().unwrap();
///
/// clock.advance(450);
/// assert_eq!(walk.current_frame_index(), 4);
/// assert_eq!(walk.current_sprite().y, 32);
/// ```
pub struct AnimationClock<A: Atlas, C: Clock> {
    atlas: A,
    clock: C,
    sprites_per_row: u32,
    frame_width: u32,
    frame_height: u32,
    frame_count: u32,
    frames_per_second: f32,
    playback: Playback,
    total_time_stopped: u64,
}

impl<A: Atlas, C: Clock> AnimationClock<A, C> {
    //--- Construction -----------------------------------------------------

    /// Creates a stopped animation over a `sprites_per_row` × `rows` grid
    /// holding `frame_count` frames.
    ///
    /// # Panics
    ///
    /// Panics if the grid or frame count is empty, if the grid cannot
    /// hold `frame_count` frames, or if `frames_per_second` is not finite.
    pub fn new(
        atlas: A,
        clock: C,
        sprites_per_row: u32,
        rows: u32,
        frame_count: u32,
        frames_per_second: f32,
    ) -> Self {
        assert!(
            sprites_per_row > 0 && rows > 0,
            "Animation grid must be non-empty, got {}x{}",
            sprites_per_row,
            rows
        );
        assert!(frame_count > 0, "Animation must have at least one frame");
        assert!(
            u64::from(frame_count) <= u64::from(sprites_per_row) * u64::from(rows),
            "Animation has {} frames but its {}x{} grid holds fewer",
            frame_count,
            sprites_per_row,
            rows
        );
        assert!(
            frames_per_second.is_finite(),
            "Animation speed must be finite, got {}",
            frames_per_second
        );

        let now = clock.now_millis();
        let frame_width = atlas.width() / sprites_per_row;
        let frame_height = atlas.height() / rows;

        Self {
            atlas,
            clock,
            sprites_per_row,
            frame_width,
            frame_height,
            frame_count,
            frames_per_second,
            playback: Playback::Stopped { stopped_at: now },
            total_time_stopped: now,
        }
    }

    //--- Frames -----------------------------------------------------------

    /// Returns the source rectangle of frame `index`.
    pub fn sprite(&self, index: i64) -> Result<SpriteRect, AnimationError> {
        if index < 0 || index >= i64::from(self.frame_count) {
            return Err(AnimationError::FrameOutOfRange {
                index,
                frame_count: self.frame_count,
            });
        }

        Ok(self.rect_for(index as u32))
    }

    /// Returns the frame due at the current time.
    pub fn current_frame_index(&self) -> u32 {
        let elapsed = match self.playback {
            Playback::Playing { .. } => self.clock.now_millis(),
            Playback::Stopped { stopped_at } => stopped_at,
        }
        .saturating_sub(self.total_time_stopped);

        let elapsed_frames = (elapsed as f64 * f64::from(self.frames_per_second) / 1000.0).floor();
        elapsed_frames.rem_euclid(f64::from(self.frame_count)) as u32
    }

    /// Returns the source rectangle of the frame due now.
    pub fn current_sprite(&self) -> SpriteRect {
        self.rect_for(self.current_frame_index())
    }

    //--- Playback ---------------------------------------------------------

    /// Resumes playback from the frame it was stopped on.
    pub fn start(&mut self) -> Result<(), AnimationError> {
        let Playback::Stopped { stopped_at } = self.playback else {
            return Err(AnimationError::AlreadyAnimating);
        };

        let now = self.clock.now_millis();
        self.total_time_stopped += now.saturating_sub(stopped_at);
        self.playback = Playback::Playing { started_at: now };
        Ok(())
    }

    /// Freezes playback on the current frame.
    pub fn stop(&mut self) -> Result<(), AnimationError> {
        if !self.is_animating() {
            return Err(AnimationError::NotAnimating);
        }

        self.playback = Playback::Stopped {
            stopped_at: self.clock.now_millis(),
        };
        Ok(())
    }

    /// Rewinds to frame 0 without changing whether the animation plays.
    pub fn restart(&mut self) {
        let now = self.clock.now_millis();
        self.total_time_stopped = now;

        // A stopped animation measures from its stop instant, so that
        // instant has to move too for the rewind to show.
        if let Playback::Stopped { .. } = self.playback {
            self.playback = Playback::Stopped { stopped_at: now };
        }
    }

    /// Changes the playback speed, effective from the next query.
    ///
    /// # Panics
    ///
    /// Panics if `frames_per_second` is not finite.
    pub fn set_speed(&mut self, frames_per_second: f32) {
        assert!(
            frames_per_second.is_finite(),
            "Animation speed must be finite, got {}",
            frames_per_second
        );
        debug!("Animation speed {} -> {} fps", self.frames_per_second, frames_per_second);
        self.frames_per_second = frames_per_second;
    }

    //--- Accessors --------------------------------------------------------

    pub fn is_animating(&self) -> bool {
        matches!(self.playback, Playback::Playing { .. })
    }

    /// When playback last started, if it is playing.
    pub fn started_at(&self) -> Option<u64> {
        match self.playback {
            Playback::Playing { started_at } => Some(started_at),
            Playback::Stopped { .. } => None,
        }
    }

    pub fn frames_per_second(&self) -> f32 {
        self.frames_per_second
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn atlas(&self) -> &A {
        &self.atlas
    }

    //--- Internal Helpers -------------------------------------------------

    fn rect_for(&self, index: u32) -> SpriteRect {
        let atlas_width = u64::from(self.atlas.width().max(1));
        let x = u64::from(index) * u64::from(self.frame_width) % atlas_width;

        SpriteRect {
            x: x as u32,
            y: (index / self.sprites_per_row) * self.frame_height,
            width: self.frame_width,
            height: self.frame_height,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
