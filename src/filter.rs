//! Frame level bob deinterlacer sitting on top of an upstream clip
//!
//! ```no_run
//! # use ezk_deinterlace::{BobDeinterlacer, FieldOrder, FrameSource};
//! # fn run<S: FrameSource>(clip: S) -> Result<(), Box<dyn std::error::Error>> {
//! let filter = BobDeinterlacer::builder()
//!     .clip(clip)
//!     .field_order(FieldOrder::TopFieldFirst)
//!     .build()?;
//!
//! for n in 0..filter.video_info().num_frames {
//!     let frame = filter.get_frame(n)?;
//!     // hand `frame` to the next stage
//! }
//! # Ok(())
//! # }
//! ```

use crate::{
    DeinterlaceError, Field, FieldOrder, Image, ImageRef, PixelFormat, blank_like, deinterlace,
    source_index,
};
use std::error::Error;

/// Stream properties of a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoInfo {
    pub format: PixelFormat,
    pub width: usize,
    pub height: usize,

    /// Frame rate numerator
    pub fps_num: u64,
    /// Frame rate denominator
    pub fps_den: u64,

    pub num_frames: usize,
}

impl VideoInfo {
    /// Info of the deinterlaced stream: twice the frames at twice the rate, same frame dimensions
    pub fn doubled(&self) -> Option<Self> {
        Some(Self {
            fps_num: self.fps_num.checked_mul(2)?,
            num_frames: self.num_frames.checked_mul(2)?,
            ..*self
        })
    }
}

/// Upstream clip providing interlaced frames
pub trait FrameSource {
    type Frame: ImageRef;
    type Error: Error + Send + Sync + 'static;

    fn video_info(&self) -> VideoInfo;

    /// Fetch frame `n`, `n` is always smaller than [`VideoInfo::num_frames`]
    fn get_frame(&self, n: usize) -> Result<Self::Frame, Self::Error>;
}

/// Errors raised while configuring a [`BobDeinterlacer`], before any frame is requested
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("clip is required")]
    MissingClip,

    #[error("doubling frame rate {fps_num}/{fps_den} or frame count {num_frames} overflows")]
    FrameRateOverflow {
        fps_num: u64,
        fps_den: u64,
        num_frames: usize,
    },
}

/// Errors raised by [`BobDeinterlacer::get_frame`]
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("requested frame {index} but the clip only has {num_frames} frames")]
    OutOfRange { index: usize, num_frames: usize },

    #[error("failed to get source frame {index}")]
    Source {
        index: usize,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    #[error("source frame {index} doesn't match the clip's video info")]
    UnexpectedFrame { index: usize },

    #[error(transparent)]
    Deinterlace(#[from] DeinterlaceError),
}

/// Doubles the frame rate of an interlaced clip by turning every field into a progressive frame
#[derive(Debug)]
pub struct BobDeinterlacer<S> {
    clip: S,
    field_order: FieldOrder,
    #[cfg_attr(not(feature = "multi-thread"), allow(dead_code))]
    multi_thread: bool,

    src_info: VideoInfo,
    info: VideoInfo,
}

/// Builder for [`BobDeinterlacer`]
#[derive(Debug)]
pub struct BobDeinterlacerBuilder<S> {
    clip: Option<S>,
    field_order: Option<FieldOrder>,
    multi_thread: bool,
}

impl<S> Default for BobDeinterlacerBuilder<S> {
    fn default() -> Self {
        Self {
            clip: None,
            field_order: None,
            multi_thread: cfg!(feature = "multi-thread"),
        }
    }
}

impl<S: FrameSource> BobDeinterlacerBuilder<S> {
    /// Required upstream clip
    pub fn clip(mut self, clip: S) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Field order of the clip, defaults to [`FieldOrder::TopFieldFirst`]
    pub fn field_order(mut self, field_order: FieldOrder) -> Self {
        self.field_order = Some(field_order);
        self
    }

    /// Integer form of [`field_order`](Self::field_order), non zero means top field first
    pub fn tff(self, tff: i64) -> Self {
        self.field_order(FieldOrder::from_tff(tff))
    }

    /// Rebuild rows in parallel, ignored without the `multi-thread` feature
    pub fn multi_thread(mut self, multi_thread: bool) -> Self {
        self.multi_thread = multi_thread;
        self
    }

    pub fn build(self) -> Result<BobDeinterlacer<S>, ConfigError> {
        let clip = self.clip.ok_or(ConfigError::MissingClip)?;
        let field_order = self.field_order.unwrap_or_default();

        let src_info = clip.video_info();
        let info = src_info.doubled().ok_or(ConfigError::FrameRateOverflow {
            fps_num: src_info.fps_num,
            fps_den: src_info.fps_den,
            num_frames: src_info.num_frames,
        })?;

        log::debug!(
            "bob deinterlacing {:?} {}x{} @ {}/{} ({} frames), {:?} -> {}/{} ({} frames)",
            src_info.format,
            src_info.width,
            src_info.height,
            src_info.fps_num,
            src_info.fps_den,
            src_info.num_frames,
            field_order,
            info.fps_num,
            info.fps_den,
            info.num_frames,
        );

        Ok(BobDeinterlacer {
            clip,
            field_order,
            multi_thread: self.multi_thread,
            src_info,
            info,
        })
    }
}

impl<S: FrameSource> BobDeinterlacer<S> {
    pub fn builder() -> BobDeinterlacerBuilder<S> {
        BobDeinterlacerBuilder::default()
    }

    /// Info of the output stream
    pub fn video_info(&self) -> VideoInfo {
        self.info
    }

    pub fn field_order(&self) -> FieldOrder {
        self.field_order
    }

    pub fn clip(&self) -> &S {
        &self.clip
    }

    pub fn into_clip(self) -> S {
        self.clip
    }

    /// Produce progressive output frame `n`, built from source frame `n / 2`
    pub fn get_frame(&self, n: usize) -> Result<Image<Vec<u8>>, FrameError> {
        if n >= self.info.num_frames {
            return Err(FrameError::OutOfRange {
                index: n,
                num_frames: self.info.num_frames,
            });
        }

        let src_n = source_index(n);
        let field = Field::for_output(n, self.field_order);

        let src = self
            .clip
            .get_frame(src_n)
            .map_err(|e| FrameError::Source {
                index: src_n,
                source: Box::new(e),
            })?;

        if src.format() != self.src_info.format
            || src.width() != self.src_info.width
            || src.height() != self.src_info.height
        {
            log::warn!(
                "source frame {src_n} is {:?} {}x{}, expected {:?} {}x{}",
                src.format(),
                src.width(),
                src.height(),
                self.src_info.format,
                self.src_info.width,
                self.src_info.height,
            );

            return Err(FrameError::UnexpectedFrame { index: src_n });
        }

        log::trace!("frame {n} from source frame {src_n}, keeping {field:?} field");

        let mut dst = blank_like(&src)?;
        self.deinterlace(&src, &mut dst, field)?;

        Ok(dst)
    }

    #[cfg(feature = "multi-thread")]
    fn deinterlace(
        &self,
        src: &dyn ImageRef,
        dst: &mut Image<Vec<u8>>,
        field: Field,
    ) -> Result<(), DeinterlaceError> {
        if self.multi_thread {
            crate::deinterlace_multi_thread(src, dst, field)
        } else {
            deinterlace(src, dst, field)
        }
    }

    #[cfg(not(feature = "multi-thread"))]
    fn deinterlace(
        &self,
        src: &dyn ImageRef,
        dst: &mut Image<Vec<u8>>,
        field: Field,
    ) -> Result<(), DeinterlaceError> {
        deinterlace(src, dst, field)
    }
}
