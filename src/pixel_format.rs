use crate::{InvalidNumberOfPlanesError, StrictApi as _, plane_decs::*, planes::read_planes};

/// Supported pixel formats
///
/// All formats store 8 bit samples. Deinterlacing works on every plane independently and treats
/// interleaved components (NV12's UV, YUYV, RGB(A)) as plain sample columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PixelFormat {
    /// Single luma plane
    Gray8,

    /// Y, U and V planes, 4:2:0 sub sampling
    I420,

    /// Y, U and V planes, 4:2:2 sub sampling
    I422,

    /// Y, U and V planes, 4:4:4 sub sampling
    I444,

    /// Y and interleaved UV planes, 4:2:0 sub sampling
    NV12,

    /// Single YUYV, 4:2:2 sub sampling
    YUYV,

    /// Single RGBA interleaved plane
    RGBA,

    /// Single BGRA interleaved plane
    BGRA,

    /// Single RGB interleaved plane
    RGB,

    /// Single BGR interleaved plane
    BGR,
}

impl PixelFormat {
    /// Calculate the required buffer size given the [`PixelFormat`] self and image dimensions (in pixel width, height).
    #[deny(clippy::arithmetic_side_effects)]
    pub fn buffer_size(self, width: usize, height: usize) -> usize {
        let mut size = 0;

        for plane in self.plane_desc() {
            size = size.strict_add_(plane.width(width).strict_mul_(plane.height(height)));
        }

        size
    }

    /// Calculate the strides of an image in a packed buffer
    pub fn packed_strides(self, width: usize) -> Vec<usize> {
        self.plane_desc()
            .iter()
            .map(|desc| desc.packed_stride(width))
            .collect()
    }

    /// Width (in samples) and height (in rows) of every plane for the given image dimensions
    pub fn plane_dimensions(self, width: usize, height: usize) -> Vec<(usize, usize)> {
        self.plane_desc()
            .iter()
            .map(|desc| (desc.width(width), desc.height(height)))
            .collect()
    }

    /// Number of planes an image of this format consists of
    pub fn num_planes(self) -> usize {
        self.plane_desc().len()
    }

    /// Check if the given planes+strides are valid for dimensions
    #[deny(clippy::arithmetic_side_effects)]
    pub fn bounds_check<'a>(
        self,
        planes: impl Iterator<Item = (&'a [u8], usize)>,
        width: usize,
        height: usize,
    ) -> Result<(), BoundsCheckError> {
        use PixelFormat::*;

        fn bounds_check<const N: usize>(
            planes: [PlaneDesc; N],
            got: [(&[u8], usize); N],
            width: usize,
            height: usize,
        ) -> Result<(), BoundsCheckError> {
            for (i, (plane, (slice, stride))) in planes.into_iter().zip(got).enumerate() {
                // Ensure stride is not smaller than the width would allow
                let min_stride = plane.packed_stride(width);

                if min_stride > stride {
                    return Err(BoundsCheckError::InvalidStride {
                        plane: i,
                        minimum: min_stride,
                        got: stride,
                    });
                }

                // Ensure slice is large enough
                let min_len = stride.strict_mul_(plane.height(height));

                if min_len > slice.len() {
                    return Err(BoundsCheckError::InvalidPlaneSize {
                        plane: i,
                        minimum: min_len,
                        got: slice.len(),
                    });
                }
            }

            Ok(())
        }

        match self {
            Gray8 => bounds_check(GRAY_PLANES, read_planes(planes)?, width, height),
            I420 => bounds_check(I420_PLANES, read_planes(planes)?, width, height),
            I422 => bounds_check(I422_PLANES, read_planes(planes)?, width, height),
            I444 => bounds_check(I444_PLANES, read_planes(planes)?, width, height),
            NV12 => bounds_check(NV12_PLANES, read_planes(planes)?, width, height),
            YUYV => bounds_check(YUYV_PLANES, read_planes(planes)?, width, height),
            RGBA | BGRA => bounds_check(RGBA_PLANES, read_planes(planes)?, width, height),
            RGB | BGR => bounds_check(RGB_PLANES, read_planes(planes)?, width, height),
        }
    }

    pub(crate) fn plane_desc(&self) -> &'static [PlaneDesc] {
        use PixelFormat::*;

        match self {
            Gray8 => &GRAY_PLANES,
            I420 => &I420_PLANES,
            I422 => &I422_PLANES,
            I444 => &I444_PLANES,
            NV12 => &NV12_PLANES,
            YUYV => &YUYV_PLANES,
            RGBA | BGRA => &RGBA_PLANES,
            RGB | BGR => &RGB_PLANES,
        }
    }

    pub fn variants() -> impl IntoIterator<Item = Self> {
        use PixelFormat::*;

        [Gray8, I420, I422, I444, NV12, YUYV, RGBA, BGRA, RGB, BGR]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BoundsCheckError {
    #[error(transparent)]
    InvalidNumberOfPlanes(#[from] InvalidNumberOfPlanesError),

    #[error("invalid stride at plane {plane}, expected it to be at least {minimum}, but got {got}")]
    InvalidStride {
        plane: usize,
        minimum: usize,
        got: usize,
    },

    #[error(
        "invalid plane size at plane {plane}, expected it to be at least {minimum}, but got {got}"
    )]
    InvalidPlaneSize {
        plane: usize,
        minimum: usize,
        got: usize,
    },
}
