use crate::{
    PixelFormat, StrictApi,
    plane_decs::{
        GRAY_PLANES, I420_PLANES, I422_PLANES, I444_PLANES, NV12_PLANES, PlaneDesc, RGB_PLANES,
        RGBA_PLANES, YUYV_PLANES,
    },
    util::ArrayIter,
};
use std::mem::MaybeUninit;

#[derive(Debug, thiserror::Error)]
#[error("got invalid number of planes, expected {expected} but only got {got}")]
pub struct InvalidNumberOfPlanesError {
    pub expected: usize,
    pub got: usize,
}

pub(crate) fn read_planes<'a, const N: usize>(
    mut iter: impl Iterator<Item = (&'a [u8], usize)>,
) -> Result<[(&'a [u8], usize); N], InvalidNumberOfPlanesError> {
    let mut out: [(&'a [u8], usize); N] = [(&[], 0); N];

    for (i, out) in out.iter_mut().enumerate() {
        *out = iter.next().ok_or(InvalidNumberOfPlanesError {
            expected: N,
            got: i,
        })?;
    }

    Ok(out)
}

/// Infer the planes for an image in the given format using the given height and strides
///
/// A `buf` too small for the given dimensions yields truncated planes, which are then rejected by
/// [`PixelFormat::bounds_check`].
#[deny(clippy::arithmetic_side_effects)]
pub fn infer<S: AnySlice>(
    format: PixelFormat,
    buf: S,
    height: usize,
    strides: &[usize],
) -> impl Iterator<Item = S> {
    match format {
        PixelFormat::Gray8 => ArrayIter::from(infer_impl(GRAY_PLANES, buf, height, strides)),
        PixelFormat::I420 => ArrayIter::from(infer_impl(I420_PLANES, buf, height, strides)),
        PixelFormat::I422 => ArrayIter::from(infer_impl(I422_PLANES, buf, height, strides)),
        PixelFormat::I444 => ArrayIter::from(infer_impl(I444_PLANES, buf, height, strides)),
        PixelFormat::NV12 => ArrayIter::from(infer_impl(NV12_PLANES, buf, height, strides)),
        PixelFormat::YUYV => ArrayIter::from(infer_impl(YUYV_PLANES, buf, height, strides)),
        PixelFormat::RGBA | PixelFormat::BGRA => {
            ArrayIter::from(infer_impl(RGBA_PLANES, buf, height, strides))
        }
        PixelFormat::RGB | PixelFormat::BGR => {
            ArrayIter::from(infer_impl(RGB_PLANES, buf, height, strides))
        }
    }
}

#[deny(clippy::arithmetic_side_effects)]
fn infer_impl<const N: usize, S: AnySlice>(
    plane_decs: [PlaneDesc; N],
    mut buf: S,
    height: usize,
    strides: &[usize],
) -> [S; N] {
    let mut out: [MaybeUninit<S>; N] = [const { MaybeUninit::uninit() }; N];

    for ((desc, stride), out) in plane_decs.into_iter().zip(strides).zip(out.iter_mut()) {
        let split_at = desc.height(height).strict_mul_(*stride);

        // The last plane keeps whatever trails the buffer
        let split_at = split_at.min(buf.slice_len());

        let (prev, rem) = buf.slice_split_at(split_at);

        out.write(prev);
        buf = rem;
    }

    // Missing strides leave empty planes which are caught by the bounds check
    for out in out.iter_mut().skip(strides.len()) {
        out.write(S::default());
    }

    out.map(|p| unsafe { p.assume_init() })
}

/// Helper trait implemented on &[T] and &mut [T]
#[diagnostic::on_unimplemented(message = "AnySlice is only implemented for &[T] and &mut [T].\n\
               When using or Vec<T> or similar try .as_slice() or .as_mut_slice()")]
pub trait AnySlice: sealed::Sealed + Default + Sized {
    fn slice_len(&self) -> usize;
    fn slice_split_at(self, at: usize) -> (Self, Self);
}

mod sealed {
    pub trait Sealed {}
    impl<T> Sealed for &[T] {}
    impl<T> Sealed for &mut [T] {}
}

impl<T> AnySlice for &[T] {
    fn slice_len(&self) -> usize {
        self.len()
    }

    fn slice_split_at(self, at: usize) -> (Self, Self) {
        self.split_at(at)
    }
}

impl<T> AnySlice for &mut [T] {
    fn slice_len(&self) -> usize {
        self.len()
    }

    fn slice_split_at(self, at: usize) -> (Self, Self) {
        self.split_at_mut(at)
    }
}
