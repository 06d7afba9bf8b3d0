//! Bob deinterlacing for 8 bit video frames.
//!
//! Every interlaced frame produces two progressive frames. Each keeps one field's rows and rebuilds
//! the rows of the other field by interpolating vertically inside the same frame.

pub use field::{Field, FieldOrder, is_main_row, source_index};
pub use filter::{
    BobDeinterlacer, BobDeinterlacerBuilder, ConfigError, FrameError, FrameSource, VideoInfo,
};
pub use self::image::{BufferKind, Image, ImageError};
pub use image_traits::{ImageMut, ImageRef, ImageRefExt};
#[cfg(feature = "multi-thread")]
pub use multi_thread::deinterlace_multi_thread;
pub use pixel_format::{BoundsCheckError, PixelFormat};
pub use plane::{PlaneMut, PlaneRef};
pub use planes::{AnySlice, InvalidNumberOfPlanesError, infer};
pub use reconstruct::{RowKind, cubic_interpolate, deinterlace_plane, reconstruct_row};

pub(crate) use util::StrictApi;

mod field;
mod filter;
mod image;
mod image_traits;
#[cfg(feature = "multi-thread")]
mod multi_thread;
mod pixel_format;
mod plane;
mod plane_decs;
mod planes;
mod reconstruct;
mod util;

/// Everything that can go wrong when deinterlacing an image
#[derive(Debug, thiserror::Error)]
pub enum DeinterlaceError {
    #[error("source format {src:?} doesn't match destination format {dst:?}")]
    FormatMismatch { src: PixelFormat, dst: PixelFormat },

    #[error("source is {src_width}x{src_height} but destination is {dst_width}x{dst_height}")]
    DimensionMismatch {
        src_width: usize,
        src_height: usize,
        dst_width: usize,
        dst_height: usize,
    },

    #[error(transparent)]
    BoundsCheck(#[from] BoundsCheckError),
}

/// Verify that the input values are all valid and safe to move on to
fn verify_input(src: &dyn ImageRef, dst: &mut dyn ImageMut) -> Result<(), DeinterlaceError> {
    if src.format() != dst.format() {
        return Err(DeinterlaceError::FormatMismatch {
            src: src.format(),
            dst: dst.format(),
        });
    }

    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(DeinterlaceError::DimensionMismatch {
            src_width: src.width(),
            src_height: src.height(),
            dst_width: dst.width(),
            dst_height: dst.height(),
        });
    }

    src.bounds_check()?;
    dst.bounds_check()?;

    Ok(())
}

/// Write the progressive frame keeping `field` of `src` into `dst`
///
/// `src` and `dst` must have the same format and dimensions, their strides may differ.
pub fn deinterlace(
    src: &dyn ImageRef,
    dst: &mut dyn ImageMut,
    field: Field,
) -> Result<(), DeinterlaceError> {
    verify_input(src, dst)?;

    let width = src.width();
    let height = src.height();
    let desc = src.format().plane_desc();

    for (desc, ((src_plane, src_stride), (dst_plane, dst_stride))) in
        desc.iter().zip(src.planes().zip(dst.planes_mut()))
    {
        let plane_width = desc.width(width);
        let plane_height = desc.height(height);

        deinterlace_plane(
            PlaneRef::new(src_plane, plane_width, plane_height, src_stride),
            PlaneMut::new(dst_plane, plane_width, plane_height, dst_stride),
            field,
        );
    }

    Ok(())
}

/// Produce output frame `output_index` from the interlaced source frame `src`
///
/// The caller is responsible for passing source frame [`source_index(output_index)`](source_index).
/// The returned image has the format, dimensions and strides of `src`.
pub fn process_frame(
    src: &dyn ImageRef,
    output_index: usize,
    order: FieldOrder,
) -> Result<Image<Vec<u8>>, DeinterlaceError> {
    let mut dst = blank_like(src)?;

    deinterlace(src, &mut dst, Field::for_output(output_index, order))?;

    Ok(dst)
}

/// Allocate a zeroed image with the format, dimensions and strides of `src`
pub(crate) fn blank_like(src: &dyn ImageRef) -> Result<Image<Vec<u8>>, DeinterlaceError> {
    src.bounds_check()?;

    let format = src.format();
    let strides = src.strides().into_iter().take(format.num_planes()).collect();

    Ok(Image::blank_with_strides(
        format,
        src.width(),
        src.height(),
        strides,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(values: &[u8], width: usize, height: usize) -> Image<Vec<u8>> {
        Image::from_buffer(PixelFormat::Gray8, values.to_vec(), None, width, height).unwrap()
    }

    fn plane(image: &dyn ImageRef, index: usize) -> Vec<u8> {
        image.planes().nth(index).unwrap().0.to_vec()
    }

    #[test]
    fn process_frame_column() {
        let src = gray(&[10, 20, 30, 40, 50, 60, 70, 80], 1, 8);

        let out0 = process_frame(&src, 0, FieldOrder::TopFieldFirst).unwrap();
        let out1 = process_frame(&src, 1, FieldOrder::TopFieldFirst).unwrap();
        let out2 = process_frame(&src, 2, FieldOrder::TopFieldFirst).unwrap();

        assert_eq!(plane(&out0, 0), [10, 20, 30, 40, 50, 60, 70, 70]);
        assert_eq!(plane(&out1, 0), [20, 20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(plane(&out2, 0), plane(&out0, 0));
    }

    #[test]
    fn bottom_field_first_swaps_outputs() {
        let src = gray(&[10, 20, 30, 40, 50, 60, 70, 80], 1, 8);

        let out0 = process_frame(&src, 0, FieldOrder::BottomFieldFirst).unwrap();

        assert_eq!(plane(&out0, 0), [20, 20, 30, 40, 50, 60, 70, 80]);
    }

    #[test]
    fn process_frame_keeps_strides_and_dimensions() {
        let width = 6;
        let height = 4;
        let strides = vec![8, 4, 4];
        let src = Image::from_buffer(
            PixelFormat::I420,
            vec![7u8; 8 * 4 + 4 * 2 + 4 * 2],
            Some(strides.clone()),
            width,
            height,
        )
        .unwrap();

        let out = process_frame(&src, 1, FieldOrder::TopFieldFirst).unwrap();

        assert_eq!(out.format(), PixelFormat::I420);
        assert_eq!(out.width(), width);
        assert_eq!(out.height(), height);
        assert_eq!(out.strides(), strides);

        // Flat input stays flat, padding is left zeroed
        assert_eq!(&plane(&out, 0)[..6], &[7; 6]);
        assert_eq!(&plane(&out, 0)[6..8], &[0; 2]);
        assert_eq!(&plane(&out, 1)[..3], &[7; 3]);
    }

    #[test]
    fn every_format_deinterlaces() {
        for format in PixelFormat::variants() {
            let src = Image::blank(format, 16, 10);
            let mut dst = Image::blank(format, 16, 10);

            deinterlace(&src, &mut dst, Field::Bottom).unwrap();
        }
    }

    #[test]
    fn chroma_planes_are_processed_independently() {
        let width = 2;
        let height = 8;
        let mut buf = vec![0u8; PixelFormat::I420.buffer_size(width, height)];

        // Luma is 2x8, each chroma plane 1x4
        buf[16..20].copy_from_slice(&[100, 200, 100, 200]);
        buf[20..24].copy_from_slice(&[1, 2, 3, 4]);

        let src = Image::from_buffer(PixelFormat::I420, buf, None, width, height).unwrap();
        let out = process_frame(&src, 0, FieldOrder::TopFieldFirst).unwrap();

        assert_eq!(plane(&out, 1), [100, 100, 100, 100]);
        assert_eq!(plane(&out, 2), [1, 2, 3, 3]);
    }

    #[test]
    fn mismatched_format_is_rejected() {
        let src = Image::blank(PixelFormat::I420, 4, 4);
        let mut dst = Image::blank(PixelFormat::I444, 4, 4);

        assert!(matches!(
            deinterlace(&src, &mut dst, Field::Top),
            Err(DeinterlaceError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let src = Image::blank(PixelFormat::Gray8, 4, 4);
        let mut dst = Image::blank(PixelFormat::Gray8, 4, 6);

        assert!(matches!(
            deinterlace(&src, &mut dst, Field::Top),
            Err(DeinterlaceError::DimensionMismatch {
                src_height: 4,
                dst_height: 6,
                ..
            })
        ));
    }

    #[test]
    fn destination_with_wider_stride() {
        let src = gray(&[1, 2, 3, 4, 5, 6], 2, 3);
        let mut dst =
            Image::from_buffer(PixelFormat::Gray8, vec![0u8; 12], Some(vec![4]), 2, 3).unwrap();

        deinterlace(&src, &mut dst, Field::Top).unwrap();

        assert_eq!(plane(&dst, 0), [1, 2, 0, 0, 3, 4, 0, 0, 5, 6, 0, 0]);
    }
}
