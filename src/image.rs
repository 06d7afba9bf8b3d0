use crate::{BoundsCheckError, ImageMut, ImageRef, ImageRefExt, PixelFormat, StrictApi as _, infer};

/// Basic wrapper around any image, implementing the [`ImageRef`] and [`ImageMut`] trait
#[derive(Debug, Clone)]
pub struct Image<S> {
    format: PixelFormat,
    buffer: BufferKind<S>,
    strides: Vec<usize>,
    width: usize,
    height: usize,
}

#[derive(Debug, Clone)]
pub enum BufferKind<S> {
    Whole(S),
    Split(Vec<S>),
}

/// Everything that can go wrong when constructing an [`Image`]
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("width or height must not be zero")]
    InvalidDimensions,

    #[error(transparent)]
    BoundsCheck(#[from] BoundsCheckError),
}

impl Image<Vec<u8>> {
    pub fn blank(format: PixelFormat, width: usize, height: usize) -> Self {
        Self {
            format,
            buffer: BufferKind::Whole(vec![0u8; format.buffer_size(width, height)]),
            strides: format.packed_strides(width),
            width,
            height,
        }
    }

    /// Allocate a zeroed image using custom plane strides
    ///
    /// # Panics
    ///
    /// If `strides` doesn't hold one stride per plane or any stride is smaller than its plane's width
    pub fn blank_with_strides(
        format: PixelFormat,
        width: usize,
        height: usize,
        strides: Vec<usize>,
    ) -> Self {
        assert_eq!(strides.len(), format.num_planes());

        let mut size = 0;

        for (desc, stride) in format.plane_desc().iter().zip(&strides) {
            assert!(*stride >= desc.packed_stride(width));

            size = size.strict_add_(stride.strict_mul_(desc.height(height)));
        }

        Self {
            format,
            buffer: BufferKind::Whole(vec![0u8; size]),
            strides,
            width,
            height,
        }
    }
}

impl<S> Image<S>
where
    Image<S>: ImageRef,
{
    pub fn from_buffer(
        format: PixelFormat,
        buffer: S,
        strides: Option<Vec<usize>>,
        width: usize,
        height: usize,
    ) -> Result<Self, ImageError> {
        Self::new(format, BufferKind::Whole(buffer), strides, width, height)
    }

    pub fn from_planes(
        format: PixelFormat,
        planes: Vec<S>,
        strides: Option<Vec<usize>>,
        width: usize,
        height: usize,
    ) -> Result<Self, ImageError> {
        Self::new(format, BufferKind::Split(planes), strides, width, height)
    }

    fn new(
        format: PixelFormat,
        buffer: BufferKind<S>,
        strides: Option<Vec<usize>>,
        width: usize,
        height: usize,
    ) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions);
        }

        let strides = strides.unwrap_or_else(|| format.packed_strides(width));

        let this = Self {
            format,
            buffer,
            strides,
            width,
            height,
        };

        this.bounds_check()?;

        Ok(this)
    }

    pub fn buffer(&self) -> &BufferKind<S> {
        &self.buffer
    }

    pub fn into_buffer(self) -> BufferKind<S> {
        self.buffer
    }
}

unsafe impl<S: AsRef<[u8]>> ImageRef for Image<S> {
    fn format(&self) -> PixelFormat {
        self.format
    }
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }

    fn planes(&self) -> Box<dyn Iterator<Item = (&[u8], usize)> + '_> {
        match &self.buffer {
            BufferKind::Whole(buffer) => Box::new(
                infer(self.format, buffer.as_ref(), self.height, &self.strides)
                    .zip(self.strides.iter().copied()),
            ),
            BufferKind::Split(planes) => Box::new(
                planes
                    .iter()
                    .map(|p| p.as_ref())
                    .zip(self.strides.iter().copied()),
            ),
        }
    }
}

unsafe impl<S: AsRef<[u8]> + AsMut<[u8]>> ImageMut for Image<S> {
    fn planes_mut(&mut self) -> Box<dyn Iterator<Item = (&mut [u8], usize)> + '_> {
        match &mut self.buffer {
            BufferKind::Whole(buffer) => Box::new(
                infer(self.format, buffer.as_mut(), self.height, &self.strides)
                    .zip(self.strides.iter().copied()),
            ),
            BufferKind::Split(planes) => Box::new(
                planes
                    .iter_mut()
                    .map(|plane| plane.as_mut())
                    .zip(self.strides.iter().copied()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        let err = Image::from_buffer(PixelFormat::Gray8, vec![0u8; 16], None, 0, 4).unwrap_err();

        assert!(matches!(err, ImageError::InvalidDimensions));
    }

    #[test]
    fn undersized_buffer_is_rejected() {
        let err = Image::from_buffer(PixelFormat::I420, vec![0u8; 10], None, 4, 4).unwrap_err();

        assert!(matches!(err, ImageError::BoundsCheck(_)));
    }

    #[test]
    fn split_planes_keep_strides() {
        let image = Image::from_planes(
            PixelFormat::NV12,
            vec![vec![0u8; 8 * 4], vec![0u8; 8 * 2]],
            Some(vec![8, 8]),
            6,
            4,
        )
        .unwrap();

        assert_eq!(image.strides(), vec![8, 8]);
        assert_eq!(
            image.planes().map(|(p, _)| p.len()).collect::<Vec<_>>(),
            vec![32, 16]
        );
    }

    #[test]
    fn blank_with_strides_allocates_padding() {
        let image = Image::blank_with_strides(PixelFormat::I420, 6, 4, vec![16, 8, 8]);

        let BufferKind::Whole(buf) = image.buffer() else {
            panic!("expected whole buffer");
        };

        assert_eq!(buf.len(), 16 * 4 + 8 * 2 + 8 * 2);
        image.bounds_check().unwrap();
    }
}
