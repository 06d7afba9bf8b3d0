use crate::StrictApi as _;

/// Borrowed view of a single plane of 8 bit samples
#[derive(Debug, Clone, Copy)]
pub struct PlaneRef<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> PlaneRef<'a> {
    /// # Panics
    ///
    /// If `stride` is smaller than `width` or `data` holds less than `stride * height` samples
    pub fn new(data: &'a [u8], width: usize, height: usize, stride: usize) -> Self {
        assert_plane_shape(data.len(), width, height, stride);

        Self {
            data,
            width,
            height,
            stride,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The `width` samples of row `y`
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.height, "row {y} out of bounds for height {}", self.height);

        let start = y * self.stride;
        &self.data[start..start + self.width]
    }
}

/// Mutable view of a single plane of 8 bit samples
#[derive(Debug)]
pub struct PlaneMut<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> PlaneMut<'a> {
    /// # Panics
    ///
    /// If `stride` is smaller than `width` or `data` holds less than `stride * height` samples
    pub fn new(data: &'a mut [u8], width: usize, height: usize, stride: usize) -> Self {
        assert_plane_shape(data.len(), width, height, stride);

        Self {
            data,
            width,
            height,
            stride,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The `width` samples of row `y`
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.height, "row {y} out of bounds for height {}", self.height);

        let start = y * self.stride;
        &mut self.data[start..start + self.width]
    }

    /// Iterate over the `width` samples of every row, top to bottom. Stride padding is not yielded.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
        let width = self.width;

        // chunks_mut panics on a zero chunk size, only reachable with width 0
        let stride = self.stride.max(1);

        self.data
            .chunks_mut(stride)
            .take(self.height)
            .map(move |row| &mut row[..width])
    }

    #[cfg(feature = "multi-thread")]
    pub(crate) fn into_raw_parts(self) -> (&'a mut [u8], usize, usize, usize) {
        (self.data, self.width, self.height, self.stride)
    }
}

fn assert_plane_shape(len: usize, width: usize, height: usize, stride: usize) {
    assert!(
        stride >= width,
        "stride {stride} is smaller than the plane width {width}"
    );

    let min_len = stride.strict_mul_(height);

    assert!(
        len >= min_len,
        "plane holds {len} samples but {height} rows with stride {stride} need {min_len}"
    );
}
