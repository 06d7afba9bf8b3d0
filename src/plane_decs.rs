use crate::StrictApi as _;

/// Description for a Plane which can be used to implement bounds checks, stride calculation and buffer sizes.
///
/// Every plane holds 8 bit samples, so a plane's width in samples is also its minimum stride in bytes.
#[derive(Clone, Copy)]
pub(crate) struct PlaneDesc {
    pub(crate) width_op: Op,
    pub(crate) height_op: Op,
}

impl PlaneDesc {
    pub(crate) fn packed_stride(&self, width: usize) -> usize {
        self.width_op.op(width)
    }

    /// Samples per row of this plane for an image of `width` pixels
    pub(crate) fn width(&self, width: usize) -> usize {
        self.width_op.op(width)
    }

    /// Rows of this plane for an image of `height` pixels
    pub(crate) fn height(&self, height: usize) -> usize {
        self.height_op.op(height)
    }
}

/// Plane's number of samples in relation to width / height
#[derive(Clone, Copy)]
pub(crate) enum Op {
    Mul(usize),
    Div(usize),
    Identity,
}

impl Op {
    pub(crate) fn op(self, lhs: usize) -> usize {
        match self {
            Op::Mul(rhs) => lhs.strict_mul_(rhs),
            Op::Div(rhs) => lhs / rhs,
            Op::Identity => lhs,
        }
    }
}

const FULL: PlaneDesc = PlaneDesc {
    width_op: Op::Identity,
    height_op: Op::Identity,
};

pub(crate) const I420_PLANES: [PlaneDesc; 3] = [
    FULL,
    PlaneDesc {
        width_op: Op::Div(2),
        height_op: Op::Div(2),
    },
    PlaneDesc {
        width_op: Op::Div(2),
        height_op: Op::Div(2),
    },
];

pub(crate) const I422_PLANES: [PlaneDesc; 3] = [
    FULL,
    PlaneDesc {
        width_op: Op::Div(2),
        height_op: Op::Identity,
    },
    PlaneDesc {
        width_op: Op::Div(2),
        height_op: Op::Identity,
    },
];

pub(crate) const I444_PLANES: [PlaneDesc; 3] = [FULL, FULL, FULL];

pub(crate) const NV12_PLANES: [PlaneDesc; 2] = [
    FULL,
    // Interleaved UV, half the pairs but two samples each
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Div(2),
    },
];

pub(crate) const GRAY_PLANES: [PlaneDesc; 1] = [FULL];

pub(crate) const YUYV_PLANES: [PlaneDesc; 1] = [PlaneDesc {
    width_op: Op::Mul(2),
    height_op: Op::Identity,
}];

pub(crate) const RGBA_PLANES: [PlaneDesc; 1] = [PlaneDesc {
    width_op: Op::Mul(4),
    height_op: Op::Identity,
}];

pub(crate) const RGB_PLANES: [PlaneDesc; 1] = [PlaneDesc {
    width_op: Op::Mul(3),
    height_op: Op::Identity,
}];
