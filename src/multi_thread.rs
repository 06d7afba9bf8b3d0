use crate::reconstruct::{RowKind, reconstruct_row};
use crate::{
    DeinterlaceError, Field, ImageMut, ImageRef, PlaneMut, PlaneRef, deinterlace, verify_input,
};
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;

/// Same as [`deinterlace`](crate::deinterlace), but rebuilds rows in parallel on rayon's thread pool
#[inline(never)]
pub fn deinterlace_multi_thread(
    src: &dyn ImageRef,
    dst: &mut dyn ImageMut,
    field: Field,
) -> Result<(), DeinterlaceError> {
    let threads = num_cpus::get();

    if threads == 1 {
        return deinterlace(src, dst, field);
    }

    verify_input(src, dst)?;

    let width = src.width();
    let height = src.height();
    let desc = src.format().plane_desc();

    for (desc, ((src_plane, src_stride), (dst_plane, dst_stride))) in
        desc.iter().zip(src.planes().zip(dst.planes_mut()))
    {
        let plane_width = desc.width(width);
        let plane_height = desc.height(height);

        deinterlace_plane_multi_thread(
            PlaneRef::new(src_plane, plane_width, plane_height, src_stride),
            PlaneMut::new(dst_plane, plane_width, plane_height, dst_stride),
            field,
        );
    }

    Ok(())
}

fn deinterlace_plane_multi_thread(src: PlaneRef<'_>, dst: PlaneMut<'_>, field: Field) {
    let (data, width, height, stride) = dst.into_raw_parts();

    assert_eq!(src.width(), width);
    assert_eq!(src.height(), height);

    if width == 0 {
        return;
    }

    data.par_chunks_mut(stride)
        .take(height)
        .enumerate()
        .for_each(|(y, row)| {
            reconstruct_row(
                &src,
                y,
                RowKind::classify(y, height, field),
                &mut row[..width],
            );
        });
}
