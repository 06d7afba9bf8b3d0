use ezk_deinterlace::{
    BobDeinterlacer, FieldOrder, FrameSource, Image, ImageRef, ImageRefExt, PixelFormat,
    VideoInfo,
};
use std::convert::Infallible;

/// Clip holding pre-decoded frames in memory
struct MemoryClip {
    info: VideoInfo,
    frames: Vec<Image<Vec<u8>>>,
}

impl MemoryClip {
    fn new(format: PixelFormat, width: usize, height: usize, frames: Vec<Image<Vec<u8>>>) -> Self {
        Self {
            info: VideoInfo {
                format,
                width,
                height,
                fps_num: 25,
                fps_den: 1,
                num_frames: frames.len(),
            },
            frames,
        }
    }
}

impl FrameSource for MemoryClip {
    type Frame = Image<Vec<u8>>;
    type Error = Infallible;

    fn video_info(&self) -> VideoInfo {
        self.info
    }

    fn get_frame(&self, n: usize) -> Result<Self::Frame, Self::Error> {
        Ok(self.frames[n].clone())
    }
}

fn planes(image: &Image<Vec<u8>>) -> Vec<Vec<u8>> {
    image.planes().map(|(p, _)| p.to_vec()).collect()
}

/// I420 frame where every sample equals `row * 10 + plane`
fn striped_i420(width: usize, height: usize, strides: Vec<usize>) -> Image<Vec<u8>> {
    let dims = PixelFormat::I420.plane_dimensions(width, height);

    let planes = dims
        .iter()
        .zip(&strides)
        .enumerate()
        .map(|(i, ((_, h), stride))| {
            (0..*h)
                .flat_map(|row| std::iter::repeat_n((row * 10 + i) as u8, *stride))
                .collect()
        })
        .collect();

    Image::from_planes(PixelFormat::I420, planes, Some(strides), width, height).unwrap()
}

#[test]
fn i420_clip_end_to_end() {
    let width = 8;
    let height = 16;
    let strides = vec![12, 6, 6];

    let frames = vec![
        striped_i420(width, height, strides.clone()),
        striped_i420(width, height, strides.clone()),
    ];
    let filter = BobDeinterlacer::builder()
        .clip(MemoryClip::new(PixelFormat::I420, width, height, frames))
        .build()
        .unwrap();

    let info = filter.video_info();
    assert_eq!(info.num_frames, 4);
    assert_eq!(info.fps_num, 50);
    assert_eq!(info.fps_den, 1);

    for n in 0..info.num_frames {
        let frame = filter.get_frame(n).unwrap();

        assert_eq!(frame.format(), PixelFormat::I420);
        assert_eq!(frame.width(), width);
        assert_eq!(frame.height(), height);
        assert_eq!(frame.strides(), strides);
        frame.bounds_check().unwrap();

        let top_main = n % 2 == 0;

        for (i, (plane, (w, h))) in planes(&frame)
            .into_iter()
            .zip(PixelFormat::I420.plane_dimensions(width, height))
            .enumerate()
        {
            let stride = strides[i];

            for y in 0..h {
                let row = &plane[y * stride..y * stride + w];
                let main = (y % 2 == 0) == top_main;

                // Linear ramps are reproduced exactly by every interior tier
                let expected = if main || (y > 0 && y < h - 1) {
                    y * 10 + i
                } else if y == 0 {
                    10 + i
                } else {
                    (y - 1) * 10 + i
                };

                assert!(
                    row.iter().all(|v| *v as usize == expected),
                    "frame {n} plane {i} row {y}: {row:?} != {expected}"
                );
            }
        }
    }
}

#[test]
fn frames_can_be_requested_from_many_threads() {
    let width = 16;
    let height = 12;

    let frames = (0..4u8)
        .map(|n| {
            let buf = (0..width * height)
                .map(|i| (i as u8).wrapping_mul(7).wrapping_add(n))
                .collect();

            Image::from_buffer(PixelFormat::Gray8, buf, None, width, height).unwrap()
        })
        .collect();

    let filter = BobDeinterlacer::builder()
        .clip(MemoryClip::new(PixelFormat::Gray8, width, height, frames))
        .field_order(FieldOrder::BottomFieldFirst)
        .build()
        .unwrap();

    let sequential: Vec<_> = (0..8).map(|n| planes(&filter.get_frame(n).unwrap())).collect();

    let parallel: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let filter = &filter;
                s.spawn(move || planes(&filter.get_frame(n).unwrap()))
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn single_line_clip() {
    let frames = vec![Image::from_buffer(PixelFormat::RGB, vec![1, 2, 3], None, 1, 1).unwrap()];

    let filter = BobDeinterlacer::builder()
        .clip(MemoryClip::new(PixelFormat::RGB, 1, 1, frames))
        .build()
        .unwrap();

    assert_eq!(planes(&filter.get_frame(0).unwrap()), [vec![1, 2, 3]]);
    assert_eq!(planes(&filter.get_frame(1).unwrap()), [vec![1, 2, 3]]);
}
