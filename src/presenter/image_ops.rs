use fast_image_resize as fr;
use image::{DynamicImage, RgbaImage};
use ratatui::layout::Rect;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

use crate::backend::RgbaFrame;
use crate::error::{AppError, AppResult};

const DOWNSCALE_FILTER: fr::FilterType = fr::FilterType::CatmullRom;

pub(crate) fn create_protocol(picker: &Picker, frame: RgbaFrame) -> AppResult<StatefulProtocol> {
    let image = RgbaImage::from_raw(frame.width, frame.height, frame.pixels_to_vec()).ok_or(
        AppError::invalid_argument("rgba frame pixels length does not match dimensions"),
    )?;
    Ok(picker.new_resize_protocol(DynamicImage::ImageRgba8(image)))
}

/// Shrinks a frame that is larger than `area` can show at the given cell size. Frames that
/// already fit are returned unchanged.
pub(crate) fn downscale_for_area(
    frame: RgbaFrame,
    area: Rect,
    cell_px: (u16, u16),
) -> AppResult<RgbaFrame> {
    let max_width = u32::from(area.width.max(1)).saturating_mul(u32::from(cell_px.0.max(1)));
    let max_height = u32::from(area.height.max(1)).saturating_mul(u32::from(cell_px.1.max(1)));

    match fit_dimensions(frame.width, frame.height, max_width, max_height) {
        Some((width, height)) => resize_frame(&frame, width, height),
        None => Ok(frame),
    }
}

/// Largest size with the source aspect ratio inside the bounds, or `None` if the source
/// already fits.
pub(crate) fn fit_dimensions(
    src_width: u32,
    src_height: u32,
    max_width: u32,
    max_height: u32,
) -> Option<(u32, u32)> {
    if src_width == 0 || src_height == 0 || max_width == 0 || max_height == 0 {
        return None;
    }
    if src_width <= max_width && src_height <= max_height {
        return None;
    }

    let width_bound = u64::from(max_width) * u64::from(src_height)
        <= u64::from(max_height) * u64::from(src_width);
    if width_bound {
        let height = (u64::from(src_height) * u64::from(max_width) / u64::from(src_width)).max(1);
        Some((max_width, (height as u32).min(max_height)))
    } else {
        let width = (u64::from(src_width) * u64::from(max_height) / u64::from(src_height)).max(1);
        Some(((width as u32).min(max_width), max_height))
    }
}

fn resize_frame(frame: &RgbaFrame, width: u32, height: u32) -> AppResult<RgbaFrame> {
    let src = fr::images::Image::from_vec_u8(
        frame.width,
        frame.height,
        frame.pixels_to_vec(),
        fr::PixelType::U8x4,
    )
    .map_err(|_| AppError::invalid_argument("rgba frame pixels length does not match dimensions"))?;

    let mut dst = fr::images::Image::new(width, height, fr::PixelType::U8x4);
    let options = fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(DOWNSCALE_FILTER));
    fr::Resizer::new()
        .resize(&src, &mut dst, &options)
        .map_err(|_| AppError::unsupported("failed to downscale page image"))?;

    Ok(RgbaFrame {
        width,
        height,
        pixels: dst.into_vec().into(),
    })
}
