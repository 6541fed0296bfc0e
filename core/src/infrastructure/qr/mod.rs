use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, imageops};
use qrcode::QrCode;
use tracing::instrument;

use crate::domain::{
    common::{QrConfig, entities::app_errors::CoreError},
    qr::ports::QrRenderer,
};

const LIGHT: Luma<u8> = Luma([255]);
const MAX_IMAGE_SIDE: u32 = 8192;

/// QR renderer backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeRenderer;

impl QrRenderer for QrCodeRenderer {
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    fn render_png(&self, content: &str, options: QrConfig) -> Result<Vec<u8>, CoreError> {
        let code = QrCode::new(content.as_bytes())
            .map_err(|e| CoreError::QrEncodingError(e.to_string()))?;

        let module = options.module_size.max(1);
        let side = canvas_side(code.width(), module, options.margin)?;
        let border = options.margin * module;

        let symbol = code
            .render::<Luma<u8>>()
            .quiet_zone(false)
            .module_dimensions(module, module)
            .build();

        // The crate's quiet zone is fixed at four modules, so the margin is
        // painted by hand.
        let mut canvas = ImageBuffer::from_pixel(side, side, LIGHT);
        imageops::replace(&mut canvas, &symbol, i64::from(border), i64::from(border));

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(canvas)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| CoreError::QrEncodingError(e.to_string()))?;

        Ok(png)
    }
}

/// Side of the final image in pixels, margin included.
fn canvas_side(modules: usize, module: u32, margin: u32) -> Result<u32, CoreError> {
    let too_large = || CoreError::QrEncodingError("QR image is too large".to_string());

    let modules = u32::try_from(modules).map_err(|_| too_large())?;
    let side = margin
        .checked_mul(2)
        .and_then(|margins| margins.checked_add(modules))
        .and_then(|modules| modules.checked_mul(module))
        .ok_or_else(too_large)?;

    if side > MAX_IMAGE_SIDE {
        return Err(too_large());
    }
    Ok(side)
}
