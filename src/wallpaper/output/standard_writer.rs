use std::io::{Cursor, Write};

use image::buffer::ConvertBuffer;
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::codecs::webp::WebPEncoder;
use image::{ColorType, DynamicImage, ImageEncoder, RgbImage, RgbaImage};
use tracing::debug;

use crate::wallpaper::common::error::{Result, WallpaperError};
use crate::wallpaper::config::{TiffCompression, WallpaperConfig};
use crate::wallpaper::output::format::OutputFormat;
use crate::wallpaper::output::writer::WallpaperWriter;

const METRES_PER_INCH: f64 = 0.0254;

/// Prepares the cropped canvas for `format`.
///
/// Formats without alpha get the alpha channel removed. Colour channels are kept as they
/// are, so fully transparent areas show whatever colour they held rather than being
/// blended onto a background.
pub fn finalize(image: RgbaImage, format: OutputFormat) -> DynamicImage {
    if format.supports_alpha() {
        DynamicImage::ImageRgba8(image)
    } else {
        debug!("Dropping alpha channel for {:?} output", format);
        let rgb: RgbImage = image.convert();
        DynamicImage::ImageRgb8(rgb)
    }
}

/// Writer that encodes PNG, JPEG, WebP, TIFF and BMP.
pub struct StandardWallpaperWriter;

impl WallpaperWriter for StandardWallpaperWriter {
    fn write_wallpaper(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        output: &mut dyn Write,
        config: &WallpaperConfig,
    ) -> Result<()> {
        debug!(
            "Encoding {:?} image: {}x{} at {} dpi",
            format,
            image.width(),
            image.height(),
            config.target.dpi
        );

        let mut buffer: Vec<u8> = Vec::new();

        match format {
            OutputFormat::Png => write_png(image, &mut buffer, config.target.dpi)?,
            OutputFormat::Jpeg => write_jpeg(image, &mut buffer, config)?,
            OutputFormat::Tiff => write_tiff(image, &mut buffer, config)?,
            OutputFormat::WebP => {
                WebPEncoder::new_lossless(&mut buffer)
                    .write_image(
                        image.as_bytes(),
                        image.width(),
                        image.height(),
                        image.color().into(),
                    )
                    .map_err(encode_error)?;
            }
            OutputFormat::Bmp => {
                BmpEncoder::new(&mut buffer)
                    .write_image(
                        image.as_bytes(),
                        image.width(),
                        image.height(),
                        image.color().into(),
                    )
                    .map_err(encode_error)?;
                set_bmp_resolution(&mut buffer, config.target.dpi)?;
            }
        }

        if !format.supports_dpi() {
            debug!("{:?} carries no resolution metadata, DPI not written", format);
        }

        output.write_all(&buffer).map_err(encode_error)?;

        debug!("Encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

fn encode_error<E: std::fmt::Display>(e: E) -> WallpaperError {
    WallpaperError::EncodeError(e.to_string())
}

fn pixels_per_metre(dpi: u32) -> u32 {
    (f64::from(dpi) / METRES_PER_INCH).round() as u32
}

/// Byte offset of `biXPelsPerMeter`: 14-byte file header, then 24 bytes into the info header.
const BMP_X_PELS_PER_METER: usize = 38;

/// Fills the resolution fields the BMP encoder leaves at zero.
fn set_bmp_resolution(buffer: &mut [u8], dpi: u32) -> Result<()> {
    let ppm = i32::try_from(pixels_per_metre(dpi)).map_err(|_| {
        WallpaperError::EncodeError(format!("{dpi} dpi does not fit in a BMP header"))
    })?;
    let fields = buffer
        .get_mut(BMP_X_PELS_PER_METER..BMP_X_PELS_PER_METER + 8)
        .ok_or_else(|| WallpaperError::EncodeError("BMP header truncated".to_string()))?;
    fields[..4].copy_from_slice(&ppm.to_le_bytes());
    fields[4..].copy_from_slice(&ppm.to_le_bytes());
    Ok(())
}

fn write_png(image: &DynamicImage, buffer: &mut Vec<u8>, dpi: u32) -> Result<()> {
    let color = match image.color() {
        ColorType::Rgba8 => png::ColorType::Rgba,
        ColorType::Rgb8 => png::ColorType::Rgb,
        other => {
            return Err(WallpaperError::EncodeError(format!(
                "unsupported PNG color type {other:?}"
            )));
        }
    };

    let pixels_per_metre = pixels_per_metre(dpi);

    let mut encoder = png::Encoder::new(buffer, image.width(), image.height());
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: pixels_per_metre,
        yppu: pixels_per_metre,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder.write_header().map_err(encode_error)?;
    writer
        .write_image_data(image.as_bytes())
        .map_err(encode_error)?;
    writer.finish().map_err(encode_error)?;
    Ok(())
}

fn write_jpeg(image: &DynamicImage, buffer: &mut Vec<u8>, config: &WallpaperConfig) -> Result<()> {
    let density = u16::try_from(config.target.dpi).map_err(|_| {
        WallpaperError::EncodeError(format!(
            "{} dpi does not fit in a JPEG header",
            config.target.dpi
        ))
    })?;

    let mut encoder = JpegEncoder::new_with_quality(buffer, config.jpeg_quality);
    encoder.set_pixel_density(PixelDensity::dpi(density));
    encoder
        .encode(
            image.as_bytes(),
            image.width(),
            image.height(),
            image.color().into(),
        )
        .map_err(encode_error)
}

fn write_tiff(image: &DynamicImage, buffer: &mut Vec<u8>, config: &WallpaperConfig) -> Result<()> {
    use tiff::encoder::{Rational, TiffEncoder, colortype, compression::DeflateLevel};
    use tiff::tags::{Predictor, ResolutionUnit};

    let compression = match config.tiff_compression {
        TiffCompression::None => tiff::encoder::Compression::Uncompressed,
        TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
        TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(DeflateLevel::Fast),
        TiffCompression::DeflateBalanced => {
            tiff::encoder::Compression::Deflate(DeflateLevel::Balanced)
        }
        TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(DeflateLevel::Best),
    };

    let mut encoder = TiffEncoder::new(Cursor::new(buffer))
        .map_err(encode_error)?
        .with_compression(compression);

    if config.tiff_predictor {
        encoder = encoder.with_predictor(Predictor::Horizontal);
    }

    let resolution = Rational {
        n: config.target.dpi,
        d: 1,
    };

    match image {
        DynamicImage::ImageRgba8(rgba) => {
            let mut tiff_image = encoder
                .new_image::<colortype::RGBA8>(rgba.width(), rgba.height())
                .map_err(encode_error)?;
            tiff_image.resolution(ResolutionUnit::Inch, resolution);
            tiff_image.write_data(rgba.as_raw()).map_err(encode_error)
        }
        DynamicImage::ImageRgb8(rgb) => {
            let mut tiff_image = encoder
                .new_image::<colortype::RGB8>(rgb.width(), rgb.height())
                .map_err(encode_error)?;
            tiff_image.resolution(ResolutionUnit::Inch, resolution);
            tiff_image.write_data(rgb.as_raw()).map_err(encode_error)
        }
        other => Err(WallpaperError::EncodeError(format!(
            "unsupported TIFF color type {:?}",
            other.color()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn translucent(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([200, 100, 50, 0]))
    }

    fn encode(image: RgbaImage, format: OutputFormat, config: &WallpaperConfig) -> Vec<u8> {
        let finalized = finalize(image, format);
        let mut output: Vec<u8> = Vec::new();
        StandardWallpaperWriter
            .write_wallpaper(&finalized, format, &mut output, config)
            .unwrap();
        output
    }

    #[test]
    fn test_finalize_jpeg_drops_alpha_without_blending() {
        let finalized = finalize(translucent(2, 2), OutputFormat::Jpeg);
        let rgb = finalized.as_rgb8().unwrap();
        assert_eq!(rgb.get_pixel(1, 1).0, [200, 100, 50]);
    }

    #[test]
    fn test_finalize_png_keeps_alpha() {
        let finalized = finalize(translucent(2, 2), OutputFormat::Png);
        assert_eq!(finalized.as_rgba8().unwrap().get_pixel(0, 0).0, [200, 100, 50, 0]);
    }

    #[test]
    fn test_png_embeds_pixel_dimensions() {
        let bytes = encode(translucent(3, 2), OutputFormat::Png, &WallpaperConfig::default());

        let decoder = png::Decoder::new(Cursor::new(bytes));
        let reader = decoder.read_info().unwrap();
        let dims = reader.info().pixel_dims.unwrap();
        assert_eq!(dims.xppu, 11811);
        assert_eq!(dims.yppu, 11811);
        assert_eq!(dims.unit, png::Unit::Meter);
    }

    #[test]
    fn test_jpeg_embeds_density() {
        let bytes = encode(translucent(8, 8), OutputFormat::Jpeg, &WallpaperConfig::default());

        let jfif = bytes
            .windows(5)
            .position(|w| w == b"JFIF\0")
            .expect("JFIF header");
        // identifier(5) version(2) units(1) xdensity(2) ydensity(2)
        assert_eq!(bytes[jfif + 7], 1);
        assert_eq!(u16::from_be_bytes([bytes[jfif + 8], bytes[jfif + 9]]), 300);
        assert_eq!(u16::from_be_bytes([bytes[jfif + 10], bytes[jfif + 11]]), 300);
    }

    #[test]
    fn test_jpeg_rejects_oversized_dpi() {
        let mut config = WallpaperConfig::default();
        config.target = config.target.with_dpi(100_000);
        let finalized = finalize(translucent(2, 2), OutputFormat::Jpeg);
        let result = StandardWallpaperWriter.write_wallpaper(
            &finalized,
            OutputFormat::Jpeg,
            &mut Vec::<u8>::new(),
            &config,
        );
        assert!(matches!(result, Err(WallpaperError::EncodeError(_))));
    }

    #[test]
    fn test_tiff_embeds_resolution() {
        use tiff::decoder::{Decoder, ifd::Value};
        use tiff::tags::Tag;

        let config = WallpaperConfig::builder()
            .tiff_compression(TiffCompression::DeflateFast)
            .build();
        let bytes = encode(translucent(4, 4), OutputFormat::Tiff, &config);

        let mut decoder = Decoder::new(Cursor::new(bytes)).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (4, 4));
        assert_eq!(decoder.get_tag_u32(Tag::ResolutionUnit).unwrap(), 2);
        for tag in [Tag::XResolution, Tag::YResolution] {
            match decoder.get_tag(tag).unwrap() {
                Value::Rational(n, d) => assert_eq!((n, d), (300, 1), "{tag:?}"),
                other => panic!("{tag:?} is not rational: {other:?}"),
            }
        }
    }

    #[test]
    fn test_tiff_predictor_round_trips_pixels() {
        use tiff::decoder::Decoder;
        use tiff::tags::Tag;

        let gradient = RgbaImage::from_fn(16, 8, |x, y| Rgba([x as u8 * 9, y as u8 * 20, 7, 200]));
        let config = WallpaperConfig::builder()
            .tiff_compression(TiffCompression::Lzw)
            .tiff_predictor(true)
            .build();
        let bytes = encode(gradient.clone(), OutputFormat::Tiff, &config);

        let mut decoder = Decoder::new(Cursor::new(bytes.clone())).unwrap();
        assert_eq!(decoder.get_tag_u32(Tag::Predictor).unwrap(), 2);

        let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
        assert_eq!(decoded, gradient);
    }

    #[test]
    fn test_bmp_embeds_resolution() {
        let bytes = encode(translucent(6, 4), OutputFormat::Bmp, &WallpaperConfig::default());

        let x = i32::from_le_bytes(bytes[38..42].try_into().unwrap());
        let y = i32::from_le_bytes(bytes[42..46].try_into().unwrap());
        assert_eq!((x, y), (11811, 11811));

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 4));
    }

    #[test]
    fn test_bmp_resolution_follows_dpi() {
        let config = WallpaperConfig::builder()
            .target(crate::wallpaper::target::TargetSpec::new(2, 2).with_dpi(72))
            .build();
        let bytes = encode(translucent(2, 2), OutputFormat::Bmp, &config);

        assert_eq!(i32::from_le_bytes(bytes[38..42].try_into().unwrap()), 2835);
    }

    #[test]
    fn test_webp_and_bmp_keep_alpha() {
        for format in [OutputFormat::WebP, OutputFormat::Bmp] {
            let bytes = encode(translucent(5, 3), format, &WallpaperConfig::default());
            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (5, 3));
            assert!(decoded.color().has_alpha(), "{format:?} lost alpha");
        }
    }
}
