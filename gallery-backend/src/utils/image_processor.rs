// src/utils/image_processor.rs

use crate::error::{AppError, AppResult};
use crate::utils::error_helper::internal_server_error;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// JPEG品質のデフォルト値
pub const DEFAULT_JPEG_QUALITY: u8 = 40;

/// リサイズ方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resize {
    /// アスペクト比を保ったまま枠内に収める。`enlarge == false` なら拡大しない
    Inside {
        width: u32,
        height: u32,
        enlarge: bool,
    },
    /// 枠をちょうど埋めるように縮尺し、中央で切り抜く
    Cover { width: u32, height: u32 },
}

/// 画像変換の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTransform {
    pub resize: Option<Resize>,
    /// JPEG品質（1-100）
    pub quality: u8,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            resize: None,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ImageTransform {
    /// 作家登録時のサムネイル（300x300 cover）
    pub fn thumbnail() -> Self {
        Self {
            resize: Some(Resize::Cover {
                width: 300,
                height: 300,
            }),
            ..Default::default()
        }
    }

    /// 一括登録時のサムネイル（300x300 inside）
    pub fn bulk_thumbnail() -> Self {
        Self {
            resize: Some(Resize::Inside {
                width: 300,
                height: 300,
                enlarge: false,
            }),
            ..Default::default()
        }
    }

    /// 一括登録時の作品画像（1500x1500 inside、拡大あり）
    pub fn bulk_artwork() -> Self {
        Self {
            resize: Some(Resize::Inside {
                width: 1500,
                height: 1500,
                enlarge: true,
            }),
            ..Default::default()
        }
    }

    /// サイズはそのまま、JPEGへ再エンコードのみ
    pub fn reencode() -> Self {
        Self::default()
    }
}

/// 切り抜き矩形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

pub const LANDSCAPE_CROP: CropRect = CropRect {
    left: 0,
    top: 146,
    width: 2560,
    height: 1022,
};

pub const PORTRAIT_CROP: CropRect = CropRect {
    left: 915,
    top: 0,
    width: 730,
    height: 1460,
};

/// レンダリング画像から切り出した2枚
#[derive(Debug, Clone)]
pub struct RenderedCrops {
    pub landscape: Vec<u8>,
    pub portrait: Vec<u8>,
}

/// デコード → リサイズ → JPEGエンコード
pub fn transform(input_data: &[u8], transform: &ImageTransform) -> AppResult<Vec<u8>> {
    let img = decode(input_data)?;

    let img = match transform.resize {
        Some(Resize::Inside {
            width,
            height,
            enlarge,
        }) => {
            let (src_w, src_h) = img.dimensions();
            let (new_w, new_h) = inside_dimensions(src_w, src_h, width, height, enlarge);
            if (new_w, new_h) == (src_w, src_h) {
                img
            } else {
                img.resize_exact(new_w, new_h, FilterType::Lanczos3)
            }
        }
        Some(Resize::Cover { width, height }) => {
            img.resize_to_fill(width, height, FilterType::Lanczos3)
        }
        None => img,
    };

    encode_jpeg(&img, transform.quality)
}

/// 横長・縦長の固定領域を切り出す
pub fn crop_rendered(input_data: &[u8]) -> AppResult<RenderedCrops> {
    let img = decode(input_data)?;

    let landscape = crop(&img, &LANDSCAPE_CROP)?;
    let portrait = crop(&img, &PORTRAIT_CROP)?;

    Ok(RenderedCrops {
        landscape: encode_jpeg(&landscape, DEFAULT_JPEG_QUALITY)?,
        portrait: encode_jpeg(&portrait, DEFAULT_JPEG_QUALITY)?,
    })
}

/// `transform` をブロッキングスレッドで実行
pub async fn transform_blocking(data: Vec<u8>, image_transform: ImageTransform) -> AppResult<Vec<u8>> {
    tokio::task::spawn_blocking(move || transform(&data, &image_transform))
        .await
        .map_err(|e| internal_server_error(e, "image_processor::transform", "Image task failed"))?
}

/// `crop_rendered` をブロッキングスレッドで実行
pub async fn crop_rendered_blocking(data: Vec<u8>) -> AppResult<RenderedCrops> {
    tokio::task::spawn_blocking(move || crop_rendered(&data))
        .await
        .map_err(|e| {
            internal_server_error(e, "image_processor::crop_rendered", "Image task failed")
        })?
}

fn decode(input_data: &[u8]) -> AppResult<DynamicImage> {
    image::load_from_memory(input_data)
        .map_err(|e| AppError::UploadRejected(format!("Invalid image format: {}", e)))
}

fn crop(img: &DynamicImage, rect: &CropRect) -> AppResult<DynamicImage> {
    let (width, height) = img.dimensions();
    let fits = rect.left.checked_add(rect.width).is_some_and(|r| r <= width)
        && rect.top.checked_add(rect.height).is_some_and(|b| b <= height);

    if !fits {
        return Err(AppError::CheckRequest(format!(
            "image {}x{} is too small to extract {}x{} at ({}, {})",
            width, height, rect.width, rect.height, rect.left, rect.top
        )));
    }

    Ok(img.crop_imm(rect.left, rect.top, rect.width, rect.height))
}

/// 枠内に収まるサイズを計算
fn inside_dimensions(src_w: u32, src_h: u32, box_w: u32, box_h: u32, enlarge: bool) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (src_w, src_h);
    }
    if !enlarge && src_w <= box_w && src_h <= box_h {
        return (src_w, src_h);
    }

    let ratio = (box_w as f64 / src_w as f64).min(box_h as f64 / src_h as f64);
    let new_w = ((src_w as f64 * ratio).round() as u32).clamp(1, box_w);
    let new_h = ((src_h as f64 * ratio).round() as u32).clamp(1, box_h);
    (new_w, new_h)
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> AppResult<Vec<u8>> {
    let mut buffer = Vec::new();
    // JPEGはアルファを持たないのでRGBに落とす
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)
        .map_err(|e| AppError::InternalServerError(format!("Failed to encode JPEG: {}", e)))?;
    Ok(buffer)
}
