//! Built-in requests for the site's three preview images.
//!
//! Two visual styles share the same copy and output paths: `Gradient` paints
//! a vertical gradient with drop-shadowed text, an emoji row and a domain
//! badge; `Solid` uses a flat brand color with a white domain badge.

use std::path::Path;

use clap::ValueEnum;

use crate::request::{Background, Color, DecorativeBox, ImageRequest, Overlay, Shadow, TextLayer};

pub const DOMAIN: &str = "youtube-analyze.money-hotissue.com";

pub const MAIN_OUTPUT: &str = "public/og-image.png";
pub const GUIDE_OUTPUT: &str = "public/og-image-guide.png";
pub const API_GUIDE_OUTPUT: &str = "public/og-image-api-guide.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PresetStyle {
    #[default]
    Gradient,
    Solid,
}

/// The three requests of a style, in generation order.
pub fn requests(style: PresetStyle) -> Vec<ImageRequest> {
    match style {
        PresetStyle::Gradient => vec![gradient_main(), gradient_guide(), gradient_api_guide()],
        PresetStyle::Solid => vec![
            solid(
                MAIN_OUTPUT,
                "유튜브 영상 분석 AI",
                "AI가 분석한 떡상 영상의 공식! 1분 만에",
                Color::rgb(139, 0, 0),
            ),
            solid(
                GUIDE_OUTPUT,
                "사용법 가이드",
                "AI 영상 분석 도구 완벽 사용법",
                Color::rgb(0, 51, 102),
            ),
            solid(
                API_GUIDE_OUTPUT,
                "API 키 발급 가이드",
                "Google AI Studio API 키 발급 방법",
                Color::rgb(75, 0, 130),
            ),
        ],
    }
}

fn gradient_main() -> ImageRequest {
    ImageRequest::new(
        Background::VerticalGradient {
            start: Color::rgb(255, 0, 0),
            end: Color::rgb(139, 0, 0),
        },
        MAIN_OUTPUT,
    )
    .with_overlay(Overlay { color: Color::BLACK, alpha: 100 })
    .layer(
        TextLayer::centered("유튜브 영상 분석 AI", 80.0, Color::WHITE, 150)
            .with_shadow(Shadow::offset(4)),
    )
    .layer(
        TextLayer::centered("떡상 영상의 비밀을 1분 만에", 45.0, Color::rgb(255, 255, 100), 260)
            .with_shadow(Shadow::offset(3)),
    )
    .layer(
        TextLayer::centered(
            "AI가 분석한 성공 공식 | 완전 무료",
            32.0,
            Color::rgb(255, 200, 200),
            350,
        )
        .with_shadow(Shadow::offset(2)),
    )
    .layer(TextLayer::centered("🎬 📊 💡 🚀", 45.0, Color::WHITE, 450))
    .layer(
        TextLayer::centered(DOMAIN, 32.0, Color::rgb(139, 0, 0), 540)
            .with_backdrop(DecorativeBox::around_text(15, 15, 55, Color::WHITE)),
    )
}

// Guide pages share a layout and differ in palette and copy.
fn gradient_page(
    output: &str,
    start: Color,
    end: Color,
    title: &str,
    subtitle: &str,
    accent: Color,
) -> ImageRequest {
    ImageRequest::new(Background::VerticalGradient { start, end }, output)
        .layer(
            TextLayer::centered(title, 70.0, Color::WHITE, 200).with_shadow(Shadow::offset(3)),
        )
        .layer(TextLayer::centered(subtitle, 40.0, accent, 320))
}

fn gradient_guide() -> ImageRequest {
    gradient_page(
        GUIDE_OUTPUT,
        Color::rgb(30, 100, 200),
        Color::rgb(60, 150, 150),
        "사용 방법 가이드",
        "30초 만에 시작하는 영상 분석",
        Color::rgb(200, 255, 200),
    )
}

fn gradient_api_guide() -> ImageRequest {
    gradient_page(
        API_GUIDE_OUTPUT,
        Color::rgb(138, 43, 226),
        Color::rgb(88, 23, 146),
        "API 키 발급 가이드",
        "무료 Google Gemini API 설정",
        Color::rgb(255, 255, 150),
    )
}

fn solid(output: &str, title: &str, subtitle: &str, brand: Color) -> ImageRequest {
    ImageRequest::new(Background::Solid(brand), output)
        .layer(TextLayer::centered(title, 80.0, Color::WHITE, 200))
        .layer(TextLayer::centered(subtitle, 40.0, Color::WHITE, 320))
        .layer(
            TextLayer::centered(DOMAIN, 30.0, brand, 480)
                .with_backdrop(DecorativeBox::around_text(20, 10, 50, Color::WHITE)),
        )
}

/// Apply the CLI's output directory and default font to a batch.
pub fn customize(requests: &mut [ImageRequest], out_dir: Option<&Path>, font: Option<&Path>) {
    for request in requests {
        if let Some(dir) = out_dir {
            request.relocate(dir);
        }
        if request.font.is_none() {
            request.font = font.map(Path::to_path_buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn both_styles_write_the_same_files() {
        for style in [PresetStyle::Gradient, PresetStyle::Solid] {
            let outputs: Vec<PathBuf> = requests(style).into_iter().map(|r| r.output).collect();
            assert_eq!(
                outputs,
                vec![
                    PathBuf::from(MAIN_OUTPUT),
                    PathBuf::from(GUIDE_OUTPUT),
                    PathBuf::from(API_GUIDE_OUTPUT),
                ]
            );
        }
    }

    #[test]
    fn solid_badge_text_uses_brand_color() {
        for request in requests(PresetStyle::Solid) {
            let Background::Solid(brand) = request.background else {
                panic!("solid style must use a solid background");
            };
            let badge = request.layers.last().unwrap();
            assert_eq!(badge.text, DOMAIN);
            assert_eq!(badge.color, brand);
            assert!(badge.backdrop.is_some());
        }
    }

    #[test]
    fn customize_relocates_and_keeps_explicit_fonts() {
        let mut batch = requests(PresetStyle::Gradient);
        batch[1].font = Some(PathBuf::from("explicit.ttf"));
        customize(&mut batch, Some(Path::new("dist")), Some(Path::new("default.ttf")));
        assert_eq!(batch[0].output, PathBuf::from("dist/og-image.png"));
        assert_eq!(batch[0].font, Some(PathBuf::from("default.ttf")));
        assert_eq!(batch[1].font, Some(PathBuf::from("explicit.ttf")));
    }
}
