use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgba, RgbaImage};
use stridecard::{Configuration, RenderPipeline, Sampler, StridecardError};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "stridecard_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn system_font() -> Option<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.is_file())
}

/// White portrait template plus a blue non-square avatar under `scr/`,
/// and the three card fonts copied from a system face under `fonts/`.
fn write_assets(root: &Path, font: &Path) {
    std::fs::create_dir_all(root.join("scr")).unwrap();
    std::fs::create_dir_all(root.join("fonts")).unwrap();

    let template = RgbaImage::from_pixel(1080, 2400, Rgba([255, 255, 255, 255]));
    DynamicImage::ImageRgba8(template)
        .save(root.join("scr/template.png"))
        .unwrap();

    let avatar = RgbaImage::from_pixel(300, 200, Rgba([0, 0, 255, 255]));
    DynamicImage::ImageRgba8(avatar)
        .save(root.join("scr/avatar.png"))
        .unwrap();

    for name in [
        "SourceHanSansCN-Regular.otf",
        "QanelasBlack.otf",
        "QanelasSemiBold.otf",
    ] {
        std::fs::copy(font, root.join("fonts").join(name)).unwrap();
    }
}

fn fixture_config() -> Configuration {
    Configuration {
        avatar: "scr/avatar.png".into(),
        username: "runner".to_string(),
        date: "2025/11/02".to_string(),
        end_time: "22:54".to_string(),
        ..Configuration::default()
    }
}

#[test]
fn render_composes_avatar_and_text_onto_template() {
    let Some(font) = system_font() else {
        eprintln!("skipping: no system font found");
        return;
    };
    let root = temp_dir("render_full");
    write_assets(&root, &font);

    let pipeline = RenderPipeline::new(fixture_config(), &root);
    let mut sampler = Sampler::seeded(9);
    let card = pipeline.render(&mut sampler).unwrap();

    assert_eq!(card.dimensions(), (1080, 2400));

    // Avatar center lands at (40, 250) + (50, 50); corners stay template.
    let center = card.get_pixel(90, 300);
    assert!(center[2] > 200 && center[0] < 50, "avatar center: {center:?}");
    assert_eq!(card.get_pixel(41, 251), &Rgba([255, 255, 255, 255]));

    // The status-bar clock leaves dark pixels near (50, 25).
    let mut dark = 0usize;
    for y in 20..100 {
        for x in 40..400 {
            if card.get_pixel(x, y)[0] < 128 {
                dark += 1;
            }
        }
    }
    assert!(dark > 20, "clock text painted only {dark} pixels");

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn same_seed_renders_identical_cards() {
    let Some(font) = system_font() else {
        eprintln!("skipping: no system font found");
        return;
    };
    let root = temp_dir("render_seeded");
    write_assets(&root, &font);

    let pipeline = RenderPipeline::new(fixture_config(), &root);
    let a = pipeline.render(&mut Sampler::seeded(77)).unwrap();
    let b = pipeline.render(&mut Sampler::seeded(77)).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn render_to_path_writes_a_decodable_png() {
    let Some(font) = system_font() else {
        eprintln!("skipping: no system font found");
        return;
    };
    let root = temp_dir("render_save");
    write_assets(&root, &font);

    let out = root.join("out/card.png");
    let pipeline = RenderPipeline::new(fixture_config(), &root);
    pipeline
        .render_to_path(&mut Sampler::seeded(3), &out)
        .unwrap();

    let saved = image::open(&out).unwrap();
    assert_eq!(saved.to_rgba8().dimensions(), (1080, 2400));

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn missing_avatar_aborts_with_an_asset_error() {
    // Only the template exists; the avatar load fails before any font or
    // sampling work happens.
    let root = temp_dir("render_missing_avatar");
    std::fs::create_dir_all(root.join("scr")).unwrap();
    let template = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
    DynamicImage::ImageRgba8(template)
        .save(root.join("scr/template.png"))
        .unwrap();

    let config = Configuration {
        avatar: "scr/gone.png".into(),
        ..fixture_config()
    };
    let pipeline = RenderPipeline::new(config, &root);
    let err = pipeline.render(&mut Sampler::seeded(1)).unwrap_err();
    assert!(matches!(err, StridecardError::Asset(_)), "got {err:?}");
    assert!(err.to_string().contains("gone.png"));

    std::fs::remove_dir_all(&root).ok();
}
