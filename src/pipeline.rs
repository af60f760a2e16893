use std::path::{Path, PathBuf};

use image::RgbaImage;
use rand::Rng;

use crate::assets;
use crate::avatar::make_circular;
use crate::compositor::{Compositor, TextStyle};
use crate::config::Configuration;
use crate::error::StridecardResult;
use crate::sample::Sampler;
use crate::scene::Scene;

/// Font faces shipped alongside the template, resolved against the
/// assets root like every other asset.
const FONT_REGULAR: &str = "fonts/SourceHanSansCN-Regular.otf";
const FONT_DISPLAY: &str = "fonts/QanelasBlack.otf";
const FONT_SEMIBOLD: &str = "fonts/QanelasSemiBold.otf";

const BLACK: [u8; 3] = [0, 0, 0];
const GRAY: [u8; 3] = [155, 155, 155];

/// Renders one summary card: loads assets, samples a scene, issues the
/// fixed draw sequence onto a fresh canvas.
///
/// Every coordinate below is part of the template's visual contract; the
/// reference template is a tall portrait screenshot and the numbers only
/// make sense against it.
pub struct RenderPipeline {
    config: Configuration,
    assets_root: PathBuf,
}

impl RenderPipeline {
    /// `assets_root` anchors the config's relative asset paths (the
    /// config file's directory when running from the CLI).
    pub fn new(config: Configuration, assets_root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            assets_root: assets_root.into(),
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Render one card. The first failing asset or derivation aborts the
    /// whole render; nothing partial is ever returned.
    #[tracing::instrument(skip(self, sampler))]
    pub fn render<R: Rng>(&self, sampler: &mut Sampler<R>) -> StridecardResult<RgbaImage> {
        Ok(self.compose(sampler)?.into_image())
    }

    /// Render and encode to `path` (format by extension).
    pub fn render_to_path<R: Rng>(
        &self,
        sampler: &mut Sampler<R>,
        path: &Path,
    ) -> StridecardResult<()> {
        let comp = self.compose(sampler)?;
        comp.save(path)
    }

    fn compose<R: Rng>(&self, sampler: &mut Sampler<R>) -> StridecardResult<Compositor> {
        let template = assets::load_image(&self.assets_root, &self.config.template)?;
        let mut comp = Compositor::new(template.to_rgba8());

        if !self.config.avatar.as_os_str().is_empty() {
            let photo = assets::load_image(&self.assets_root, &self.config.avatar)?;
            comp.paste(&make_circular(&photo, 100, 100), 40, 250);
        }

        let scene = Scene::generate(&self.config, sampler)?;

        let clock = TextStyle::new(self.font(FONT_REGULAR), 40.0, BLACK);
        let name = TextStyle::new(self.font(FONT_REGULAR), 40.0, BLACK);
        let date_line = TextStyle::new(self.font(FONT_REGULAR), 36.0, GRAY);
        let unit = TextStyle::new(self.font(FONT_REGULAR), 43.0, BLACK);
        let display = TextStyle::new(self.font(FONT_DISPLAY), 180.0, BLACK);
        let semibold = TextStyle::new(self.font(FONT_SEMIBOLD), 65.0, BLACK);

        // Header: status-bar clock, username, date with start/end times.
        comp.draw_text(&scene.end_time.hhmm(), 50, 25, &clock)?;
        comp.draw_text(&self.config.username, 160, 240, &name)?;
        comp.draw_text(&scene.date_line(), 160, 290, &date_line)?;

        // Hero distance and its unit label.
        comp.draw_text(&scene.total_km.to_string(), 50, 485, &display)?;
        comp.draw_text("公里", 418, 610, &unit)?;

        // Metric grid, row by row.
        comp.draw_text(&scene.sport_time.to_string(), 55, 1750, &semibold)?;
        comp.draw_text(&scene.pace, 445, 1750, &semibold)?;
        comp.draw_text(&scene.cost.to_string(), 800, 1750, &semibold)?;
        comp.draw_text(&scene.total_time.to_string(), 55, 1910, &semibold)?;
        comp.draw_text(&scene.cumulative_climb.to_string(), 445, 1910, &semibold)?;
        // Three-digit cadence shifts left to stay on the column grid.
        let cadence_x = if scene.average_cadence.as_f64() > 100.0 {
            780
        } else {
            800
        };
        comp.draw_text(&scene.average_cadence.to_string(), cadence_x, 1910, &semibold)?;
        comp.draw_text(&scene.exercise_load.to_string(), 55, 2070, &semibold)?;

        Ok(comp)
    }

    fn font(&self, rel: &str) -> PathBuf {
        assets::resolve(&self.assets_root, Path::new(rel))
    }
}
