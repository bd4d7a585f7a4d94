use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    assets::store::{AssetResolver, AssetSource, FsAssetSource},
    config::RenderConfig,
    dice::request::{RollRequest, footer_text, total, validate},
    dice::roller::{RngRollSource, RollSource, generate},
    encode::serialize::{OutputFormat, serialize},
    foundation::error::{DiceError, DiceResult},
    layout::solver::compute_layout,
    render::compose::compose,
    text::font::{FontResource, Typeface},
};

/// One finished roll: the encoded image and what it shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedRoll {
    /// Complete encoded file in [`RenderedRoll::format`].
    pub bytes: Vec<u8>,
    /// Sum of every roll.
    pub total: u64,
    /// Face values in roll order.
    pub rolls: Vec<u32>,
    pub header: String,
    pub footer: String,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

/// Roll-to-image pipeline: validate, roll, resolve assets, lay out, composite, encode.
///
/// Holds only immutable state, so one renderer can serve many threads. Every call opens its
/// own assets and releases them before returning.
pub struct DiceRenderer {
    config: RenderConfig,
    typeface: Arc<dyn Typeface>,
    source: Arc<dyn AssetSource>,
}

impl std::fmt::Debug for DiceRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiceRenderer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DiceRenderer {
    pub fn new(
        config: RenderConfig,
        typeface: Arc<dyn Typeface>,
        source: Arc<dyn AssetSource>,
    ) -> DiceResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            typeface,
            source,
        })
    }

    /// Load the configured font and read assets from the configured directory.
    pub fn from_config(config: RenderConfig) -> DiceResult<Self> {
        config.validate()?;
        let font = FontResource::load(&config.font_path, config.font_size_px)?;
        let source = FsAssetSource::new(&config.asset_root);
        Self::new(config, Arc::new(font), Arc::new(source))
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Roll `roll_count` dice of `die_type` sides with the thread-local generator and render
    /// the result.
    pub fn roll_and_render(&self, die_type: i64, roll_count: i64) -> DiceResult<RenderedRoll> {
        self.roll_and_render_with(die_type, roll_count, &mut RngRollSource::thread())
    }

    #[tracing::instrument(skip(self, rolls))]
    pub fn roll_and_render_with(
        &self,
        die_type: i64,
        roll_count: i64,
        rolls: &mut dyn RollSource,
    ) -> DiceResult<RenderedRoll> {
        let request = validate(die_type, roll_count)?;
        let values = generate(&request, rolls)?;
        self.render_rolls(&request, &values)
    }

    /// Render rolls that were already drawn. Each value must fit the request's die and there
    /// must be exactly `request.count()` of them.
    #[tracing::instrument(skip(self), fields(die = %request.die()))]
    pub fn render_rolls(&self, request: &RollRequest, rolls: &[u32]) -> DiceResult<RenderedRoll> {
        if rolls.len() != usize::from(request.count()) {
            return Err(DiceError::InvalidRollCount(
                i64::try_from(rolls.len()).unwrap_or(i64::MAX),
            ));
        }
        let die = request.die();
        if let Some(&value) = rolls.iter().find(|&&v| !die.contains(v)) {
            return Err(DiceError::RollOutOfRange { die, value });
        }

        let header = request.header_text();
        let footer = footer_text(rolls);

        let canvas = {
            let assets = AssetResolver::new(self.source.as_ref()).resolve(die, rolls)?;
            let measure = |text: &str| self.typeface.measure(text);
            let layout = compute_layout(
                &self.config.layout,
                request,
                rolls,
                &assets,
                &header,
                &footer,
                &measure,
            )?;
            compose(
                &layout,
                &assets,
                rolls,
                &header,
                &footer,
                self.typeface.as_ref(),
                self.config.text_rgba,
            )?
        };

        let (width, height) = (canvas.width(), canvas.height());
        let bytes = serialize(canvas, self.config.format)?;
        Ok(RenderedRoll {
            bytes,
            total: total(rolls),
            rolls: rolls.to_vec(),
            header,
            footer,
            width,
            height,
            format: self.config.format,
        })
    }

    /// Render independent `(die_type, roll_count)` requests on a dedicated worker pool.
    ///
    /// Results come back in request order. The outer error only reports a pool that could not
    /// be built.
    #[tracing::instrument(skip(self, requests), fields(requests = requests.len()))]
    pub fn render_batch(
        &self,
        requests: &[(i64, i64)],
    ) -> DiceResult<Vec<DiceResult<RenderedRoll>>> {
        let pool = build_thread_pool(self.config.threads)?;
        let results = pool.install(|| {
            requests
                .par_iter()
                .map(|&(die_type, roll_count)| {
                    self.roll_and_render(die_type, roll_count)
                        .inspect_err(|e| {
                            tracing::warn!(die_type, roll_count, error = %e, "roll failed");
                        })
                })
                .collect::<Vec<_>>()
        });
        Ok(results)
    }
}

fn build_thread_pool(threads: Option<usize>) -> DiceResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| DiceError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
