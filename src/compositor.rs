use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    assets::decode::SourceImage,
    encode::output::{EncodedImage, OutputFormat, encode_frame},
    foundation::{
        core::Canvas,
        error::{AdframeError, AdframeResult},
    },
    model::{
        platform::{AspectRatio, CANONICAL_WIDTH, platform_by_id},
        style::StyleVariant,
        text::TextTriple,
    },
    render::{
        cpu::execute_plan,
        frame::{Frame, FrameRGBA},
    },
    style::{
        StylePlan,
        jitter::{MAX_JITTER_BOUND_RAD, entropy_rng, seeded_rng},
        plan_style,
    },
    text::{font::Typeface, shaper::TextShaper},
};

/// Compositor-wide configuration, loadable from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositorSettings {
    /// Output canvas width; height follows from the aspect ratio.
    pub canonical_width: u32,
    pub output: OutputFormat,
    /// Bound of the native-caption background rotation, in radians. At most pi/4.
    pub max_jitter_rad: f64,
    /// Largest drawing surface a single render may allocate.
    pub max_canvas_pixels: u64,
    /// Worker threads for [`Compositor::composite_batch`]. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self {
            canonical_width: CANONICAL_WIDTH,
            output: OutputFormat::default(),
            max_jitter_rad: 0.01,
            max_canvas_pixels: 16_777_216,
            threads: None,
        }
    }
}

impl CompositorSettings {
    pub fn validate(&self) -> AdframeResult<()> {
        if self.canonical_width == 0 {
            return Err(AdframeError::validation("canonical_width must be > 0"));
        }
        if !(0.0..=MAX_JITTER_BOUND_RAD).contains(&self.max_jitter_rad) {
            return Err(AdframeError::validation(format!(
                "max_jitter_rad must be in [0, {MAX_JITTER_BOUND_RAD}], got {}",
                self.max_jitter_rad
            )));
        }
        if self.max_canvas_pixels == 0 {
            return Err(AdframeError::validation("max_canvas_pixels must be > 0"));
        }
        if self.threads == Some(0) {
            return Err(AdframeError::validation("threads must be >= 1 when set"));
        }
        self.output.validate()
    }

    pub fn from_json_str(s: &str) -> AdframeResult<Self> {
        let settings: Self = serde_json::from_str(s)
            .map_err(|e| AdframeError::serde(format!("compositor settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> AdframeResult<Self> {
        use anyhow::Context as _;
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

/// Per-call options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Seed for the native-caption jitter. Without one, every call draws fresh entropy.
    pub seed: Option<u64>,
}

impl RenderOptions {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

/// Turns a source image plus ad copy into a finished creative.
///
/// Holds only immutable configuration, so one instance can serve concurrent calls. Each call
/// builds its own text shaper, drawing surface and random source.
#[derive(Clone, Debug)]
pub struct Compositor {
    typeface: Typeface,
    settings: CompositorSettings,
}

impl Compositor {
    pub fn new(typeface: Typeface, settings: CompositorSettings) -> AdframeResult<Self> {
        settings.validate()?;
        Ok(Self { typeface, settings })
    }

    /// Compositor using [`Typeface::system_sans`].
    pub fn with_system_font(settings: CompositorSettings) -> AdframeResult<Self> {
        Self::new(Typeface::system_sans()?, settings)
    }

    pub fn settings(&self) -> &CompositorSettings {
        &self.settings
    }

    pub fn typeface(&self) -> &Typeface {
        &self.typeface
    }

    /// Canvas for `ratio` at the configured canonical width. Never depends on the source image.
    pub fn canvas_for(&self, ratio: AspectRatio) -> AdframeResult<Canvas> {
        ratio.canvas(self.settings.canonical_width)
    }

    /// Plan `style` without drawing anything.
    pub fn plan(
        &self,
        text: &TextTriple,
        style: StyleVariant,
        ratio: AspectRatio,
        rng: &mut dyn rand::RngCore,
    ) -> AdframeResult<StylePlan> {
        let canvas = self.canvas_for(ratio)?;
        let mut shaper = TextShaper::new(&self.typeface)?;
        Ok(plan_style(
            style,
            text,
            canvas,
            &mut shaper,
            rng,
            self.settings.max_jitter_rad,
        ))
    }

    /// Render the premultiplied frame without encoding it.
    #[tracing::instrument(skip(self, source, text, rng), fields(canvas))]
    pub fn render_frame(
        &self,
        source: &SourceImage,
        text: &TextTriple,
        style: StyleVariant,
        ratio: AspectRatio,
        rng: &mut dyn rand::RngCore,
    ) -> AdframeResult<FrameRGBA> {
        let canvas = self.canvas_for(ratio)?;
        tracing::Span::current().record(
            "canvas",
            tracing::field::display(format!("{}x{}", canvas.width, canvas.height)),
        );

        let mut frame = Frame::acquire(canvas, self.settings.max_canvas_pixels)?;
        let mut shaper = TextShaper::new(&self.typeface)?;
        let plan = plan_style(
            style,
            text,
            canvas,
            &mut shaper,
            rng,
            self.settings.max_jitter_rad,
        );
        execute_plan(&mut frame, source, &plan, &mut shaper)?;
        Ok(frame.readback())
    }

    /// [`Compositor::composite`] with an explicit random source.
    pub fn composite_with_rng(
        &self,
        source: &SourceImage,
        text: &TextTriple,
        style: StyleVariant,
        ratio: AspectRatio,
        rng: &mut dyn rand::RngCore,
    ) -> AdframeResult<EncodedImage> {
        let frame = self.render_frame(source, text, style, ratio, rng)?;
        encode_frame(&frame, self.settings.output)
    }

    /// Cover-fit `source` to `ratio`, draw `text` in `style` and encode the result.
    #[tracing::instrument(skip(self, source, text))]
    pub fn composite(
        &self,
        source: &SourceImage,
        text: &TextTriple,
        style: StyleVariant,
        ratio: AspectRatio,
        options: &RenderOptions,
    ) -> AdframeResult<EncodedImage> {
        let mut rng = match options.seed {
            Some(seed) => seeded_rng(seed),
            None => entropy_rng(),
        };
        let encoded = self.composite_with_rng(source, text, style, ratio, &mut rng)?;
        tracing::debug!(bytes = encoded.bytes.len(), "encoded creative");
        Ok(encoded)
    }

    /// Composite several copy variants over one source image in parallel.
    ///
    /// Results keep the order of `texts`. With a seed, item `i` uses `seed + i`.
    #[tracing::instrument(skip(self, source, texts), fields(items = texts.len()))]
    pub fn composite_batch(
        &self,
        source: &SourceImage,
        texts: &[TextTriple],
        style: StyleVariant,
        ratio: AspectRatio,
        options: &RenderOptions,
    ) -> AdframeResult<Vec<EncodedImage>> {
        let pool = build_thread_pool(self.settings.threads)?;
        pool.install(|| {
            texts
                .par_iter()
                .enumerate()
                .map(|(i, text)| {
                    let item = RenderOptions {
                        seed: options.seed.map(|s| s.wrapping_add(i as u64)),
                    };
                    self.composite(source, text, style, ratio, &item)
                })
                .collect::<AdframeResult<Vec<_>>>()
        })
    }

    /// Run one [`CompositeRequest`]. Relative image paths resolve against `base_dir`.
    pub fn run_request(
        &self,
        request: &CompositeRequest,
        base_dir: Option<&Path>,
    ) -> AdframeResult<EncodedImage> {
        let source = request.load_source(base_dir)?;
        let ratio = request.resolve_aspect_ratio()?;
        self.composite(
            &source,
            &request.text,
            request.style,
            ratio,
            &request.options(),
        )
    }
}

fn build_thread_pool(threads: Option<usize>) -> AdframeResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| AdframeError::validation(format!("failed to build rayon thread pool: {e}")))
}

/// One compositing job as JSON.
///
/// ```json
/// {
///   "image": "base.png",
///   "text": { "hook": "Big Sale", "keyMessages": "", "cta": "Shop Now" },
///   "style": "polished",
///   "platform": "instagram_post",
///   "seed": 7
/// }
/// ```
///
/// `image` is a file path or a base64 data URI. Exactly one of `platform` and `aspectRatio`
/// (`"W:H"`) must be given.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompositeRequest {
    pub image: String,
    #[serde(default)]
    pub text: TextTriple,
    pub style: StyleVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl CompositeRequest {
    pub fn from_json_str(s: &str) -> AdframeResult<Self> {
        serde_json::from_str(s).map_err(|e| AdframeError::serde(format!("composite request: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> AdframeResult<Self> {
        use anyhow::Context as _;
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read request '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn resolve_aspect_ratio(&self) -> AdframeResult<AspectRatio> {
        match (&self.platform, self.aspect_ratio) {
            (Some(id), None) => Ok(platform_by_id(id)?.aspect_ratio),
            (None, Some(ratio)) => Ok(ratio),
            (Some(_), Some(_)) => Err(AdframeError::validation(
                "request sets both 'platform' and 'aspectRatio'",
            )),
            (None, None) => Err(AdframeError::validation(
                "request needs a 'platform' or an 'aspectRatio'",
            )),
        }
    }

    pub fn options(&self) -> RenderOptions {
        RenderOptions { seed: self.seed }
    }

    pub fn load_source(&self, base_dir: Option<&Path>) -> AdframeResult<SourceImage> {
        if self.image.trim_start().starts_with("data:") {
            return SourceImage::from_data_uri(&self.image);
        }
        let path = PathBuf::from(&self.image);
        match base_dir {
            Some(dir) if path.is_relative() => SourceImage::open(dir.join(path)),
            _ => SourceImage::open(path),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/compositor.rs"]
mod tests;
